use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::box_score::{
    game_log, match_box_score, season_aggregate, GameLogEntry, MatchBoxScore, SeasonAggregate,
};
use crate::error::{LeagueError, Result};
use crate::model::{Match, StatLine, Team};
use crate::roster::{resolve_roster, RosterEntry};
use crate::rules::PointsRule;
use crate::standings::{categories, category_standings, CategoryStandings};
use crate::store::LeagueStore;

/// Standings for every category of a league, categories in label order.
pub fn league_report<S: LeagueStore + ?Sized>(
    store: &S,
    league_id: &str,
    rule: &PointsRule,
) -> Result<Vec<CategoryStandings>> {
    let teams = store.teams(league_id)?;
    let matches = store.matches(league_id, true)?;
    Ok(standings_by_category(&teams, &matches, rule))
}

/// Compute each category's table independently, in parallel.
pub fn standings_by_category(
    teams: &[Team],
    matches: &[Match],
    rule: &PointsRule,
) -> Vec<CategoryStandings> {
    let labels = categories(teams, matches);
    debug!("computing standings for {} categories", labels.len());

    labels
        .into_par_iter()
        .map(|category| {
            let rows = category_standings(teams, matches, &category, rule);
            CategoryStandings { category, rows }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub aggregate: SeasonAggregate,
    pub game_log: Vec<GameLogEntry>,
}

/// Season aggregate and game log for a player within one league.
///
/// Only lines from finished matches of the league count; lines recorded
/// against a match that is still scheduled are left out.
pub fn player_report<S: LeagueStore + ?Sized>(
    store: &S,
    league_id: &str,
    player_id: &str,
) -> Result<PlayerReport> {
    let matches = store.matches(league_id, true)?;
    let lines: Vec<StatLine> = store
        .stat_lines_for_player(player_id)?
        .into_iter()
        .filter(|l| matches.iter().any(|m| m.id == l.match_id))
        .collect();

    Ok(PlayerReport {
        aggregate: season_aggregate(player_id, &lines),
        game_log: game_log(&lines, &matches),
    })
}

/// Box score for a finished match.
pub fn match_report<S: LeagueStore + ?Sized>(
    store: &S,
    league_id: &str,
    match_id: &str,
) -> Result<MatchBoxScore> {
    let matches = store.matches(league_id, false)?;
    let m = matches.iter().find(|m| m.id == match_id).ok_or_else(|| {
        LeagueError::Store(format!("match {} not found in league {}", match_id, league_id))
    })?;

    if !m.is_finished() {
        warn!("box score requested for unfinished match {}", match_id);
    }
    let lines = store.stat_lines_for_match(match_id)?;
    Ok(match_box_score(m, &lines))
}

/// Home and away rosters for recording a match's stats.
pub fn match_rosters<S: LeagueStore + ?Sized>(
    store: &S,
    m: &Match,
    season: Option<&str>,
) -> Result<(Vec<RosterEntry>, Vec<RosterEntry>)> {
    let home = resolve_roster(&store.roster_entries(&m.home_team_id)?, &m.home_team_id, season);
    let away = resolve_roster(&store.roster_entries(&m.away_team_id)?, &m.away_team_id, season);
    Ok((home, away))
}
