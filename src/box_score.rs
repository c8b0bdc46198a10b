//! Box scores, game logs and season aggregates built from stat lines.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

use crate::model::{Match, MatchId, PlayerId, StatLine, TeamId};

/// Round half up to one decimal place (-0.25 becomes -0.2).
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Saturating sum of one field over a set of lines.
fn total<'a, I>(lines: I, pick: fn(&StatLine) -> i32) -> i32
where
    I: IntoIterator<Item = &'a StatLine>,
{
    lines.into_iter().map(pick).fold(0, i32::saturating_add)
}

/// `total / count` rounded to one decimal, 0.0 when `count` is zero.
fn per_game(total: i32, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round1(total as f64 / count as f64)
}

/// Made/attempted totals for one shot type.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShootingSplit {
    pub made: i32,
    pub attempted: i32,
    /// Make percentage rounded to one decimal, 0.0 with no attempts
    pub percentage: f64,
}

impl ShootingSplit {
    pub fn new(made: i32, attempted: i32) -> Self {
        let percentage = if attempted == 0 {
            0.0
        } else {
            round1(100.0 * made as f64 / attempted as f64)
        };
        ShootingSplit {
            made,
            attempted,
            percentage,
        }
    }

    fn sum<'a, I>(lines: I, pick: fn(&StatLine) -> (i32, i32)) -> Self
    where
        I: IntoIterator<Item = &'a StatLine>,
    {
        let (made, attempted) = lines
            .into_iter()
            .map(pick)
            .fold((0i32, 0i32), |(m, a), (dm, da)| (m.saturating_add(dm), a.saturating_add(da)));
        Self::new(made, attempted)
    }
}

impl fmt::Display for ShootingSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.made, self.attempted, self.percentage)
    }
}

fn two_pointers(l: &StatLine) -> (i32, i32) {
    (l.two_points_made, l.two_points_attempted)
}

fn three_pointers(l: &StatLine) -> (i32, i32) {
    (l.three_points_made, l.three_points_attempted)
}

fn free_throws(l: &StatLine) -> (i32, i32) {
    (l.free_throws_made, l.free_throws_attempted)
}

/// A player's per-game averages and shooting over a set of match lines.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonAggregate {
    pub player_id: PlayerId,
    pub games: usize,
    pub points_per_game: f64,
    pub rebounds_per_game: f64,
    pub assists_per_game: f64,
    pub two_points: ShootingSplit,
    pub three_points: ShootingSplit,
    pub free_throws: ShootingSplit,
}

#[cfg(feature = "python")]
#[pymethods]
impl SeasonAggregate {
    fn __repr__(&self) -> String {
        format!(
            "SeasonAggregate({}, games={}, ppg={:.1}, rpg={:.1}, apg={:.1})",
            self.player_id,
            self.games,
            self.points_per_game,
            self.rebounds_per_game,
            self.assists_per_game
        )
    }
}

/// Aggregate all of one player's lines (one per match).
///
/// Points per game is taken from each line's stored `points`, which the
/// writer keeps equal to [`StatLine::computed_points`].
pub fn season_aggregate(player_id: &str, lines: &[StatLine]) -> SeasonAggregate {
    let games = lines.len();
    let points = total(lines, |l| l.points);
    let rebounds = total(lines, |l| l.rebounds);
    let assists = total(lines, |l| l.assists);

    SeasonAggregate {
        player_id: player_id.to_string(),
        games,
        points_per_game: per_game(points, games),
        rebounds_per_game: per_game(rebounds, games),
        assists_per_game: per_game(assists, games),
        two_points: ShootingSplit::sum(lines, two_pointers),
        three_points: ShootingSplit::sum(lines, three_pointers),
        free_throws: ShootingSplit::sum(lines, free_throws),
    }
}

/// Aggregates for every player that appears in `lines`, ordered by player id.
pub fn season_aggregates(lines: &[StatLine]) -> Vec<SeasonAggregate> {
    let mut by_player: HashMap<&str, Vec<StatLine>> = HashMap::new();
    for line in lines {
        by_player.entry(line.player_id.as_str()).or_default().push(line.clone());
    }
    let mut aggregates: Vec<SeasonAggregate> = by_player
        .into_iter()
        .map(|(player, lines)| season_aggregate(player, &lines))
        .collect();
    aggregates.sort_by(|a, b| a.player_id.cmp(&b.player_id));
    aggregates
}

/// One row of a player's game-by-game log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameLogEntry {
    pub match_date: Option<DateTime<Utc>>,
    pub opponent_id: Option<TeamId>,
    pub line: StatLine,
}

/// Join lines to their matches and order them newest first.
///
/// Lines whose match is unknown or undated go last, keeping their input order.
pub fn game_log(lines: &[StatLine], matches: &[Match]) -> Vec<GameLogEntry> {
    let by_id: HashMap<&str, &Match> = matches.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut entries: Vec<GameLogEntry> = lines
        .iter()
        .map(|line| {
            let m = by_id.get(line.match_id.as_str());
            GameLogEntry {
                match_date: m.and_then(|m| m.match_date),
                opponent_id: m.and_then(|m| m.opponent_of(&line.team_id)).cloned(),
                line: line.clone(),
            }
        })
        .collect();

    // None < Some(_), so reversing puts undated entries last
    entries.sort_by_key(|e| Reverse(e.match_date));
    entries
}

/// Summed box score for one side of a match.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub points: i32,
    pub rebounds: i32,
    pub assists: i32,
    pub steals: i32,
    pub blocks: i32,
    pub turnovers: i32,
    pub fouls: i32,
    pub two_points: ShootingSplit,
    pub three_points: ShootingSplit,
    pub free_throws: ShootingSplit,
}

impl TeamTotals {
    pub fn from_lines(lines: &[StatLine]) -> Self {
        TeamTotals {
            points: total(lines, |l| l.points),
            rebounds: total(lines, |l| l.rebounds),
            assists: total(lines, |l| l.assists),
            steals: total(lines, |l| l.steals),
            blocks: total(lines, |l| l.blocks),
            turnovers: total(lines, |l| l.turnovers),
            fouls: total(lines, |l| l.fouls),
            two_points: ShootingSplit::sum(lines, two_pointers),
            three_points: ShootingSplit::sum(lines, three_pointers),
            free_throws: ShootingSplit::sum(lines, free_throws),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchBoxScore {
    pub match_id: MatchId,
    pub home: Vec<StatLine>,
    pub away: Vec<StatLine>,
    pub home_totals: TeamTotals,
    pub away_totals: TeamTotals,
}

/// Split a match's lines into home and away, top scorers first.
pub fn match_box_score(m: &Match, lines: &[StatLine]) -> MatchBoxScore {
    let mut sorted: Vec<&StatLine> = lines.iter().filter(|l| l.match_id == m.id).collect();
    sorted.sort_by_key(|l| Reverse(l.points));

    let side = |team: &str| -> Vec<StatLine> {
        sorted
            .iter()
            .filter(|l| l.team_id == team)
            .map(|&l| l.clone())
            .collect()
    };
    let home = side(&m.home_team_id);
    let away = side(&m.away_team_id);

    MatchBoxScore {
        match_id: m.id.clone(),
        home_totals: TeamTotals::from_lines(&home),
        away_totals: TeamTotals::from_lines(&away),
        home,
        away,
    }
}
