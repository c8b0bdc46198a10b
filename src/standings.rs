//! League tables.
//!
//! Standings are recomputed from scratch on every call: one accumulator per
//! team, every finished match folded in, then a stable sort on
//! league points, point differential and points scored.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::model::{Match, Team, TeamId};
use crate::rules::PointsRule;

/// One team's line in a league table.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub name: String,
    pub logo_url: Option<String>,
    pub played: i32,
    pub won: i32,
    pub lost: i32,
    /// Losses by forfeit, which earn no league points
    pub walkover_losses: i32,
    pub points_for: i32,
    pub points_against: i32,
    pub diff: i32,
    pub league_points: i32,
    /// 1-based position in the table
    pub rank: usize,
}

impl StandingRow {
    fn empty(team: &Team) -> Self {
        StandingRow {
            team_id: team.id.clone(),
            name: team.name.clone(),
            logo_url: team.logo_url.clone(),
            ..Default::default()
        }
    }

    fn record_score(&mut self, scored: i32, conceded: i32) {
        self.played = self.played.saturating_add(1);
        self.points_for = self.points_for.saturating_add(scored);
        self.points_against = self.points_against.saturating_add(conceded);
    }

    fn record_win(&mut self, rule: &PointsRule) {
        self.won = self.won.saturating_add(1);
        self.league_points = self.league_points.saturating_add(rule.win);
    }

    fn record_loss(&mut self, rule: &PointsRule, walkover: bool) {
        self.lost = self.lost.saturating_add(1);
        self.league_points = self.league_points.saturating_add(rule.for_loss(walkover));
        if walkover {
            self.walkover_losses = self.walkover_losses.saturating_add(1);
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl StandingRow {
    fn __repr__(&self) -> String {
        format!(
            "StandingRow({}. {}, pts={}, {}-{}, diff={})",
            self.rank, self.name, self.league_points, self.won, self.lost, self.diff
        )
    }
}

/// Ranked table for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStandings {
    pub category: String,
    pub rows: Vec<StandingRow>,
}

/// Table ordering: league points, then point differential, then points scored,
/// all descending.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.league_points
        .cmp(&a.league_points)
        .then_with(|| b.diff.cmp(&a.diff))
        .then_with(|| b.points_for.cmp(&a.points_for))
}

/// Compute the ranked table for `teams` from `matches`.
///
/// Only finished matches count, and only when both sides are in `teams`.
/// The result has exactly one row per team, in table order; rows that compare
/// equal keep their input order.
pub fn compute_standings(teams: &[Team], matches: &[Match], rule: &PointsRule) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = Vec::with_capacity(teams.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(teams.len());
    for team in teams {
        // a repeated team id keeps its first row
        if !index.contains_key(team.id.as_str()) {
            index.insert(team.id.as_str(), rows.len());
            rows.push(StandingRow::empty(team));
        }
    }

    for m in matches.iter().filter(|m| m.is_finished()) {
        let (home, away) = match (
            index.get(m.home_team_id.as_str()),
            index.get(m.away_team_id.as_str()),
        ) {
            (Some(&h), Some(&a)) if h != a => (h, a),
            _ => {
                debug!(
                    "skipping match {}: {} vs {} not both in table",
                    m.id, m.home_team_id, m.away_team_id
                );
                continue;
            }
        };

        rows[home].record_score(m.home_score, m.away_score);
        rows[away].record_score(m.away_score, m.home_score);

        match m.home_score.cmp(&m.away_score) {
            Ordering::Greater => {
                rows[home].record_win(rule);
                rows[away].record_loss(rule, m.is_walkover);
            }
            Ordering::Less => {
                rows[away].record_win(rule);
                rows[home].record_loss(rule, m.is_walkover);
            }
            Ordering::Equal => {}
        }
    }

    for row in rows.iter_mut() {
        row.diff = row.points_for.saturating_sub(row.points_against);
    }

    rows.sort_by(compare_rows);
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    rows
}

/// Table for a single category of a league.
pub fn category_standings(
    teams: &[Team],
    matches: &[Match],
    category: &str,
    rule: &PointsRule,
) -> Vec<StandingRow> {
    let teams: Vec<Team> = teams.iter().filter(|t| t.category == category).cloned().collect();
    let matches: Vec<Match> = matches.iter().filter(|m| m.category == category).cloned().collect();
    compute_standings(&teams, &matches, rule)
}

/// Every non-empty category label used by the teams or matches, sorted.
pub fn categories(teams: &[Team], matches: &[Match]) -> Vec<String> {
    let labels: BTreeSet<&str> = teams
        .iter()
        .map(|t| t.category.as_str())
        .chain(matches.iter().map(|m| m.category.as_str()))
        .filter(|c| !c.is_empty())
        .collect();
    labels.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::matches_from_json;

    fn make_teams(ids: &[&str]) -> Vec<Team> {
        ids.iter()
            .map(|id| Team::new(id, &format!("Team {}", id), "Primera", "l1"))
            .collect()
    }

    fn walkover(id: &str, home: &str, away: &str, home_score: i32, away_score: i32) -> Match {
        let mut m = Match::scheduled(id, "Primera", home, away);
        m.finish(home_score, away_score, true);
        m
    }

    fn row<'a>(rows: &'a [StandingRow], id: &str) -> &'a StandingRow {
        rows.iter().find(|r| r.team_id == id).unwrap()
    }

    #[test]
    fn test_empty_teams() {
        let matches = vec![Match::finished("m1", "Primera", "a", "b", 80, 70)];
        assert!(compute_standings(&[], &matches, &PointsRule::default()).is_empty());
    }

    #[test]
    fn test_decisive_win() {
        let teams = make_teams(&["a", "b"]);
        let matches = vec![Match::finished("m1", "Primera", "a", "b", 80, 70)];
        let rows = compute_standings(&teams, &matches, &PointsRule::default());

        let home = row(&rows, "a");
        assert_eq!((home.played, home.won, home.lost), (1, 1, 0));
        assert_eq!(home.league_points, 2);
        assert_eq!(home.diff, 10);
        assert_eq!(home.rank, 1);

        let away = row(&rows, "b");
        assert_eq!((away.played, away.won, away.lost), (1, 0, 1));
        assert_eq!(away.league_points, 1);
        assert_eq!(away.diff, -10);
        assert_eq!(away.walkover_losses, 0);
        assert_eq!(away.rank, 2);
    }

    #[test]
    fn test_walkover_loss_earns_nothing() {
        let teams = make_teams(&["a", "b"]);
        let matches = vec![walkover("m1", "a", "b", 70, 0)];
        let rows = compute_standings(&teams, &matches, &PointsRule::default());

        assert_eq!(row(&rows, "a").league_points, 2);
        let away = row(&rows, "b");
        assert_eq!(away.league_points, 0);
        assert_eq!(away.lost, 1);
        assert_eq!(away.walkover_losses, 1);
    }

    #[test]
    fn test_away_walkover_win() {
        let teams = make_teams(&["a", "b"]);
        let matches = vec![walkover("m1", "a", "b", 0, 20)];
        let rows = compute_standings(&teams, &matches, &PointsRule::default());

        assert_eq!(rows[0].team_id, "b");
        assert_eq!(rows[0].league_points, 2);
        assert_eq!(row(&rows, "a").walkover_losses, 1);
        assert_eq!(row(&rows, "a").league_points, 0);
    }

    #[test]
    fn test_tie_counts_only_as_played() {
        let teams = make_teams(&["a", "b"]);
        let matches = vec![Match::finished("m1", "Primera", "a", "b", 60, 60)];
        let rows = compute_standings(&teams, &matches, &PointsRule::default());

        for r in &rows {
            assert_eq!(r.played, 1);
            assert_eq!((r.won, r.lost, r.league_points, r.diff), (0, 0, 0, 0));
            assert_eq!(r.points_for, 60);
        }
    }

    #[test]
    fn test_scheduled_and_unknown_matches_skipped() {
        let teams = make_teams(&["a", "b", "c"]);
        let matches = vec![
            Match::scheduled("m1", "Primera", "a", "b"),
            Match::finished("m2", "Primera", "a", "ghost", 90, 10),
            Match::finished("m3", "Primera", "ghost", "other", 90, 10),
            Match::finished("m4", "Primera", "a", "a", 90, 10),
        ];
        let rows = compute_standings(&teams, &matches, &PointsRule::default());

        assert_eq!(rows.len(), 3);
        for r in &rows {
            assert_eq!((r.played, r.league_points, r.diff), (0, 0, 0));
        }
        // untouched teams stay in input order
        let order: Vec<&str> = rows.iter().map(|r| r.team_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_points_for_breaks_ties() {
        let teams = make_teams(&["a", "b", "c", "d"]);
        // a and c: one win each by 10, a scored 75, c scored 80
        let matches = vec![
            Match::finished("m1", "Primera", "a", "b", 75, 65),
            Match::finished("m2", "Primera", "c", "d", 80, 70),
        ];
        let rows = compute_standings(&teams, &matches, &PointsRule::default());
        assert_eq!(rows[0].team_id, "c");
        assert_eq!(rows[1].team_id, "a");
        assert_eq!(rows[0].league_points, rows[1].league_points);
        assert_eq!(rows[0].diff, rows[1].diff);
    }

    #[test]
    fn test_diff_breaks_points_ties() {
        let teams = make_teams(&["a", "b", "c", "d"]);
        let matches = vec![
            Match::finished("m1", "Primera", "a", "b", 70, 69),
            Match::finished("m2", "Primera", "c", "d", 60, 40),
        ];
        let rows = compute_standings(&teams, &matches, &PointsRule::default());
        let order: Vec<&str> = rows.iter().map(|r| r.team_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_oversized_scores_saturate() {
        let teams = make_teams(&["a", "b"]);
        let matches = matches_from_json(
            r#"[{"id": "m1", "home_team_id": "a", "away_team_id": "b",
                 "home_score": "99999999999", "away_score": 10, "status": "finished"},
                {"id": "m2", "home_team_id": "a", "away_team_id": "b",
                 "home_score": "99999999999", "away_score": 10, "status": "finished"}]"#,
        )
        .unwrap();
        let rows = compute_standings(&teams, &matches, &PointsRule::default());

        let home = row(&rows, "a");
        assert_eq!((home.won, home.league_points), (2, 4));
        assert_eq!(home.points_for, i32::MAX);
        assert_eq!(home.diff, i32::MAX - 20);
        let away = row(&rows, "b");
        assert_eq!(away.points_against, i32::MAX);
        assert_eq!(away.diff, 20 - i32::MAX);
    }

    #[test]
    fn test_custom_rule() {
        let teams = make_teams(&["a", "b"]);
        let matches = vec![Match::finished("m1", "Primera", "a", "b", 80, 70)];
        let rule = PointsRule::new(3, 0, 0).unwrap();
        let rows = compute_standings(&teams, &matches, &rule);
        assert_eq!(row(&rows, "a").league_points, 3);
        assert_eq!(row(&rows, "b").league_points, 0);
    }

    #[test]
    fn test_category_standings_filters() {
        let mut teams = make_teams(&["a", "b"]);
        teams.push(Team::new("y", "Youth", "Sub-20", "l1"));
        let matches = vec![
            Match::finished("m1", "Primera", "a", "b", 80, 70),
            Match::finished("m2", "Sub-20", "y", "a", 50, 40),
        ];
        let rows = category_standings(&teams, &matches, "Primera", &PointsRule::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(row(&rows, "a").played, 1);

        let youth = category_standings(&teams, &matches, "Sub-20", &PointsRule::default());
        assert_eq!(youth.len(), 1);
        assert_eq!(youth[0].played, 0);
    }

    #[test]
    fn test_categories_sorted_and_unique() {
        let teams = vec![
            Team::new("a", "A", "Sub-20", "l1"),
            Team::new("b", "B", "Primera División", "l1"),
            Team::new("c", "C", "", "l1"),
        ];
        let matches = vec![
            Match::scheduled("m1", "Sub-20", "a", "a2"),
            Match::scheduled("m2", "Maxi", "x", "y"),
        ];
        assert_eq!(categories(&teams, &matches), vec!["Maxi", "Primera División", "Sub-20"]);
    }
}
