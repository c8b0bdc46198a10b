//! League Core - standings and box-score engine for a regional basketball league.
//!
//! Pure functions that turn match results and player stat lines into league
//! tables, box scores and season aggregates, with optional Python bindings
//! via PyO3 (feature `python`).

pub mod box_score;
pub mod constants;
pub mod error;
pub mod league;
pub mod lenient;
pub mod model;
pub mod roster;
pub mod rules;
pub mod standings;
pub mod store;

pub use box_score::{
    game_log, match_box_score, season_aggregate, season_aggregates, GameLogEntry, MatchBoxScore,
    SeasonAggregate, ShootingSplit, TeamTotals,
};
pub use constants::{POINTS_FOR_LOSS, POINTS_FOR_WALKOVER_LOSS, POINTS_FOR_WIN};
pub use error::{LeagueError, Result};
pub use league::{
    league_report, match_report, match_rosters, player_report, standings_by_category, PlayerReport,
};
pub use model::{line_points, Match, MatchStatus, StatLine, Team};
pub use roster::{current_assignment, resolve_roster, RosterEntry};
pub use rules::PointsRule;
pub use standings::{
    categories, category_standings, compute_standings, CategoryStandings, StandingRow,
};
pub use store::{LeagueStore, MemoryStore, Snapshot};

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;

    use crate::box_score::{season_aggregate, SeasonAggregate, ShootingSplit};
    use crate::model::{
        line_points, matches_from_json, stat_lines_from_json, teams_from_json, StatLine,
    };
    use crate::rules::PointsRule;
    use crate::standings::{categories, category_standings, compute_standings, StandingRow};

    fn rule_or_default(rule_json: Option<&str>) -> crate::Result<PointsRule> {
        match rule_json {
            Some(json) => PointsRule::from_json(json),
            None => Ok(PointsRule::default()),
        }
    }

    /// Points from made shots: 2 per two-pointer, 3 per three, 1 per free throw.
    #[pyfunction]
    #[pyo3(
        name = "line_points",
        signature = (two_points_made = 0, three_points_made = 0, free_throws_made = 0)
    )]
    fn py_line_points(two_points_made: i32, three_points_made: i32, free_throws_made: i32) -> i32 {
        line_points(two_points_made, three_points_made, free_throws_made)
    }

    /// Ranked standings from JSON team and match rows.
    ///
    /// With `category` set, only that category's teams and matches are used.
    #[pyfunction]
    #[pyo3(
        name = "standings_from_json",
        signature = (teams_json, matches_json, category = None, rule_json = None)
    )]
    fn py_standings_from_json(
        teams_json: &str,
        matches_json: &str,
        category: Option<&str>,
        rule_json: Option<&str>,
    ) -> PyResult<Vec<StandingRow>> {
        let teams = teams_from_json(teams_json)?;
        let matches = matches_from_json(matches_json)?;
        let rule = rule_or_default(rule_json)?;
        Ok(match category {
            Some(c) => category_standings(&teams, &matches, c, &rule),
            None => compute_standings(&teams, &matches, &rule),
        })
    }

    #[pyfunction]
    #[pyo3(name = "categories_from_json")]
    fn py_categories_from_json(teams_json: &str, matches_json: &str) -> PyResult<Vec<String>> {
        let teams = teams_from_json(teams_json)?;
        let matches = matches_from_json(matches_json)?;
        Ok(categories(&teams, &matches))
    }

    /// Season aggregate from a player's JSON stat lines.
    #[pyfunction]
    #[pyo3(name = "season_aggregate_from_json")]
    fn py_season_aggregate_from_json(
        player_id: &str,
        lines_json: &str,
    ) -> PyResult<SeasonAggregate> {
        let lines = stat_lines_from_json(lines_json)?;
        Ok(season_aggregate(player_id, &lines))
    }

    /// Normalize a submitted stat line: defaults applied, points recomputed.
    /// Returns the line as JSON ready to upsert.
    #[pyfunction]
    #[pyo3(name = "normalize_stat_line")]
    fn py_normalize_stat_line(line_json: &str) -> PyResult<String> {
        let line = StatLine::from_submission(line_json)?;
        Ok(serde_json::to_string(&line).map_err(crate::LeagueError::from)?)
    }

    /// Python module definition
    #[pymodule]
    fn league_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Classes
        m.add_class::<StandingRow>()?;
        m.add_class::<SeasonAggregate>()?;
        m.add_class::<ShootingSplit>()?;

        // Functions
        m.add_function(wrap_pyfunction!(py_line_points, m)?)?;
        m.add_function(wrap_pyfunction!(py_standings_from_json, m)?)?;
        m.add_function(wrap_pyfunction!(py_categories_from_json, m)?)?;
        m.add_function(wrap_pyfunction!(py_season_aggregate_from_json, m)?)?;
        m.add_function(wrap_pyfunction!(py_normalize_stat_line, m)?)?;

        // Constants
        m.add("POINTS_FOR_WIN", crate::POINTS_FOR_WIN)?;
        m.add("POINTS_FOR_LOSS", crate::POINTS_FOR_LOSS)?;
        m.add("POINTS_FOR_WALKOVER_LOSS", crate::POINTS_FOR_WALKOVER_LOSS)?;

        Ok(())
    }
}
