//! Input records as they come out of the league database.
//!
//! Field names match the database columns, so rows can be decoded straight
//! from the JSON the store returns. Missing or loosely typed values are
//! defaulted here (see [`crate::lenient`]) and nowhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FREE_THROW_VALUE, THREE_POINT_VALUE, TWO_POINT_VALUE};
use crate::error::Result;
use crate::lenient;

pub type TeamId = String;
pub type MatchId = String;
pub type PlayerId = String;
pub type LeagueId = String;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(deserialize_with = "lenient::id")]
    pub id: TeamId,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    /// Free-text skill or age division, e.g. "Sub-20"
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub league_id: LeagueId,

    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Team {
    pub fn new(id: &str, name: &str, category: &str, league_id: &str) -> Self {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            league_id: league_id.to_string(),
            logo_url: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(deserialize_with = "lenient::id")]
    pub id: MatchId,

    #[serde(default, deserialize_with = "lenient::text")]
    pub league_id: LeagueId,

    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,

    #[serde(deserialize_with = "lenient::id")]
    pub home_team_id: TeamId,

    #[serde(deserialize_with = "lenient::id")]
    pub away_team_id: TeamId,

    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub match_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient::int")]
    pub home_score: i32,

    #[serde(default, deserialize_with = "lenient::int")]
    pub away_score: i32,

    #[serde(default)]
    pub status: MatchStatus,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_walkover: bool,

    #[serde(default, deserialize_with = "lenient::optional_id")]
    pub winner_id: Option<TeamId>,
}

impl Match {
    /// A scheduled fixture with no result.
    pub fn scheduled(id: &str, category: &str, home: &str, away: &str) -> Self {
        Match {
            id: id.to_string(),
            league_id: String::new(),
            category: category.to_string(),
            home_team_id: home.to_string(),
            away_team_id: away.to_string(),
            match_date: None,
            home_score: 0,
            away_score: 0,
            status: MatchStatus::Scheduled,
            is_walkover: false,
            winner_id: None,
        }
    }

    /// A finished match with its final score.
    pub fn finished(
        id: &str,
        category: &str,
        home: &str,
        away: &str,
        home_score: i32,
        away_score: i32,
    ) -> Self {
        let mut m = Self::scheduled(id, category, home, away);
        m.finish(home_score, away_score, false);
        m
    }

    /// Record a result. The transition is one way; there is no way back to
    /// `Scheduled`.
    pub fn finish(&mut self, home_score: i32, away_score: i32, is_walkover: bool) {
        self.status = MatchStatus::Finished;
        self.home_score = home_score;
        self.away_score = away_score;
        self.is_walkover = is_walkover;
        self.winner_id = self.resolved_winner().cloned();
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.match_date = Some(date);
        self
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Winner by strictly greater score. Ties and unplayed matches have none.
    pub fn resolved_winner(&self) -> Option<&TeamId> {
        if !self.is_finished() {
            return None;
        }
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(&self.home_team_id),
            std::cmp::Ordering::Less => Some(&self.away_team_id),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The other side of the match from `team_id`, if `team_id` played in it.
    pub fn opponent_of(&self, team_id: &str) -> Option<&TeamId> {
        if self.home_team_id == team_id {
            Some(&self.away_team_id)
        } else if self.away_team_id == team_id {
            Some(&self.home_team_id)
        } else {
            None
        }
    }
}

/// One player's box-score line for one match.
///
/// Unique per `(match_id, player_id)`; writing the same pair again replaces
/// the earlier line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(deserialize_with = "lenient::id")]
    pub match_id: MatchId,

    #[serde(deserialize_with = "lenient::id")]
    pub player_id: PlayerId,

    #[serde(deserialize_with = "lenient::id")]
    pub team_id: TeamId,

    #[serde(default, deserialize_with = "lenient::int")]
    pub minutes_played: i32,

    #[serde(default, deserialize_with = "lenient::int")]
    pub two_points_made: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub two_points_attempted: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub three_points_made: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub three_points_attempted: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub free_throws_made: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub free_throws_attempted: i32,

    #[serde(default, deserialize_with = "lenient::int")]
    pub rebounds: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub assists: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub steals: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub blocks: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub turnovers: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub fouls: i32,

    /// Stored total. Callers persist [`StatLine::computed_points`] here.
    #[serde(default, deserialize_with = "lenient::int")]
    pub points: i32,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub stats_recorded: bool,
}

impl StatLine {
    pub fn new(match_id: &str, player_id: &str, team_id: &str) -> Self {
        StatLine {
            match_id: match_id.to_string(),
            player_id: player_id.to_string(),
            team_id: team_id.to_string(),
            ..Default::default()
        }
    }

    /// Points implied by the made-shot counts. No validation: negative
    /// counts simply carry through the arithmetic.
    pub fn computed_points(&self) -> i32 {
        line_points(self.two_points_made, self.three_points_made, self.free_throws_made)
    }

    /// The line as it should be persisted: points recomputed from the shots
    /// and the line marked as recorded.
    pub fn normalized(mut self) -> Self {
        self.points = self.computed_points();
        self.stats_recorded = true;
        self
    }

    /// Decode a line from a form submission or database row and normalize it.
    pub fn from_submission(json: &str) -> Result<Self> {
        let line: StatLine = serde_json::from_str(json)?;
        Ok(line.normalized())
    }

    pub fn key(&self) -> (MatchId, PlayerId) {
        (self.match_id.clone(), self.player_id.clone())
    }
}

/// `2 × two-pointers + 3 × three-pointers + 1 × free throws`, saturating at
/// the `i32` bounds.
pub fn line_points(two_points_made: i32, three_points_made: i32, free_throws_made: i32) -> i32 {
    TWO_POINT_VALUE
        .saturating_mul(two_points_made)
        .saturating_add(THREE_POINT_VALUE.saturating_mul(three_points_made))
        .saturating_add(FREE_THROW_VALUE.saturating_mul(free_throws_made))
}

pub fn teams_from_json(json: &str) -> Result<Vec<Team>> {
    Ok(serde_json::from_str(json)?)
}

pub fn matches_from_json(json: &str) -> Result<Vec<Match>> {
    Ok(serde_json::from_str(json)?)
}

pub fn stat_lines_from_json(json: &str) -> Result<Vec<StatLine>> {
    Ok(serde_json::from_str(json)?)
}
