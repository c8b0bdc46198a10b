//! Which players belong to a team.
//!
//! Roster assignments are per season, but league seasons and assignment
//! seasons are both free text and do not always line up. Resolution tries an
//! exact season match first and otherwise falls back to each player's most
//! recent assignment to the team.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::UNNUMBERED_JERSEY;
use crate::lenient;
use crate::model::{PlayerId, TeamId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(deserialize_with = "lenient::id")]
    pub player_id: PlayerId,

    #[serde(deserialize_with = "lenient::id")]
    pub team_id: TeamId,

    #[serde(default, deserialize_with = "lenient::text")]
    pub season: String,

    #[serde(default)]
    pub jersey_number: Option<String>,
}

impl RosterEntry {
    pub fn new(player_id: &str, team_id: &str, season: &str, jersey_number: Option<&str>) -> Self {
        RosterEntry {
            player_id: player_id.to_string(),
            team_id: team_id.to_string(),
            season: season.to_string(),
            jersey_number: jersey_number.map(str::to_string),
        }
    }

    /// Sort key: the leading integer of the jersey text, or 999.
    pub fn jersey_key(&self) -> i32 {
        self.jersey_number
            .as_deref()
            .and_then(lenient::parse_leading_int)
            .unwrap_or(UNNUMBERED_JERSEY)
    }
}

/// Players on `team_id` for `season`, ordered by jersey number.
///
/// With `season` set to `None` every assignment to the team matches. When
/// nothing matches the season exactly, each player's latest assignment to
/// the team is used instead.
pub fn resolve_roster(
    entries: &[RosterEntry],
    team_id: &str,
    season: Option<&str>,
) -> Vec<RosterEntry> {
    let mut roster: Vec<RosterEntry> = entries
        .iter()
        .filter(|e| e.team_id == team_id)
        .filter(|e| season.map_or(true, |s| e.season == s))
        .cloned()
        .collect();

    if roster.is_empty() {
        debug!(
            "no roster for team {} in season {:?}, using latest assignments",
            team_id, season
        );
        let mut all: Vec<&RosterEntry> = entries.iter().filter(|e| e.team_id == team_id).collect();
        all.sort_by(|a, b| b.season.cmp(&a.season));

        let mut seen: HashSet<&str> = HashSet::new();
        roster = all
            .into_iter()
            .filter(|e| seen.insert(e.player_id.as_str()))
            .cloned()
            .collect();
    }

    roster.sort_by_key(RosterEntry::jersey_key);
    roster
}

/// The player's most recent assignment, by season label.
pub fn current_assignment<'a>(
    entries: &'a [RosterEntry],
    player_id: &str,
) -> Option<&'a RosterEntry> {
    entries
        .iter()
        .filter(|e| e.player_id == player_id)
        .fold(None, |best: Option<&RosterEntry>, e| match best {
            Some(b) if b.season >= e.season => Some(b),
            _ => Some(e),
        })
}
