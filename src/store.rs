//! The storage boundary.
//!
//! The league's data lives in a hosted database; this trait is the shape of
//! the reads and writes the calculators rely on. [`MemoryStore`] is an
//! in-process implementation used for tests, fixtures and offline reports.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{Match, MatchId, PlayerId, StatLine, Team};
use crate::roster::RosterEntry;

pub trait LeagueStore {
    fn teams(&self, league_id: &str) -> Result<Vec<Team>>;

    /// Matches of a league, optionally only finished ones.
    fn matches(&self, league_id: &str, finished_only: bool) -> Result<Vec<Match>>;

    fn stat_lines_for_player(&self, player_id: &str) -> Result<Vec<StatLine>>;

    fn stat_lines_for_match(&self, match_id: &str) -> Result<Vec<StatLine>>;

    fn roster_entries(&self, team_id: &str) -> Result<Vec<RosterEntry>>;

    /// Insert or replace lines keyed by `(match_id, player_id)`. Returns the
    /// number of lines written. Submitting the same batch twice is a no-op.
    fn upsert_stat_lines(&mut self, lines: Vec<StatLine>) -> Result<usize>;
}

/// Serialized form of a [`MemoryStore`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub stat_lines: Vec<StatLine>,
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    teams: Vec<Team>,
    matches: Vec<Match>,
    stat_lines: BTreeMap<(MatchId, PlayerId), StatLine>,
    roster: Vec<RosterEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = MemoryStore {
            teams: snapshot.teams,
            matches: snapshot.matches,
            stat_lines: BTreeMap::new(),
            roster: snapshot.roster,
        };
        for line in snapshot.stat_lines {
            store.stat_lines.insert(line.key(), line);
        }
        store
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            teams: self.teams.clone(),
            matches: self.matches.clone(),
            stat_lines: self.stat_lines.values().cloned().collect(),
            roster: self.roster.clone(),
        }
    }

    pub fn add_team(&mut self, team: Team) {
        self.teams.push(team);
    }

    /// Add a match, replacing any existing match with the same id.
    pub fn save_match(&mut self, m: Match) {
        match self.matches.iter_mut().find(|existing| existing.id == m.id) {
            Some(existing) => *existing = m,
            None => self.matches.push(m),
        }
    }

    pub fn add_roster_entry(&mut self, entry: RosterEntry) {
        self.roster.push(entry);
    }

    pub fn stat_line_count(&self) -> usize {
        self.stat_lines.len()
    }
}

impl LeagueStore for MemoryStore {
    fn teams(&self, league_id: &str) -> Result<Vec<Team>> {
        Ok(self.teams.iter().filter(|t| t.league_id == league_id).cloned().collect())
    }

    fn matches(&self, league_id: &str, finished_only: bool) -> Result<Vec<Match>> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.league_id == league_id)
            .filter(|m| !finished_only || m.is_finished())
            .cloned()
            .collect())
    }

    fn stat_lines_for_player(&self, player_id: &str) -> Result<Vec<StatLine>> {
        Ok(self
            .stat_lines
            .values()
            .filter(|l| l.player_id == player_id)
            .cloned()
            .collect())
    }

    fn stat_lines_for_match(&self, match_id: &str) -> Result<Vec<StatLine>> {
        Ok(self
            .stat_lines
            .values()
            .filter(|l| l.match_id == match_id)
            .cloned()
            .collect())
    }

    fn roster_entries(&self, team_id: &str) -> Result<Vec<RosterEntry>> {
        Ok(self.roster.iter().filter(|e| e.team_id == team_id).cloned().collect())
    }

    fn upsert_stat_lines(&mut self, lines: Vec<StatLine>) -> Result<usize> {
        let written = lines.len();
        for line in lines {
            if let Some(previous) = self.stat_lines.insert(line.key(), line) {
                debug!(
                    "replaced stat line for match {} player {}",
                    previous.match_id, previous.player_id
                );
            }
        }
        Ok(written)
    }
}
