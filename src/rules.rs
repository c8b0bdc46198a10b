use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{POINTS_FOR_LOSS, POINTS_FOR_WALKOVER_LOSS, POINTS_FOR_WIN};
use crate::error::{LeagueError, Result};

/// League points awarded per match outcome.
///
/// Fields missing from a config file fall back to the league defaults
/// (2 for a win, 1 for a loss, 0 for a walkover loss).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsRule {
    pub win: i32,
    pub loss: i32,
    pub walkover_loss: i32,
}

impl Default for PointsRule {
    fn default() -> Self {
        PointsRule {
            win: POINTS_FOR_WIN,
            loss: POINTS_FOR_LOSS,
            walkover_loss: POINTS_FOR_WALKOVER_LOSS,
        }
    }
}

impl PointsRule {
    pub fn new(win: i32, loss: i32, walkover_loss: i32) -> Result<Self> {
        let rule = PointsRule {
            win,
            loss,
            walkover_loss,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Parse a rule from a JSON object such as `{"win": 3, "loss": 1}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let rule: PointsRule = serde_json::from_str(json)?;
        rule.validate()?;
        Ok(rule)
    }

    /// Read a rule from a JSON file.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// A win must always be worth more than any loss, otherwise league points
    /// stop tracking the win count.
    pub fn validate(&self) -> Result<()> {
        if self.win <= self.loss {
            return Err(LeagueError::InvalidRule(format!(
                "win ({}) must be worth more than a loss ({})",
                self.win, self.loss
            )));
        }
        if self.walkover_loss > self.loss {
            return Err(LeagueError::InvalidRule(format!(
                "walkover loss ({}) cannot be worth more than a loss ({})",
                self.walkover_loss, self.loss
            )));
        }
        if self.walkover_loss < 0 {
            return Err(LeagueError::InvalidRule(format!(
                "walkover loss ({}) cannot be negative",
                self.walkover_loss
            )));
        }
        Ok(())
    }

    /// Points for the losing side.
    pub fn for_loss(&self, walkover: bool) -> i32 {
        if walkover {
            self.walkover_loss
        } else {
            self.loss
        }
    }
}
