use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RecordsError;

pub const RECORDS_FILE_NAME: &str = "records.json";
const HISTORY_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Completed,
    TimedOut,
    /// Restarted on request before either of the above.
    Abandoned,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub outcome: RoundOutcome,
    pub elapsed_secs: u32,
    pub pairs_found: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoreboard {
    pub rounds_completed: u32,
    pub rounds_timed_out: u32,
    pub best_clear_secs: Option<u32>,
    pub recent: Vec<RoundSummary>,
}

impl Scoreboard {
    pub fn register(&mut self, summary: RoundSummary) {
        match summary.outcome {
            RoundOutcome::Completed => {
                self.rounds_completed = self.rounds_completed.saturating_add(1);
                self.best_clear_secs = Some(match self.best_clear_secs {
                    Some(best) => best.min(summary.elapsed_secs),
                    None => summary.elapsed_secs,
                });
            }
            RoundOutcome::TimedOut => {
                self.rounds_timed_out = self.rounds_timed_out.saturating_add(1);
            }
            RoundOutcome::Abandoned => {}
        }
        self.recent.push(summary);
        if self.recent.len() > HISTORY_LIMIT {
            let excess = self.recent.len() - HISTORY_LIMIT;
            self.recent.drain(..excess);
        }
    }

    /// Rounds kept in `recent`, at most the history limit.
    pub fn history_len(&self) -> usize {
        self.recent.len()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordsError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Missing or unreadable records start a fresh scoreboard.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Scoreboard::default();
        }
        match Self::load(path) {
            Ok(board) => board,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "discarding unreadable records");
                Scoreboard::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

pub fn format_mm_ss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
