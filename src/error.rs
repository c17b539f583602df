use thiserror::Error;

use crate::game::CardId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a {cols}x{rows} grid cannot hold {pairs} pairs")]
    GridMismatch { cols: u32, rows: u32, pairs: usize },
    #[error("configuration lists no card values")]
    NoCards,
    #[error("card value {0} is listed more than once")]
    DuplicateValue(u32),
    #[error("countdown must be at least one second")]
    ZeroTimeout,
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("no card with id {0}")]
    UnknownCard(CardId),
    #[error("restart requested while the previous restart is still running")]
    RestartInFlight,
}

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("failed to access records: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse records: {0}")]
    Parse(#[from] serde_json::Error),
}
