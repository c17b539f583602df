pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod records;

#[cfg(feature = "gui")]
pub mod ui;
