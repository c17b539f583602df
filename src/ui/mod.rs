pub mod app;
mod board;
mod dialogs;
pub mod host;
mod hud;
pub mod sounds;
