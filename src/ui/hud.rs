use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use crate::records::{Scoreboard, format_mm_ss};

pub(super) fn time_text(seconds: i64) -> String {
    format!("{}: {}", gettext("Time"), seconds)
}

pub(super) fn build_time_label() -> gtk::Label {
    gtk::Label::builder()
        .label(time_text(0))
        .css_classes(vec!["memory-time"])
        .can_target(false)
        .build()
}

pub(super) fn records_text(round: u32, board: &Scoreboard) -> String {
    let best = board
        .best_clear_secs
        .map(format_mm_ss)
        .unwrap_or_else(|| "--:--".to_string());
    format!(
        "{} {} | {} {} | {} {}",
        gettext("Round"),
        round,
        gettext("Cleared"),
        board.rounds_completed,
        gettext("Best"),
        best
    )
}

pub(super) fn update_records(title: &adw::WindowTitle, round: u32, board: &Scoreboard) {
    title.set_subtitle(&records_text(round, board));
}
