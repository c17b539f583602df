use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Paused,
    /// Seconds shown for this tick; the round goes on.
    Running(i64),
    /// Seconds shown for this tick; time is up and the countdown paused.
    Expired(i64),
}

/// Whole-second countdown. A tick compares before it decrements, so the tick
/// that shows `0` is the one that expires and the counter then sits at `-1`
/// until the next reset.
#[derive(Clone, Debug)]
pub struct Countdown {
    start: u32,
    remaining: i64,
    paused: bool,
}

impl Countdown {
    pub fn new(start: u32) -> Self {
        Countdown {
            start,
            remaining: start as i64,
            paused: true,
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.start as i64;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Whole seconds consumed since the last reset, never above the budget.
    pub fn elapsed_secs(&self) -> u32 {
        let start = self.start as i64;
        (start - self.remaining).clamp(0, start) as u32
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::Paused;
        }
        let shown = self.remaining;
        let outcome = if shown <= 0 {
            self.paused = true;
            TickOutcome::Expired(shown)
        } else {
            TickOutcome::Running(shown)
        };
        self.remaining -= 1;
        outcome
    }
}
