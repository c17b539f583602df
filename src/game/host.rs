use std::time::Duration;

use super::card::CardId;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Card,
    Complete,
    Success,
    Theme,
    Timeout,
}

impl Sound {
    pub fn name(self) -> &'static str {
        match self {
            Sound::Card => "card",
            Sound::Complete => "complete",
            Sound::Success => "success",
            Sound::Theme => "theme",
            Sound::Timeout => "timeout",
        }
    }

    pub fn looped(self) -> bool {
        self == Sound::Theme
    }
}

/// Identifies one animation request. Hosts hand it back through
/// `RoundController::on_animation_finished`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub enum TweenKind {
    /// Wait `delay_ms`, then slide to `to` over `duration_ms`.
    Move {
        to: Point,
        delay_ms: u64,
        duration_ms: u64,
    },
    /// Turn the card over, showing `texture` from the midpoint on.
    Flip { texture: String, duration_ms: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub id: AnimationId,
    pub card: CardId,
    pub kind: TweenKind,
}

pub trait RenderSurface {
    fn place_background(&mut self, texture: &str);
    fn spawn_card(&mut self, card: CardId, texture: &str, at: Point);
    /// Jump a card sprite to `at` showing `texture`, cancelling nothing.
    fn reset_card(&mut self, card: CardId, texture: &str, at: Point);
    fn set_depth(&mut self, card: CardId, depth: i32);
    /// Start a tween. Completion must be reported exactly once, from the
    /// event loop, never from inside this call.
    fn animate(&mut self, tween: Tween);
    fn show_time_left(&mut self, seconds: i64);
}

pub trait AudioPlayer {
    fn play(&mut self, sound: Sound, volume: f64);
}

pub trait Clock {
    /// Begin delivering `on_timer_tick` every `interval`.
    fn start_repeating(&mut self, interval: Duration);
    fn set_paused(&mut self, paused: bool);
}

/// Everything a round controller needs from its environment.
pub trait Host: RenderSurface + AudioPlayer + Clock {}

impl<T: RenderSurface + AudioPlayer + Clock> Host for T {}
