pub mod card;
pub mod host;
pub mod layout;
pub mod round;
pub mod timer;

pub use card::{Card, CardId, Face, FollowUp};
pub use host::{
    AnimationId, AudioPlayer, Clock, Host, Point, RenderSurface, Size, Sound, Tween, TweenKind,
};
pub use layout::Position;
pub use round::{RoundController, RoundPhase, Selection};
pub use timer::{Countdown, TickOutcome};
