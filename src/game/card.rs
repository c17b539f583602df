use super::host::{AnimationId, Point, Tween, TweenKind};
use super::layout::Position;

pub type CardId = usize;

pub const MOVE_DURATION_MS: u64 = 250;
pub const FLIP_DURATION_MS: u64 = 300;
pub const BACK_TEXTURE: &str = "card";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    /// Parked off-screen, waiting to be dealt.
    Hidden,
    FaceDown,
    FaceUp,
}

/// What the round controller does once a card animation has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    None,
    /// Dealing move reached its cell.
    Settle,
    /// Restart move left the board.
    Exit,
    /// Open flip finished; see whether the round is complete.
    MatchCheck,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    id: AnimationId,
    follow_up: FollowUp,
}

#[derive(Clone, Debug)]
pub struct Card {
    id: CardId,
    value: u32,
    position: Position,
    face: Face,
    depth: i32,
    moving: Option<Pending>,
    flipping: Option<Pending>,
}

impl Card {
    pub fn new(id: CardId, value: u32) -> Self {
        Card {
            id,
            value,
            position: Position { x: 0.0, y: 0.0, delay_ms: 0 },
            face: Face::Hidden,
            depth: 0,
            moving: None,
            flipping: None,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn opened(&self) -> bool {
        self.face == Face::FaceUp
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    pub fn texture(&self) -> String {
        format!("card{}", self.value)
    }

    pub fn is_moving(&self) -> bool {
        self.moving.is_some()
    }

    /// Take a new cell for the coming round. Completions of earlier
    /// animations are ignored from here on.
    pub fn init(&mut self, position: Position) {
        self.position = position;
        self.face = Face::Hidden;
        self.moving = None;
        self.flipping = None;
    }

    pub fn move_to(
        &mut self,
        id: AnimationId,
        to: Point,
        delay_ms: u64,
        follow_up: FollowUp,
    ) -> Tween {
        self.moving = Some(Pending { id, follow_up });
        Tween {
            id,
            card: self.id,
            kind: TweenKind::Move {
                to,
                delay_ms,
                duration_ms: MOVE_DURATION_MS,
            },
        }
    }

    /// Turn the card face up. Returns `None` when it already is.
    pub fn open(&mut self, id: AnimationId) -> Option<Tween> {
        if self.opened() {
            return None;
        }
        self.face = Face::FaceUp;
        self.flipping = Some(Pending {
            id,
            follow_up: FollowUp::MatchCheck,
        });
        Some(Tween {
            id,
            card: self.id,
            kind: TweenKind::Flip {
                texture: self.texture(),
                duration_ms: FLIP_DURATION_MS,
            },
        })
    }

    pub fn close(&mut self, id: AnimationId) -> Tween {
        self.face = Face::FaceDown;
        self.flipping = Some(Pending {
            id,
            follow_up: FollowUp::None,
        });
        Tween {
            id,
            card: self.id,
            kind: TweenKind::Flip {
                texture: BACK_TEXTURE.to_string(),
                duration_ms: FLIP_DURATION_MS,
            },
        }
    }

    /// Report a finished animation. Yields the follow-up of the latest
    /// request with this id exactly once; stale ids yield `None`.
    pub fn finish(&mut self, id: AnimationId) -> Option<FollowUp> {
        if self.moving.is_some_and(|p| p.id == id) {
            let pending = self.moving.take()?;
            if pending.follow_up == FollowUp::Settle && self.face == Face::Hidden {
                self.face = Face::FaceDown;
            }
            return Some(pending.follow_up);
        }
        if self.flipping.is_some_and(|p| p.id == id) {
            return self.flipping.take().map(|p| p.follow_up);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> Position {
        Position { x: 10.0, y: 20.0, delay_ms: 300 }
    }

    #[test]
    fn settling_places_the_card_face_down() {
        let mut card = Card::new(0, 4);
        card.init(cell());
        assert_eq!(card.face(), Face::Hidden);
        let tween = card.move_to(AnimationId(1), cell().point(), 300, FollowUp::Settle);
        assert_eq!(tween.card, 0);
        assert_eq!(card.finish(AnimationId(1)), Some(FollowUp::Settle));
        assert_eq!(card.face(), Face::FaceDown);
    }

    #[test]
    fn follow_up_fires_once() {
        let mut card = Card::new(0, 4);
        card.move_to(AnimationId(1), Point::new(0.0, 0.0), 0, FollowUp::Exit);
        assert_eq!(card.finish(AnimationId(1)), Some(FollowUp::Exit));
        assert_eq!(card.finish(AnimationId(1)), None);
    }

    #[test]
    fn latest_move_wins() {
        let mut card = Card::new(0, 4);
        card.move_to(AnimationId(1), Point::new(0.0, 0.0), 0, FollowUp::Settle);
        card.move_to(AnimationId(2), Point::new(5.0, 5.0), 0, FollowUp::Exit);
        assert_eq!(card.finish(AnimationId(1)), None);
        assert_eq!(card.finish(AnimationId(2)), Some(FollowUp::Exit));
    }

    #[test]
    fn open_is_rejected_when_face_up() {
        let mut card = Card::new(3, 9);
        let tween = card.open(AnimationId(5)).unwrap();
        assert_eq!(
            tween.kind,
            TweenKind::Flip {
                texture: "card9".to_string(),
                duration_ms: FLIP_DURATION_MS
            }
        );
        assert!(card.opened());
        assert!(card.open(AnimationId(6)).is_none());
        assert_eq!(card.finish(AnimationId(5)), Some(FollowUp::MatchCheck));
    }

    #[test]
    fn close_supersedes_open_flip_without_callback() {
        let mut card = Card::new(0, 1);
        card.open(AnimationId(1));
        card.close(AnimationId(2));
        assert!(!card.opened());
        assert_eq!(card.finish(AnimationId(1)), None);
        assert_eq!(card.finish(AnimationId(2)), Some(FollowUp::None));
    }

    #[test]
    fn init_forgets_in_flight_animations() {
        let mut card = Card::new(0, 1);
        card.open(AnimationId(1));
        card.move_to(AnimationId(2), Point::default(), 0, FollowUp::Exit);
        card.init(cell());
        assert!(!card.opened());
        assert!(!card.is_moving());
        assert_eq!(card.finish(AnimationId(1)), None);
        assert_eq!(card.finish(AnimationId(2)), None);
    }
}
