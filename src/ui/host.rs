use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use tracing::{debug, warn};

use crate::game::{
    AnimationId, AudioPlayer, CardId, Clock, Point, RenderSurface, RoundController, Size, Sound,
    Tween, TweenKind,
};
use crate::records::RECORDS_FILE_NAME;

use super::board::{CardWidget, build_card_widget, ease_out, top_left};
use super::hud;
use super::sounds::{Assets, SoundBank};

const FRAME: Duration = Duration::from_millis(16);

pub type SharedGame = Rc<RefCell<RoundController<GtkHost>>>;

pub(super) fn records_path() -> std::path::PathBuf {
    glib::user_config_dir().join("memory").join(RECORDS_FILE_NAME)
}

/// Late-bound handle from main-loop callbacks back to the controller.
#[derive(Clone, Default)]
pub struct GameLink(Rc<RefCell<Weak<RefCell<RoundController<GtkHost>>>>>);

impl GameLink {
    pub fn attach(&self, game: &SharedGame) {
        *self.0.borrow_mut() = Rc::downgrade(game);
    }

    /// Run `f` against the controller, then persist the scoreboard if a
    /// round ended along the way. An event that arrives while the
    /// controller is already borrowed is queued for the next idle slot.
    pub fn dispatch(&self, f: impl FnOnce(&mut RoundController<GtkHost>) + 'static) {
        let Some(shared) = self.0.borrow().upgrade() else {
            return;
        };
        let ran = run_exclusive(&shared, |game| {
            f(game);
            if game.take_round_summary().is_some() {
                if let Err(err) = game.scoreboard().save(records_path()) {
                    warn!(error = %err, "failed to save records");
                }
                game.host().refresh_records(game.round(), game.scoreboard());
            }
        });
        if let Err(deferred) = ran {
            debug!("controller busy, deferring event");
            let link = self.clone();
            glib::idle_add_local_once(move || link.run_deferred(deferred));
        }
    }

    fn run_deferred(&self, f: impl FnOnce(&mut RoundController<GtkHost>) + 'static) {
        let Some(shared) = self.0.borrow().upgrade() else {
            return;
        };
        if let Err(deferred) = run_exclusive(&shared, f) {
            let link = self.clone();
            glib::idle_add_local_once(move || link.run_deferred(deferred));
        }
    }
}

/// Runs `f` with exclusive access to `cell`, handing it back untouched when
/// the cell is already borrowed.
fn run_exclusive<T, F: FnOnce(&mut T)>(cell: &RefCell<T>, f: F) -> Result<(), F> {
    match cell.try_borrow_mut() {
        Ok(mut value) => {
            f(&mut value);
            Ok(())
        }
        Err(_) => Err(f),
    }
}

fn completion(link: GameLink, card: CardId, id: AnimationId) -> impl Fn() + 'static {
    move || {
        link.dispatch(move |game| {
            if let Err(err) = game.on_animation_finished(card, id) {
                warn!(error = %err, "animation completion rejected");
            }
        })
    }
}

pub struct GtkHost {
    link: GameLink,
    board: gtk::Fixed,
    title: adw::WindowTitle,
    time_label: gtk::Label,
    card_size: Size,
    viewport: Size,
    cards: Vec<CardWidget>,
    sounds: SoundBank,
    assets: Assets,
    timer_handle: Option<glib::SourceId>,
    timer_paused: Rc<Cell<bool>>,
}

impl GtkHost {
    pub fn new(
        link: GameLink,
        board: gtk::Fixed,
        title: adw::WindowTitle,
        viewport: Size,
        card_size: Size,
    ) -> Self {
        let time_label = hud::build_time_label();
        let assets = Assets::from_env();
        GtkHost {
            link,
            board,
            title,
            time_label,
            card_size,
            viewport,
            cards: Vec::new(),
            sounds: SoundBank::new(assets.clone()),
            assets,
            timer_handle: None,
            timer_paused: Rc::new(Cell::new(true)),
        }
    }

    pub fn refresh_records(&self, round: u32, board: &crate::records::Scoreboard) {
        hud::update_records(&self.title, round, board);
    }

    fn run_move(&self, card: CardId, id: AnimationId, to: Point, delay_ms: u64, duration_ms: u64) {
        let Some(widget) = self.cards.get(card) else {
            return;
        };
        widget.motion.set(id.0);
        let motion = widget.motion.clone();
        let button = widget.button.clone();
        let board = self.board.clone();
        let (target_x, target_y) = top_left(to.x, to.y, self.card_size);
        let finish = completion(self.link.clone(), card, id);

        glib::timeout_add_local_once(Duration::from_millis(delay_ms), move || {
            let (from_x, from_y) = board.child_position(&button);
            let started = Instant::now();
            let duration = duration_ms.max(1) as f64;
            glib::timeout_add_local(FRAME, move || {
                let t = (started.elapsed().as_millis() as f64 / duration).min(1.0);
                if motion.get() == id.0 {
                    let eased = ease_out(t);
                    board.move_(
                        &button,
                        from_x + (target_x - from_x) * eased,
                        from_y + (target_y - from_y) * eased,
                    );
                }
                if t < 1.0 {
                    return glib::ControlFlow::Continue;
                }
                finish();
                glib::ControlFlow::Break
            });
        });
    }

    fn run_flip(&self, card: CardId, id: AnimationId, texture: String, duration_ms: u64) {
        let Some(widget) = self.cards.get(card) else {
            return;
        };
        let button = widget.button.clone();
        let area = widget.area();
        let face = widget.texture_handle();
        let half = Duration::from_millis(duration_ms / 2);
        let finish = completion(self.link.clone(), card, id);

        button.add_css_class("flipping");
        glib::timeout_add_local_once(half, move || {
            *face.borrow_mut() = texture;
            area.queue_draw();
            button.remove_css_class("flipping");
            glib::timeout_add_local_once(half, finish);
        });
    }
}

impl RenderSurface for GtkHost {
    fn place_background(&mut self, texture: &str) {
        self.board.add_css_class("memory-board");
        let path = self.assets.sprite(texture);
        if path.exists() {
            let picture = gtk::Picture::for_filename(&path);
            picture.set_size_request(self.viewport.width as i32, self.viewport.height as i32);
            picture.set_can_target(false);
            self.board.put(&picture, 0.0, 0.0);
        }
        self.board.put(&self.time_label, 10.0, self.viewport.height - 60.0);
    }

    fn spawn_card(&mut self, card: CardId, texture: &str, at: Point) {
        let link = self.link.clone();
        let widget = build_card_widget(texture, self.card_size, move || {
            link.dispatch(move |game| {
                if let Err(err) = game.on_card_selected(card) {
                    warn!(error = %err, "card selection rejected");
                }
            })
        });
        let (x, y) = top_left(at.x, at.y, self.card_size);
        self.board.put(&widget.button, x, y);
        self.cards.push(widget);
    }

    fn reset_card(&mut self, card: CardId, texture: &str, at: Point) {
        let Some(widget) = self.cards.get(card) else {
            return;
        };
        widget.motion.set(0);
        widget.set_texture(texture);
        widget.button.remove_css_class("flipping");
        let (x, y) = top_left(at.x, at.y, self.card_size);
        self.board.move_(&widget.button, x, y);
    }

    fn set_depth(&mut self, card: CardId, depth: i32) {
        let Some(widget) = self.cards.get_mut(card) else {
            return;
        };
        widget.depth = depth;
        let above = self
            .cards
            .iter()
            .enumerate()
            .filter(|(id, other)| *id != card && other.depth > depth)
            .min_by_key(|(_, other)| other.depth)
            .map(|(_, other)| other.button.clone());
        self.cards[card]
            .button
            .insert_before(&self.board, above.as_ref());
        // Keep the clock readable above every card.
        self.time_label.insert_before(&self.board, None::<&gtk::Widget>);
    }

    fn animate(&mut self, tween: Tween) {
        match tween.kind {
            TweenKind::Move {
                to,
                delay_ms,
                duration_ms,
            } => self.run_move(tween.card, tween.id, to, delay_ms, duration_ms),
            TweenKind::Flip {
                texture,
                duration_ms,
            } => self.run_flip(tween.card, tween.id, texture, duration_ms),
        }
    }

    fn show_time_left(&mut self, seconds: i64) {
        self.time_label.set_text(&hud::time_text(seconds));
    }
}

impl AudioPlayer for GtkHost {
    fn play(&mut self, sound: Sound, volume: f64) {
        self.sounds.play(sound, volume);
    }
}

impl Clock for GtkHost {
    fn start_repeating(&mut self, interval: Duration) {
        if let Some(handle) = self.timer_handle.take() {
            handle.remove();
        }
        let paused = self.timer_paused.clone();
        let link = self.link.clone();
        let handle = glib::timeout_add_local(interval, move || {
            if !paused.get() {
                link.dispatch(|game| {
                    game.on_timer_tick();
                });
            }
            glib::ControlFlow::Continue
        });
        self.timer_handle = Some(handle);
    }

    fn set_paused(&mut self, paused: bool) {
        self.timer_paused.set(paused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_cell_hands_the_event_back() {
        let cell = RefCell::new(0_u32);
        let held = cell.borrow();
        let deferred = run_exclusive(&cell, |n: &mut u32| *n += 1).unwrap_err();
        assert_eq!(*held, 0);
        drop(held);

        assert!(run_exclusive(&cell, deferred).is_ok());
        assert_eq!(cell.into_inner(), 1);
    }
}
