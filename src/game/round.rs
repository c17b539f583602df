use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::error::{ConfigError, RoundError};
use crate::records::{RoundOutcome, RoundSummary, Scoreboard};

use super::card::{BACK_TEXTURE, Card, CardId, FollowUp};
use super::host::{AnimationId, Host, Point, Sound};
use super::layout::{self, Position};
use super::timer::{Countdown, TICK_INTERVAL, TickOutcome};

pub const BACKGROUND_TEXTURE: &str = "bg";
pub const EFFECT_VOLUME: f64 = 0.8;
pub const THEME_VOLUME: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// Cards created, no round started yet.
    Idle,
    Dealing,
    Playing,
    /// Cards are leaving the board; the next round starts once all are gone.
    Restarting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Ignored,
    Remembered,
    Matched { with: CardId },
    Mismatched { closed: CardId },
}

pub struct RoundController<H: Host> {
    config: GameConfig,
    host: H,
    rng: StdRng,
    cards: Vec<Card>,
    positions: Vec<Position>,
    opened_card: Option<CardId>,
    opened_pairs: usize,
    countdown: Countdown,
    phase: RoundPhase,
    settled: usize,
    exited: usize,
    round: u32,
    next_animation: u64,
    scoreboard: Scoreboard,
    pending_summary: Option<RoundSummary>,
}

fn next_id(counter: &mut u64) -> AnimationId {
    *counter += 1;
    AnimationId(*counter)
}

impl<H: Host> RoundController<H> {
    pub fn new(config: GameConfig, host: H) -> Result<Self, ConfigError> {
        Self::with_rng(config, host, StdRng::from_os_rng())
    }

    /// Same as `new`, with reproducible shuffles.
    pub fn with_seed(config: GameConfig, host: H, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, host, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut host: H, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut cards = Vec::with_capacity(config.total_cards());
        for &value in &config.cards {
            for _ in 0..2 {
                cards.push(Card::new(cards.len(), value));
            }
        }

        let parked = parked_point(&config);
        host.place_background(BACKGROUND_TEXTURE);
        for card in &cards {
            host.spawn_card(card.id(), BACK_TEXTURE, parked);
        }
        host.start_repeating(TICK_INTERVAL);
        host.set_paused(true);
        host.play(Sound::Theme, THEME_VOLUME);

        info!(
            cols = config.cols,
            rows = config.rows,
            pairs = config.total_pairs(),
            timeout = config.timeout,
            "board created"
        );

        Ok(RoundController {
            countdown: Countdown::new(config.timeout),
            config,
            host,
            rng,
            cards,
            positions: Vec::new(),
            opened_card: None,
            opened_pairs: 0,
            phase: RoundPhase::Idle,
            settled: 0,
            exited: 0,
            round: 0,
            next_animation: 0,
            scoreboard: Scoreboard::default(),
            pending_summary: None,
        })
    }

    pub fn with_scoreboard(mut self, scoreboard: Scoreboard) -> Self {
        self.scoreboard = scoreboard;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn opened_card(&self) -> Option<CardId> {
        self.opened_card
    }

    pub fn opened_pairs(&self) -> usize {
        self.opened_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn time_left(&self) -> i64 {
        self.countdown.remaining()
    }

    pub fn timer_paused(&self) -> bool {
        self.countdown.is_paused()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Summary of the round that most recently ended, if not yet taken.
    pub fn take_round_summary(&mut self) -> Option<RoundSummary> {
        self.pending_summary.take()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn start(&mut self) {
        self.round += 1;
        self.positions = layout::grid_positions(
            self.config.rows,
            self.config.cols,
            self.config.board.card(),
            self.config.board.viewport(),
        );
        self.countdown.reset();
        self.opened_card = None;
        self.opened_pairs = 0;
        self.host.set_paused(false);
        self.init_cards();
        self.show_cards();
        info!(round = self.round, "round started");
    }

    fn init_cards(&mut self) {
        let parked = parked_point(&self.config);
        let shuffled = layout::shuffle(self.positions.clone(), &mut self.rng);
        for (card, position) in self.cards.iter_mut().zip(shuffled.into_iter().rev()) {
            card.init(position);
            self.host.reset_card(card.id(), BACK_TEXTURE, parked);
        }
    }

    fn show_cards(&mut self) {
        self.phase = RoundPhase::Dealing;
        self.settled = 0;
        for card in &mut self.cards {
            let position = card.position();
            let depth = i32::try_from(position.delay_ms).unwrap_or(i32::MAX);
            card.set_depth(depth);
            self.host.set_depth(card.id(), depth);
            let id = next_id(&mut self.next_animation);
            let tween = card.move_to(id, position.point(), position.delay_ms, FollowUp::Settle);
            self.host.animate(tween);
        }
    }

    pub fn on_card_selected(&mut self, card: CardId) -> Result<Selection, RoundError> {
        if card >= self.cards.len() {
            return Err(RoundError::UnknownCard(card));
        }
        if matches!(self.phase, RoundPhase::Idle | RoundPhase::Restarting) {
            debug!(card, phase = ?self.phase, "selection outside of play");
            return Ok(Selection::Ignored);
        }
        if self.cards[card].opened() {
            return Ok(Selection::Ignored);
        }

        self.host.play(Sound::Card, EFFECT_VOLUME);
        let selection = match self.opened_card {
            Some(previous) if self.cards[previous].value() == self.cards[card].value() => {
                self.host.play(Sound::Success, EFFECT_VOLUME);
                self.opened_card = None;
                self.opened_pairs += 1;
                Selection::Matched { with: previous }
            }
            Some(previous) => {
                let id = next_id(&mut self.next_animation);
                let tween = self.cards[previous].close(id);
                self.host.animate(tween);
                self.opened_card = Some(card);
                Selection::Mismatched { closed: previous }
            }
            None => {
                self.opened_card = Some(card);
                Selection::Remembered
            }
        };

        let id = next_id(&mut self.next_animation);
        if let Some(tween) = self.cards[card].open(id) {
            self.host.animate(tween);
        }
        debug!(
            card,
            value = self.cards[card].value(),
            ?selection,
            pairs = self.opened_pairs,
            "card selected"
        );
        Ok(selection)
    }

    pub fn on_animation_finished(
        &mut self,
        card: CardId,
        id: AnimationId,
    ) -> Result<(), RoundError> {
        let follow_up = self
            .cards
            .get_mut(card)
            .ok_or(RoundError::UnknownCard(card))?
            .finish(id);

        match follow_up {
            None => debug!(card, animation = id.0, "stale animation completion"),
            Some(FollowUp::None) => {}
            Some(FollowUp::Settle) => {
                self.settled += 1;
                if self.phase == RoundPhase::Dealing && self.settled >= self.cards.len() {
                    self.phase = RoundPhase::Playing;
                    debug!(round = self.round, "all cards dealt");
                }
            }
            Some(FollowUp::Exit) => {
                self.exited += 1;
                if self.phase == RoundPhase::Restarting && self.exited >= self.cards.len() {
                    self.start();
                }
            }
            Some(FollowUp::MatchCheck) => self.check_completion(),
        }
        Ok(())
    }

    fn check_completion(&mut self) {
        if self.opened_pairs != self.total_pairs() || self.phase == RoundPhase::Restarting {
            return;
        }
        self.host.play(Sound::Complete, EFFECT_VOLUME);
        if let Err(err) = self.restart_for(RoundOutcome::Completed) {
            warn!(error = %err, "completion could not restart the round");
        }
    }

    pub fn on_timer_tick(&mut self) -> TickOutcome {
        let outcome = self.countdown.tick();
        match outcome {
            TickOutcome::Paused => {}
            TickOutcome::Running(seconds) => self.host.show_time_left(seconds),
            TickOutcome::Expired(seconds) => {
                self.host.show_time_left(seconds);
                self.host.set_paused(true);
                if self.opened_pairs == self.total_pairs() {
                    // Board already cleared; the last open flip restarts it.
                    debug!(round = self.round, "time ran out after the last match");
                    return outcome;
                }
                self.host.play(Sound::Timeout, EFFECT_VOLUME);
                if let Err(err) = self.restart_for(RoundOutcome::TimedOut) {
                    warn!(error = %err, "timeout could not restart the round");
                }
            }
        }
        outcome
    }

    /// Throw the current round away and deal a new one.
    pub fn restart(&mut self) -> Result<(), RoundError> {
        if self.phase == RoundPhase::Idle {
            self.start();
            return Ok(());
        }
        self.restart_for(RoundOutcome::Abandoned)
    }

    fn restart_for(&mut self, outcome: RoundOutcome) -> Result<(), RoundError> {
        if self.phase == RoundPhase::Restarting {
            error!(round = self.round, ?outcome, "restart requested while cards are still leaving");
            return Err(RoundError::RestartInFlight);
        }

        self.countdown.pause();
        self.host.set_paused(true);

        let summary = RoundSummary {
            round: self.round,
            outcome,
            elapsed_secs: self.countdown.elapsed_secs(),
            pairs_found: self.opened_pairs,
        };
        info!(
            round = summary.round,
            outcome = ?summary.outcome,
            elapsed = summary.elapsed_secs,
            pairs = summary.pairs_found,
            "round ended"
        );
        self.scoreboard.register(summary.clone());
        self.pending_summary = Some(summary);

        self.phase = RoundPhase::Restarting;
        self.exited = 0;
        let board = self.config.board;
        let exit = Point::new(board.width + board.card_width, board.height + board.card_height);
        for card in &mut self.cards {
            let id = next_id(&mut self.next_animation);
            let delay = card.position().delay_ms;
            let tween = card.move_to(id, exit, delay, FollowUp::Exit);
            self.host.animate(tween);
        }
        Ok(())
    }
}

/// Where cards wait before they are dealt.
fn parked_point(config: &GameConfig) -> Point {
    Point::new(-config.board.card_width, -config.board.card_height)
}
