#![allow(dead_code)]

use std::time::Duration;

use memory::config::GameConfig;
use memory::game::{
    AudioPlayer, CardId, Clock, Point, RenderSurface, RoundController, Sound, Tween,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Background(String),
    Spawn(CardId, String, Point),
    Reset(CardId, String, Point),
    Depth(CardId, i32),
    Animate(Tween),
    TimeLeft(i64),
    Play(Sound, f64),
    StartRepeating(Duration),
    Paused(bool),
}

/// Records every capability call and keeps animations in flight until the
/// test finishes them.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub calls: Vec<Call>,
    pub in_flight: Vec<Tween>,
}

impl FakeHost {
    pub fn sounds(&self) -> Vec<Sound> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Play(sound, _) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    pub fn clock_paused(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Paused(paused) => Some(*paused),
            _ => None,
        })
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl RenderSurface for FakeHost {
    fn place_background(&mut self, texture: &str) {
        self.calls.push(Call::Background(texture.to_string()));
    }

    fn spawn_card(&mut self, card: CardId, texture: &str, at: Point) {
        self.calls.push(Call::Spawn(card, texture.to_string(), at));
    }

    fn reset_card(&mut self, card: CardId, texture: &str, at: Point) {
        self.calls.push(Call::Reset(card, texture.to_string(), at));
    }

    fn set_depth(&mut self, card: CardId, depth: i32) {
        self.calls.push(Call::Depth(card, depth));
    }

    fn animate(&mut self, tween: Tween) {
        self.calls.push(Call::Animate(tween.clone()));
        self.in_flight.push(tween);
    }

    fn show_time_left(&mut self, seconds: i64) {
        self.calls.push(Call::TimeLeft(seconds));
    }
}

impl AudioPlayer for FakeHost {
    fn play(&mut self, sound: Sound, volume: f64) {
        self.calls.push(Call::Play(sound, volume));
    }
}

impl Clock for FakeHost {
    fn start_repeating(&mut self, interval: Duration) {
        self.calls.push(Call::StartRepeating(interval));
    }

    fn set_paused(&mut self, paused: bool) {
        self.calls.push(Call::Paused(paused));
    }
}

pub type Game = RoundController<FakeHost>;

pub fn example_config() -> GameConfig {
    GameConfig::new(2, 2, 10, vec![1, 2])
}

/// Complete the animations in flight right now, oldest first. Animations
/// requested by the completions stay in flight.
pub fn finish_pending(game: &mut Game) {
    let pending = std::mem::take(&mut game.host_mut().in_flight);
    for tween in pending {
        game.on_animation_finished(tween.card, tween.id).unwrap();
    }
}

/// Complete animations of one card only, leaving the rest in flight.
pub fn finish_card(game: &mut Game, card: CardId) {
    let (mine, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut game.host_mut().in_flight)
        .into_iter()
        .partition(|tween| tween.card == card);
    game.host_mut().in_flight = rest;
    for tween in mine {
        game.on_animation_finished(tween.card, tween.id).unwrap();
    }
}

pub fn dealt_game(config: GameConfig, seed: u64) -> Game {
    let mut game = RoundController::with_seed(config, FakeHost::default(), seed).unwrap();
    game.start();
    finish_pending(&mut game);
    game
}

pub fn pair_of(game: &Game, value: u32) -> (CardId, CardId) {
    let ids: Vec<CardId> = game
        .cards()
        .iter()
        .filter(|card| card.value() == value)
        .map(|card| card.id())
        .collect();
    assert_eq!(ids.len(), 2, "value {value} must be on exactly two cards");
    (ids[0], ids[1])
}
