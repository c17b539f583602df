mod common;

use std::collections::HashMap;

use common::{FakeHost, finish_pending};
use memory::config::GameConfig;
use memory::game::RoundController;
use memory::game::layout::grid_positions;
use proptest::prelude::*;

fn config_for(cols: u32, rows: u32) -> GameConfig {
    let pairs = cols * rows / 2;
    GameConfig::new(cols, rows, 30, (1..=pairs).collect())
}

proptest! {
    #[test]
    fn every_round_covers_the_grid_once(
        cols in 1u32..7,
        rows in 1u32..7,
        seed in any::<u64>(),
        rounds in 1usize..4,
    ) {
        prop_assume!((cols * rows) % 2 == 0);
        let config = config_for(cols, rows);
        let grid = grid_positions(
            rows,
            cols,
            config.board.card(),
            config.board.viewport(),
        );
        let mut game = RoundController::with_seed(config, FakeHost::default(), seed).unwrap();
        game.start();

        for _ in 0..rounds {
            let mut taken: Vec<u64> = game
                .cards()
                .iter()
                .map(|card| card.position().delay_ms)
                .collect();
            taken.sort();
            let expected: Vec<u64> = grid.iter().map(|p| p.delay_ms).collect();
            prop_assert_eq!(taken, expected);

            for card in game.cards() {
                let cell = grid
                    .iter()
                    .find(|p| p.delay_ms == card.position().delay_ms)
                    .unwrap();
                prop_assert_eq!(*cell, card.position());
            }

            finish_pending(&mut game);
            game.restart().unwrap();
            finish_pending(&mut game);
        }
    }

    #[test]
    fn each_value_sits_on_exactly_two_cards(
        pairs in 1u32..12,
        seed in any::<u64>(),
    ) {
        let config = GameConfig::new(pairs * 2, 1, 30, (100..100 + pairs).collect());
        let mut game = RoundController::with_seed(config, FakeHost::default(), seed).unwrap();
        game.start();
        finish_pending(&mut game);
        game.restart().unwrap();
        finish_pending(&mut game);

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for card in game.cards() {
            *counts.entry(card.value()).or_default() += 1;
        }
        prop_assert_eq!(counts.len(), pairs as usize);
        prop_assert!(counts.values().all(|&count| count == 2));
    }
}
