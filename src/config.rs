use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::Size;

/// Board geometry in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGeometry {
    pub width: f64,
    pub height: f64,
    pub card_width: f64,
    pub card_height: f64,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        BoardGeometry {
            width: 1280.0,
            height: 720.0,
            card_width: 96.0,
            card_height: 128.0,
        }
    }
}

impl BoardGeometry {
    pub fn viewport(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn card(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }
}

/// Static game configuration. Every value in `cards` is dealt twice, so the
/// grid must hold exactly `2 * cards.len()` cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub cols: u32,
    pub rows: u32,
    /// Countdown budget in whole seconds.
    pub timeout: u32,
    pub cards: Vec<u32>,
    #[serde(default)]
    pub board: BoardGeometry,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cols: 5,
            rows: 2,
            timeout: 30,
            cards: vec![1, 2, 3, 4, 5],
            board: BoardGeometry::default(),
        }
    }
}

impl GameConfig {
    pub fn new(cols: u32, rows: u32, timeout: u32, cards: Vec<u32>) -> Self {
        GameConfig {
            cols,
            rows,
            timeout,
            cards,
            board: BoardGeometry::default(),
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len()
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len() * 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards.is_empty() {
            return Err(ConfigError::NoCards);
        }
        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let cells = self.cols as usize * self.rows as usize;
        if cells != self.total_cards() {
            return Err(ConfigError::GridMismatch {
                cols: self.cols,
                rows: self.rows,
                pairs: self.cards.len(),
            });
        }
        let mut seen = HashSet::with_capacity(self.cards.len());
        for &value in &self.cards {
            if !seen.insert(value) {
                return Err(ConfigError::DuplicateValue(value));
            }
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_cards(), 10);
    }

    #[test]
    fn rejects_grid_that_does_not_fit_the_pairs() {
        let config = GameConfig::new(3, 3, 10, vec![1, 2, 3, 4]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridMismatch { cols: 3, rows: 3, pairs: 4 })
        ));
    }

    #[test]
    fn rejects_duplicate_values() {
        let config = GameConfig::new(2, 2, 10, vec![7, 7]);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateValue(7))));
    }

    #[test]
    fn rejects_empty_cards_and_zero_timeout() {
        assert!(matches!(
            GameConfig::new(0, 0, 10, vec![]).validate(),
            Err(ConfigError::NoCards)
        ));
        assert!(matches!(
            GameConfig::new(2, 2, 0, vec![1, 2]).validate(),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn parses_json_without_board_section() {
        let config =
            GameConfig::from_json_str(r#"{"cols":2,"rows":2,"timeout":10,"cards":[1,2]}"#)
                .unwrap();
        assert_eq!(config.cols, 2);
        assert_eq!(config.board, BoardGeometry::default());
    }

    #[test]
    fn parse_errors_surface_as_config_errors() {
        assert!(matches!(
            GameConfig::from_json_str("{\"cols\":"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{"cols":3,"rows":1,"timeout":10,"cards":[1,2]}"#),
            Err(ConfigError::GridMismatch { .. })
        ));
    }
}
