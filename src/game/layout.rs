use rand::Rng;
use rand::seq::SliceRandom;

use super::host::{Point, Size};

pub const CELL_PADDING: f64 = 4.0;
pub const STAGGER_STEP_MS: u64 = 100;

/// A grid cell and the stagger delay of the card dealt onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub delay_ms: u64,
}

impl Position {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Row-major grid centred in `viewport`. Delays grow with the raster index,
/// starting at one step.
pub fn grid_positions(rows: u32, cols: u32, card: Size, viewport: Size) -> Vec<Position> {
    let cell_width = card.width + CELL_PADDING;
    let cell_height = card.height + CELL_PADDING;
    let offset_x = (viewport.width - cell_width * cols as f64) / 2.0 + cell_width / 2.0;
    let offset_y = (viewport.height - cell_height * rows as f64) / 2.0 + cell_height / 2.0;

    let mut positions = Vec::with_capacity((rows * cols) as usize);
    let mut index = 0u64;
    for row in 0..rows {
        for col in 0..cols {
            index += 1;
            positions.push(Position {
                x: offset_x + col as f64 * cell_width,
                y: offset_y + row as f64 * cell_height,
                delay_ms: index * STAGGER_STEP_MS,
            });
        }
    }
    positions
}

/// Uniform permutation of the cells. Each delay stays with its cell.
pub fn shuffle<R: Rng + ?Sized>(mut positions: Vec<Position>, rng: &mut R) -> Vec<Position> {
    positions.shuffle(rng);
    positions
}
