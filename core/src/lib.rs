#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::Serialize;

pub use board::*;
pub use cell::*;
pub use command::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod command;
mod engine;
mod error;
mod generator;
mod types;

/// Board dimensions `(height, width)` and mine count, only built through [`GameConfig::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (9, 9);
    pub const DEFAULT_MINES: CellCount = 10;

    const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Fails unless both sides are non-zero and at least one cell stays free of mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        if size.0 == 0 || size.1 == 0 || mines >= config.total_cells() {
            log::warn!(
                "Rejected configuration: {}x{} board with {} mines",
                size.0,
                size.1,
                mines
            );
            return Err(GameError::InvalidConfiguration);
        }
        Ok(config)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_MINES)
    }
}
