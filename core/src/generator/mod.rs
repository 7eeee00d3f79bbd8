use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of a mine mask for a board of `size` with `count` mines, where `excluding` must stay mine-free.
pub trait MineGenerator {
    fn generate(
        &mut self,
        size: Coord2,
        count: CellCount,
        excluding: Coord2,
    ) -> Result<Array2<bool>>;
}
