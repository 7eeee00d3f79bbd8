use super::*;
use alloc::vec::Vec;

/// Uses a predetermined set of mine positions, which must match the requested count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(
        &mut self,
        size: Coord2,
        count: CellCount,
        excluding: Coord2,
    ) -> Result<Array2<bool>> {
        if excluding.0 >= size.0 || excluding.1 >= size.1 {
            return Err(GameError::OutOfBounds);
        }
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in &self.mines {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mines[coords.to_nd_index()] = true;
        }

        if mines[excluding.to_nd_index()] {
            log::warn!("Fixed layout has a mine on the start cell {:?}", excluding);
            return Err(GameError::InvalidConfiguration);
        }
        let placed = mines.iter().filter(|&&mine| mine).count();
        if placed != usize::from(count) {
            log::warn!("Fixed layout has {} mines, {} were requested", placed, count);
            return Err(GameError::InvalidConfiguration);
        }

        Ok(mines)
    }
}
