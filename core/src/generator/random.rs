use super::*;
use rand::prelude::*;

/// Places mines uniformly at random among every cell except the excluded one.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(
        &mut self,
        size: Coord2,
        count: CellCount,
        excluding: Coord2,
    ) -> Result<Array2<bool>> {
        let total_cells = mult(size.0, size.1);
        if count >= total_cells {
            log::warn!(
                "Cannot keep start cell safe, requested {} mines but only {} cells",
                count,
                total_cells
            );
            return Err(GameError::InvalidConfiguration);
        }
        if excluding.0 >= size.0 || excluding.1 >= size.1 {
            return Err(GameError::OutOfBounds);
        }

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        // occupied while placing so it is never picked
        mines[excluding.to_nd_index()] = true;
        let mut free_cells = total_cells - 1;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mines.as_slice_mut().expect("layout should be standard");
            for _ in 0..count {
                let mut place = rng.random_range(0..free_cells);
                for cell in cells.iter_mut().filter(|cell| !**cell) {
                    if place == 0 {
                        *cell = true;
                        break;
                    }
                    place -= 1;
                }
                free_cells -= 1;
            }
        }

        mines[excluding.to_nd_index()] = false;
        Ok(mines)
    }
}
