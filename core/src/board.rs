use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of revealing a cell. `NoChange` and `Revealed` both let the game continue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn is_loss(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

/// Grid of cells stored row-major, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    mines_placed: bool,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Empty board: no mines, nothing revealed or flagged.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
            mines_placed: false,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Board with mines at exactly `mines`, adjacency already computed.
    pub fn with_mines(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size);
        for &coords in mines {
            board.validate_coords(coords)?;
        }
        for &coords in mines {
            board.cells[coords.to_nd_index()].mine = true;
        }
        board.finish_placement();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flagged_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Lays `count` mines anywhere but `excluding`, then computes adjacency.
    ///
    /// Nothing changes unless every check passes.
    pub fn place_mines<G: MineGenerator>(
        &mut self,
        count: CellCount,
        excluding: Coord2,
        generator: &mut G,
    ) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        if count >= self.total_cells() {
            log::warn!(
                "Refusing to place {} mines on {} cells",
                count,
                self.total_cells()
            );
            return Err(GameError::InvalidConfiguration);
        }
        let excluding = self.validate_coords(excluding)?;

        let mines = generator.generate(self.size(), count, excluding)?;
        if mines.dim() != self.cells.dim() {
            return Err(GameError::InvalidConfiguration);
        }
        if mines[excluding.to_nd_index()] {
            log::warn!("Generated layout has a mine on the start cell {:?}", excluding);
            return Err(GameError::InvalidConfiguration);
        }
        let placed = mines.iter().filter(|&&mine| mine).count();
        if placed != usize::from(count) {
            log::warn!("Generated {} mines, {} were requested", placed, count);
            return Err(GameError::InvalidConfiguration);
        }

        ndarray::Zip::from(&mut self.cells)
            .and(&mines)
            .for_each(|cell, &mine| cell.mine = mine);
        self.finish_placement();
        log::debug!(
            "Placed {} mines on a {:?} board, start cell {:?}",
            self.mine_count,
            self.size(),
            excluding
        );
        Ok(())
    }

    fn finish_placement(&mut self) {
        let placed = self.cells.iter().filter(|cell| cell.mine).count();
        // bounded by the cell count, which fits a `CellCount`
        self.mine_count = placed as CellCount;
        self.mines_placed = true;
        self.compute_adjacency();
    }

    /// Sets every non-mine cell's adjacent count from its in-bounds neighbours.
    pub fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.cells[coords.to_nd_index()].mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].mine)
                    .count();
                self.cells[coords.to_nd_index()].adjacent = count as u8;
            }
        }
    }

    /// Flips the flag on an unrevealed cell; revealed cells keep their state.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.revealed {
            log::debug!("Ignoring flag on revealed cell {:?}", coords);
            return Ok(FlagOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::debug!("Flag at {:?} is now {}", coords, cell.flagged);
        Ok(FlagOutcome::Changed)
    }

    /// Reveals a cell, flooding outwards through zero cells.
    ///
    /// A mine is reported as [`RevealOutcome::HitMine`] and left unrevealed.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if cell.revealed {
            return Ok(RevealOutcome::NoChange);
        }
        if cell.mine {
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.open_cell(coords);
        log::debug!("Revealed {:?}, adjacent mines: {}", coords, cell.adjacent);

        if cell.adjacent == 0 {
            let mut to_visit: Vec<Coord2> = self.iter_neighbors(coords).collect();

            while let Some(visit_coords) = to_visit.pop() {
                let visit = self.cells[visit_coords.to_nd_index()];
                if visit.revealed || visit.mine {
                    continue;
                }

                self.open_cell(visit_coords);
                log::trace!(
                    "Flood revealed {:?}, adjacent mines: {}",
                    visit_coords,
                    visit.adjacent
                );

                if visit.adjacent == 0 {
                    to_visit.extend(
                        self.iter_neighbors(visit_coords)
                            .filter(|&pos| !self.cells[pos.to_nd_index()].revealed),
                    );
                }
            }
        }

        Ok(RevealOutcome::Revealed)
    }

    fn open_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.revealed = true;
        if cell.flagged {
            cell.flagged = false;
            self.flagged_count -= 1;
        }
        self.revealed_count += 1;
    }

    /// Won when every safe cell is revealed, or when the flags sit on exactly the mines.
    pub fn check_win(&self) -> bool {
        self.all_safe_revealed() || self.flags_match_mines()
    }

    fn all_safe_revealed(&self) -> bool {
        self.cells.iter().all(|cell| cell.mine || cell.revealed)
    }

    fn flags_match_mines(&self) -> bool {
        self.cells.iter().all(|cell| cell.mine == cell.flagged)
    }

    /// Player-visible grid; `show_mines` uncovers every mine for the end screen.
    pub fn snapshot(&self, show_mines: bool) -> Array2<CellView> {
        self.cells.map(|&cell| {
            if show_mines && cell.mine {
                CellView::Mine
            } else {
                cell.view()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::with_mines(size, mines).unwrap()
    }

    /// Hands back its layout whatever was asked for.
    struct MaskGenerator<'a>(&'a [Coord2]);

    impl MineGenerator for MaskGenerator<'_> {
        fn generate(&mut self, size: Coord2, _: CellCount, _: Coord2) -> Result<Array2<bool>> {
            let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
            for &coords in self.0 {
                mines[coords.to_nd_index()] = true;
            }
            Ok(mines)
        }
    }

    fn brute_force_count(board: &Board, (row, col): Coord2) -> u8 {
        let (rows, cols) = board.size();
        let mut count = 0;
        for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(cols - 1) {
                if (r, c) != (row, col) && board.cell_at((r, c)).unwrap().mine {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn new_board_is_blank() {
        let board = Board::new((4, 6));
        assert_eq!(board.size(), (4, 6));
        assert_eq!(board.total_cells(), 24);
        assert!(!board.mines_placed());
        assert_eq!(board.cell_at((3, 5)).unwrap(), Cell::default());
    }

    #[test]
    fn adjacency_matches_neighbor_mines() {
        for (seed, size) in [(1, (9, 9)), (2, (3, 12)), (3, (1, 5)), (4, (16, 16))] {
            let mut board = Board::new(size);
            let count = board.total_cells() / 4;
            board
                .place_mines(count, (0, 0), &mut RandomMineGenerator::new(seed))
                .unwrap();
            assert_eq!(board.mine_count(), count);

            for row in 0..size.0 {
                for col in 0..size.1 {
                    let cell = board.cell_at((row, col)).unwrap();
                    if !cell.mine {
                        assert_eq!(cell.adjacent, brute_force_count(&board, (row, col)));
                    }
                }
            }
        }
    }

    #[test]
    fn excluded_cell_never_loses() {
        for seed in 0..100 {
            let mut board = Board::new((5, 5));
            board
                .place_mines(24, (2, 3), &mut RandomMineGenerator::new(seed))
                .unwrap();
            assert_eq!(board.reveal((2, 3)).unwrap(), RevealOutcome::Revealed);
        }
    }

    #[test]
    fn place_mines_rejects_too_many() {
        let mut board = Board::new((3, 3));
        let before = board.clone();

        let result = board.place_mines(9, (0, 0), &mut RandomMineGenerator::new(0));

        assert_eq!(result, Err(GameError::InvalidConfiguration));
        assert_eq!(board, before);
    }

    #[test]
    fn place_mines_rejects_mine_on_start_cell() {
        let mut board = Board::new((3, 3));
        let before = board.clone();

        let result = board.place_mines(1, (0, 0), &mut MaskGenerator(&[(0, 0)]));

        assert_eq!(result, Err(GameError::InvalidConfiguration));
        assert_eq!(board, before);
    }

    #[test]
    fn place_mines_rejects_wrong_mine_total() {
        let mut board = Board::new((3, 3));
        let before = board.clone();

        let result = board.place_mines(3, (0, 0), &mut MaskGenerator(&[(2, 2)]));

        assert_eq!(result, Err(GameError::InvalidConfiguration));
        assert_eq!(board, before);
    }

    #[test]
    fn place_mines_only_once() {
        let mut board = Board::new((3, 3));
        board
            .place_mines(2, (0, 0), &mut RandomMineGenerator::new(0))
            .unwrap();
        let before = board.clone();

        let result = board.place_mines(2, (0, 0), &mut RandomMineGenerator::new(1));

        assert_eq!(result, Err(GameError::MinesAlreadyPlaced));
        assert_eq!(board, before);
    }

    #[test]
    fn with_mines_rejects_out_of_bounds() {
        assert_eq!(
            Board::with_mines((2, 2), &[(0, 0), (2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn flood_fill_stops_at_digits_and_mines() {
        // mine in the middle column splits the board
        let mut board = board((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        assert_eq!(board.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);

        for row in 0..3 {
            assert!(board.cell_at((row, 0)).unwrap().revealed);
            assert!(board.cell_at((row, 1)).unwrap().revealed);
            assert!(!board.cell_at((row, 2)).unwrap().revealed);
            assert!(!board.cell_at((row, 3)).unwrap().revealed);
            assert!(!board.cell_at((row, 4)).unwrap().revealed);
        }
        assert_eq!(board.cell_at((1, 1)).unwrap().view(), CellView::Digit(3));
        assert_eq!(board.cell_at((0, 0)).unwrap().view(), CellView::Blank);
        assert_eq!(board.revealed_count(), 6);
    }

    #[test]
    fn flood_fill_reveals_zero_region_and_border() {
        let mut board = board((4, 4), &[(3, 3)]);

        board.reveal((0, 0)).unwrap();

        let hidden: Vec<_> = board
            .snapshot(false)
            .indexed_iter()
            .filter(|(_, view)| **view == CellView::Hidden)
            .map(|((row, col), _)| (row, col))
            .collect();
        assert_eq!(hidden, vec![(3, 3)]);
        assert_eq!(board.cell_at((2, 2)).unwrap().view(), CellView::Digit(1));
        assert!(board.check_win());
    }

    #[test]
    fn single_mine_reveal_then_hit() {
        let mut board = board((9, 9), &[(5, 5)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.revealed_count(), 80);
        let view = board.snapshot(false);
        assert_eq!(view[[5, 5]], CellView::Hidden);
        assert_eq!(view[[4, 4]], CellView::Digit(1));
        assert_eq!(view[[0, 0]], CellView::Blank);

        assert_eq!(board.reveal((5, 5)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(board.snapshot(true)[[5, 5]], CellView::Mine);
    }

    #[test]
    fn digit_reveal_does_not_propagate() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.reveal((1, 1)).unwrap();

        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.cell_at((1, 1)).unwrap().view(), CellView::Digit(1));
    }

    #[test]
    fn reveal_mine_reports_loss_without_revealing() {
        let mut board = board((2, 2), &[(0, 0)]);

        let outcome = board.reveal((0, 0)).unwrap();

        assert!(outcome.is_loss());
        assert!(!board.cell_at((0, 0)).unwrap().revealed);
    }

    #[test]
    fn reveal_again_is_no_change() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn reveal_clears_flags_in_the_fill() {
        let mut board = board((3, 3), &[(2, 2)]);
        board.toggle_flag((0, 1)).unwrap();
        assert_eq!(board.flagged_count(), 1);

        board.reveal((0, 0)).unwrap();

        let cell = board.cell_at((0, 1)).unwrap();
        assert!(cell.revealed);
        assert!(!cell.flagged);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn out_of_bounds_leaves_board_unchanged() {
        let mut board = board((3, 3), &[(1, 1)]);
        let before = board.clone();

        assert_eq!(board.reveal((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.toggle_flag((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(board, before);
    }

    #[test]
    fn toggle_flag_twice_round_trips() {
        let mut board = board((3, 3), &[(1, 1)]);
        let before = board.clone();

        assert_eq!(board.toggle_flag((0, 2)).unwrap(), FlagOutcome::Changed);
        assert!(board.cell_at((0, 2)).unwrap().flagged);
        assert_eq!(board.mines_left(), 0);
        assert_eq!(board.toggle_flag((0, 2)).unwrap(), FlagOutcome::Changed);

        assert_eq!(board, before);
    }

    #[test]
    fn flag_on_revealed_digit_is_rejected() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        let before = board.clone();

        let outcome = board.toggle_flag((1, 1)).unwrap();

        assert_eq!(outcome, FlagOutcome::NoChange);
        assert!(!outcome.has_update());
        assert_eq!(board, before);
    }

    #[test]
    fn win_by_exact_flags_without_reveals() {
        let mut board = board((3, 3), &[(0, 0), (1, 1)]);

        board.toggle_flag((0, 0)).unwrap();
        assert!(!board.check_win());
        board.toggle_flag((1, 1)).unwrap();
        assert!(board.check_win());
        assert_eq!(board.revealed_count(), 0);

        // an extra flag on a safe cell breaks the match
        board.toggle_flag((2, 2)).unwrap();
        assert!(!board.check_win());
    }

    #[test]
    fn win_by_revealing_every_safe_cell() {
        let mut board = board((1, 3), &[(0, 0)]);

        board.reveal((0, 1)).unwrap();
        assert!(!board.check_win());
        board.reveal((0, 2)).unwrap();
        assert!(board.check_win());
    }

    #[test]
    fn snapshot_can_uncover_mines() {
        let mut board = board((2, 2), &[(0, 0), (1, 1)]);
        board.toggle_flag((1, 1)).unwrap();

        let hidden = board.snapshot(false);
        assert_eq!(hidden[[0, 0]], CellView::Hidden);
        assert_eq!(hidden[[1, 1]], CellView::Flagged);

        let shown = board.snapshot(true);
        assert_eq!(shown[[0, 0]], CellView::Mine);
        assert_eq!(shown[[1, 1]], CellView::Mine);
        assert_eq!(shown[[0, 1]], CellView::Hidden);
    }
}
