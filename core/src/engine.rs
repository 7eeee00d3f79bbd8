use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No cell revealed yet, mines not placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What the player sees after a move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub status: GameStatus,
    pub mines_left: i32,
}

impl Snapshot {
    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

/// A single game from the first move to a win or loss.
///
/// Mines are laid by `G` on the first reveal, keeping the revealed cell safe.
#[derive(Clone, Debug)]
pub struct Game<G = RandomMineGenerator> {
    config: GameConfig,
    board: Board,
    generator: G,
    status: GameStatus,
}

impl<G: MineGenerator> Game<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        Self {
            board: Board::new(config.size()),
            config,
            generator,
            status: GameStatus::default(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn apply(&mut self, command: Command) -> Result<GameStatus> {
        match command.kind {
            CommandKind::Reveal => self.reveal(command.coords()),
            CommandKind::ToggleFlag => self.toggle_flag(command.coords()),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<GameStatus> {
        self.check_not_finished()?;
        let coords = self.board.validate_coords(coords)?;

        if !self.board.mines_placed() {
            let placed = self
                .board
                .place_mines(self.config.mines(), coords, &mut self.generator);
            if let Err(err) = placed {
                log::warn!("Could not lay mines: {}", err);
                return Err(err);
            }
            self.status = GameStatus::InProgress;
            log::info!("Game started at {:?}", coords);
        }

        if self.board.reveal(coords)?.is_loss() {
            self.status = GameStatus::Lost;
            log::info!("Game lost at {:?}", coords);
        } else {
            self.check_won();
        }
        Ok(self.status)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<GameStatus> {
        self.check_not_finished()?;
        if self.board.toggle_flag(coords)?.has_update() {
            self.check_won();
        }
        Ok(self.status)
    }

    /// Current view of the board, with every mine uncovered once the game is lost.
    pub fn snapshot(&self) -> Snapshot {
        let show_mines = matches!(self.status, GameStatus::Lost);
        Snapshot {
            size: self.board.size(),
            cells: self.board.snapshot(show_mines),
            status: self.status,
            mines_left: if self.board.mines_placed() {
                self.board.mines_left()
            } else {
                i32::from(self.config.mines()) - i32::from(self.board.flagged_count())
            },
        }
    }

    fn check_won(&mut self) {
        // an empty board would count as exactly flagged
        if matches!(self.status, GameStatus::InProgress) && self.board.check_win() {
            self.status = GameStatus::Won;
            log::info!("Game won");
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
