use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Unrecognized command")]
    InvalidCommand,
    #[error("Invalid board configuration: mines must be fewer than cells")]
    InvalidConfiguration,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
