use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Board has no apples")]
    NoApplesPlaced,
    #[error("Board size must be positive")]
    InvalidBoardSize,
    #[error("Snake does not match the board size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
