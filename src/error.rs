//! Error types for the bittoe crate

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("'{input}' is not a cell number")]
    NotANumber { input: String },

    #[error("invalid move: position {position} is already occupied")]
    CellOccupied { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("the computer and the human cannot play the same mark")]
    SamePlayer,

    #[error("board string has the wrong length: expected {expected} cells, got {got}")]
    InvalidBoardLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at position {position} (expected x, o, '.' or blank)")]
    InvalidCellCharacter { character: char, position: usize },

    #[error("input was closed before a move was made")]
    InputClosed,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
