use thiserror::Error;

use crate::engine::Tile;

/// Errors raised while building boards, validating rules, or spawning tiles.
///
/// Board operations themselves (pushes, rotations, terminal checks) are total
/// and never return one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {size} is outside the supported range {min}..={max}")]
    InvalidSize { size: usize, min: usize, max: usize },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) holds {value}, which is neither empty nor a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },

    #[error("board is full; no empty cell to spawn into")]
    BoardFull,

    #[error("unknown direction {0:?}")]
    InvalidDirection(String),

    #[error("invalid rules: {0}")]
    InvalidRules(String),
}
