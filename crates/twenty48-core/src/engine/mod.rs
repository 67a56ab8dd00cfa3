//! Engine module: N×N 2048 board, the left-merge primitive, and the
//! rotate/transpose compositions that turn it into all four pushes.
//!
//! - `Board` owns the grid and exposes ergonomic methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Tile spawning lives in `spawn` and always takes a caller RNG.

mod ops;
pub mod spawn;
pub mod state;

pub use spawn::{SpawnOptions, SpawnStrategy, spawn_tile};
pub use state::{Board, Cell, Direction, MAX_SIZE, MIN_SIZE, Score, Tile, is_valid_tile};

pub use ops::{
    bit_length, count_empty, empty_cells, get_highest_tile_val, get_score, is_board_full,
    is_game_over, legal_moves, merge_row_left, palette_index, push, push_down, push_left,
    push_right, push_up, reverse_row, rotate_ccw, rotate_cw, shift, transpose,
};
