use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::ops;
use super::spawn::{self, SpawnOptions};
use crate::error::BoardError;
use serde::{Deserialize, Serialize};

/// A single cell value: 0 for empty, otherwise a power of two >= 2.
pub type Tile = i64;
/// Sum of all tiles on a board. Wider than `Tile` so a full board of the
/// largest tiles still sums exactly.
pub type Score = i128;
/// `(row, col)` coordinate on a board.
pub type Cell = (usize, usize);

/// Smallest supported board edge.
pub const MIN_SIZE: usize = 2;
/// Largest supported board edge.
pub const MAX_SIZE: usize = 16;

/// A direction to push tiles toward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Every direction, in the order game-over probing tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Map the classic `wasd` bindings to a direction. Any other key is no intent.
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "a" => Ok(Direction::Left),
            "right" | "r" | "d" => Ok(Direction::Right),
            "up" | "u" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            other => Err(BoardError::InvalidDirection(other.to_string())),
        }
    }
}

/// True for 0 and for powers of two from 2 upward.
#[inline]
pub fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value.count_ones() == 1)
}

/// Square N×N 2048 board stored row-major.
///
/// The edge length is validated once at construction; every operation after
/// that indexes within `0..size`. Cloning yields an independent scratch copy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// An empty `size`×`size` board.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// let b = Board::new(4).unwrap();
    /// assert_eq!(b.count_empty(), 16);
    /// assert!(Board::new(1).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        Ok(Board {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Build a board from complete rows. The row count sets the edge length.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// let b = Board::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(b.get(1, 1), 4);
    /// assert!(Board::from_rows(vec![vec![3, 0], vec![0, 0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, BoardError> {
        let size = rows.len();
        check_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::RaggedRow {
                    row: r,
                    len: row.len(),
                    expected: size,
                });
            }
            for (c, value) in row.into_iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row: r, col: c, value });
                }
                cells.push(value);
            }
        }
        Ok(Board { size, cells })
    }

    /// Build a `size`×`size` board from a partial set of rows.
    ///
    /// `rows` holds `(row_index, values)` pairs; each row may be shorter than
    /// `size` and is padded with empty cells. Unlisted rows stay empty.
    pub fn seeded(size: usize, rows: &[(usize, Vec<Tile>)]) -> Result<Self, BoardError> {
        let mut board = Board::new(size)?;
        for (r, values) in rows {
            let r = *r;
            if r >= size {
                return Err(BoardError::OutOfBounds { row: r, col: 0, size });
            }
            if values.len() > size {
                return Err(BoardError::RaggedRow {
                    row: r,
                    len: values.len(),
                    expected: size,
                });
            }
            for (c, &value) in values.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row: r, col: c, value });
                }
                board.cells[r * size + c] = value;
            }
        }
        Ok(board)
    }

    /// Edge length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at `(row, col)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row * self.size + col]
    }

    /// Place `value` at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: Tile) -> Result<(), BoardError> {
        if !is_valid_tile(value) {
            return Err(BoardError::InvalidTile { row, col, value });
        }
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        self.cells[row * self.size + col] = value;
        Ok(())
    }

    /// Read-only view of row `idx`.
    #[inline]
    pub fn row(&self, idx: usize) -> &[Tile] {
        &self.cells[idx * self.size..(idx + 1) * self.size]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, idx: usize) -> &mut [Tile] {
        let n = self.size;
        &mut self.cells[idx * n..(idx + 1) * n]
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Tile] {
        &mut self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Tile> {
        self.cells.chunks_exact(self.size)
    }

    /// Copy out the rows, e.g. for serialization or a renderer.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Push tiles in `dir`, merging equal neighbours once, in place.
    #[inline]
    pub fn push(&mut self, dir: Direction) {
        ops::push(self, dir)
    }

    /// Return the board that results from pushing in `dir` (no spawn).
    ///
    /// ```
    /// use twenty48_core::engine::{Board, Direction};
    /// let b = Board::from_rows(vec![vec![2, 2], vec![0, 4]]).unwrap();
    /// let left = b.shifted(Direction::Left);
    /// assert_eq!(left.to_rows(), vec![vec![4, 0], vec![4, 0]]);
    /// assert_eq!(b.get(0, 0), 2);
    /// ```
    #[inline]
    pub fn shifted(&self, dir: Direction) -> Board {
        ops::shift(self, dir)
    }

    /// Sum of all tiles.
    #[inline]
    pub fn score(&self) -> Score {
        ops::get_score(self)
    }

    /// Largest tile on the board, 0 when empty.
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        ops::get_highest_tile_val(self)
    }

    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    /// Coordinates of every empty cell in row-major order.
    #[inline]
    pub fn empty_cells(&self) -> Vec<Cell> {
        ops::empty_cells(self)
    }

    /// True when no cell is empty.
    #[inline]
    pub fn is_full(&self) -> bool {
        ops::is_board_full(self)
    }

    /// True when the board is full and no push in any direction changes it.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// let stuck = Board::from_rows(vec![vec![2, 4], vec![4, 2]]).unwrap();
    /// assert!(stuck.is_game_over());
    /// assert!(!Board::new(4).unwrap().is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(&self) -> bool {
        ops::is_game_over(self)
    }

    /// Directions whose push would change the board.
    #[inline]
    pub fn legal_moves(&self) -> Vec<Direction> {
        ops::legal_moves(self)
    }

    /// Place one new tile into a random empty cell, using the provided RNG.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_core::engine::{Board, SpawnOptions};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let mut b = Board::new(4).unwrap();
    /// let (r, c) = b.spawn_tile(&mut rng, &SpawnOptions::default()).unwrap();
    /// assert_eq!(b.get(r, c), 2);
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    #[inline]
    pub fn spawn_tile<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        options: &SpawnOptions,
    ) -> Result<Cell, BoardError> {
        spawn::spawn_tile(self, rng, options)
    }
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::InvalidSize {
            size,
            min: MIN_SIZE,
            max: MAX_SIZE,
        })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("rows", &self.to_rows())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = ops::cell_width(self);
        let rule = "-".repeat(self.size * (width + 1) - 1);
        writeln!(f)?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|v| ops::format_val(*v, width)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}
