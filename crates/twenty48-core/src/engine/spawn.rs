use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Board, Cell, Tile};
use crate::error::BoardError;

/// How an empty cell is chosen for a new tile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnStrategy {
    /// Draw uniformly from the list of empty coordinates.
    #[default]
    EmptyCells,
    /// Redraw random in-bounds coordinates until an empty one comes up.
    Rejection,
}

/// Knobs for [`spawn_tile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpawnOptions {
    #[serde(default)]
    pub strategy: SpawnStrategy,
    /// Probability in `[0, 1]` of placing a 4 instead of a 2.
    #[serde(default)]
    pub four_chance: f64,
}

/// Place one new tile in a random empty cell and return its coordinates.
///
/// A full board is reported as [`BoardError::BoardFull`] before any sampling
/// starts, so the rejection strategy always has an empty cell to find.
pub fn spawn_tile<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    options: &SpawnOptions,
) -> Result<Cell, BoardError> {
    if board.is_full() {
        return Err(BoardError::BoardFull);
    }
    let (row, col) = match options.strategy {
        SpawnStrategy::EmptyCells => {
            let empty = board.empty_cells();
            empty[rng.gen_range(0..empty.len())]
        }
        SpawnStrategy::Rejection => {
            let n = board.size();
            loop {
                let row = rng.gen_range(0..n);
                let col = rng.gen_range(0..n);
                if board.get(row, col) == 0 {
                    break (row, col);
                }
            }
        }
    };
    let value = generate_random_tile(rng, options.four_chance);
    board.set(row, col, value)?;
    Ok((row, col))
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R, four_chance: f64) -> Tile {
    if four_chance > 0.0 && rng.gen_bool(four_chance.min(1.0)) {
        4
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn options(strategy: SpawnStrategy) -> SpawnOptions {
        SpawnOptions {
            strategy,
            four_chance: 0.0,
        }
    }

    #[test]
    fn it_spawns_exactly_one_two() {
        for strategy in [SpawnStrategy::EmptyCells, SpawnStrategy::Rejection] {
            let mut rng = StdRng::seed_from_u64(17);
            let mut board =
                Board::from_rows(vec![vec![4, 8, 0], vec![0, 16, 32], vec![64, 0, 128]]).unwrap();
            let before = board.clone();
            let (r, c) = spawn_tile(&mut board, &mut rng, &options(strategy)).unwrap();
            assert_eq!(before.get(r, c), 0);
            assert_eq!(board.get(r, c), 2);
            assert_eq!(board.count_empty(), before.count_empty() - 1);
            for row in 0..3 {
                for col in 0..3 {
                    if (row, col) != (r, c) {
                        assert_eq!(board.get(row, col), before.get(row, col));
                    }
                }
            }
        }
    }

    #[test]
    fn it_fills_board_then_reports_full() {
        for strategy in [SpawnStrategy::EmptyCells, SpawnStrategy::Rejection] {
            let mut rng = StdRng::seed_from_u64(1);
            let mut board = Board::new(4).unwrap();
            for _ in 0..16 {
                spawn_tile(&mut board, &mut rng, &options(strategy)).unwrap();
            }
            assert_eq!(board.count_empty(), 0);
            assert_eq!(board.score(), 32);
            assert_eq!(
                spawn_tile(&mut board, &mut rng, &options(strategy)),
                Err(BoardError::BoardFull)
            );
        }
    }

    #[test]
    fn it_respects_four_chance() {
        let mut rng = StdRng::seed_from_u64(5);
        let always_four = SpawnOptions {
            strategy: SpawnStrategy::EmptyCells,
            four_chance: 1.0,
        };
        let mut board = Board::new(2).unwrap();
        let (r, c) = spawn_tile(&mut board, &mut rng, &always_four).unwrap();
        assert_eq!(board.get(r, c), 4);
    }

    #[test]
    fn seeded_spawns_are_reproducible() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(2024);
            let mut board = Board::new(4).unwrap();
            (0..6)
                .map(|_| spawn_tile(&mut board, &mut rng, &SpawnOptions::default()).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
