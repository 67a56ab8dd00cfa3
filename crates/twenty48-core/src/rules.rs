//! Variant rules. The classic game, the 8×8 board, and the pre-seeded
//! sandbox differ only in these settings.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, MAX_SIZE, MIN_SIZE, SpawnOptions, SpawnStrategy, Tile};
use crate::error::BoardError;

/// Named presets for [`Rules`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 4×4, spawns after every changing move, detects game over.
    #[default]
    Classic,
    /// 8×8 with the classic rules.
    Large,
    /// 8×8 pre-seeded board; no spawning and no game-over detection.
    Sandbox,
}

impl FromStr for Variant {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "large" => Ok(Variant::Large),
            "sandbox" => Ok(Variant::Sandbox),
            other => Err(BoardError::InvalidRules(format!("unknown variant {other:?}"))),
        }
    }
}

/// A sparse starting row: `row` is the row index, `values` fills from column 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedRow {
    pub row: usize,
    pub values: Vec<Tile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rules {
    #[serde(default = "defaults::size")]
    pub size: usize,
    /// Spawn a tile after each board-changing move.
    #[serde(default = "defaults::enabled")]
    pub spawn: bool,
    /// Check for a terminal board after each committed move.
    #[serde(default = "defaults::enabled")]
    pub detect_game_over: bool,
    /// Random tiles placed on an empty start board. Ignored when `initial_rows` is set.
    #[serde(default = "defaults::initial_tiles")]
    pub initial_tiles: usize,
    #[serde(default)]
    pub spawn_strategy: SpawnStrategy,
    #[serde(default)]
    pub four_chance: f64,
    /// Pre-seeded start position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_rows: Vec<SeedRow>,
}

impl Default for Rules {
    fn default() -> Self {
        Rules::preset(Variant::Classic)
    }
}

impl Rules {
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Rules {
                size: 4,
                spawn: true,
                detect_game_over: true,
                initial_tiles: defaults::initial_tiles(),
                spawn_strategy: SpawnStrategy::EmptyCells,
                four_chance: 0.0,
                initial_rows: Vec::new(),
            },
            Variant::Large => Rules {
                size: 8,
                ..Rules::preset(Variant::Classic)
            },
            Variant::Sandbox => Rules {
                size: 8,
                spawn: false,
                detect_game_over: false,
                initial_tiles: 0,
                spawn_strategy: SpawnStrategy::EmptyCells,
                four_chance: 0.0,
                initial_rows: vec![
                    SeedRow { row: 0, values: vec![2, 4, 8, 16] },
                    SeedRow { row: 1, values: vec![32, 64, 128, 256] },
                    SeedRow { row: 2, values: vec![512, 1024, 2048, 4096] },
                    SeedRow { row: 7, values: vec![2, 0, 4, 2, 0, 0, 2, 16] },
                ],
            },
        }
    }

    pub fn spawn_options(&self) -> SpawnOptions {
        SpawnOptions {
            strategy: self.spawn_strategy,
            four_chance: self.four_chance,
        }
    }

    /// Reject settings no board could satisfy.
    pub fn validate(&self) -> Result<(), BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(BoardError::InvalidSize {
                size: self.size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        if !(0.0..=1.0).contains(&self.four_chance) {
            return Err(BoardError::InvalidRules(format!(
                "four_chance must be within [0, 1], got {}",
                self.four_chance
            )));
        }
        if self.initial_tiles > self.size * self.size {
            return Err(BoardError::InvalidRules(format!(
                "initial_tiles {} exceeds the {} cells of a {}x{} board",
                self.initial_tiles,
                self.size * self.size,
                self.size,
                self.size
            )));
        }
        // builds the seeded board to surface shape and tile errors early
        if !self.initial_rows.is_empty() {
            self.seeded_board()?;
        }
        Ok(())
    }

    /// Start position: the seeded rows if any, otherwise `initial_tiles` random tiles.
    pub fn initial_board<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Board, BoardError> {
        self.validate()?;
        if !self.initial_rows.is_empty() {
            return self.seeded_board();
        }
        let mut board = Board::new(self.size)?;
        let options = self.spawn_options();
        for _ in 0..self.initial_tiles {
            board.spawn_tile(rng, &options)?;
        }
        Ok(board)
    }

    fn seeded_board(&self) -> Result<Board, BoardError> {
        let rows: Vec<(usize, Vec<Tile>)> = self
            .initial_rows
            .iter()
            .map(|seed| (seed.row, seed.values.clone()))
            .collect();
        Board::seeded(self.size, &rows)
    }
}

mod defaults {
    pub fn size() -> usize { 4 }
    pub fn enabled() -> bool { true }
    pub fn initial_tiles() -> usize { 2 }
}
