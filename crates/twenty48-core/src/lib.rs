//! twenty48-core: a deterministic 2048 board engine.
//!
//! This crate provides:
//! - An N×N `Board` with the four pushes built from one left-merge primitive (`engine`)
//! - A checked random-tile spawner that never loops on a full board (`engine::spawn`)
//! - Variant rules for the classic, large and sandbox games (`rules`)
//! - A turn controller that applies one intent per frame (`game`)
//!
//! Quick start:
//! ```
//! use twenty48_core::engine::{Board, Direction};
//!
//! let b = Board::from_rows(vec![
//!     vec![2, 2, 4, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![2, 0, 0, 2],
//! ]).unwrap();
//! let left = b.shifted(Direction::Left);
//! assert_eq!(left.row(0), &[4, 4, 0, 0]);
//! assert_eq!(left.row(3), &[4, 0, 0, 0]);
//! assert_eq!(left.score(), b.score());
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use twenty48_core::{Game, Rules, TurnOutcome};
//! use twenty48_core::engine::Direction;
//!
//! // 1) Classic 4x4 game with a fixed seed
//! let mut game = Game::new(Rules::default(), 123).unwrap();
//!
//! // 2) Feed intents until the game ends or we run out of patience
//! let mut committed = 0;
//! for dir in Direction::ALL.iter().cycle().take(200) {
//!     match game.step(Some(*dir)) {
//!         TurnOutcome::Committed(_) => committed += 1,
//!         TurnOutcome::Finished => break,
//!         _ => {}
//!     }
//! }
//!
//! // 3) Inspect final state
//! assert!(committed > 0);
//! assert_eq!(game.turns(), committed);
//! ```
pub mod engine;
pub mod error;
pub mod game;
pub mod rules;

pub use error::BoardError;
pub use game::{Game, Phase, TurnOutcome, TurnReport};
pub use rules::{Rules, SeedRow, Variant};
