//! Turn controller: owns the live board and applies one intent per frame.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::engine::{Board, Cell, Direction, Score, SpawnOptions, Tile};
use crate::error::BoardError;
use crate::rules::Rules;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the next intent.
    Idle,
    /// A candidate move is being tried on a scratch copy.
    Evaluating,
    /// No push can change the board any more.
    GameOver,
}

/// What a committed move did.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TurnReport {
    pub direction: Direction,
    pub turn: u64,
    pub spawned: Option<Cell>,
    pub score: Score,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// No intent this frame.
    NoInput,
    /// The push changed nothing; no spawn, no turn consumed.
    Unchanged,
    Committed(TurnReport),
    /// The game had already ended; the intent was ignored.
    Finished,
}

/// One running game: the live board, its rules, and a seeded RNG for spawns.
pub struct Game {
    board: Board,
    rules: Rules,
    spawn: SpawnOptions,
    rng: StdRng,
    phase: Phase,
    turns: u64,
}

impl Game {
    /// Start a game from the rules' initial position.
    pub fn new(rules: Rules, seed: u64) -> Result<Self, BoardError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = rules.initial_board(&mut rng)?;
        Ok(Self::assemble(board, rules, rng))
    }

    /// Start a game from an explicit board. Its size overrides `rules.size`,
    /// and the rules' own start position is dropped.
    pub fn with_board(board: Board, mut rules: Rules, seed: u64) -> Result<Self, BoardError> {
        rules.size = board.size();
        rules.initial_tiles = 0;
        rules.initial_rows.clear();
        rules.validate()?;
        Ok(Self::assemble(board, rules, StdRng::seed_from_u64(seed)))
    }

    fn assemble(board: Board, rules: Rules, rng: StdRng) -> Self {
        let spawn = rules.spawn_options();
        let phase = if rules.detect_game_over && board.is_game_over() {
            Phase::GameOver
        } else {
            Phase::Idle
        };
        Game {
            board,
            rules,
            spawn,
            rng,
            phase,
            turns: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Committed moves so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    pub fn highest_tile(&self) -> Tile {
        self.board.highest_tile()
    }

    /// Apply one frame's intent.
    ///
    /// The push runs on a scratch copy; the live board is replaced only when
    /// the copy differs. A tile spawns only after such a change, and only
    /// when the rules spawn and the board still has room.
    pub fn step(&mut self, intent: Option<Direction>) -> TurnOutcome {
        let Some(direction) = intent else {
            return TurnOutcome::NoInput;
        };
        if self.phase == Phase::GameOver {
            return TurnOutcome::Finished;
        }

        self.phase = Phase::Evaluating;
        let candidate = self.board.shifted(direction);
        if candidate == self.board {
            self.phase = Phase::Idle;
            return TurnOutcome::Unchanged;
        }

        self.board = candidate;
        self.turns += 1;

        let spawned = if self.rules.spawn && !self.board.is_full() {
            match self.board.spawn_tile(&mut self.rng, &self.spawn) {
                Ok(cell) => Some(cell),
                Err(e) => {
                    warn!("spawn skipped on turn {}: {e}", self.turns);
                    None
                }
            }
        } else {
            None
        };

        let game_over = self.rules.detect_game_over && self.board.is_game_over();
        self.phase = if game_over { Phase::GameOver } else { Phase::Idle };

        let report = TurnReport {
            direction,
            turn: self.turns,
            spawned,
            score: self.board.score(),
            game_over,
        };
        debug!(
            "turn {} {}: score={} spawned={:?}",
            report.turn, direction, report.score, spawned
        );
        if game_over {
            info!(
                "game over after {} turns: score={} highest={}",
                self.turns,
                report.score,
                self.board.highest_tile()
            );
        }
        TurnOutcome::Committed(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Variant;

    fn board(rows: &[&[Tile]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn no_input_is_a_no_op() {
        let mut game = Game::new(Rules::default(), 1).unwrap();
        let before = game.board().clone();
        assert_eq!(game.step(None), TurnOutcome::NoInput);
        assert_eq!(game.board(), &before);
        assert_eq!(game.turns(), 0);
    }

    #[test]
    fn unchanged_move_does_not_spawn_or_count() {
        let start = board(&[&[2, 0, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let mut game = Game::with_board(start.clone(), Rules::default(), 3).unwrap();
        assert_eq!(game.step(Some(Direction::Left)), TurnOutcome::Unchanged);
        assert_eq!(game.step(Some(Direction::Up)), TurnOutcome::Unchanged);
        assert_eq!(game.board(), &start);
        assert_eq!(game.turns(), 0);
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn committed_move_spawns_one_tile() {
        let start = board(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let mut game = Game::with_board(start, Rules::default(), 3).unwrap();
        match game.step(Some(Direction::Right)) {
            TurnOutcome::Committed(report) => {
                assert_eq!(report.direction, Direction::Right);
                assert_eq!(report.turn, 1);
                assert_eq!(report.score, 6);
                assert!(!report.game_over);
                let (r, c) = report.spawned.expect("spawned");
                assert_eq!(game.board().get(r, c), 2);
                assert_ne!((r, c), (0, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(game.board().get(0, 3), 4);
        assert_eq!(game.board().count_empty(), 14);
        assert_eq!(game.turns(), 1);
    }

    #[test]
    fn sandbox_never_spawns() {
        let mut game = Game::new(Rules::preset(Variant::Sandbox), 0).unwrap();
        let tiles = |g: &Game| 64 - g.board().count_empty();
        let before = tiles(&game);
        match game.step(Some(Direction::Left)) {
            TurnOutcome::Committed(report) => assert_eq!(report.spawned, None),
            other => panic!("unexpected {other:?}"),
        }
        // row 7 merges one pair: [2,0,4,2,0,0,2,16] -> [2,4,4,16,...]
        assert_eq!(tiles(&game), before - 1);
        assert_eq!(game.board().row(7), &[2, 4, 4, 16, 0, 0, 0, 0]);
    }

    #[test]
    fn last_move_into_full_board_ends_game() {
        // Left merges the 2s; the spawn fills the only hole and nothing can move after.
        let start = board(&[&[2, 2, 8], &[8, 4, 16], &[2, 8, 4]]);
        let mut game = Game::with_board(start, Rules::default(), 0).unwrap();
        match game.step(Some(Direction::Left)) {
            TurnOutcome::Committed(report) => {
                assert_eq!(report.spawned, Some((0, 2)));
                assert!(report.game_over);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            game.board().to_rows(),
            vec![vec![4, 8, 2], vec![8, 4, 16], vec![2, 8, 4]]
        );
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn finished_game_ignores_input() {
        let stuck = board(&[&[2, 4], &[4, 2]]);
        let mut game = Game::with_board(stuck.clone(), Rules::default(), 0).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.step(Some(Direction::Down)), TurnOutcome::Finished);
        assert_eq!(game.board(), &stuck);
    }

    #[test]
    fn spawnless_rules_keep_merging() {
        let start = board(&[&[2, 2, 4], &[8, 16, 32], &[64, 128, 256]]);
        let mut rules = Rules::default();
        rules.spawn = false;
        let mut game = Game::with_board(start, rules, 0).unwrap();
        match game.step(Some(Direction::Left)) {
            TurnOutcome::Committed(report) => {
                assert_eq!(report.spawned, None);
                assert!(!report.game_over);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(game.board().row(0), &[4, 4, 0]);
        match game.step(Some(Direction::Left)) {
            TurnOutcome::Committed(report) => assert!(!report.game_over),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(game.board().row(0), &[8, 0, 0]);
    }

    #[test]
    fn explicit_board_ignores_preset_start_position() {
        let start = board(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        for variant in [Variant::Classic, Variant::Large, Variant::Sandbox] {
            let mut game = Game::with_board(start.clone(), Rules::preset(variant), 0).unwrap();
            assert_eq!(game.board(), &start);
            assert_eq!(game.rules().size, 4);
            assert!(game.rules().initial_rows.is_empty());
            assert!(matches!(
                game.step(Some(Direction::Left)),
                TurnOutcome::Committed(_)
            ));
            assert_eq!(game.board().get(0, 0), 4);
        }

        let mut rules = Rules::preset(Variant::Sandbox);
        rules.four_chance = 2.0;
        assert!(Game::with_board(start, rules, 0).is_err());
    }

    #[test]
    fn seeded_games_replay_identically() {
        let play = || {
            let mut game = Game::new(Rules::default(), 77).unwrap();
            for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(10) {
                game.step(Some(dir));
            }
            (game.board().clone(), game.turns())
        };
        assert_eq!(play(), play());
    }
}
