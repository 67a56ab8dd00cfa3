//! Move scripts: the frame-by-frame intents a headless session replays.
//!
//! A script is whitespace- or comma-separated tokens. A token that names a
//! direction (`left`, `up`, `r`, ...) is one intent. Any other token is read
//! key by key with the `wasd` bindings, so `"wwad"` is four intents. Keys with
//! no binding become empty frames.

use log::{debug, info};
use serde::Serialize;
use twenty48_core::engine::{Direction, Score, Tile};
use twenty48_core::{Game, TurnOutcome};

pub fn parse_script(text: &str) -> Vec<Option<Direction>> {
    let mut frames = Vec::new();
    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        match token.parse::<Direction>() {
            Ok(dir) => frames.push(Some(dir)),
            Err(_) => frames.extend(token.chars().map(Direction::from_key)),
        }
    }
    frames
}

/// Counters for one replayed script.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub committed: u64,
    pub unchanged: u64,
    pub empty_frames: u64,
    /// Frames that arrived after the game had ended.
    pub ignored: u64,
    pub score: Score,
    pub highest_tile: Tile,
    pub game_over: bool,
    pub board: Vec<Vec<Tile>>,
}

/// Feed every frame to `game` in order.
pub fn replay(game: &mut Game, frames: &[Option<Direction>]) -> ReplaySummary {
    let mut summary = ReplaySummary {
        frames: frames.len(),
        ..ReplaySummary::default()
    };
    for (idx, frame) in frames.iter().enumerate() {
        match game.step(*frame) {
            TurnOutcome::NoInput => summary.empty_frames += 1,
            TurnOutcome::Unchanged => {
                debug!("frame {idx}: {:?} changed nothing", frame);
                summary.unchanged += 1;
            }
            TurnOutcome::Committed(report) => {
                summary.committed += 1;
                if report.game_over {
                    info!("game over at frame {idx} with score {}", report.score);
                }
            }
            TurnOutcome::Finished => summary.ignored += 1,
        }
    }
    summary.score = game.score();
    summary.highest_tile = game.highest_tile();
    summary.game_over = game.is_game_over();
    summary.board = game.board().to_rows();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::Rules;
    use twenty48_core::engine::Board;

    #[test]
    fn it_parses_words_and_keys() {
        use Direction::*;
        assert_eq!(
            parse_script("left, up\nwasd q"),
            vec![
                Some(Left),
                Some(Up),
                Some(Up),
                Some(Left),
                Some(Down),
                Some(Right),
                None
            ]
        );
        assert!(parse_script("  \n ").is_empty());
    }

    #[test]
    fn replay_counts_every_frame() {
        let start = Board::from_rows(vec![vec![2, 2], vec![0, 0]]).unwrap();
        let mut rules = Rules::default();
        rules.spawn = false;
        let mut game = Game::with_board(start, rules, 0).unwrap();
        let frames = parse_script("a a x d");
        let summary = replay(&mut game, &frames);
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.committed, 2);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.empty_frames, 1);
        assert_eq!(summary.board, vec![vec![0, 4], vec![0, 0]]);
        assert_eq!(summary.score, 4);
        assert!(!summary.game_over);
    }
}
