use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;
use twenty48_core::engine::{Score, Tile};
use twenty48_core::{Game, Rules, TurnOutcome};

pub mod strategies;

use strategies::StrategyKind;

/// Per-game actor that drives a single board to completion by
/// asking its strategy for an intent every frame.
pub struct GameActor {
    pub game_id: u32,
    pub game: Game,
    pub seed: u64,
    pub strategy: StrategyKind,
    pub max_turns: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game_id: u32,
    pub seed: u64,
    /// Committed moves.
    pub steps: u64,
    pub score: Score,
    pub highest_tile: Tile,
    pub game_over: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub finished: usize,
    pub mean_score: f64,
    pub max_score: Score,
    pub mean_steps: f64,
    pub highest_tile: Tile,
    pub results: Vec<GameResult>,
}

impl GameActor {
    pub fn new(
        game_id: u32,
        rules: Rules,
        seed: u64,
        strategy: StrategyKind,
        max_turns: u64,
    ) -> Result<Self> {
        let game = Game::new(rules, seed)
            .with_context(|| format!("failed to start game {game_id} with seed {seed}"))?;
        Ok(Self {
            game_id,
            game,
            seed,
            strategy,
            max_turns,
        })
    }

    /// Run the actor loop to completion and return the result.
    ///
    /// The loop ends when the game is over, when no direction changes the
    /// board (variants without game-over detection), or after `max_turns` intents.
    pub fn run(mut self) -> GameResult {
        // Move choice draws from its own stream so spawns stay tied to the game seed.
        let mut rng = StdRng::seed_from_u64(self.seed ^ 0x9e37_79b9_7f4a_7c15);
        let mut intents: u64 = 0;

        while !self.game.is_game_over() && intents < self.max_turns {
            let Some(dir) =
                strategies::select_move(self.strategy, self.game.board(), intents, &mut rng)
            else {
                break;
            };
            intents += 1;
            if let TurnOutcome::Finished = self.game.step(Some(dir)) {
                break;
            }
        }
        debug!(
            "game {} stopped after {} intents ({} committed)",
            self.game_id,
            intents,
            self.game.turns()
        );

        GameResult {
            game_id: self.game_id,
            seed: self.seed,
            steps: self.game.turns(),
            score: self.game.score(),
            highest_tile: self.game.highest_tile(),
            game_over: self.game.is_game_over(),
        }
    }
}

/// Play `games` independent games in parallel. Game `i` is seeded with `base_seed + i`.
pub fn play_batch(
    rules: &Rules,
    games: u32,
    base_seed: u64,
    strategy: StrategyKind,
    max_turns: u64,
    workers: Option<usize>,
) -> Result<BatchSummary> {
    rules.validate().context("invalid rules")?;
    let pool = {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = workers {
            builder = builder.num_threads(n);
        }
        builder.build().context("failed to build worker pool")?
    };

    let pb = ProgressBar::new(games as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} games ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut results = pool.install(|| {
        (0..games)
            .into_par_iter()
            .map(|game_id| -> Result<GameResult> {
                let seed = base_seed.wrapping_add(game_id as u64);
                let actor = GameActor::new(game_id, rules.clone(), seed, strategy, max_turns)?;
                let result = actor.run();
                pb.inc(1);
                Ok(result)
            })
            .collect::<Result<Vec<GameResult>>>()
    })?;
    pb.finish_and_clear();
    results.sort_by_key(|r| r.game_id);

    let summary = summarize(results);
    info!(
        "played {} games: mean score {:.1}, best {}, highest tile {}",
        summary.games, summary.mean_score, summary.max_score, summary.highest_tile
    );
    Ok(summary)
}

fn summarize(results: Vec<GameResult>) -> BatchSummary {
    let n = results.len();
    let denom = n.max(1) as f64;
    BatchSummary {
        games: n,
        finished: results.iter().filter(|r| r.game_over).count(),
        mean_score: results.iter().map(|r| r.score as f64).sum::<f64>() / denom,
        max_score: results.iter().map(|r| r.score).max().unwrap_or(0),
        mean_steps: results.iter().map(|r| r.steps as f64).sum::<f64>() / denom,
        highest_tile: results.iter().map(|r| r.highest_tile).max().unwrap_or(0),
        results,
    }
}
