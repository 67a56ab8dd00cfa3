use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use twenty48_cli::actor::{self, strategies::StrategyKind};
use twenty48_cli::config::Config;
use twenty48_cli::script;
use twenty48_core::{Game, Rules, Variant};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless 2048 board engine driver")]
struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Rule preset (classic, large, sandbox); overrides the config file
    #[arg(long, value_name = "NAME")]
    variant: Option<Variant>,

    /// Base RNG seed; overrides the config file
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a move script through one game
    Play {
        /// Inline script, e.g. "wasd" or "left up right"
        #[arg(long, value_name = "SCRIPT", conflicts_with = "script")]
        moves: Option<String>,
        /// Read the script from a file
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,
        /// Log the final board
        #[arg(long)]
        show_board: bool,
    },
    /// Let a built-in strategy play many independent games
    Auto {
        /// Number of games
        #[arg(long, value_name = "N")]
        games: Option<u32>,
        /// random, cycle or greedy
        #[arg(long, value_name = "NAME")]
        strategy: Option<StrategyKind>,
        /// Intent cap per game
        #[arg(long, value_name = "N")]
        max_turns: Option<u64>,
        /// Number of worker threads (defaults to Rayon default)
        #[arg(long, value_name = "N")]
        workers: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match &cli.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path).map_err(|e| anyhow!("failed to load config: {e}"))?
        }
        None => Config::default(),
    };
    let rules = match cli.variant {
        Some(variant) => Rules::preset(variant),
        None => config.resolved_rules(),
    };
    rules.validate().context("invalid rules")?;
    let seed = cli.seed.unwrap_or(config.seed);

    match cli.command {
        Command::Play {
            moves,
            script,
            show_board,
        } => {
            let text = match (moves, script) {
                (Some(m), _) => m,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read script {}", path.display()))?,
                (None, None) => bail!("either --moves or --script must be given"),
            };
            let frames = script::parse_script(&text);
            let mut game = Game::new(rules, seed).context("failed to start game")?;
            let summary = script::replay(&mut game, &frames);
            if show_board {
                info!("final board:{}", game.board());
            }
            info!(
                "Replayed {} frames: {} committed, score {}",
                summary.frames, summary.committed, summary.score
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Auto {
            games,
            strategy,
            max_turns,
            workers,
        } => {
            let auto = &config.auto;
            let summary = actor::play_batch(
                &rules,
                games.unwrap_or(auto.games),
                seed,
                strategy.unwrap_or(auto.strategy),
                max_turns.unwrap_or(auto.max_turns),
                workers.or(auto.workers),
            )?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
