//! Tilefold CLI - Command-line driver for the tile puzzle
//!
//! Commands:
//! - play: Play interactively, one move per line
//! - simulate: Run many random-policy games and report outcomes

mod play_cmd;
mod render;
mod simulate_cmd;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tilefold_core::GameConfig;

use play_cmd::PlayArgs;
use simulate_cmd::SimulateArgs;

#[derive(Parser)]
#[command(name = "tilefold")]
#[command(about = "Sliding-tile merge puzzle")]
struct Cli {
    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Game config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Board side length (overrides config)
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Winning tile value (overrides config)
    #[arg(long, global = true)]
    target: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on stdin/stdout
    Play(PlayArgs),
    /// Play many games with a random move policy
    Simulate(SimulateArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so boards and JSON on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.size, cli.target)?;

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, config, cli.seed),
        Commands::Simulate(args) => simulate_cmd::run(args, config, cli.seed),
    }
}

/// Merge the config file (if any) with command-line overrides
fn resolve_config(path: Option<&Path>, size: Option<usize>, target: Option<u64>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) if !path.exists() => {
            anyhow::bail!("Config file does not exist: {}", path.display());
        }
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(size) = size {
        config = config.with_dimension(size);
    }
    if let Some(target) = target {
        config = config.with_target(target);
    }

    config.validate()?;
    Ok(config)
}
