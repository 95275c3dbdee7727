//! Simulate command - batch self-play with a random move policy
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use tilefold_core::{Direction, GameConfig, Outcome, Session};

/// Seed used when none is given on the command line
const DEFAULT_BASE_SEED: u64 = 42;

/// Mixed into the game seed so the move policy and the spawns differ
const POLICY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Stop a game after this many moves
    #[arg(long, default_value = "100000")]
    pub max_moves: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    outcome: Outcome,
    moves: u32,
    max_tile: u64,
}

/// Aggregated results
#[derive(Clone, Debug, Serialize)]
struct SimulationResults {
    total_games: usize,
    victories: usize,
    defeats: usize,
    unfinished: usize,
    avg_moves: f32,
    best_tile: u64,
    /// Highest tile reached -> number of games
    max_tile_histogram: BTreeMap<u64, usize>,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Play all games in parallel
/// 2. Aggregate statistics
/// 3. Report as text or JSON
pub fn run(args: SimulateArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    let base_seed = seed.unwrap_or(DEFAULT_BASE_SEED);

    tracing::info!(
        "Simulating {} games on {}x{} (target {}, base seed {})",
        args.games,
        config.dimension,
        config.dimension,
        config.target,
        base_seed
    );

    let records = play_games(&config, &args, base_seed)?;
    let results = compute_statistics(records);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play every game, one seed per game, in parallel
fn play_games(config: &GameConfig, args: &SimulateArgs, base_seed: u64) -> Result<Vec<GameRecord>> {
    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")?,
    );

    let records = (0..args.games)
        .into_par_iter()
        .map(|index| {
            let seed = base_seed.wrapping_add(index as u64);
            let record = play_single_game(config, index + 1, seed, args.max_moves);
            progress.inc(1);
            record
        })
        .collect::<Result<Vec<GameRecord>>>();

    progress.finish_and_clear();
    records
}

fn report_results(results: &SimulationResults, args: &SimulateArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game, picking uniformly among legal directions each turn
fn play_single_game(
    config: &GameConfig,
    game_number: usize,
    seed: u64,
    max_moves: u32,
) -> Result<GameRecord> {
    let mut session = Session::with_seed(config.clone(), seed)?;
    let mut policy = ChaCha8Rng::seed_from_u64(seed ^ POLICY_SEED_SALT);

    session.new_game(config.dimension);

    while !session.is_ended() && session.moves_made() < max_moves {
        let legal: Vec<Direction> = match session.board() {
            Some(board) => Direction::ALL
                .into_iter()
                .filter(|&d| board.is_move_legal(d))
                .collect(),
            None => break,
        };

        match legal.choose(&mut policy) {
            Some(&direction) => {
                session.apply_move(direction);
            }
            None => break,
        }
    }

    let max_tile = session.board().and_then(|b| b.max_value()).unwrap_or(0);
    tracing::debug!(
        "Game {}: {:?} after {} moves, max tile {}",
        game_number,
        session.outcome(),
        session.moves_made(),
        max_tile
    );

    Ok(GameRecord {
        game_number,
        seed,
        outcome: session.outcome(),
        moves: session.moves_made(),
        max_tile,
    })
}

fn compute_statistics(games: Vec<GameRecord>) -> SimulationResults {
    let count = |outcome: Outcome| games.iter().filter(|g| g.outcome == outcome).count();
    let victories = count(Outcome::Victory);
    let defeats = count(Outcome::Defeat);
    let unfinished = count(Outcome::InProgress);

    let avg_moves = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|g| g.moves as f32).sum::<f32>() / games.len() as f32
    };

    let mut max_tile_histogram = BTreeMap::new();
    for game in &games {
        *max_tile_histogram.entry(game.max_tile).or_insert(0) += 1;
    }

    SimulationResults {
        total_games: games.len(),
        victories,
        defeats,
        unfinished,
        avg_moves,
        best_tile: games.iter().map(|g| g.max_tile).max().unwrap_or(0),
        max_tile_histogram,
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 / total as f32 * 100.0
    }
}

fn print_text_results(results: &SimulationResults) {
    let total = results.total_games;

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    println!("Victories:   {} ({:.1}%)", results.victories, percent(results.victories, total));
    println!("Defeats:     {} ({:.1}%)", results.defeats, percent(results.defeats, total));
    println!("Unfinished:  {}", results.unfinished);
    println!("Avg moves:   {:.1}", results.avg_moves);
    println!("Best tile:   {}", results.best_tile);

    println!("\n{:>8} {:>8}", "Max tile", "Games");
    println!("{}", "-".repeat(17));
    for (tile, games) in &results.max_tile_histogram {
        println!("{:>8} {:>8}", tile, games);
    }
}

// ============================================================================
// TESTS
// ============================================================================
