//! Play command - interactive game on stdin/stdout
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_loop() - read, dispatch, print
//! - Level 3: parse_command(), write_events()
//! - Level 4: help text

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use rand::Rng;

use tilefold_core::{GameConfig, Session, SessionEvent};

use crate::render::{outcome_banner, render_board};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Don't print the command help at start
    #[arg(long)]
    pub quiet: bool,
}

/// One line of player input
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    /// New game, optionally with a dimension as typed
    NewGame(Option<&'a str>),
    PlayAgain,
    /// Anything else is offered to the session as a direction
    Move(&'a str),
}

/// Totals reported when the player leaves
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct PlaySummary {
    games_started: u32,
    moves: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Start a session on the configured board
/// 2. Loop over stdin lines until quit/EOF
/// 3. Log a short summary
pub fn run(args: PlayArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    let session = match seed {
        Some(s) => Session::with_seed(config, s)?,
        None => Session::new(config)?,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = play_loop(session, stdin.lock(), stdout.lock(), !args.quiet)?;

    tracing::info!(
        "Played {} game(s), {} move(s)",
        summary.games_started,
        summary.moves
    );

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Drive a session from line-oriented input
fn play_loop<R: Rng, I: BufRead, O: Write>(
    mut session: Session<R>,
    input: I,
    mut output: O,
    show_help: bool,
) -> Result<PlaySummary> {
    let mut summary = PlaySummary::default();

    if show_help {
        write_help(&mut output)?;
    }

    // A resumed session keeps its board; otherwise start on the configured size
    let events = match session.board().cloned() {
        Some(board) => vec![SessionEvent::BoardChanged(board)],
        None => {
            summary.games_started += 1;
            let dimension = session.dimension();
            session.new_game(dimension)
        }
    };
    write_events(&session, &events, &mut output)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let events = match parse_command(&line) {
            Command::Quit => break,
            Command::Help => {
                write_help(&mut output)?;
                continue;
            }
            Command::NewGame(dimension) => {
                let dimension = dimension
                    .map(str::to_string)
                    .unwrap_or_else(|| session.dimension().to_string());
                session.new_game_from_input(&dimension)
            }
            Command::PlayAgain => session.play_again(),
            Command::Move(text) => {
                let events = session.apply_input(text);
                if !events.is_empty() {
                    summary.moves += 1;
                }
                events
            }
        };

        if events.iter().any(|e| matches!(e, SessionEvent::BoardChanged(_)))
            && session.moves_made() == 0
        {
            summary.games_started += 1;
        }

        write_events(&session, &events, &mut output)?;
    }

    output.flush()?;
    Ok(summary)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn parse_command(line: &str) -> Command<'_> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("quit") | Some("exit") | Some("q") => Command::Quit,
        Some("help") | Some("?") => Command::Help,
        Some("new") => Command::NewGame(parts.next()),
        Some("again") => Command::PlayAgain,
        Some(word) => Command::Move(word),
        None => Command::Move(""),
    }
}

/// Print each board replacement and the end-of-game banner
fn write_events<R: Rng, O: Write>(
    session: &Session<R>,
    events: &[SessionEvent],
    output: &mut O,
) -> Result<()> {
    for event in events {
        match event {
            SessionEvent::BoardChanged(board) => {
                writeln!(output)?;
                write!(output, "{}", render_board(board))?;
            }
            SessionEvent::Ended(outcome) => {
                writeln!(output, "{}", outcome_banner(*outcome, session.config().target))?;
                writeln!(output, "Type 'again' or 'new <size>' to play another game.")?;
            }
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn write_help<O: Write>(output: &mut O) -> Result<()> {
    writeln!(output, "Moves: up/down/left/right, w/a/s/d or h/j/k/l")?;
    writeln!(output, "Other: new [size], again, help, quit")?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
