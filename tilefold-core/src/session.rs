//! Session controller - owns the live board and sequences each move
//!
//! One move runs to completion before the next is accepted:
//! legality check, shift-and-merge, spawn, then victory/defeat check.
//! Bad input (out-of-range dimension, unknown direction) is ignored
//! rather than reported, so callers can forward raw user input.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, DEFAULT_DIMENSION};
use crate::config::{parse_dimension, GameConfig};
use crate::error::Result;

// ============================================================================
// STATE
// ============================================================================

/// Lifecycle of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Ended { victory: bool },
}

/// Game outcome as seen by the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Victory,
    Defeat,
}

/// Notifications for whoever draws the game
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The live board was replaced
    BoardChanged(Board),
    /// The session just ended
    Ended(Outcome),
}

// ============================================================================
// SESSION
// ============================================================================

/// A single running game
#[derive(Clone, Debug)]
pub struct Session<R: Rng = ChaCha8Rng> {
    config: GameConfig,
    board: Option<Board>,
    state: SessionState,
    moves_made: u32,
    rng: R,
}

impl Session<ChaCha8Rng> {
    /// Session with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Session with a reproducible RNG
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Fails when the config's dimension or target is out of range
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            board: None,
            state: SessionState::NotStarted,
            moves_made: 0,
            rng,
        })
    }

    /// Resume play from an existing board
    ///
    /// The configured dimension follows the board. The outcome is not
    /// evaluated until the next move.
    pub fn with_board(config: GameConfig, board: Board, rng: R) -> Result<Self> {
        let config = config.with_dimension(board.dimension());
        config.validate()?;
        Ok(Self {
            config,
            board: Some(board),
            state: SessionState::InProgress,
            moves_made: 0,
            rng,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        match self.state {
            SessionState::NotStarted | SessionState::InProgress => Outcome::InProgress,
            SessionState::Ended { victory: true } => Outcome::Victory,
            SessionState::Ended { victory: false } => Outcome::Defeat,
        }
    }

    /// Current board, `None` before the first game
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Legal moves applied since the game started
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, SessionState::Ended { .. })
    }

    // ========================================================================
    // NEW GAME
    // ========================================================================

    /// Start (or restart) a game on a fresh board with two spawned tiles
    ///
    /// An invalid dimension leaves the session untouched and emits nothing.
    pub fn new_game(&mut self, dimension: usize) -> Vec<SessionEvent> {
        let board = match Board::new(dimension) {
            Ok(board) => board,
            Err(e) => {
                tracing::debug!("Ignoring new game request: {}", e);
                return Vec::new();
            }
        };

        let board = board.spawn_tile(&mut self.rng).board;
        let board = board.spawn_tile(&mut self.rng).board;

        self.config.dimension = dimension;
        self.board = Some(board.clone());
        self.state = SessionState::InProgress;
        self.moves_made = 0;

        tracing::info!("New {}x{} game, target {}", dimension, dimension, self.config.target);

        vec![SessionEvent::BoardChanged(board)]
    }

    /// Start a game from a textual dimension; unparseable text is ignored
    pub fn new_game_from_input(&mut self, input: &str) -> Vec<SessionEvent> {
        match parse_dimension(input) {
            Ok(dimension) => self.new_game(dimension),
            Err(e) => {
                tracing::debug!("Ignoring new game request: {}", e);
                Vec::new()
            }
        }
    }

    /// Restart after a finished game, back on the default 4x4 board
    pub fn play_again(&mut self) -> Vec<SessionEvent> {
        self.new_game(DEFAULT_DIMENSION)
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Apply one directional move
    ///
    /// Ignored unless a game is in progress and the move is legal.
    pub fn apply_move(&mut self, direction: Direction) -> Vec<SessionEvent> {
        if self.state != SessionState::InProgress {
            tracing::debug!("Ignoring move {}: session is {:?}", direction, self.state);
            return Vec::new();
        }

        let board = match &self.board {
            Some(board) => board,
            None => return Vec::new(),
        };

        if !board.is_move_legal(direction) {
            tracing::debug!("Move {} is not legal", direction);
            return Vec::new();
        }

        let shifted = board.shift_and_merge(direction);
        let board = shifted.spawn_tile(&mut self.rng).board;
        self.moves_made += 1;

        tracing::debug!("Applied move {} (move {})", direction, self.moves_made);

        let mut events = vec![SessionEvent::BoardChanged(board.clone())];

        if let Some(outcome) = self.terminal_outcome(&board) {
            self.state = SessionState::Ended {
                victory: outcome == Outcome::Victory,
            };
            tracing::info!("Game ended after {} moves: {:?}", self.moves_made, outcome);
            events.push(SessionEvent::Ended(outcome));
        }

        self.board = Some(board);
        events
    }

    /// Apply a move named by user text; unknown names are ignored
    pub fn apply_input(&mut self, input: &str) -> Vec<SessionEvent> {
        match input.parse::<Direction>() {
            Ok(direction) => self.apply_move(direction),
            Err(e) => {
                tracing::debug!("Ignoring input: {}", e);
                Vec::new()
            }
        }
    }

    /// Victory wins over defeat; defeat is only checked without victory
    fn terminal_outcome(&self, board: &Board) -> Option<Outcome> {
        if board.contains_value(self.config.target) {
            Some(Outcome::Victory)
        } else if !board.has_any_legal_move() {
            Some(Outcome::Defeat)
        } else {
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
