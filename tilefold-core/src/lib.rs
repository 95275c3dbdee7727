//! Tilefold Core - sliding-tile merge puzzle engine
//!
//! This crate provides the game logic for a 2048-style puzzle:
//! - Square board model with stable row-major cell ids
//! - Move legality and the shift-and-merge transform
//! - Random tile spawning behind an injectable RNG
//! - Session controller with victory/defeat detection

pub mod board;
pub mod moves;
pub mod spawn;
pub mod session;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Cell, Direction, Position, DEFAULT_DIMENSION, MAX_DIMENSION, MIN_DIMENSION};
pub use moves::merge_line;
pub use spawn::{Spawn, SPAWN_VALUE};
pub use session::{Outcome, Session, SessionEvent, SessionState};
pub use config::{parse_dimension, GameConfig, DEFAULT_TARGET};
pub use error::GameError;
