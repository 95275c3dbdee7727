//! Random tile spawning

use rand::Rng;

use crate::board::{Board, Position};

/// Value every spawned tile starts with
pub const SPAWN_VALUE: u64 = 2;

/// Result of a spawn attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawn {
    /// Board after the attempt (equal to the input when nothing spawned)
    pub board: Board,
    /// Where the tile landed, `None` when the board was full
    pub position: Option<Position>,
}

impl Spawn {
    pub fn did_spawn(&self) -> bool {
        self.position.is_some()
    }
}

impl Board {
    /// Pick an empty cell uniformly at random
    ///
    /// A full board yields `None`; that is a normal outcome, not an error.
    pub fn pick_random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let empty = self.empty_positions();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.gen_range(0..empty.len())])
    }

    /// Place a [`SPAWN_VALUE`] tile in a random empty cell
    pub fn spawn_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Spawn {
        match self.pick_random_empty_cell(rng) {
            Some(pos) => {
                tracing::debug!("Spawned {} at ({}, {})", SPAWN_VALUE, pos.row, pos.col);
                Spawn {
                    board: self.with_value(pos.row, pos.col, Some(SPAWN_VALUE)),
                    position: Some(pos),
                }
            }
            None => Spawn {
                board: self.clone(),
                position: None,
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
