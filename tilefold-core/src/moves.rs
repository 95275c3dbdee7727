//! Move legality and the shift-and-merge transform
//!
//! Every direction is handled the same way: each line (row or column) is
//! read starting at the edge tiles slide toward, so index 0 of a line is
//! the destination edge and higher indices sit further back.

use crate::board::{Board, Direction};

impl Board {
    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Whether sliding toward `direction` would change any cell
    ///
    /// A move is legal when some non-empty cell has its neighbour one step
    /// closer to the target edge either empty or holding the same value.
    pub fn is_move_legal(&self, direction: Direction) -> bool {
        (0..self.dimension()).any(|line| {
            let indices = line_indices(self.dimension(), direction, line);
            indices.windows(2).any(|pair| {
                let dest = self.value_at(pair[0]);
                match (dest, self.value_at(pair[1])) {
                    (None, Some(_)) => true,
                    (Some(dest), Some(source)) => can_merge(dest, source),
                    _ => false,
                }
            })
        })
    }

    /// Whether any of the four directions is legal
    pub fn has_any_legal_move(&self) -> bool {
        Direction::ALL
            .iter()
            .any(|&direction| self.is_move_legal(direction))
    }

    // ========================================================================
    // SHIFT AND MERGE
    // ========================================================================

    /// Slide every tile toward `direction`, merging equal neighbours once
    ///
    /// Returns a new board; `self` is untouched and cell ids are preserved.
    /// Calling this for an illegal direction returns an equal board.
    pub fn shift_and_merge(&self, direction: Direction) -> Board {
        let mut shifted = self.clone();

        for line in 0..self.dimension() {
            let indices = line_indices(self.dimension(), direction, line);
            let values: Vec<Option<u64>> = indices.iter().map(|&idx| self.value_at(idx)).collect();

            for (&idx, value) in indices.iter().zip(merge_line(&values)) {
                shifted.set_value_at(idx, value);
            }
        }

        shifted
    }
}

/// Collapse one line toward index 0
///
/// Empty slots are squeezed out, then equal neighbours merge pairwise
/// starting from index 0. A freshly merged tile never merges again in the
/// same pass. Tiles already at the largest `u64` power of two stay put.
/// The result is padded with empties to the input length.
pub fn merge_line(line: &[Option<u64>]) -> Vec<Option<u64>> {
    let tiles: Vec<u64> = line.iter().flatten().copied().collect();
    let mut merged = Vec::with_capacity(line.len());

    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && can_merge(tiles[i], tiles[i + 1]) {
            merged.push(Some(tiles[i] * 2));
            i += 2;
        } else {
            merged.push(Some(tiles[i]));
            i += 1;
        }
    }

    merged.resize(line.len(), None);
    merged
}

/// Equal tiles merge unless doubling would overflow
fn can_merge(a: u64, b: u64) -> bool {
    a == b && a.checked_mul(2).is_some()
}

/// Cell indices of one line, ordered from the target edge backward
fn line_indices(dimension: usize, direction: Direction, line: usize) -> Vec<usize> {
    let at = |row: usize, col: usize| row * dimension + col;
    match direction {
        Direction::Up => (0..dimension).map(|row| at(row, line)).collect(),
        Direction::Down => (0..dimension).rev().map(|row| at(row, line)).collect(),
        Direction::Left => (0..dimension).map(|col| at(line, col)).collect(),
        Direction::Right => (0..dimension).rev().map(|col| at(line, col)).collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
