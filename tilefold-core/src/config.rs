//! Game configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_DIMENSION, MAX_DIMENSION, MIN_DIMENSION};
use crate::error::{GameError, Result};

/// Tile value that wins the classic game
pub const DEFAULT_TARGET: u64 = 2048;

/// Settings for a session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length, in [2, 10]
    pub dimension: usize,
    /// Reaching this tile value wins
    pub target: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            target: DEFAULT_TARGET,
        }
    }
}

impl GameConfig {
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }

    /// Check dimension range and that the target is reachable by doubling
    pub fn validate(&self) -> Result<()> {
        validate_dimension(self.dimension)?;
        if self.target < 4 || !self.target.is_power_of_two() {
            return Err(GameError::InvalidTarget(self.target));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn validate_dimension(dimension: usize) -> Result<usize> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
        Ok(dimension)
    } else {
        Err(GameError::InvalidDimension(dimension))
    }
}

/// Parse a board side from user text
pub fn parse_dimension(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    let dimension = trimmed
        .parse::<usize>()
        .map_err(|_| GameError::InvalidDimensionInput(input.to_string()))?;
    validate_dimension(dimension)
}

// ============================================================================
// TESTS
// ============================================================================
