//! Error types for board construction and input parsing

/// Errors raised while building boards or interpreting external input.
///
/// Board transforms never fail; these only come from configuration and
/// textual input at the edges of the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid dimension {0}: must be between 2 and 10")]
    InvalidDimension(usize),

    #[error("Invalid dimension input: {0:?}")]
    InvalidDimensionInput(String),

    #[error("Unknown direction: {0:?}")]
    UnknownDirection(String),

    #[error("Invalid target value {0}: must be a power of two of at least 4")]
    InvalidTarget(u64),

    #[error("Invalid board layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
