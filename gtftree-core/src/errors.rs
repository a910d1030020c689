use std::collections::TryReserveError;

use thiserror::Error;

/// Malformed input to an ingestion or query call. The tree is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid bounds: start ({0}) must be less than end ({1})")]
    InvalidBounds(String, String),

    #[error("Coordinate out of bounds for a 32-bit genome position: start={0}, end={1}")]
    CoordinateOutOfBounds(String, String),

    #[error("Invalid strand: {0} (expected 0, 1 or 3 / '+', '-' or '.')")]
    InvalidStrand(String),

    #[error("Label index out of bounds: {0}")]
    LabelOutOfBounds(String),
}

/// An operation was called in the wrong lifecycle phase.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("Tree already finalized: entries can no longer be added")]
    Finalized,

    #[error("Tree already balanced: balance may only be called once")]
    AlreadyBalanced,

    #[error("Tree not balanced yet: call balance before querying")]
    NotBalanced,
}

#[derive(Error, Debug)]
pub enum GtfTreeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, GtfTreeError>;
