use std::collections::TryReserveError;

/// Error type for the rankskip crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The probability of promoting a node to the next level must lie in `[0, 1]`.
    #[error("level probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// The list needs at least one level.
    #[error("max level must be at least 1")]
    InvalidMaxLevel,

    /// Storage could not be reserved, either for the levels of a new list or
    /// for a new node. A failed insertion leaves the list untouched, so it may
    /// be retried.
    #[error("failed to allocate storage")]
    OutOfMemory(#[from] TryReserveError),
}
