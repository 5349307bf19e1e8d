use std::result;
use thiserror::Error;

/// The error type for fallible `TreapMap` operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested key does not exist in the map.
    #[error("key not found")]
    KeyNotFound,
    /// A structural invariant of the treap does not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience type for `Result<T, treap_map::Error>`.
pub type Result<T> = result::Result<T, Error>;
