//! Error types for seedcache

use std::fmt;

/// Result type alias for fallible cache construction
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Limit cannot hold a single entry
    InvalidLimit(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLimit(limit) => {
                write!(f, "Invalid cache limit: {} (must be at least 1)", limit)
            }
        }
    }
}

impl std::error::Error for Error {}
