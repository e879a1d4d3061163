//! Error type for bit source construction and integer sampling.
//!
//! Only two things can go wrong, and both are input validation: asking for an
//! empty pool, or asking for an integer below a non-positive bound. Extracting
//! bits and refilling the pool are total once construction has succeeded.

use std::fmt;

/// Failure of a [`Bitstream`](crate::Bitstream) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitstreamError {
    /// A pool must hold at least one word.
    InvalidPoolSize {
        /// Pool size that was requested.
        requested: usize,
    },

    /// Integer bounds must be strictly positive.
    InvalidBound {
        /// Bound that was passed to [`Bitstream::integer`](crate::Bitstream::integer).
        n: i64,
    },
}

impl fmt::Display for BitstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPoolSize { requested } => {
                write!(f, "invalid pool size {requested}: pool must hold at least one word")
            }
            Self::InvalidBound { n } => {
                write!(f, "invalid integer bound {n}: bound must be at least 1")
            }
        }
    }
}

impl std::error::Error for BitstreamError {}

/// Result alias used throughout `bitstream-core`.
pub type Result<T> = std::result::Result<T, BitstreamError>;
