//! Error types for u-statkit.

use thiserror::Error;

/// Result type alias using [`StatsError`].
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors returned when a function is called with parameters outside its
/// domain.
///
/// Every variant carries the offending value so callers can report it
/// without re-deriving it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A probability was NaN or outside `[0, 1]`.
    #[error("invalid probability {0}: must lie in [0, 1]")]
    InvalidProbability(f64),

    /// A scale (standard deviation) was NaN or negative.
    #[error("invalid scale {0}: must be >= 0")]
    InvalidScale(f64),

    /// A rate parameter was not a finite positive number.
    #[error("invalid rate {0}: must be finite and > 0")]
    InvalidRate(f64),

    /// The operation needs at least one element to draw from.
    #[error("input is empty")]
    EmptyInput,

    /// More elements were requested without replacement than exist.
    #[error("cannot draw {requested} elements without replacement from {available}")]
    SampleTooLarge {
        /// Number of elements requested
        requested: usize,
        /// Number of elements available
        available: usize,
    },
}
