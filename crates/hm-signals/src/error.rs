//! Error types for signal generation.

use thiserror::Error;

/// Result type for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur while building activation signals.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// Invalid argument provided to a signal function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A sample is outside its allowed range.
    #[error("{what} sample {index} out of range: {value}")]
    OutOfRange {
        what: &'static str,
        index: usize,
        value: f64,
    },

    /// Paired sequences differ in length.
    #[error("Length mismatch: {activation} activation samples, {time} time samples")]
    LengthMismatch { activation: usize, time: usize },

    /// Time went backwards.
    #[error("Time decreases at sample {index}")]
    NonMonotonicTime { index: usize },
}
