//! Error types for muscle model operations.

use hm_core::error::HmError;
use thiserror::Error;

/// Errors that can occur while configuring or evaluating a muscle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MuscleError {
    #[error("Invalid activation {value} at index {index}: must lie in [0, 1]")]
    InvalidActivation { index: usize, value: f64 },

    #[error("Activation sequence must contain at least one value")]
    EmptyActivation,

    #[error("No activation assigned to the muscle")]
    MissingActivation,

    #[error("Geometry not initialized: {what}")]
    UninitializedGeometry { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type MuscleResult<T> = Result<T, MuscleError>;

impl From<HmError> for MuscleError {
    fn from(e: HmError) -> Self {
        match e {
            HmError::NonFinite { what, .. } => MuscleError::NonPhysical { what },
            HmError::InvalidArg { what } => MuscleError::InvalidArg { what },
            HmError::Invariant { what } => MuscleError::NonPhysical { what },
        }
    }
}

impl From<MuscleError> for HmError {
    fn from(e: MuscleError) -> Self {
        match e {
            MuscleError::InvalidActivation { value, .. } => HmError::NonFinite {
                what: "activation",
                value,
            },
            MuscleError::EmptyActivation => HmError::InvalidArg {
                what: "empty activation",
            },
            MuscleError::MissingActivation => HmError::Invariant {
                what: "activation not assigned",
            },
            MuscleError::UninitializedGeometry { what } => HmError::Invariant { what },
            MuscleError::NonPhysical { what } => HmError::InvalidArg { what },
            MuscleError::InvalidArg { what } => HmError::InvalidArg { what },
        }
    }
}
