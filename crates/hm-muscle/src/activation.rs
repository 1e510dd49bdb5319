//! Validated muscle activation sequences.

use crate::error::{MuscleError, MuscleResult};

/// Ordered, non-empty sequence of activation values in `[0, 1]`.
///
/// A scalar activation is a sequence of length one.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation(Vec<f64>);

impl Activation {
    /// Validate and wrap activation values.
    ///
    /// Rejects the whole sequence if any element is outside `[0, 1]` (NaN
    /// included); values are never clamped.
    pub fn new(values: impl Into<Vec<f64>>) -> MuscleResult<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(MuscleError::EmptyActivation);
        }

        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(MuscleError::InvalidActivation { index, value });
        }

        Ok(Self(values))
    }

    /// Single-sample activation.
    pub fn constant(value: f64) -> MuscleResult<Self> {
        Self::new(vec![value])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn peak(&self) -> f64 {
        self.iter().fold(0.0, f64::max)
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl TryFrom<Vec<f64>> for Activation {
    type Error = MuscleError;

    fn try_from(values: Vec<f64>) -> MuscleResult<Self> {
        Self::new(values)
    }
}

impl AsRef<[f64]> for Activation {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
