//! Paired activation and time sequences.

use crate::error::{SignalError, SignalResult};

/// Activation samples in `[0, 1]` with matching non-decreasing times (s).
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationSignal {
    activation: Vec<f64>,
    time_s: Vec<f64>,
}

impl ActivationSignal {
    /// Pair activation with time, validating both.
    pub fn new(activation: Vec<f64>, time_s: Vec<f64>) -> SignalResult<Self> {
        if activation.len() != time_s.len() {
            return Err(SignalError::LengthMismatch {
                activation: activation.len(),
                time: time_s.len(),
            });
        }
        if activation.is_empty() {
            return Err(SignalError::InvalidArg {
                what: "signal must contain at least one sample",
            });
        }

        if let Some((index, &value)) = activation
            .iter()
            .enumerate()
            .find(|(_, a)| !(0.0..=1.0).contains(*a))
        {
            return Err(SignalError::OutOfRange {
                what: "activation",
                index,
                value,
            });
        }

        if let Some((index, &value)) = time_s.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(SignalError::OutOfRange {
                what: "time",
                index,
                value,
            });
        }

        if let Some(index) = time_s.windows(2).position(|w| w[1] < w[0]) {
            return Err(SignalError::NonMonotonicTime { index: index + 1 });
        }

        Ok(Self { activation, time_s })
    }

    pub fn activation(&self) -> &[f64] {
        &self.activation
    }

    pub fn time_s(&self) -> &[f64] {
        &self.time_s
    }

    pub fn len(&self) -> usize {
        self.activation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activation.is_empty()
    }

    /// First and last sample time.
    pub fn time_range(&self) -> (f64, f64) {
        (
            self.time_s.first().copied().unwrap_or(0.0),
            self.time_s.last().copied().unwrap_or(0.0),
        )
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.activation, self.time_s)
    }
}
