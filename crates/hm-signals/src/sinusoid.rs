//! Synthetic sinusoidal activation.

use crate::error::{SignalError, SignalResult};
use crate::signal::ActivationSignal;
use hm_core::numeric::linspace;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Sinusoid generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinusoidConfig {
    /// Number of full sine periods over the signal.
    pub cycles: f64,
    /// Number of samples.
    pub samples: usize,
    /// Time span covered by the samples (s).
    pub duration_s: f64,
}

impl Default for SinusoidConfig {
    fn default() -> Self {
        Self {
            cycles: 10.0,
            samples: 2000,
            duration_s: 600.0,
        }
    }
}

impl SinusoidConfig {
    pub fn validate(&self) -> SignalResult<()> {
        if !(self.cycles.is_finite() && self.cycles > 0.0) {
            return Err(SignalError::InvalidArg {
                what: "cycles must be positive",
            });
        }
        if self.samples == 0 {
            return Err(SignalError::InvalidArg {
                what: "samples must be positive",
            });
        }
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(SignalError::InvalidArg {
                what: "duration must be positive",
            });
        }
        Ok(())
    }
}

/// Activation `sin(p)/2 + 0.5` over `cycles` periods.
///
/// Phase advances by `2 pi cycles / samples` per sample starting at zero, so
/// the last period stops one step short of closing. Time spans
/// `[0, duration_s]` with both ends included.
pub fn sinusoid_activation(cfg: &SinusoidConfig) -> SignalResult<ActivationSignal> {
    cfg.validate()?;

    let step = 2.0 * PI * cfg.cycles / cfg.samples as f64;
    let activation = (0..cfg.samples)
        .map(|k| ((k as f64 * step).sin() / 2.0 + 0.5).clamp(0.0, 1.0))
        .collect();
    let time_s = linspace(0.0, cfg.duration_s, cfg.samples);

    tracing::debug!(
        cycles = cfg.cycles,
        samples = cfg.samples,
        duration_s = cfg.duration_s,
        "generated sinusoidal activation"
    );
    ActivationSignal::new(activation, time_s)
}
