//! Neural (EMG) to muscle activation transform.
//!
//! Processed EMG `u` in `[0, 1]` maps to activation through
//! `a = (exp(A u) - 1) / (exp(A) - 1)`, where the shape factor `A` sets the
//! curvature. Negative `A` bows the curve upward, which is the usual choice
//! (Potvin et al. 1996; Buchanan et al. 2004).

use crate::error::{SignalError, SignalResult};
use hm_core::numeric::linspace;

/// Default shape factors: 20 evenly spaced values from -0.1 to -5.
pub fn default_shape_factors() -> Vec<f64> {
    linspace(-0.1, -5.0, 20)
}

fn check_shape_factor(shape_factor: f64) -> SignalResult<()> {
    if !shape_factor.is_finite() || shape_factor == 0.0 {
        return Err(SignalError::InvalidArg {
            what: "shape factor must be finite and non-zero",
        });
    }
    Ok(())
}

/// Transform processed EMG samples into activation.
///
/// Every EMG sample must lie in `[0, 1]`; the output then does too.
pub fn neural_to_muscle_activation(emg: &[f64], shape_factor: f64) -> SignalResult<Vec<f64>> {
    check_shape_factor(shape_factor)?;

    if let Some((index, &value)) = emg
        .iter()
        .enumerate()
        .find(|(_, u)| !(0.0..=1.0).contains(*u))
    {
        return Err(SignalError::OutOfRange {
            what: "EMG",
            index,
            value,
        });
    }

    let denom = shape_factor.exp() - 1.0;
    Ok(emg
        .iter()
        .map(|u| ((shape_factor * u).exp() - 1.0) / denom)
        .map(|a| a.clamp(0.0, 1.0))
        .collect())
}

/// EMG-to-activation table for one shape factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationCurve {
    pub shape_factor: f64,
    pub emg: Vec<f64>,
    pub activation: Vec<f64>,
}

/// Sample the transform over `[0, 1]` for each shape factor.
pub fn activation_curve_family(
    shape_factors: &[f64],
    points: usize,
) -> SignalResult<Vec<ActivationCurve>> {
    if points < 2 {
        return Err(SignalError::InvalidArg {
            what: "need at least two points per curve",
        });
    }

    let emg = linspace(0.0, 1.0, points);
    shape_factors
        .iter()
        .map(|&shape_factor| {
            Ok(ActivationCurve {
                shape_factor,
                activation: neural_to_muscle_activation(&emg, shape_factor)?,
                emg: emg.clone(),
            })
        })
        .collect()
}
