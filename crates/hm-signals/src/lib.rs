//! Activation signal sources for hillforce.
//!
//! Everything here produces plain `(activation, time)` sequences that a
//! muscle consumes verbatim:
//! - a synthetic sinusoid generator
//! - the exponential EMG-to-activation transform
//!
//! Activation values are always in `[0, 1]` and time is non-decreasing
//! seconds; [`ActivationSignal`] enforces both.

pub mod emg;
pub mod error;
pub mod signal;
pub mod sinusoid;

pub use emg::{
    ActivationCurve, activation_curve_family, default_shape_factors, neural_to_muscle_activation,
};
pub use error::{SignalError, SignalResult};
pub use signal::ActivationSignal;
pub use sinusoid::{SinusoidConfig, sinusoid_activation};
