//! Muscle architecture parameters.

use crate::error::{MuscleError, MuscleResult};
use hm_core::numeric::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Architecture parameters a [`crate::MuscleModel`] is built from.
///
/// Missing fields deserialize to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuscleParams {
    /// Maximum isometric force at optimal fiber length (N).
    pub max_isometric_force_n: f64,
    /// Pennation angle at optimal fiber length (rad), constant.
    pub pennation_angle_opt_rad: f64,
    /// Optimal fiber length (m).
    pub fiber_length_opt_m: f64,
    /// Sarcomeres in series along a fiber.
    pub n_sarc_series: f64,
    /// Sarcomeres in parallel across the muscle.
    pub n_sarc_parallel: f64,
}

impl Default for MuscleParams {
    fn default() -> Self {
        Self {
            max_isometric_force_n: 3549.0,
            pennation_angle_opt_rad: 0.2,
            fiber_length_opt_m: 0.05,
            n_sarc_series: 1000.0,
            n_sarc_parallel: 300.0,
        }
    }
}

impl MuscleParams {
    pub fn validate(&self) -> MuscleResult<()> {
        ensure_positive(self.max_isometric_force_n, "max isometric force")?;
        ensure_finite(self.pennation_angle_opt_rad, "pennation angle")?;
        ensure_positive(self.fiber_length_opt_m, "optimal fiber length")?;
        ensure_positive(self.n_sarc_series, "sarcomeres in series")?;
        ensure_positive(self.n_sarc_parallel, "sarcomeres in parallel")?;

        if self.pennation_angle_opt_rad.abs() >= std::f64::consts::FRAC_PI_2 {
            return Err(MuscleError::NonPhysical {
                what: "pennation angle must be below 90 degrees",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = MuscleParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.max_isometric_force_n, 3549.0);
        assert_eq!(p.fiber_length_opt_m, 0.05);
    }

    #[test]
    fn rejects_non_positive_fields() {
        let p = MuscleParams {
            fiber_length_opt_m: 0.0,
            ..Default::default()
        };
        assert_eq!(
            p.validate().unwrap_err(),
            MuscleError::InvalidArg {
                what: "optimal fiber length"
            }
        );

        let p = MuscleParams {
            n_sarc_parallel: -3.0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_right_angle_pennation() {
        let p = MuscleParams {
            pennation_angle_opt_rad: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(MuscleError::NonPhysical { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: MuscleParams = serde_json::from_str(r#"{"fiber_length_opt_m": 0.08}"#).unwrap();
        assert_eq!(p.fiber_length_opt_m, 0.08);
        assert_eq!(p.n_sarc_series, 1000.0);
    }
}
