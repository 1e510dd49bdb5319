//! Scenario validation logic.

use crate::schema::{ActivationSourceDef, LATEST_VERSION, Scenario, TrainingDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and positive"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "name".to_string(),
        });
    }

    scenario
        .muscle
        .validate()
        .map_err(|e| invalid("muscle", e, "invalid muscle parameters"))?;

    if !scenario.tendon_length_m.is_finite() {
        return Err(invalid(
            "tendon_length_m",
            scenario.tendon_length_m,
            "must be finite",
        ));
    }

    if scenario.mtu_lengths_m.is_empty() {
        return Err(ValidationError::Missing {
            field: "mtu_lengths_m".to_string(),
        });
    }
    for (i, &l) in scenario.mtu_lengths_m.iter().enumerate() {
        require_positive(&format!("mtu_lengths_m[{i}]"), l)?;
    }

    validate_activation(&scenario.activation)?;

    if let Some(training) = &scenario.training {
        validate_training(training)?;
    }

    Ok(())
}

fn validate_activation(source: &ActivationSourceDef) -> Result<(), ValidationError> {
    match source {
        ActivationSourceDef::Sinusoid {
            cycles,
            samples,
            duration_s,
        } => {
            require_positive("activation.cycles", *cycles)?;
            if *samples == 0 {
                return Err(invalid("activation.samples", samples, "must be positive"));
            }
            require_positive("activation.duration_s", *duration_s)?;
        }
        ActivationSourceDef::Constant {
            value,
            samples,
            duration_s,
        } => {
            if !(0.0..=1.0).contains(value) {
                return Err(invalid("activation.value", value, "must lie in [0, 1]"));
            }
            if *samples == 0 {
                return Err(invalid("activation.samples", samples, "must be positive"));
            }
            require_positive("activation.duration_s", *duration_s)?;
        }
        ActivationSourceDef::Emg {
            path,
            emg_column,
            time_column,
            shape_factor,
        } => {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::Missing {
                    field: "activation.path".to_string(),
                });
            }
            if emg_column.trim().is_empty() {
                return Err(ValidationError::Missing {
                    field: "activation.emg_column".to_string(),
                });
            }
            if time_column.trim().is_empty() {
                return Err(ValidationError::Missing {
                    field: "activation.time_column".to_string(),
                });
            }
            if !shape_factor.is_finite() || *shape_factor == 0.0 {
                return Err(invalid(
                    "activation.shape_factor",
                    shape_factor,
                    "must be finite and non-zero",
                ));
            }
        }
    }
    Ok(())
}

fn validate_training(training: &TrainingDef) -> Result<(), ValidationError> {
    require_positive("training.series_gain", training.series_gain)?;
    require_positive("training.parallel_gain", training.parallel_gain)?;
    require_positive("training.mtu_length_m", training.mtu_length_m)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_muscle::MuscleParams;

    fn base() -> Scenario {
        Scenario {
            version: 1,
            name: "test".to_string(),
            muscle: MuscleParams::default(),
            tendon_length_m: 0.26,
            activation: ActivationSourceDef::default(),
            mtu_lengths_m: vec![0.30, 0.31],
            normalize: false,
            training: None,
        }
    }

    #[test]
    fn base_is_valid() {
        assert!(validate_scenario(&base()).is_ok());
    }

    #[test]
    fn rejects_future_version() {
        let mut s = base();
        s.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_empty_lengths() {
        let mut s = base();
        s.mtu_lengths_m.clear();
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::Missing { .. })
        ));
    }

    #[test]
    fn rejects_negative_length() {
        let mut s = base();
        s.mtu_lengths_m.push(-0.1);
        let err = validate_scenario(&s).unwrap_err();
        assert!(err.to_string().contains("mtu_lengths_m[2]"));
    }

    #[test]
    fn rejects_bad_muscle() {
        let mut s = base();
        s.muscle.n_sarc_series = 0.0;
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn rejects_zero_shape_factor() {
        let mut s = base();
        s.activation = ActivationSourceDef::Emg {
            path: "emg.sto".into(),
            emg_column: "bicep1".to_string(),
            time_column: "time".to_string(),
            shape_factor: 0.0,
        };
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn rejects_constant_out_of_range() {
        let mut s = base();
        s.activation = ActivationSourceDef::Constant {
            value: 1.2,
            samples: 10,
            duration_s: 1.0,
        };
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn rejects_bad_training_gain() {
        let mut s = base();
        s.training = Some(TrainingDef {
            series_gain: 0.0,
            parallel_gain: 1.1,
            mtu_length_m: 0.31,
        });
        assert!(validate_scenario(&s).is_err());
    }
}
