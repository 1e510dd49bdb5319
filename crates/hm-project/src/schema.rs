//! Scenario schema definitions.

use hm_muscle::MuscleParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Newest scenario format version this crate understands.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub muscle: MuscleParams,
    #[serde(default)]
    pub tendon_length_m: f64,
    pub activation: ActivationSourceDef,
    #[serde(default)]
    pub mtu_lengths_m: Vec<f64>,
    #[serde(default)]
    pub normalize: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ActivationSourceDef {
    Sinusoid {
        #[serde(default = "default_cycles")]
        cycles: f64,
        #[serde(default = "default_samples")]
        samples: usize,
        #[serde(default = "default_duration_s")]
        duration_s: f64,
    },
    Constant {
        value: f64,
        #[serde(default = "default_samples")]
        samples: usize,
        #[serde(default = "default_duration_s")]
        duration_s: f64,
    },
    Emg {
        /// `.sto` file, relative paths resolve against the scenario file.
        path: PathBuf,
        emg_column: String,
        #[serde(default = "default_time_column")]
        time_column: String,
        shape_factor: f64,
    },
}

impl Default for ActivationSourceDef {
    fn default() -> Self {
        Self::Sinusoid {
            cycles: default_cycles(),
            samples: default_samples(),
            duration_s: default_duration_s(),
        }
    }
}

fn default_cycles() -> f64 {
    10.0
}

fn default_samples() -> usize {
    2000
}

fn default_duration_s() -> f64 {
    600.0
}

fn default_time_column() -> String {
    "time".to_string()
}

/// Architecture adaptation applied after a baseline force trace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrainingDef {
    #[serde(default = "unit_gain")]
    pub series_gain: f64,
    #[serde(default = "unit_gain")]
    pub parallel_gain: f64,
    pub mtu_length_m: f64,
}

fn unit_gain() -> f64 {
    1.0
}
