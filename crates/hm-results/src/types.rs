//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub model_version: String,
    pub series_count: usize,
    pub sample_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SeriesKind {
    /// One fixed muscle-tendon length out of a sweep.
    Isometric,
    /// Force before architecture adaptation.
    TrainingBaseline,
    /// Force after sarcomere rescaling.
    TrainingAdapted { series_gain: f64, parallel_gain: f64 },
}

/// Muscle force over time at one operating point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForceSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub mtu_length_m: f64,
    pub fiber_length_m: f64,
    pub fiber_length_opt_m: f64,
    pub max_isometric_force_n: f64,
    /// Force values are fractions of the maximum isometric force when set.
    pub normalized: bool,
    pub time_s: Vec<f64>,
    pub force: Vec<f64>,
}

impl ForceSeries {
    pub fn fiber_length_ratio(&self) -> f64 {
        self.fiber_length_m / self.fiber_length_opt_m
    }

    pub fn peak_force(&self) -> f64 {
        self.force.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean_force(&self) -> f64 {
        if self.force.is_empty() {
            0.0
        } else {
            self.force.iter().sum::<f64>() / self.force.len() as f64
        }
    }
}

/// Current UTC time, RFC 3339.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}
