//! Scenario loading and model construction.

use std::path::Path;

use hm_core::units::m;
use hm_muscle::{MuscleModel, RigidTendon};
use hm_project::schema::{ActivationSourceDef, Scenario};

use crate::error::AppResult;

/// Short description of a scenario for listing.
#[derive(Debug, Clone)]
pub struct ScenarioSummary {
    pub name: String,
    pub activation_kind: &'static str,
    pub mtu_length_count: usize,
    pub has_training: bool,
    pub normalize: bool,
}

/// Load and validate a scenario file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    Ok(hm_project::load_scenario(path)?)
}

pub fn summarize(scenario: &Scenario) -> ScenarioSummary {
    let activation_kind = match scenario.activation {
        ActivationSourceDef::Sinusoid { .. } => "sinusoid",
        ActivationSourceDef::Constant { .. } => "constant",
        ActivationSourceDef::Emg { .. } => "emg",
    };
    ScenarioSummary {
        name: scenario.name.clone(),
        activation_kind,
        mtu_length_count: scenario.mtu_lengths_m.len(),
        has_training: scenario.training.is_some(),
        normalize: scenario.normalize,
    }
}

/// Fresh muscle built from the scenario's architecture parameters.
pub fn build_muscle(scenario: &Scenario) -> AppResult<MuscleModel> {
    Ok(MuscleModel::from_params(&scenario.muscle)?)
}

pub fn tendon(scenario: &Scenario) -> RigidTendon {
    RigidTendon::new(m(scenario.tendon_length_m))
}
