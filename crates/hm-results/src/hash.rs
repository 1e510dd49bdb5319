//! Content-based hashing for run IDs.

use crate::ResultsResult;
use hm_project::schema::Scenario;
use sha2::{Digest, Sha256};

/// Hash of everything that determines a run's output.
///
/// `activation` is the resolved activation sequence, so edits to an
/// external EMG file change the id even when the scenario text does not.
pub fn compute_run_id(
    scenario: &Scenario,
    activation: &[f64],
    model_version: &str,
) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario)?;
    hasher.update(scenario_json.as_bytes());

    for a in activation {
        hasher.update(a.to_le_bytes());
    }

    hasher.update(model_version.as_bytes());

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
