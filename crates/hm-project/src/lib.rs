//! hm-project: scenario file format, validation and tabular data loading.

pub mod schema;
pub mod sto;
pub mod validate;

pub use schema::*;
pub use sto::{StoError, StoTable, load_sto, parse_sto};
pub use validate::{ValidationError, validate_scenario};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data file error: {0}")]
    Sto(#[from] StoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn is_json(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load and validate a scenario; `.json` files are read as JSON, anything
/// else as YAML.
pub fn load_scenario(path: &std::path::Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_scenario(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = if is_json(path) {
        serde_json::to_string_pretty(scenario)?
    } else {
        serde_yaml::to_string(scenario)?
    };
    std::fs::write(path, content)?;
    Ok(())
}
