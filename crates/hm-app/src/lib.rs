//! Shared application service layer for hillforce.
//!
//! Frontends go through this crate for scenario loading, run execution and
//! caching, and result queries.

pub mod error;
pub mod query;
pub mod run_service;
pub mod scenario_service;

pub use error::{AppError, AppResult};
pub use query::{
    ForceLengthRow, RunSummary, find_series, force_length_table, force_length_table_absolute,
    get_run_summary, series_to_csv,
};
pub use run_service::{
    MODEL_VERSION, RunOptions, RunRequest, RunResponse, ensure_run, list_runs, load_run,
    resolve_activation, simulate,
};
pub use scenario_service::{ScenarioSummary, build_muscle, load_scenario, summarize, tendon};
