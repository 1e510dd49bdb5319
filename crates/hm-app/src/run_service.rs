//! Run execution and caching.

use std::path::Path;

use hm_core::numeric::linspace;
use hm_core::units::m;
use hm_muscle::MuscleModel;
use hm_project::schema::{ActivationSourceDef, Scenario};
use hm_results::{
    ForceSeries, RunManifest, RunStore, SeriesKind, compute_run_id, timestamp_now,
};
use hm_signals::{ActivationSignal, SinusoidConfig, neural_to_muscle_activation, sinusoid_activation};
use rayon::prelude::*;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::scenario_service::{build_muscle, load_scenario, tendon};

/// Bumped whenever model output for the same inputs changes.
pub const MODEL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

/// Request for a run of one scenario file.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub series: Vec<ForceSeries>,
}

/// Produce the activation signal a scenario asks for.
///
/// Relative EMG file paths resolve against `scenario_dir`.
pub fn resolve_activation(scenario: &Scenario, scenario_dir: &Path) -> AppResult<ActivationSignal> {
    match &scenario.activation {
        ActivationSourceDef::Sinusoid {
            cycles,
            samples,
            duration_s,
        } => Ok(sinusoid_activation(&SinusoidConfig {
            cycles: *cycles,
            samples: *samples,
            duration_s: *duration_s,
        })?),
        ActivationSourceDef::Constant {
            value,
            samples,
            duration_s,
        } => Ok(ActivationSignal::new(
            vec![*value; *samples],
            linspace(0.0, *duration_s, *samples),
        )?),
        ActivationSourceDef::Emg {
            path,
            emg_column,
            time_column,
            shape_factor,
        } => {
            let full_path = scenario_dir.join(path);
            let table =
                hm_project::load_sto(&full_path).map_err(|e| AppError::DataFileRead {
                    path: full_path.clone(),
                    message: e.to_string(),
                })?;

            let column = |name: &str| {
                table
                    .column(name)
                    .ok_or_else(|| AppError::ColumnNotFound {
                        column: name.to_string(),
                        path: full_path.clone(),
                    })
            };
            let emg = column(emg_column)?;
            let time = column(time_column)?;

            let activation = neural_to_muscle_activation(emg, *shape_factor)?;
            Ok(ActivationSignal::new(activation, time.to_vec())?)
        }
    }
}

fn force_series(
    label: String,
    kind: SeriesKind,
    muscle: &MuscleModel,
    mtu_length_m: f64,
    signal: &ActivationSignal,
    normalize: bool,
) -> AppResult<ForceSeries> {
    let force = muscle.compute_total_force(normalize)?;
    if let Some((index, value)) = force.iter().enumerate().find(|(_, f)| !f.is_finite()) {
        return Err(AppError::InvalidInput(format!(
            "series '{label}' has non-finite force {value} at sample {index}"
        )));
    }
    let fiber_length_m = muscle
        .fiber_length()
        .map(|l| l.value)
        .ok_or_else(|| AppError::InvalidInput("fiber length not solved".to_string()))?;

    Ok(ForceSeries {
        label,
        kind,
        mtu_length_m,
        fiber_length_m,
        fiber_length_opt_m: muscle.fiber_length_opt().value,
        max_isometric_force_n: muscle.max_isometric_force().value,
        normalized: normalize,
        time_s: signal.time_s().to_vec(),
        force,
    })
}

/// Compute every force series a scenario describes.
///
/// Each muscle-tendon length of the sweep gets its own muscle, evaluated in
/// parallel. The optional training pass records the force before and after
/// rescaling sarcomere counts.
pub fn simulate(scenario: &Scenario, signal: &ActivationSignal) -> AppResult<Vec<ForceSeries>> {
    let tendon = tendon(scenario);
    let template = build_muscle(scenario)?;

    let mut series = scenario
        .mtu_lengths_m
        .par_iter()
        .map(|&mtu| {
            let mut muscle = template.clone();
            muscle.set_activation(signal.activation())?;
            muscle.set_fiber_length(m(mtu), &tendon)?;
            force_series(
                format!("{mtu:.3} m"),
                SeriesKind::Isometric,
                &muscle,
                mtu,
                signal,
                scenario.normalize,
            )
        })
        .collect::<AppResult<Vec<_>>>()?;

    if let Some(training) = &scenario.training {
        let mut muscle = template;
        muscle.set_activation(signal.activation())?;
        muscle.set_fiber_length(m(training.mtu_length_m), &tendon)?;
        series.push(force_series(
            "baseline".to_string(),
            SeriesKind::TrainingBaseline,
            &muscle,
            training.mtu_length_m,
            signal,
            scenario.normalize,
        )?);

        muscle.rescale_series(training.series_gain)?;
        muscle.rescale_parallel(training.parallel_gain)?;
        series.push(force_series(
            "adapted".to_string(),
            SeriesKind::TrainingAdapted {
                series_gain: training.series_gain,
                parallel_gain: training.parallel_gain,
            },
            &muscle,
            training.mtu_length_m,
            signal,
            scenario.normalize,
        )?);
    }

    Ok(series)
}

/// Execute a scenario, or load its cached result.
pub fn ensure_run(request: &RunRequest<'_>) -> AppResult<RunResponse> {
    let scenario = load_scenario(request.scenario_path)?;
    let scenario_dir = request
        .scenario_path
        .parent()
        .unwrap_or_else(|| Path::new("."));

    let signal = resolve_activation(&scenario, scenario_dir)?;
    let run_id = compute_run_id(&scenario, signal.activation(), MODEL_VERSION)?;
    let store = RunStore::for_scenario(request.scenario_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        info!(run_id = %run_id, "loading cached run");
        let manifest = store.load_manifest(&run_id)?;
        let series = store.load_series(&run_id)?;
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            series,
        });
    }

    info!(
        scenario = %scenario.name,
        samples = signal.len(),
        lengths = scenario.mtu_lengths_m.len(),
        "running scenario"
    );
    let series = simulate(&scenario, &signal)?;

    let manifest = RunManifest {
        run_id: run_id.clone(),
        scenario_name: scenario.name.clone(),
        timestamp: timestamp_now(),
        model_version: MODEL_VERSION.to_string(),
        series_count: series.len(),
        sample_count: signal.len(),
    };
    store.save_run(&manifest, &series)?;
    info!(run_id = %run_id, series = series.len(), "run saved");

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        series,
    })
}

/// Cached runs stored next to a scenario.
pub fn list_runs(scenario_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.list_runs()?)
}

pub fn load_run(scenario_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<ForceSeries>)> {
    let store = RunStore::for_scenario(scenario_path)?;
    let manifest = store.load_manifest(run_id)?;
    let series = store.load_series(run_id)?;
    Ok((manifest, series))
}
