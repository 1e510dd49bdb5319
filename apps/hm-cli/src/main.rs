use clap::{Parser, Subcommand};
use hm_app::{
    AppError, AppResult, ForceLengthRow, RunOptions, RunRequest, query, run_service,
    scenario_service,
};
use hm_muscle::MuscleModel;
use hm_results::ForceSeries;
use hm_signals::{ActivationCurve, activation_curve_family, default_shape_factors};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "hm-cli")]
#[command(about = "hillforce CLI - Hill-type muscle force simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Run a scenario
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export one force series from a run as CSV
    ExportSeries {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Series label (e.g. "0.310 m", baseline, adapted)
        label: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print normalized force-length curves as CSV
    Curves {
        /// Lower bound of the abscissa
        #[arg(long, default_value_t = 0.5)]
        min: f64,
        /// Upper bound of the abscissa
        #[arg(long, default_value_t = 1.5)]
        max: f64,
        /// Number of samples
        #[arg(long, default_value_t = 100)]
        points: usize,
        /// Interpret min/max as fiber lengths in metres instead of ratios
        #[arg(long)]
        absolute: bool,
        /// Take muscle parameters from a scenario instead of the defaults
        #[arg(long)]
        scenario: Option<PathBuf>,
    },
    /// Print the EMG-to-activation transform as CSV
    Activation {
        /// Shape factor(s); defaults to 20 values from -0.1 to -5
        #[arg(long = "shape-factor", allow_negative_numbers = true)]
        shape_factors: Vec<f64>,
        /// Number of EMG samples over [0, 1]
        #[arg(long, default_value_t = 100)]
        points: usize,
    },
    /// List the columns of a .sto data file
    StoColumns {
        /// Path to the .sto file
        path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            no_cache,
        } => cmd_run(&scenario_path, !no_cache),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::ExportSeries {
            scenario_path,
            run_id,
            label,
            output,
        } => cmd_export_series(&scenario_path, &run_id, &label, output.as_deref()),
        Commands::Curves {
            min,
            max,
            points,
            absolute,
            scenario,
        } => cmd_curves(min, max, points, absolute, scenario.as_deref()),
        Commands::Activation {
            shape_factors,
            points,
        } => cmd_activation(shape_factors, points),
        Commands::StoColumns { path } => cmd_sto_columns(&path),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let summary = scenario_service::summarize(&scenario);
    println!("✓ Scenario is valid");
    println!("  Name: {}", summary.name);
    println!("  Activation: {}", summary.activation_kind);
    println!("  MTU lengths: {}", summary.mtu_length_count);
    println!("  Training: {}", if summary.has_training { "yes" } else { "no" });
    println!("  Normalized output: {}", summary.normalize);
    Ok(())
}

fn cmd_run(scenario_path: &Path, use_cache: bool) -> AppResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    let started = Instant::now();
    let request = RunRequest {
        scenario_path,
        options: RunOptions { use_cache },
    };
    let response = run_service::ensure_run(&request)?;

    tracing::info!(
        run_id = %response.run_id,
        cached = response.loaded_from_cache,
        series = response.series.len(),
        "run ready"
    );
    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Run completed: {}", response.run_id);
    }
    println!("  Elapsed: {:.3}s", started.elapsed().as_secs_f64());

    print_series_table(&response.series);

    let scenario = scenario_service::load_scenario(scenario_path)?;
    let mut muscle = scenario_service::build_muscle(&scenario)?;
    if let Some(training) = &scenario.training {
        muscle.set_fiber_length(
            hm_core::units::m(training.mtu_length_m),
            &scenario_service::tendon(&scenario),
        )?;
        println!("\nWeek 0:\n{}", muscle);
        muscle.rescale_series(training.series_gain)?;
        muscle.rescale_parallel(training.parallel_gain)?;
        println!("\nAfter training:\n{}", muscle);
    }

    Ok(())
}

fn print_series_table(series: &[ForceSeries]) {
    println!(
        "\n  {:<12} {:>10} {:>10} {:>8} {:>14} {:>14}",
        "series", "mtu [m]", "fiber [m]", "ratio", "peak", "mean"
    );
    for s in series {
        println!(
            "  {:<12} {:>10.4} {:>10.5} {:>8.4} {:>14.4} {:>14.4}",
            s.label,
            s.mtu_length_m,
            s.fiber_length_m,
            s.fiber_length_ratio(),
            s.peak_force(),
            s.mean_force()
        );
    }
}

fn cmd_runs(scenario_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(scenario_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", scenario_path.display());
    } else {
        println!("Cached runs for '{}':", scenario_path.display());
        for manifest in runs {
            println!(
                "  {} ({}, {} series)",
                manifest.run_id, manifest.timestamp, manifest.series_count
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, series) = run_service::load_run(scenario_path, run_id)?;
    let summary = query::get_run_summary(&series)?;

    println!("\nRun Summary:");
    println!("  Scenario: {}", manifest.scenario_name);
    println!("  Model version: {}", manifest.model_version);
    println!("  Created: {}", manifest.timestamp);
    println!("  Samples per series: {}", summary.sample_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!("  Peak force: {:.4}", summary.peak_force);

    print_series_table(&series);
    Ok(())
}

fn cmd_export_series(
    scenario_path: &Path,
    run_id: &str,
    label: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, series) = run_service::load_run(scenario_path, run_id)?;
    let selected = query::find_series(&series, label)?;
    let csv = query::series_to_csv(selected);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            selected.force.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn cmd_curves(
    min: f64,
    max: f64,
    points: usize,
    absolute: bool,
    scenario: Option<&Path>,
) -> AppResult<()> {
    let muscle = match scenario {
        Some(path) => scenario_service::build_muscle(&scenario_service::load_scenario(path)?)?,
        None => MuscleModel::default(),
    };

    let rows: Vec<ForceLengthRow> = if absolute {
        query::force_length_table_absolute(&muscle, min, max, points)?
    } else {
        query::force_length_table(&muscle, min, max, points)?
    };

    let x_name = if absolute { "fiber_length_m" } else { "ratio" };
    println!("{x_name},active,passive,total");
    for row in rows {
        println!("{},{},{},{}", row.x, row.active, row.passive, row.total);
    }
    Ok(())
}

fn cmd_activation(shape_factors: Vec<f64>, points: usize) -> AppResult<()> {
    let factors = if shape_factors.is_empty() {
        default_shape_factors()
    } else {
        shape_factors
    };

    let curves = activation_curve_family(&factors, points)?;
    print!("{}", activation_csv(&curves)?);
    Ok(())
}

fn activation_csv(curves: &[ActivationCurve]) -> AppResult<String> {
    let Some(first) = curves.first() else {
        return Err(AppError::InvalidInput("no shape factors".to_string()));
    };

    let header: Vec<String> = curves
        .iter()
        .map(|c| format!("a_{:.2}", c.shape_factor))
        .collect();
    let mut csv = format!("emg,{}\n", header.join(","));

    for (i, u) in first.emg.iter().enumerate() {
        let values: Vec<String> = curves.iter().map(|c| c.activation[i].to_string()).collect();
        csv.push_str(&format!("{},{}\n", u, values.join(",")));
    }
    Ok(csv)
}

fn cmd_sto_columns(path: &Path) -> AppResult<()> {
    let table = hm_project::load_sto(path).map_err(|e| AppError::DataFileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    println!("{} rows", table.row_count());
    for name in table.columns() {
        println!("  {}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_csv_requires_a_curve() {
        let err = activation_csv(&[]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn activation_csv_layout() {
        let curves = activation_curve_family(&[-1.0, -2.0], 3).unwrap();
        let csv = activation_csv(&curves).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "emg,a_-1.00,a_-2.00");
        assert!(lines[1].starts_with("0,"));
        assert_eq!(lines[3], "1,1,1");
    }
}
