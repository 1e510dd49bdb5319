//! Query helpers for force-length curves and loaded runs.

use hm_core::numeric::linspace;
use hm_muscle::{MuscleModel, active_force_length, passive_force_length};
use hm_results::ForceSeries;

use crate::error::{AppError, AppResult};

/// One sample of the normalized force-length curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceLengthRow {
    /// Abscissa: the ratio itself, or fiber length in metres.
    pub x: f64,
    pub ratio: f64,
    pub active: f64,
    pub passive: f64,
    pub total: f64,
}

fn curve_rows(
    muscle: &MuscleModel,
    xs: Vec<f64>,
    to_ratio: impl Fn(f64) -> f64,
) -> Vec<ForceLengthRow> {
    let f_max = muscle.max_isometric_force();
    xs.into_iter()
        .map(|x| {
            let ratio = to_ratio(x);
            let active = active_force_length(ratio);
            let passive = passive_force_length(ratio, f_max);
            ForceLengthRow {
                x,
                ratio,
                active,
                passive,
                total: active + passive,
            }
        })
        .collect()
}

fn check_range(min: f64, max: f64, points: usize) -> AppResult<()> {
    if !(min.is_finite() && max.is_finite() && min < max) {
        return Err(AppError::InvalidInput(format!(
            "invalid range [{min}, {max}]"
        )));
    }
    if points < 2 {
        return Err(AppError::InvalidInput(
            "need at least two points".to_string(),
        ));
    }
    Ok(())
}

/// Curves over fiber length ratios `[ratio_min, ratio_max]`.
pub fn force_length_table(
    muscle: &MuscleModel,
    ratio_min: f64,
    ratio_max: f64,
    points: usize,
) -> AppResult<Vec<ForceLengthRow>> {
    check_range(ratio_min, ratio_max, points)?;
    Ok(curve_rows(muscle, linspace(ratio_min, ratio_max, points), |r| r))
}

/// Curves over absolute fiber lengths `[length_min_m, length_max_m]`.
pub fn force_length_table_absolute(
    muscle: &MuscleModel,
    length_min_m: f64,
    length_max_m: f64,
    points: usize,
) -> AppResult<Vec<ForceLengthRow>> {
    check_range(length_min_m, length_max_m, points)?;
    let l_opt = muscle.fiber_length_opt().value;
    Ok(curve_rows(
        muscle,
        linspace(length_min_m, length_max_m, points),
        |l| l / l_opt,
    ))
}

/// Summary of a run's series.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub series_count: usize,
    pub sample_count: usize,
    pub time_range: (f64, f64),
    pub peak_force: f64,
}

pub fn get_run_summary(series: &[ForceSeries]) -> AppResult<RunSummary> {
    let first = series
        .first()
        .ok_or_else(|| AppError::InvalidInput("No series in run".to_string()))?;

    let t_min = first.time_s.first().copied().unwrap_or(0.0);
    let t_max = first.time_s.last().copied().unwrap_or(0.0);
    let peak_force = series
        .iter()
        .map(ForceSeries::peak_force)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(RunSummary {
        series_count: series.len(),
        sample_count: first.force.len(),
        time_range: (t_min, t_max),
        peak_force,
    })
}

pub fn find_series<'a>(series: &'a [ForceSeries], label: &str) -> AppResult<&'a ForceSeries> {
    series
        .iter()
        .find(|s| s.label == label)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown series: {}", label)))
}

/// `time_s,force` CSV for one series.
pub fn series_to_csv(series: &ForceSeries) -> String {
    let header = if series.normalized {
        "time_s,force_normalized\n"
    } else {
        "time_s,force_n\n"
    };
    let mut csv = String::from(header);
    for (t, f) in series.time_s.iter().zip(&series.force) {
        csv.push_str(&format!("{},{}\n", t, f));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_results::SeriesKind;

    #[test]
    fn relative_table_spans_active_range() {
        let muscle = MuscleModel::default();
        let rows = force_length_table(&muscle, 0.5, 1.5, 101).unwrap();
        assert_eq!(rows.len(), 101);
        assert!(rows[0].active.abs() < 1e-12);
        assert!((rows[50].active - 1.0).abs() < 1e-12);
        assert!(rows[100].active.abs() < 1e-12);
        assert!(rows[..50].iter().all(|r| r.passive == 0.0));
        assert!(rows[100].passive > rows[75].passive);
        assert!(rows.iter().all(|r| (r.total - r.active - r.passive).abs() < 1e-15));
    }

    #[test]
    fn absolute_table_divides_by_optimal_length() {
        let muscle = MuscleModel::default();
        let rows = force_length_table_absolute(&muscle, 0.01, 0.2, 100).unwrap();
        assert_eq!(rows.len(), 100);
        assert!((rows[0].ratio - 0.2).abs() < 1e-12);
        assert!((rows[99].ratio - 4.0).abs() < 1e-12);
        assert_eq!(rows[99].x, 0.2);
    }

    #[test]
    fn rejects_bad_range() {
        let muscle = MuscleModel::default();
        assert!(force_length_table(&muscle, 1.5, 0.5, 10).is_err());
        assert!(force_length_table(&muscle, 0.5, 1.5, 1).is_err());
    }

    #[test]
    fn csv_and_summary() {
        let s = ForceSeries {
            label: "0.310 m".to_string(),
            kind: SeriesKind::Isometric,
            mtu_length_m: 0.31,
            fiber_length_m: 0.051,
            fiber_length_opt_m: 0.05,
            max_isometric_force_n: 3549.0,
            normalized: false,
            time_s: vec![0.0, 1.0],
            force: vec![5.0, 7.5],
        };
        let csv = series_to_csv(&s);
        assert_eq!(csv, "time_s,force_n\n0,5\n1,7.5\n");

        let summary = get_run_summary(std::slice::from_ref(&s)).unwrap();
        assert_eq!(summary.series_count, 1);
        assert_eq!(summary.sample_count, 2);
        assert_eq!(summary.time_range, (0.0, 1.0));
        assert_eq!(summary.peak_force, 7.5);

        assert!(find_series(std::slice::from_ref(&s), "0.310 m").is_ok());
        assert!(find_series(std::slice::from_ref(&s), "nope").is_err());
        assert!(get_run_summary(&[]).is_err());
    }
}
