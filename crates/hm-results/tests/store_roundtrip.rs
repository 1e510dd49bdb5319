use hm_results::{ForceSeries, RunManifest, RunStore, SeriesKind};

fn temp_store(tag: &str) -> RunStore {
    let dir = std::env::temp_dir().join(format!("hm-results-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    RunStore::new(dir).unwrap()
}

fn series(label: &str, force: Vec<f64>) -> ForceSeries {
    ForceSeries {
        label: label.to_string(),
        kind: SeriesKind::Isometric,
        mtu_length_m: 0.31,
        fiber_length_m: 0.051,
        fiber_length_opt_m: 0.05,
        max_isometric_force_n: 3549.0,
        normalized: false,
        time_s: (0..force.len()).map(|i| i as f64 * 0.1).collect(),
        force,
    }
}

#[test]
fn save_and_load_run() {
    let store = temp_store("roundtrip");
    let manifest = RunManifest {
        run_id: "abc123".to_string(),
        scenario_name: "demo".to_string(),
        timestamp: "2026-01-01T00:00:00Z".to_string(),
        model_version: "0.1.0".to_string(),
        series_count: 2,
        sample_count: 3,
    };
    let data = vec![
        series("0.310 m", vec![10.0, 20.0, 30.0]),
        ForceSeries {
            kind: SeriesKind::TrainingAdapted {
                series_gain: 1.1,
                parallel_gain: 1.1,
            },
            ..series("adapted", vec![11.0, 22.0, 33.0])
        },
    ];

    assert!(!store.has_run("abc123"));
    store.save_run(&manifest, &data).unwrap();
    assert!(store.has_run("abc123"));

    assert_eq!(store.load_manifest("abc123").unwrap(), manifest);
    let loaded = store.load_series("abc123").unwrap();
    assert_eq!(loaded, data);
    assert_eq!(loaded[0].peak_force(), 30.0);
    assert_eq!(loaded[0].mean_force(), 20.0);
    assert!((loaded[0].fiber_length_ratio() - 1.02).abs() < 1e-12);

    assert_eq!(store.list_runs().unwrap().len(), 1);

    store.delete_run("abc123").unwrap();
    assert!(!store.has_run("abc123"));
    assert!(matches!(
        store.load_manifest("abc123"),
        Err(hm_results::ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn store_next_to_scenario() {
    let dir = std::env::temp_dir().join(format!("hm-results-scenario-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let store = RunStore::for_scenario(&dir.join("scenario.yaml")).unwrap();
    assert!(store.root_dir().ends_with(".hillforce/runs"));
    assert!(store.root_dir().exists());
}

#[test]
fn reloaded_forces_are_bit_identical() {
    let store = temp_store("bits");
    let manifest = RunManifest {
        run_id: "bits".to_string(),
        scenario_name: "demo".to_string(),
        timestamp: "2026-01-01T00:00:00Z".to_string(),
        model_version: "0.1.0".to_string(),
        series_count: 1,
        sample_count: 4,
    };
    let force = vec![
        2.2526780179751318e3,
        0.1 + 0.2,
        std::f64::consts::PI * 1e-7,
        3549.0 * 1.1 / 3.0,
    ];
    let data = vec![series("0.310 m", force.clone())];

    store.save_run(&manifest, &data).unwrap();
    let loaded = store.load_series("bits").unwrap();

    for (a, b) in loaded[0].force.iter().zip(&force) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
