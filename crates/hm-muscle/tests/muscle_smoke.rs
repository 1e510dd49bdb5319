//! Integration tests for hm-muscle driving full activation sequences.

use hm_core::units::{m, newtons};
use hm_muscle::{
    MuscleError, MuscleModel, MuscleParams, RigidTendon, TendonLength, active_force_length,
    passive_force_length,
};

fn sine_activation(samples: usize) -> Vec<f64> {
    let step = 2.0 * std::f64::consts::PI * 10.0 / samples as f64;
    (0..samples)
        .map(|k| (k as f64 * step).sin() / 2.0 + 0.5)
        .collect()
}

#[test]
fn mtu_length_sweep_produces_one_series_per_length() {
    let activation = sine_activation(2000);
    let tendon = RigidTendon::new(m(0.26));

    let mut muscle = MuscleModel::default();
    muscle.set_activation(activation.clone()).unwrap();

    let mut previous_fiber = 0.0;
    for mtu in [0.30, 0.31, 0.32] {
        let lm = muscle.set_fiber_length(m(mtu), &tendon).unwrap();
        assert!(lm.value > previous_fiber, "fiber lengthens with MTU length");
        previous_fiber = lm.value;

        let force = muscle.compute_total_force(false).unwrap();
        assert_eq!(force.len(), activation.len());
        assert!(force.iter().all(|f| f.is_finite()));

        let peak = force.iter().cloned().fold(f64::MIN, f64::max);
        assert!(peak > 0.0, "peak force should be positive at MTU {mtu}");
    }
}

#[test]
fn training_grows_fiber_and_force() {
    let tendon = RigidTendon::new(m(0.26));
    let mut muscle = MuscleModel::default();
    muscle.set_activation(sine_activation(200)).unwrap();
    muscle.set_fiber_length(m(0.31), &tendon).unwrap();

    let week0 = muscle.force_components().unwrap();

    muscle.rescale_series(1.1).unwrap();
    muscle.rescale_parallel(1.1).unwrap();

    let week1 = muscle.force_components().unwrap();

    // Series growth keeps the operating point on the curve; parallel growth
    // lifts the active trace by the same gain. Passive force in newtons does
    // not depend on the maximum isometric force.
    assert!((week0.fiber_length_ratio - week1.fiber_length_ratio).abs() < 1e-12);
    for (a0, a1) in week0.active_force_n.iter().zip(&week1.active_force_n) {
        assert!((a1 - 1.1 * a0).abs() < 1e-9 * a0.abs().max(1.0));
    }
    assert!((week1.passive_force_n - week0.passive_force_n).abs() < 1e-9);
    assert!(week0.passive_force_n > 0.0);
    assert!((muscle.fiber_length_opt().value - 0.055).abs() < 1e-12);
}

#[test]
fn re_solving_after_series_rescale_uses_new_optimal_length() {
    let tendon = RigidTendon::new(m(0.26));
    let mut muscle = MuscleModel::default();
    muscle.set_fiber_length(m(0.31), &tendon).unwrap();
    muscle.rescale_series(1.1).unwrap();

    let lm = muscle.set_fiber_length(m(0.31), &tendon).unwrap();
    let height = 0.055 * 0.2_f64.sin();
    let belly = 0.31 - 0.26;
    assert!((lm.value - (height * height + belly * belly).sqrt()).abs() < 1e-12);

    // The per-sarcomere cache follows the new count.
    muscle.rescale_series(2.0).unwrap();
    assert!((muscle.fiber_length_opt().value - 0.11).abs() < 1e-12);
}

#[test]
fn reference_force_values() {
    let f_max = newtons(3549.0);
    assert_eq!(active_force_length(1.0) * f_max.value * 1.0, 3549.0);
    assert_eq!(
        passive_force_length(1.2, f_max),
        (10.0_f64 * 1.2 - 1.0).exp() / 5.5_f64.exp() / 3549.0
    );
}

#[test]
fn custom_tendon_provider_is_read_per_solve() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTendon {
        reads: AtomicUsize,
    }

    impl TendonLength for CountingTendon {
        fn tendon_length(&self) -> hm_core::units::Length {
            self.reads.fetch_add(1, Ordering::Relaxed);
            m(0.26)
        }
    }

    let tendon = CountingTendon {
        reads: AtomicUsize::new(0),
    };
    let mut muscle = MuscleModel::default();
    muscle.set_fiber_length(m(0.30), &tendon).unwrap();
    muscle.set_fiber_length(m(0.31), &tendon).unwrap();
    assert_eq!(tendon.reads.load(Ordering::Relaxed), 2);
}

#[test]
fn independent_models_across_threads() {
    let handles: Vec<_> = [0.30, 0.31, 0.32]
        .into_iter()
        .map(|mtu| {
            std::thread::spawn(move || {
                let mut muscle = MuscleModel::from_params(&MuscleParams::default()).unwrap();
                muscle.set_activation(vec![1.0]).unwrap();
                muscle
                    .set_fiber_length(m(mtu), &RigidTendon::new(m(0.26)))
                    .unwrap();
                muscle.compute_total_force(true).unwrap()[0]
            })
        })
        .collect();

    let forces: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(forces.len(), 3);
    assert!(forces.iter().all(|f| f.is_finite()));
}

#[test]
fn out_of_range_activation_is_rejected_whole() {
    let mut muscle = MuscleModel::default();
    let err = muscle.set_activation(vec![0.2, 0.4, 1.01]).unwrap_err();
    assert_eq!(
        err,
        MuscleError::InvalidActivation {
            index: 2,
            value: 1.01
        }
    );
    assert!(muscle.activation().is_none());
}
