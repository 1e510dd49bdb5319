//! Normalized force-length curves.
//!
//! Both curves take the fiber length ratio `l / l_opt` and return a
//! dimensionless force.
//!
//! - The active curve is a parabola peaking at 1.0 for `l == l_opt` and
//!   vanishing outside `[0.5, 1.5]`. It depends on nothing but the ratio.
//! - The passive curve is an exponential that starts at optimal length and
//!   is expressed relative to the muscle's maximum isometric force, so it
//!   needs that force as a second argument.
//!
//! # References
//!
//! - Buchanan, T.S. et al. (2004). Neuromusculoskeletal modeling: estimation
//!   of muscle forces and joint moments and movements from measurements of
//!   neural command.
//! - Zajac, F.E. (1989). Muscle and tendon: properties, models, scaling, and
//!   application to biomechanics and motor control.

use hm_core::units::Force;

/// Shortest fiber length ratio that produces active force.
pub const ACTIVE_RATIO_MIN: f64 = 0.5;

/// Longest fiber length ratio that produces active force.
pub const ACTIVE_RATIO_MAX: f64 = 1.5;

/// Below this ratio the passive tissue is slack.
pub const PASSIVE_SLACK_RATIO: f64 = 1.0;

const PASSIVE_EXP_OFFSET: f64 = 5.5;

/// Active force-length multiplier in `[0, 1]`.
///
/// Zero outside `[ACTIVE_RATIO_MIN, ACTIVE_RATIO_MAX]` (no extrapolation),
/// `1 - 4 (r - 1)^2` inside.
#[must_use]
pub fn active_force_length(ratio: f64) -> f64 {
    if !(ACTIVE_RATIO_MIN..=ACTIVE_RATIO_MAX).contains(&ratio) {
        return 0.0;
    }

    let stretch = ratio - 1.0;
    1.0 - 4.0 * stretch * stretch
}

/// Passive force-length value, as a fraction of `f_max_iso`.
///
/// `exp(10 r - 1) / exp(5.5) / f_max_iso` for `r >= 1`, zero below.
/// Unbounded above.
#[must_use]
pub fn passive_force_length(ratio: f64, f_max_iso: Force) -> f64 {
    if ratio.is_nan() || ratio < PASSIVE_SLACK_RATIO {
        return 0.0;
    }

    let fp = (10.0 * ratio - 1.0).exp();
    let fp = fp / PASSIVE_EXP_OFFSET.exp();
    fp / f_max_iso.value
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_core::units::newtons;

    #[test]
    fn active_peaks_at_optimal_length() {
        assert_eq!(active_force_length(1.0), 1.0);
        assert!(active_force_length(0.9) < 1.0);
        assert!(active_force_length(1.1) < 1.0);
    }

    #[test]
    fn active_vanishes_at_and_beyond_bounds() {
        assert!(active_force_length(0.5).abs() < 1e-12);
        assert!(active_force_length(1.5).abs() < 1e-12);
        assert_eq!(active_force_length(0.49), 0.0);
        assert_eq!(active_force_length(1.51), 0.0);
        assert_eq!(active_force_length(6.0), 0.0);
        assert_eq!(active_force_length(f64::NAN), 0.0);
    }

    #[test]
    fn active_is_symmetric_about_one() {
        for d in [0.05, 0.1, 0.25, 0.4] {
            let lo = active_force_length(1.0 - d);
            let hi = active_force_length(1.0 + d);
            assert!((lo - hi).abs() < 1e-12);
        }
    }

    #[test]
    fn passive_slack_below_optimal() {
        let f_max = newtons(3549.0);
        assert_eq!(passive_force_length(0.5, f_max), 0.0);
        assert_eq!(passive_force_length(0.999_999, f_max), 0.0);
        assert_eq!(passive_force_length(f64::NAN, f_max), 0.0);
    }

    #[test]
    fn passive_matches_formula_exactly() {
        let f_max = newtons(3549.0);
        let expected = (10.0_f64 * 1.2 - 1.0).exp() / 5.5_f64.exp() / 3549.0;
        assert_eq!(passive_force_length(1.2, f_max), expected);
        assert!(expected > 0.0);
    }

    #[test]
    fn passive_starts_at_optimal_length() {
        let f_max = newtons(3549.0);
        let expected = 3.5_f64.exp() / 3549.0;
        assert!((passive_force_length(1.0, f_max) - expected).abs() < 1e-15);
    }

    #[test]
    fn passive_scales_inversely_with_max_force() {
        let a = passive_force_length(1.3, newtons(1000.0));
        let b = passive_force_length(1.3, newtons(2000.0));
        assert!((a / b - 2.0).abs() < 1e-12);
    }
}
