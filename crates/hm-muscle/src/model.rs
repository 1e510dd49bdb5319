//! Stateful Hill-type muscle model.

use std::fmt;

use crate::activation::Activation;
use crate::curves::{
    ACTIVE_RATIO_MAX, ACTIVE_RATIO_MIN, active_force_length, passive_force_length,
};
use crate::error::{MuscleError, MuscleResult};
use crate::geometry::fiber_length;
use crate::params::MuscleParams;
use crate::tendon::TendonLength;
use hm_core::numeric::{ensure_finite, ensure_positive};
use hm_core::units::{Angle, Force, Length, m, newtons, rad};
use tracing::{debug, warn};

/// Fiber lengths per series sarcomere, captured at the last geometry solve.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SeriesRatios {
    fiber_length: f64,
    fiber_length_opt: f64,
}

/// Force breakdown at the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceComponents {
    /// Current over optimal fiber length.
    pub fiber_length_ratio: f64,
    /// Active force-length curve value at `fiber_length_ratio`.
    pub active_multiplier: f64,
    /// Passive force-length curve value at `fiber_length_ratio`.
    pub passive_multiplier: f64,
    /// Active force per activation sample (N).
    pub active_force_n: Vec<f64>,
    /// Passive force (N), independent of activation.
    pub passive_force_n: f64,
}

impl ForceComponents {
    /// Active plus passive force per activation sample (N).
    pub fn total_force_n(&self) -> Vec<f64> {
        self.active_force_n
            .iter()
            .map(|fa| fa + self.passive_force_n)
            .collect()
    }
}

/// Muscle architecture plus current kinematic and activation state.
///
/// Invariants:
/// - optimal fiber length, maximum isometric force and both sarcomere counts
///   are finite and positive
/// - `fiber_length_opt / n_sarc_series` and `fiber_length / n_sarc_series`
///   survive a series rescale unchanged
/// - `max_isometric_force / n_sarc_parallel` survives a parallel rescale
///   unchanged
///
/// The fiber length is unknown until [`MuscleModel::set_fiber_length`] has
/// run once; activation is unknown until [`MuscleModel::set_activation`].
#[derive(Debug, Clone, PartialEq)]
pub struct MuscleModel {
    n_sarc_series: f64,
    n_sarc_parallel: f64,
    series_ratios: Option<SeriesRatios>,
    parallel_force_ratio: f64,
    max_isometric_force: Force,
    pennation_angle_opt: Angle,
    fiber_length_opt: Length,
    fiber_length: Option<Length>,
    activation: Option<Activation>,
}

impl Default for MuscleModel {
    fn default() -> Self {
        let p = MuscleParams::default();
        Self {
            n_sarc_series: p.n_sarc_series,
            n_sarc_parallel: p.n_sarc_parallel,
            series_ratios: None,
            parallel_force_ratio: p.max_isometric_force_n / p.n_sarc_parallel,
            max_isometric_force: newtons(p.max_isometric_force_n),
            pennation_angle_opt: rad(p.pennation_angle_opt_rad),
            fiber_length_opt: m(p.fiber_length_opt_m),
            fiber_length: None,
            activation: None,
        }
    }
}

impl MuscleModel {
    /// Build a muscle from validated architecture parameters.
    pub fn from_params(params: &MuscleParams) -> MuscleResult<Self> {
        params.validate()?;

        let mut model = Self {
            n_sarc_series: params.n_sarc_series,
            n_sarc_parallel: params.n_sarc_parallel,
            pennation_angle_opt: rad(params.pennation_angle_opt_rad),
            fiber_length_opt: m(params.fiber_length_opt_m),
            ..Self::default()
        };
        model.set_max_isometric_force(newtons(params.max_isometric_force_n))?;
        Ok(model)
    }

    pub fn n_sarc_series(&self) -> f64 {
        self.n_sarc_series
    }

    pub fn n_sarc_parallel(&self) -> f64 {
        self.n_sarc_parallel
    }

    pub fn max_isometric_force(&self) -> Force {
        self.max_isometric_force
    }

    pub fn pennation_angle_opt(&self) -> Angle {
        self.pennation_angle_opt
    }

    pub fn fiber_length_opt(&self) -> Length {
        self.fiber_length_opt
    }

    /// Current fiber length, `None` before the first geometry solve.
    pub fn fiber_length(&self) -> Option<Length> {
        self.fiber_length
    }

    /// Current over optimal fiber length, `None` before the first solve.
    pub fn fiber_length_ratio(&self) -> Option<f64> {
        self.fiber_length
            .map(|lm| lm.value / self.fiber_length_opt.value)
    }

    pub fn activation(&self) -> Option<&Activation> {
        self.activation.as_ref()
    }

    /// Solve the fiber length for a muscle-tendon length.
    ///
    /// Reads the tendon length once, stores the fiber length and refreshes
    /// the per-sarcomere length ratios used by [`Self::rescale_series`].
    pub fn set_fiber_length<T>(&mut self, mtu_length: Length, tendon: &T) -> MuscleResult<Length>
    where
        T: TendonLength + ?Sized,
    {
        ensure_positive(mtu_length.value, "muscle-tendon length")?;
        let tendon_length = tendon.tendon_length();
        ensure_finite(tendon_length.value, "tendon length")?;

        let lm = fiber_length(
            self.fiber_length_opt,
            self.pennation_angle_opt,
            mtu_length,
            tendon_length,
        );

        self.fiber_length = Some(lm);
        self.series_ratios = Some(SeriesRatios {
            fiber_length: lm.value / self.n_sarc_series,
            fiber_length_opt: self.fiber_length_opt.value / self.n_sarc_series,
        });

        let ratio = lm.value / self.fiber_length_opt.value;
        debug!(
            mtu_length_m = mtu_length.value,
            tendon_length_m = tendon_length.value,
            fiber_length_m = lm.value,
            ratio,
            "solved fiber length"
        );
        if !(ACTIVE_RATIO_MIN..=ACTIVE_RATIO_MAX).contains(&ratio) {
            warn!(
                ratio,
                "fiber length ratio outside active range, only passive force remains"
            );
        }

        Ok(lm)
    }

    /// Set the maximum isometric force and refresh the force per parallel
    /// sarcomere used by [`Self::rescale_parallel`].
    pub fn set_max_isometric_force(&mut self, value: Force) -> MuscleResult<Force> {
        ensure_positive(value.value, "max isometric force")?;
        self.max_isometric_force = value;
        self.parallel_force_ratio = value.value / self.n_sarc_parallel;
        Ok(value)
    }

    /// Replace the activation sequence.
    ///
    /// On error the previous activation is left untouched.
    pub fn set_activation(&mut self, values: impl Into<Vec<f64>>) -> MuscleResult<()> {
        let activation = Activation::new(values)?;
        debug!(samples = activation.len(), "activation assigned");
        self.activation = Some(activation);
        Ok(())
    }

    /// Scale the number of sarcomeres in series by `gain`.
    ///
    /// Optimal and current fiber length follow proportionally. Fails with
    /// [`MuscleError::UninitializedGeometry`] before the first geometry solve.
    /// A gain that would overflow or underflow the sarcomere count or the
    /// optimal fiber length is rejected and the model is left unchanged.
    pub fn rescale_series(&mut self, gain: f64) -> MuscleResult<()> {
        ensure_positive(gain, "series gain")?;
        let ratios = self.series_ratios.ok_or(MuscleError::UninitializedGeometry {
            what: "series rescale requires a solved fiber length",
        })?;

        let n_sarc_series = self.n_sarc_series * gain;
        let fiber_length_opt = n_sarc_series * ratios.fiber_length_opt;
        let fiber_length = n_sarc_series * ratios.fiber_length;
        ensure_positive(n_sarc_series, "sarcomeres in series")?;
        ensure_positive(fiber_length_opt, "optimal fiber length")?;
        ensure_finite(fiber_length, "fiber length")?;

        self.n_sarc_series = n_sarc_series;
        self.fiber_length_opt = m(fiber_length_opt);
        self.fiber_length = Some(m(fiber_length));

        debug!(
            gain,
            n_sarc_series = self.n_sarc_series,
            fiber_length_opt_m = self.fiber_length_opt.value,
            "rescaled sarcomeres in series"
        );
        Ok(())
    }

    /// Scale the number of sarcomeres in parallel by `gain`.
    ///
    /// The maximum isometric force follows proportionally. Rejected, with the
    /// model unchanged, if the count or the force would leave the finite
    /// positive range.
    pub fn rescale_parallel(&mut self, gain: f64) -> MuscleResult<()> {
        ensure_positive(gain, "parallel gain")?;

        let n_sarc_parallel = self.n_sarc_parallel * gain;
        let max_isometric_force = n_sarc_parallel * self.parallel_force_ratio;
        ensure_positive(n_sarc_parallel, "sarcomeres in parallel")?;
        ensure_positive(max_isometric_force, "max isometric force")?;

        self.n_sarc_parallel = n_sarc_parallel;
        self.max_isometric_force = newtons(max_isometric_force);

        debug!(
            gain,
            n_sarc_parallel = self.n_sarc_parallel,
            max_isometric_force_n = self.max_isometric_force.value,
            "rescaled sarcomeres in parallel"
        );
        Ok(())
    }

    /// Active and passive force at the current state.
    pub fn force_components(&self) -> MuscleResult<ForceComponents> {
        let ratio = self
            .fiber_length_ratio()
            .ok_or(MuscleError::UninitializedGeometry {
                what: "force requires a solved fiber length",
            })?;
        let activation = self
            .activation
            .as_ref()
            .ok_or(MuscleError::MissingActivation)?;

        let f_max = self.max_isometric_force.value;
        let active_multiplier = active_force_length(ratio);
        let passive_multiplier = passive_force_length(ratio, self.max_isometric_force);

        let active_force_n = activation
            .iter()
            .map(|a| active_multiplier * f_max * a)
            .collect();

        Ok(ForceComponents {
            fiber_length_ratio: ratio,
            active_multiplier,
            passive_multiplier,
            active_force_n,
            passive_force_n: passive_multiplier * f_max,
        })
    }

    /// Total (active + passive) muscle force, one value per activation sample.
    ///
    /// With `normalize` the result is a fraction of the maximum isometric
    /// force instead of newtons. Reading does not change the model.
    pub fn compute_total_force(&self, normalize: bool) -> MuscleResult<Vec<f64>> {
        let components = self.force_components()?;
        let mut total = components.total_force_n();

        if normalize {
            let f_max = self.max_isometric_force.value;
            total.iter_mut().for_each(|f| *f /= f_max);
        }

        Ok(total)
    }
}

impl fmt::Display for MuscleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Muscle:")?;
        writeln!(
            f,
            " - Maximum isometric force: {:.3} N",
            self.max_isometric_force.value
        )?;
        writeln!(
            f,
            " - Optimal fiber length: {:.6} m",
            self.fiber_length_opt.value
        )?;
        match self.fiber_length_ratio() {
            Some(ratio) => {
                let lm = ratio * self.fiber_length_opt.value;
                writeln!(f, " - Current fiber length: {lm:.6} m")?;
                writeln!(f, " - Fiber length ratio: {ratio:.4}")?;
                writeln!(f, " - Active force-length: {:.4}", active_force_length(ratio))?;
                writeln!(
                    f,
                    " - Passive force-length: {:.6}",
                    passive_force_length(ratio, self.max_isometric_force)
                )?;
            }
            None => writeln!(f, " - Current fiber length: unsolved")?,
        }
        writeln!(
            f,
            " - Pennation angle: {:.4} rad",
            self.pennation_angle_opt.value
        )?;
        write!(
            f,
            " - Sarcomeres: {:.1} in series, {:.1} in parallel",
            self.n_sarc_series, self.n_sarc_parallel
        )
    }
}
