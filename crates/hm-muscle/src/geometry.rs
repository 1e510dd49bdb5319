//! Rigid-tendon pennated-fiber geometry.
//!
//! The fiber is the hypotenuse of a right triangle. One leg is the
//! perpendicular projection of the optimal fiber length, `l_opt * sin(phi)`,
//! which stays fixed as the muscle changes length. The other leg is the
//! muscle belly's extent along the tendon, `l_mt - l_t`.

use hm_core::units::{Angle, Length, m};

/// Fiber length for a given muscle-tendon and tendon length.
///
/// `sqrt((l_opt sin(phi))^2 + (l_mt - l_t)^2)`, non-negative by construction.
pub fn fiber_length(
    fiber_length_opt: Length,
    pennation_angle_opt: Angle,
    mtu_length: Length,
    tendon_length: Length,
) -> Length {
    let height = fiber_length_opt.value * pennation_angle_opt.value.sin();
    let belly = mtu_length.value - tendon_length.value;
    m((height * height + belly * belly).sqrt())
}
