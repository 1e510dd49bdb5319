// hm-core/src/units.rs

use uom::si::f64::{Angle as UomAngle, Force as UomForce, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Force = UomForce;
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn newtons(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}
