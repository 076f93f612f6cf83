//! Numeric backend shared by the Jones and Mueller algebras.
//!
//! Every operator and descriptive function in the crate is written once,
//! generic over [`Real`], and instantiated for `f64` (the usual choice) or
//! `f32`. Complex values are `nalgebra::Complex<T>`.

use nalgebra::Scalar;
use num_traits::{Float, FloatConst, NumAssign, NumCast};

/// Floating point scalar usable by every routine in the crate.
pub trait Real: Float + FloatConst + NumAssign + Scalar + Send + Sync {}

impl<T> Real for T where T: Float + FloatConst + NumAssign + Scalar + Send + Sync {}

/// Converts an `f64` literal into `T`.
pub(crate) fn lit<T: Real>(x: f64) -> T {
    <T as NumCast>::from(x).unwrap_or_else(T::nan)
}

/// Wraps an angle into (-pi, pi].
pub(crate) fn wrap_phase<T: Real>(angle: T) -> T {
    let two_pi = T::PI() + T::PI();
    let wrapped = angle % two_pi;
    if wrapped > T::PI() {
        wrapped - two_pi
    } else if wrapped <= -T::PI() {
        wrapped + two_pi
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn wrap_keeps_principal_range() {
        assert_eq!(wrap_phase(0.5_f64), 0.5);
        assert_eq!(wrap_phase(PI), PI);
        assert!((wrap_phase(-PI) - PI).abs() < 1e-15);
        assert!((wrap_phase(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert!((wrap_phase(-1.5 * PI) - 0.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn literal_conversion() {
        let half: f32 = lit(0.5);
        assert_eq!(half, 0.5_f32);
    }
}
