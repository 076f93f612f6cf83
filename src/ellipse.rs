//! Descriptive parameters of a Jones vector.
//!
//! A fully polarized field traces an ellipse in the transverse plane. This
//! module recovers the geometry of that ellipse from the raw amplitude pair
//! (j1, j2):
//! - total intensity and relative phase
//! - azimuth of the major axis
//! - semi-major and semi-minor axes
//! - ellipticity and ellipticity angle, signed by handedness
//! - amplitude ratio and its angle
//! - the corresponding point on the Poincaré sphere
//!
//! # Handedness
//!
//! Positive relative phase (j2 leading j1) is right-handed, negative is
//! left-handed and a phase of 0 or pi is linear. Signed quantities such as
//! [`ellipticity`] are negative for left-handed light.

use std::fmt;

use crate::config;
use crate::jones::JonesVector;
use crate::scalar::{lit, wrap_phase, Real};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::Convention;
    use crate::jones;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Complex, Vector2};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn intensity_and_phase() {
        let j = Vector2::new(Complex::new(3.0_f64, 0.0), Complex::from_polar(4.0, 0.5));
        assert_abs_diff_eq!(intensity(&j), 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(phase(&j), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn phase_is_wrapped() {
        let j = Vector2::new(
            Complex::from_polar(1.0_f64, -0.75 * PI),
            Complex::from_polar(1.0, 0.75 * PI),
        );
        assert_abs_diff_eq!(phase(&j), -0.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn linear_fields_have_flat_ellipses() {
        for k in 0..12 {
            let theta = k as f64 * PI / 12.0;
            let j = jones::field_linear(theta);
            let (major, minor) = ellipse_axes(&j);
            assert_abs_diff_eq!(major, 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(minor, 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(ellipticity(&j), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn linear_azimuth_matches_angle() {
        let j = jones::field_linear(0.3_f64);
        assert_abs_diff_eq!(ellipse_azimuth(&j), 0.3, epsilon = 1e-12);
        let j = jones::field_linear(-1.2_f64);
        assert_abs_diff_eq!(ellipse_azimuth(&j), -1.2, epsilon = 1e-12);
    }

    #[test]
    fn circular_fields() {
        let right = jones::field_right_circular::<f64>(Convention::Standard);
        let (major, minor) = ellipse_axes(&right);
        assert_abs_diff_eq!(major, minor, epsilon = 1e-12);
        assert_abs_diff_eq!(ellipticity(&right), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ellipticity_angle(&right), FRAC_PI_4, epsilon = 1e-12);

        let left = jones::field_left_circular::<f64>(Convention::Standard);
        assert_abs_diff_eq!(ellipticity(&left), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ellipticity_angle(&left), -FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn elliptical_field_recovers_parameters() {
        let (azimuth, angle) = (0.4_f64, 0.25_f64);
        let j = jones::field_elliptical(azimuth, angle, Convention::Standard);
        assert_abs_diff_eq!(ellipse_azimuth(&j), azimuth, epsilon = 1e-12);
        assert_abs_diff_eq!(ellipticity_angle(&j), angle, epsilon = 1e-12);
        assert_abs_diff_eq!(ellipticity(&j), angle.tan(), epsilon = 1e-12);
        let (major, minor) = ellipse_axes(&j);
        assert_abs_diff_eq!(major, angle.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(minor, angle.sin(), epsilon = 1e-12);

        let j = jones::field_elliptical(azimuth, -angle, Convention::Standard);
        assert_abs_diff_eq!(ellipticity_angle(&j), -angle, epsilon = 1e-12);
    }

    #[test]
    fn vertically_stretched_axes() {
        // vertically stretched, azimuth near pi/2
        let j = Vector2::new(Complex::new(0.5_f64, 0.0), Complex::new(0.0, 1.0));
        let (major, minor) = ellipse_axes(&j);
        assert!(major >= minor);
        assert_abs_diff_eq!(major, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(minor, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ellipticity_angle(&j), 0.5_f64.atan(), epsilon = 1e-12);
    }

    #[test]
    fn amplitude_ratio_of_vertical_is_infinite() {
        let v = jones::field_vertical::<f64>();
        assert_eq!(amplitude_ratio(&v), f64::INFINITY);
        assert_abs_diff_eq!(amplitude_ratio_angle(&v), FRAC_PI_2, epsilon = 1e-12);
        let j = jones::field_linear(0.3_f64);
        assert_abs_diff_eq!(amplitude_ratio(&j), 0.3_f64.tan(), epsilon = 1e-12);
    }

    #[test]
    fn poincare_poles() {
        let right = jones::field_right_circular::<f64>(Convention::Standard);
        let (latitude, _) = poincare_point(&right);
        assert_abs_diff_eq!(latitude, FRAC_PI_2, epsilon = 1e-12);
        let (latitude, longitude) = poincare_point(&jones::field_linear(0.3_f64));
        assert_abs_diff_eq!(latitude, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(longitude, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn describe_collects_everything() {
        let j = jones::field_elliptical(0.2_f64, -0.3, Convention::Standard);
        let d = describe(&j);
        assert_eq!(d.handedness, Handedness::Left);
        assert_abs_diff_eq!(d.azimuth, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(d.ellipticity_angle, -0.3, epsilon = 1e-12);
        assert_eq!(describe(&jones::field_horizontal::<f64>()).handedness, Handedness::Linear);
    }
}

/// Sense of rotation of the field vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    /// Positive relative phase.
    Right,
    /// Negative relative phase.
    Left,
    Linear,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Right => write!(f, "right"),
            Handedness::Left => write!(f, "left"),
            Handedness::Linear => write!(f, "linear"),
        }
    }
}

/// Geometry of the polarization ellipse traced by a Jones vector.
///
/// **Context**: The individual functions of this module each recompute the
/// azimuth and axes. When several parameters are needed at once this struct
/// gathers them from a single pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseDescriptor<T> {
    /// Angle of the major axis from the x-axis [radians].
    pub azimuth: T,
    pub major: T,
    pub minor: T,
    /// minor / major, negative when left-handed.
    pub ellipticity: T,
    /// arctan(minor / major), negative when left-handed [radians].
    pub ellipticity_angle: T,
    pub handedness: Handedness,
}

/// Total intensity |j1|^2 + |j2|^2.
pub fn intensity<T: Real>(j: &JonesVector<T>) -> T {
    j[0].norm_sqr() + j[1].norm_sqr()
}

/// Phase of j2 relative to j1, in (-pi, pi].
pub fn phase<T: Real>(j: &JonesVector<T>) -> T {
    wrap_phase(j[1].arg() - j[0].arg())
}

/// Angle between the major semi-axis and the x-axis.
///
/// Uses the two-argument arctangent so that the quadrant follows from the
/// amplitudes and the relative phase alone.
pub fn ellipse_azimuth<T: Real>(j: &JonesVector<T>) -> T {
    let (ex, ey) = (j[0].norm(), j[1].norm());
    let numer = lit::<T>(2.0) * ex * ey * phase(j).cos();
    let denom = ex * ex - ey * ey;
    numer.atan2(denom) / lit::<T>(2.0)
}

/// Semi-major and semi-minor axes of the polarization ellipse, larger first.
pub fn ellipse_axes<T: Real>(j: &JonesVector<T>) -> (T, T) {
    let (ex, ey) = (j[0].norm(), j[1].norm());
    let (s, c) = ellipse_azimuth(j).sin_cos();
    let cross = lit::<T>(2.0) * ex * ey * c * s * phase(j).cos();
    let a_sqr = (ex * c).powi(2) + (ey * s).powi(2) + cross;
    let b_sqr = (ex * s).powi(2) + (ey * c).powi(2) - cross;
    let a = a_sqr.abs().sqrt();
    let b = b_sqr.abs().sqrt();
    if a < b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Ratio of semi-minor to semi-major axis, from -1 (left circular) through
/// 0 (linear) to 1 (right circular).
pub fn ellipticity<T: Real>(j: &JonesVector<T>) -> T {
    let (major, minor) = ellipse_axes(j);
    signed_by_phase(j, minor / major)
}

/// Angle whose tangent is the ellipticity, in [-pi/4, pi/4].
pub fn ellipticity_angle<T: Real>(j: &JonesVector<T>) -> T {
    let (a, b) = ellipse_axes(j);
    let epsilon = if a.abs() >= b.abs() {
        b.atan2(a)
    } else {
        a.atan2(b)
    };
    signed_by_phase(j, epsilon)
}

fn signed_by_phase<T: Real>(j: &JonesVector<T>, value: T) -> T {
    if phase(j) < T::zero() {
        -value
    } else {
        value
    }
}

/// Ratio |j2| / |j1| of the field amplitudes; infinite when |j1| is zero.
pub fn amplitude_ratio<T: Real>(j: &JonesVector<T>) -> T {
    let (ex, ey) = (j[0].norm(), j[1].norm());
    if ex == T::zero() {
        return T::infinity();
    }
    ey / ex
}

/// Angle whose tangent is [`amplitude_ratio`].
pub fn amplitude_ratio_angle<T: Real>(j: &JonesVector<T>) -> T {
    j[1].norm().atan2(j[0].norm())
}

/// Returns `(latitude, longitude)` of the state on the Poincaré sphere.
///
/// The latitude is unsigned; it measures the ellipticity only.
pub fn poincare_point<T: Real>(j: &JonesVector<T>) -> (T, T) {
    let longitude = lit::<T>(2.0) * ellipse_azimuth(j);
    let (a, b) = ellipse_axes(j);
    let latitude = lit::<T>(2.0) * b.atan2(a);
    (latitude, longitude)
}

/// True when the relative phase is a multiple of pi within `eps`.
pub(crate) fn is_linear_phase<T: Real>(phase: T, eps: T) -> bool {
    let mut reduced = phase % T::PI();
    if reduced < T::zero() {
        reduced += T::PI();
    }
    reduced < eps || T::PI() - reduced < eps
}

/// Right or left by the sign of [`phase`], linear when the phase is a
/// multiple of pi.
pub fn handedness<T: Real>(j: &JonesVector<T>) -> Handedness {
    let delta = phase(j);
    if is_linear_phase(delta, lit::<T>(config::INTERPRET_TOLERANCE)) {
        Handedness::Linear
    } else if delta > T::zero() {
        Handedness::Right
    } else {
        Handedness::Left
    }
}

/// Computes every ellipse parameter of `j` at once.
pub fn describe<T: Real>(j: &JonesVector<T>) -> EllipseDescriptor<T> {
    let (major, minor) = ellipse_axes(j);
    EllipseDescriptor {
        azimuth: ellipse_azimuth(j),
        major,
        minor,
        ellipticity: signed_by_phase(j, minor / major),
        ellipticity_angle: signed_by_phase(j, minor.atan2(major)),
        handedness: handedness(j),
    }
}
