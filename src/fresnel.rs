//! Fresnel coefficients for reflection and transmission at a planar interface.
//!
//! Light arrives from a medium of index 1 onto a medium with complex relative
//! refractive index `m` at angle `theta` from the surface normal. The module
//! provides:
//! - amplitude coefficients `r_par`, `r_per`, `t_par`, `t_per` (complex)
//! - power coefficients `reflectance_*` and `transmittance_*` (real)
//!
//! "par" is the p (parallel, TM) component and "per" the s (perpendicular,
//! TE) component.
//!
//! # Physical Foundation
//!
//! With c = cos(theta) and d = sqrt(m^2 - sin^2(theta)), the cosine of the
//! refracted angle scaled by m, the amplitude ratios are
//! - r_par = (m^2 c - d) / (m^2 c + d)
//! - r_per = (c - d) / (c + d)
//! - t_par = 2 m c / (m^2 c + d)
//! - t_per = 2 c / (c + d)
//!
//! For a non-absorbing medium d is conjugated so that total internal
//! reflection picks the evanescent branch.

use nalgebra::Complex;

use crate::scalar::{lit, Real};

#[cfg(test)]
mod tests {

    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn normal_incidence_glass() {
        let m = Complex::new(1.5_f64, 0.0);
        let r_s = r_per(m, 0.0);
        let r_p = r_par(m, 0.0);
        assert!((r_s - Complex::new(-0.2, 0.0)).norm() < 1e-12);
        assert!((r_p - Complex::new(0.2, 0.0)).norm() < 1e-12);
        assert!((reflectance_per(m, 0.0) - 0.04).abs() < 1e-12);
        assert!((transmittance_par(m, 0.0) - 0.96).abs() < 1e-12);
    }

    #[test]
    fn matched_index_is_transparent() {
        let m = Complex::new(1.0_f64, 0.0);
        let theta = 30.0 * PI / 180.0;
        assert!(r_par(m, theta).norm() < 1e-12);
        assert!(r_per(m, theta).norm() < 1e-12);
        assert!((t_par(m, theta) - Complex::new(1.0, 0.0)).norm() < 1e-12);
        assert!((t_per(m, theta) - Complex::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn brewster_angle() {
        let m = Complex::new(1.5_f64, 0.0);
        let brewster = 1.5_f64.atan();
        assert!(reflectance_par(m, brewster) < 1e-12);
        assert!(reflectance_per(m, brewster) > 0.1);
    }

    #[test]
    fn total_internal_reflection() {
        let m = Complex::new(1.0 / 1.5_f64, 0.0);
        let theta = 60.0 * PI / 180.0;
        assert!((reflectance_par(m, theta) - 1.0).abs() < 1e-12);
        assert!((reflectance_per(m, theta) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn absorbing_medium_reflects_more() {
        let glass = Complex::new(1.5_f64, 0.0);
        let metal = Complex::new(1.5_f64, 3.0);
        assert!(reflectance_per(metal, 0.3) > reflectance_per(glass, 0.3));
        let total = reflectance_par(metal, 0.3) + transmittance_par(metal, 0.3);
        assert!((total - 1.0).abs() < 1e-12);
    }
}

/// Returns `(m^2, cos theta, d)` shared by every coefficient.
pub(crate) fn cosines<T: Real>(m: Complex<T>, theta: T) -> (Complex<T>, T, Complex<T>) {
    let (s, c) = theta.sin_cos();
    let m2 = m * m;
    let d = (m2 - Complex::from(s * s)).sqrt();
    let d = if m.im == T::zero() { d.conj() } else { d };
    (m2, c, d)
}

/// Reflected amplitude ratio for the parallel (p) field component.
pub fn r_par<T: Real>(m: Complex<T>, theta: T) -> Complex<T> {
    let (m2, c, d) = cosines(m, theta);
    (m2 * c - d) / (m2 * c + d)
}

/// Reflected amplitude ratio for the perpendicular (s) field component.
pub fn r_per<T: Real>(m: Complex<T>, theta: T) -> Complex<T> {
    let (_, c, d) = cosines(m, theta);
    (Complex::from(c) - d) / (Complex::from(c) + d)
}

/// Transmitted amplitude ratio for the parallel (p) field component.
pub fn t_par<T: Real>(m: Complex<T>, theta: T) -> Complex<T> {
    let (m2, c, d) = cosines(m, theta);
    m * (c * lit::<T>(2.0)) / (m2 * c + d)
}

/// Transmitted amplitude ratio for the perpendicular (s) field component.
pub fn t_per<T: Real>(m: Complex<T>, theta: T) -> Complex<T> {
    let (_, c, d) = cosines(m, theta);
    Complex::from(c * lit::<T>(2.0)) / (Complex::from(c) + d)
}

/// Fraction of parallel-polarized power reflected.
pub fn reflectance_par<T: Real>(m: Complex<T>, theta: T) -> T {
    r_par(m, theta).norm_sqr()
}

/// Fraction of perpendicular-polarized power reflected.
pub fn reflectance_per<T: Real>(m: Complex<T>, theta: T) -> T {
    r_per(m, theta).norm_sqr()
}

/// Fraction of parallel-polarized power crossing the interface.
pub fn transmittance_par<T: Real>(m: Complex<T>, theta: T) -> T {
    T::one() - reflectance_par(m, theta)
}

/// Fraction of perpendicular-polarized power crossing the interface.
pub fn transmittance_per<T: Real>(m: Complex<T>, theta: T) -> T {
    T::one() - reflectance_per(m, theta)
}
