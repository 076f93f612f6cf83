//! Mueller calculus: 4x4 real operators and Stokes vectors.
//!
//! A Stokes vector (S0, S1, S2, S3) describes intensity correlations and can
//! represent partially polarized light; a Mueller matrix is the real 4x4
//! operator acting on it. Each operator here is the intensity-domain twin of
//! the matching operator in [`crate::jones`].
//!
//! The module provides:
//! - Mueller matrices for polarizers, retarders, wave plates, attenuators,
//!   mirrors, rotators and Fresnel interfaces
//! - Stokes vectors for the canonical polarization states
//! - degree of polarization
//! - reduction of a Stokes vector to the Jones vector of its polarized part
//!
//! # Fresnel operators
//!
//! [`op_fresnel_reflection`] and [`op_fresnel_transmission`] are built from
//! power coefficients and carry no phase information.
//! [`op_fresnel_reflection_from_jones`] and
//! [`op_fresnel_transmission_from_jones`] are expanded from the Jones
//! operators and are the ones to use when phase changes matter. The two
//! families are not identical.

use nalgebra::{Complex, Matrix4, Vector2, Vector4};

use crate::bridge;
use crate::config;
use crate::convention::Convention;
use crate::error::{PolarError, Result};
use crate::fresnel;
use crate::jones::{self, JonesVector};
use crate::scalar::{lit, Real};

/// Stokes parameters (S0, S1, S2, S3).
pub type StokesVector<T> = Vector4<T>;
/// 4x4 real operator acting on a [`StokesVector`].
pub type MuellerMatrix<T> = Matrix4<T>;


/// Mueller matrix for a linear polarizer with transmission axis at `theta`
/// from the horizontal.
#[rustfmt::skip]
pub fn op_linear_polarizer<T: Real>(theta: T) -> MuellerMatrix<T> {
    let (s2, c2) = (theta + theta).sin_cos();
    let z = T::zero();
    let lp = Matrix4::new(
        T::one(), c2, s2, z,
        c2, c2 * c2, c2 * s2, z,
        s2, c2 * s2, s2 * s2, z,
        z, z, z, z,
    );
    lp * lit::<T>(0.5)
}

/// Mueller matrix for a retarder with fast axis at `theta` from the
/// horizontal and phase delay `delta`.
#[rustfmt::skip]
pub fn op_retarder<T: Real>(theta: T, delta: T) -> MuellerMatrix<T> {
    let (s2, c2) = (theta + theta).sin_cos();
    let (s, c) = delta.sin_cos();
    let (z, one) = (T::zero(), T::one());
    Matrix4::new(
        one, z, z, z,
        z, c2 * c2 + c * s2 * s2, (one - c) * s2 * c2, -s * s2,
        z, (one - c) * c2 * s2, s2 * s2 + c * c2 * c2, s * c2,
        z, s * s2, -s * c2, c,
    )
}

/// Mueller matrix for an attenuator of base-ten optical density `od`.
///
/// Unlike [`jones::op_attenuator`], which takes the transmittance t directly,
/// this takes od = -log10(t).
pub fn op_attenuator<T: Real>(od: T) -> MuellerMatrix<T> {
    let k = lit::<T>(10.0).powf(-od);
    Matrix4::from_diagonal_element(k)
}

/// Mueller matrix for a perfect mirror.
pub fn op_mirror<T: Real>() -> MuellerMatrix<T> {
    let one = T::one();
    Matrix4::from_diagonal(&Vector4::new(one, one, -one, -one))
}

/// Mueller matrix rotating the polarization by `theta` about the optical axis.
#[rustfmt::skip]
pub fn op_rotation<T: Real>(theta: T) -> MuellerMatrix<T> {
    let (s2, c2) = (theta + theta).sin_cos();
    let (z, one) = (T::zero(), T::one());
    Matrix4::new(
        one, z, z, z,
        z, c2, s2, z,
        z, -s2, c2, z,
        z, z, z, one,
    )
}

/// Mueller matrix for a quarter-wave plate with fast axis at `theta` from
/// the horizontal. Equal to [`op_retarder`] with delta = pi/2.
#[rustfmt::skip]
pub fn op_quarter_wave_plate<T: Real>(theta: T) -> MuellerMatrix<T> {
    let (s2, c2) = (theta + theta).sin_cos();
    let (z, one) = (T::zero(), T::one());
    Matrix4::new(
        one, z, z, z,
        z, c2 * c2, c2 * s2, -s2,
        z, c2 * s2, s2 * s2, c2,
        z, s2, -c2, z,
    )
}

/// Mueller matrix for a half-wave plate with fast axis at `theta` from the
/// horizontal. Equal to [`op_retarder`] with delta = pi.
#[rustfmt::skip]
pub fn op_half_wave_plate<T: Real>(theta: T) -> MuellerMatrix<T> {
    let (s2, c2) = (theta + theta).sin_cos();
    let (z, one) = (T::zero(), T::one());
    let two = lit::<T>(2.0);
    Matrix4::new(
        one, z, z, z,
        z, c2 * c2 - s2 * s2, two * c2 * s2, z,
        z, two * c2 * s2, s2 * s2 - c2 * c2, z,
        z, z, z, -one,
    )
}

/// Mueller matrix from a pair of power coefficients `p` (parallel) and `s`
/// (perpendicular).
#[rustfmt::skip]
fn from_power_pair<T: Real>(p: T, s: T) -> MuellerMatrix<T> {
    let z = T::zero();
    let ps = lit::<T>(2.0) * (p * s).sqrt();
    let m = Matrix4::new(
        p + s, s - p, z, z,
        s - p, p + s, z, z,
        z, z, ps, z,
        z, z, z, ps,
    );
    m * lit::<T>(0.5)
}

/// Mueller matrix for Fresnel reflection, built from the power reflectances.
pub fn op_fresnel_reflection<T: Real>(m: Complex<T>, theta: T) -> MuellerMatrix<T> {
    from_power_pair(
        fresnel::reflectance_par(m, theta),
        fresnel::reflectance_per(m, theta),
    )
}

/// Mueller matrix for Fresnel transmission, built from the power
/// transmittances.
pub fn op_fresnel_transmission<T: Real>(m: Complex<T>, theta: T) -> MuellerMatrix<T> {
    from_power_pair(
        fresnel::transmittance_par(m, theta),
        fresnel::transmittance_per(m, theta),
    )
}

/// Mueller matrix for Fresnel reflection expanded from the Jones operator, so
/// that the phase shift on reflection is kept.
pub fn op_fresnel_reflection_from_jones<T: Real>(
    m: Complex<T>,
    theta: T,
    convention: Convention,
) -> MuellerMatrix<T> {
    bridge::jones_op_to_mueller_op(&jones::op_fresnel_reflection(m, theta), convention)
}

/// Mueller matrix for Fresnel transmission expanded from the Jones operator.
///
/// Inherits the unverified amplitude scaling of
/// [`jones::op_fresnel_transmission`].
pub fn op_fresnel_transmission_from_jones<T: Real>(
    m: Complex<T>,
    theta: T,
    convention: Convention,
) -> MuellerMatrix<T> {
    bridge::jones_op_to_mueller_op(&jones::op_fresnel_transmission(m, theta), convention)
}

/// Builds a Stokes vector from a slice of exactly four parameters.
pub fn stokes_from_slice<T: Real>(parameters: &[T]) -> Result<StokesVector<T>> {
    match parameters {
        [s0, s1, s2, s3] => Ok(Vector4::new(*s0, *s1, *s2, *s3)),
        _ => Err(PolarError::InvalidShape {
            kind: "Stokes vector",
            expected: 4,
            found: parameters.len(),
        }),
    }
}

/// Linearly polarized light at `theta` from the horizontal.
pub fn stokes_linear<T: Real>(theta: T) -> StokesVector<T> {
    let (s2, c2) = (theta + theta).sin_cos();
    Vector4::new(T::one(), c2, s2, T::zero())
}

/// Right circularly polarized light, S3 = +1 in either convention.
pub fn stokes_right_circular<T: Real>() -> StokesVector<T> {
    Vector4::new(T::one(), T::zero(), T::zero(), T::one())
}

/// Left circularly polarized light, S3 = -1.
pub fn stokes_left_circular<T: Real>() -> StokesVector<T> {
    Vector4::new(T::one(), T::zero(), T::zero(), -T::one())
}

/// Unit light polarized along x.
pub fn stokes_horizontal<T: Real>() -> StokesVector<T> {
    Vector4::new(T::one(), T::one(), T::zero(), T::zero())
}

/// Unit light polarized along y.
pub fn stokes_vertical<T: Real>() -> StokesVector<T> {
    Vector4::new(T::one(), -T::one(), T::zero(), T::zero())
}

/// Unit intensity of unpolarized light.
pub fn stokes_unpolarized<T: Real>() -> StokesVector<T> {
    Vector4::new(T::one(), T::zero(), T::zero(), T::zero())
}

/// Fraction of the intensity that is polarized, sqrt(S1^2 + S2^2 + S3^2) / S0.
///
/// Fails with [`PolarError::DegenerateState`] unless S0 is positive.
pub fn degree_of_polarization<T: Real>(s: &StokesVector<T>) -> Result<T> {
    if s[0].is_nan() || s[0] <= T::zero() {
        return Err(PolarError::DegenerateState(format!(
            "total intensity must be positive, found {:?}",
            s[0]
        )));
    }
    Ok(polarized_intensity(s) / s[0])
}

fn polarized_intensity<T: Real>(s: &StokesVector<T>) -> T {
    (s[1] * s[1] + s[2] * s[2] + s[3] * s[3]).sqrt()
}

/// Jones vector of the polarized part of `s`.
///
/// **Context**: A Jones vector only represents fully polarized light and is
/// defined up to a global phase. The unpolarized remainder S0 (1 - p) has no
/// definite phase and is dropped; callers that need it compute it from
/// [`degree_of_polarization`].
///
/// **How it Works**: Normalizes (S1, S2, S3) by the polarized intensity to
/// (Q, U, V), picks the phase that makes Ex real and non-negative,
/// Ex = A = sqrt((1 + Q) / 2), and sets Ey = (U + iV) / (2A), or 1 when A
/// vanishes. The result is scaled by the polarized amplitude and conjugated
/// under the alternate convention, matching [`bridge::jones_to_stokes`].
pub fn stokes_to_jones<T: Real>(s: &StokesVector<T>, convention: Convention) -> Result<JonesVector<T>> {
    let p = degree_of_polarization(s)?;
    if p == T::zero() {
        return Err(PolarError::DegenerateState(
            "unpolarized light has no Jones vector".to_string(),
        ));
    }
    if p < T::one() - lit::<T>(config::POLARIZATION_TOLERANCE) {
        log::debug!(
            "dropping unpolarized residual of {:?} from Stokes vector",
            s[0] * (T::one() - p)
        );
    }

    let scale = s[0] * p;
    let (q, u, v) = (s[1] / scale, s[2] / scale, s[3] / scale);

    let two = lit::<T>(2.0);
    let a = ((T::one() + q) / two).max(T::zero()).sqrt();
    let b = if a == T::zero() {
        Complex::from(T::one())
    } else {
        Complex::new(u, v) / (two * a)
    };

    let amplitude = scale.sqrt();
    let j = Vector2::new(Complex::from(a * amplitude), b * amplitude);
    Ok(convention.orient_vector(j))
}
