//! Jones calculus: operators and field vectors for fully polarized light.
//!
//! A Jones vector holds the complex transverse field components (Ex, Ey); a
//! Jones matrix is a 2x2 complex operator acting on it. Operators compose by
//! ordinary matrix multiplication, rightmost first:
//!
//! ```rust
//! use polarcalc::{jones, Convention};
//!
//! let field = jones::field_horizontal::<f64>();
//! let qwp = jones::op_quarter_wave_plate(std::f64::consts::FRAC_PI_4, Convention::Standard);
//! let polarizer = jones::op_linear_polarizer(0.0_f64);
//! let out = polarizer * qwp * field;
//! assert!((polarcalc::ellipse::intensity(&out) - 0.5).abs() < 1e-12);
//! ```
//!
//! All angles are in radians. Constructors whose result depends on the sign
//! convention take a [`Convention`].

use std::sync::Once;

use nalgebra::{Complex, Matrix2, Vector2};

use crate::convention::Convention;
use crate::error::{PolarError, Result};
use crate::fresnel;
use crate::scalar::{lit, Real};

/// Complex field components (Ex, Ey).
pub type JonesVector<T> = Vector2<Complex<T>>;
/// 2x2 complex operator acting on a [`JonesVector`].
pub type JonesMatrix<T> = Matrix2<Complex<T>>;

static UNVERIFIED_TRANSMISSION: Once = Once::new();


fn real<T: Real>(x: T) -> Complex<T> {
    Complex::from(x)
}

/// Jones matrix for a linear polarizer with transmission axis at `theta`
/// from the horizontal.
pub fn op_linear_polarizer<T: Real>(theta: T) -> JonesMatrix<T> {
    let (s, c) = theta.sin_cos();
    Matrix2::new(real(c * c), real(s * c), real(s * c), real(s * s))
}

/// Jones matrix for a retarder with fast axis at `theta` from the horizontal
/// and phase delay `delta` between the fast and slow axes.
pub fn op_retarder<T: Real>(theta: T, delta: T, convention: Convention) -> JonesMatrix<T> {
    let theta = if convention.is_alternate() {
        -theta
    } else {
        theta
    };
    let half = delta / lit::<T>(2.0);
    let p = Complex::from_polar(T::one(), half);
    let q = Complex::from_polar(T::one(), -half);
    let d = Complex::new(T::zero(), half.sin() * lit::<T>(2.0));
    let (s, c) = theta.sin_cos();
    let retarder = Matrix2::new(
        p * (c * c) + q * (s * s),
        d * (c * s),
        d * (c * s),
        q * (c * c) + p * (s * s),
    );
    convention.orient_matrix(retarder)
}

/// Jones matrix for a quarter-wave plate, a retarder with delta = pi/2, with
/// fast axis at `theta` from the horizontal.
pub fn op_quarter_wave_plate<T: Real>(theta: T, convention: Convention) -> JonesMatrix<T> {
    op_retarder(theta, T::FRAC_PI_2(), convention)
}

/// Jones matrix for a half-wave plate, a retarder with delta = pi, with fast
/// axis at `theta` from the horizontal.
pub fn op_half_wave_plate<T: Real>(theta: T, convention: Convention) -> JonesMatrix<T> {
    op_retarder(theta, T::PI(), convention)
}

/// Jones matrix for an isotropic attenuator passing the fraction `t` of the
/// incident intensity.
pub fn op_attenuator<T: Real>(t: T) -> JonesMatrix<T> {
    let f = t.sqrt();
    Matrix2::from_diagonal(&Vector2::new(real(f), real(f)))
}

/// Jones matrix for a perfect mirror.
pub fn op_mirror<T: Real>() -> JonesMatrix<T> {
    Matrix2::from_diagonal(&Vector2::new(real(T::one()), real(-T::one())))
}

/// Jones matrix rotating the field by `theta` about the optical axis.
pub fn op_rotation<T: Real>(theta: T) -> JonesMatrix<T> {
    let (s, c) = theta.sin_cos();
    Matrix2::new(real(c), real(s), real(-s), real(c))
}

/// Jones matrix for Fresnel reflection from a medium of complex index `m` at
/// `theta` from the surface normal.
pub fn op_fresnel_reflection<T: Real>(m: Complex<T>, theta: T) -> JonesMatrix<T> {
    Matrix2::from_diagonal(&Vector2::new(
        fresnel::r_par(m, theta),
        fresnel::r_per(m, theta),
    ))
}

/// Jones matrix for Fresnel transmission into a medium of complex index `m`
/// at `theta` from the surface normal.
///
/// **Unverified**: the amplitude coefficients are scaled by
/// a = sqrt(d / c), with c = cos(theta) and d = sqrt(m^2 - sin^2(theta)).
/// This scaling has not been checked against an independent derivation and
/// may be physically wrong. Do not rely on the absolute phase or magnitude of
/// the result.
pub fn op_fresnel_transmission<T: Real>(m: Complex<T>, theta: T) -> JonesMatrix<T> {
    UNVERIFIED_TRANSMISSION.call_once(|| {
        log::warn!("Fresnel transmission Jones operator uses an unverified amplitude scaling");
    });
    let (_, c, d) = fresnel::cosines(m, theta);
    let a = (d / c).sqrt();
    Matrix2::from_diagonal(&Vector2::new(
        fresnel::t_par(m, theta) * a,
        fresnel::t_per(m, theta) * a,
    ))
}

/// Builds a Jones vector from a slice of exactly two components.
pub fn field_from_slice<T: Real>(components: &[Complex<T>]) -> Result<JonesVector<T>> {
    match components {
        [ex, ey] => Ok(Vector2::new(*ex, *ey)),
        _ => Err(PolarError::InvalidShape {
            kind: "Jones vector",
            expected: 2,
            found: components.len(),
        }),
    }
}

/// Unit field polarized along x.
pub fn field_horizontal<T: Real>() -> JonesVector<T> {
    Vector2::new(real(T::one()), real(T::zero()))
}

/// Unit field polarized along y.
pub fn field_vertical<T: Real>() -> JonesVector<T> {
    Vector2::new(real(T::zero()), real(T::one()))
}

/// Linearly polarized field at `theta` from the horizontal.
pub fn field_linear<T: Real>(theta: T) -> JonesVector<T> {
    let (s, c) = theta.sin_cos();
    Vector2::new(real(c), real(s))
}

/// Unit right circularly polarized field.
///
/// **Context**: Which of (1, i) and (1, -i) is called right-handed depends on
/// the sign convention for the phase of the wave. Under the standard
/// convention the field is (1, i) / sqrt(2).
///
/// **How it Works**: Builds (1, i) / sqrt(2) and conjugates it under the
/// alternate convention, so the result always has Stokes S3 = +1 when read
/// with the same convention.
///
/// ```rust
/// use polarcalc::{jones, Convention};
///
/// let standard = jones::field_right_circular::<f64>(Convention::Standard);
/// let alternate = jones::field_right_circular::<f64>(Convention::Alternate);
/// assert_eq!(alternate[1], standard[1].conj());
/// ```
pub fn field_right_circular<T: Real>(convention: Convention) -> JonesVector<T> {
    let k = T::FRAC_1_SQRT_2();
    convention.orient_vector(Vector2::new(real(k), Complex::new(T::zero(), k)))
}

/// Unit left circularly polarized field.
///
/// **Context**: The mirror image of [`field_right_circular`]. Under the
/// standard convention the field is (1, -i) / sqrt(2).
///
/// **How it Works**: Builds (1, -i) / sqrt(2) and conjugates it under the
/// alternate convention.
pub fn field_left_circular<T: Real>(convention: Convention) -> JonesVector<T> {
    let k = T::FRAC_1_SQRT_2();
    convention.orient_vector(Vector2::new(real(k), Complex::new(T::zero(), -k)))
}

/// Unit-amplitude elliptical field with a real x component.
///
/// Conjugated under the alternate convention. See [`field_elliptical_with`].
pub fn field_elliptical<T: Real>(
    azimuth: T,
    ellipticity_angle: T,
    convention: Convention,
) -> JonesVector<T> {
    field_elliptical_with(azimuth, ellipticity_angle, T::zero(), T::one(), convention)
}

/// Elliptically polarized field (Azzam & Bashara, eq. 1.75).
///
/// `azimuth` is the tilt of the major axis from the x-axis,
/// `ellipticity_angle` is arctan(minor / major) (positive for right-handed),
/// `phi_x` is the phase given to the x component and `e0` the amplitude.
/// Under the alternate convention the whole vector is conjugated, so the x
/// component then carries phase `-phi_x`.
pub fn field_elliptical_with<T: Real>(
    azimuth: T,
    ellipticity_angle: T,
    phi_x: T,
    e0: T,
    convention: Convention,
) -> JonesVector<T> {
    let (se, ce) = ellipticity_angle.sin_cos();
    let (sa, ca) = azimuth.sin_cos();
    let j = Vector2::new(
        Complex::new(ca * ce, -(sa * se)) * e0,
        Complex::new(sa * ce, ca * se) * e0,
    );
    let rephase = Complex::from_polar(T::one(), phi_x - j[0].arg());
    convention.orient_vector(j.map(|z| z * rephase))
}

/// Scales `j` to unit intensity. The null field is returned unchanged.
pub fn normalize<T: Real>(j: &JonesVector<T>) -> JonesVector<T> {
    // Matrix::norm needs a RealField scalar, so sum the component powers
    let norm = j.map(|z| z.norm_sqr()).sum().sqrt();
    if norm == T::zero() {
        return *j;
    }
    j.map(|z| z / norm)
}
