//! Conversions between the Jones and Mueller algebras.
//!
//! The bridge provides:
//! - expansion of a 2x2 Jones operator into its 4x4 Mueller operator
//!   through the coherency matrix (Hauge, Muller & Smith, Surface Science
//!   96, 81-107 (1980))
//! - the inverse reduction of a Mueller operator to a Jones operator,
//!   unique only up to a global phase (Theocaris, Matrix Theory of
//!   Photoelasticity, eqs. 4.70-4.76)
//! - the Stokes vector of a Jones vector
//! - batch expansion of many Jones operators into flattened Mueller rows
//!
//! All conversions honour the [`Convention`]: under the alternate convention
//! the Jones side is conjugated before the expansion and after the reduction,
//! and the sign of S3 is flipped, so that transforming in either algebra and
//! converting commute.

use nalgebra::{Complex, Matrix2, Matrix4, Vector4};
use ndarray::Array2;
use rayon::prelude::*;

use crate::config;
use crate::convention::Convention;
use crate::jones::{JonesMatrix, JonesVector};
use crate::mueller::{MuellerMatrix, StokesVector};
use crate::scalar::{lit, Real};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{jones, mueller};
    use approx::assert_relative_eq;
    use num_complex::Complex64;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const TOL: f64 = 1e-12;

    fn sample_jones() -> JonesMatrix<f64> {
        Matrix2::new(
            Complex64::new(0.9, 0.0),
            Complex64::from_polar(0.3, 0.4),
            Complex64::from_polar(0.2, -1.1),
            Complex64::from_polar(0.7, 2.0),
        )
    }

    #[test]
    fn imaginary_residual_cancels() {
        let operators = [
            sample_jones(),
            jones::op_retarder(0.3, 1.2, Convention::Standard),
            jones::op_fresnel_reflection(Complex64::new(1.5, 0.2), 0.8),
        ];
        for op in operators.iter() {
            for convention in [Convention::Standard, Convention::Alternate] {
                let expanded = coherency_expansion(op, convention);
                assert!(expanded.iter().all(|z| z.im.abs() < TOL));
            }
        }
    }

    #[test]
    fn elements_match_mueller_algebra() {
        let conv = Convention::Standard;
        assert_relative_eq!(
            jones_op_to_mueller_op(&jones::op_linear_polarizer(0.35), conv),
            mueller::op_linear_polarizer(0.35),
            epsilon = TOL
        );
        assert_relative_eq!(
            jones_op_to_mueller_op(&jones::op_retarder(0.35, 0.8, conv), conv),
            mueller::op_retarder(0.35, 0.8),
            epsilon = TOL
        );
        assert_relative_eq!(
            jones_op_to_mueller_op(&jones::op_rotation(0.35), conv),
            mueller::op_rotation(0.35),
            epsilon = TOL
        );
        assert_relative_eq!(
            jones_op_to_mueller_op(&jones::op_mirror::<f64>(), conv),
            mueller::op_mirror(),
            epsilon = TOL
        );
        assert_relative_eq!(
            jones_op_to_mueller_op(&jones::op_attenuator(0.01), conv),
            mueller::op_attenuator(2.0),
            epsilon = TOL
        );
    }

    #[test]
    fn alternate_convention_matches_mueller_algebra_too() {
        let conv = Convention::Alternate;
        assert_relative_eq!(
            jones_op_to_mueller_op(&jones::op_linear_polarizer(0.6), conv),
            mueller::op_linear_polarizer(0.6),
            epsilon = TOL
        );
        // the alternate Jones retarder mirrors its fast axis
        assert_relative_eq!(
            jones_op_to_mueller_op(&jones::op_quarter_wave_plate(0.6, conv), conv),
            mueller::op_quarter_wave_plate(-0.6),
            epsilon = TOL
        );
    }

    #[test]
    fn reduction_recovers_operator_up_to_global_phase() {
        for convention in [Convention::Standard, Convention::Alternate] {
            let original = sample_jones();
            let m = jones_op_to_mueller_op(&original, convention);
            let reduced = mueller_op_to_jones_op(&m, convention);
            assert!((reduced - original).iter().all(|z| z.norm() < 1e-10));
        }

        let rotated = sample_jones() * Complex64::from_polar(1.0, 0.7);
        let m = jones_op_to_mueller_op(&rotated, Convention::Standard);
        let reduced = mueller_op_to_jones_op(&m, Convention::Standard);
        assert!((reduced - sample_jones()).iter().all(|z| z.norm() < 1e-10));
    }

    #[test]
    fn reduction_with_vanishing_first_entry() {
        let i = Complex64::i();
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let swap = Matrix2::new(zero, one, i, zero);
        for convention in [Convention::Standard, Convention::Alternate] {
            let m = jones_op_to_mueller_op(&swap, convention);
            let reduced = mueller_op_to_jones_op(&m, convention);
            // phase reference moves to J01, which is already real
            assert!((reduced - swap).iter().all(|z| z.norm() < 1e-12));
            assert_relative_eq!(jones_op_to_mueller_op(&reduced, convention), m, epsilon = TOL);
        }

        let operators = [
            jones::op_rotation(FRAC_PI_2),
            jones::op_linear_polarizer(FRAC_PI_2),
            jones::op_retarder(FRAC_PI_4, PI, Convention::Standard),
        ];
        for op in operators.iter() {
            let m = jones_op_to_mueller_op(op, Convention::Standard);
            let reduced = mueller_op_to_jones_op(&m, Convention::Standard);
            assert_relative_eq!(
                jones_op_to_mueller_op(&reduced, Convention::Standard),
                m,
                epsilon = TOL
            );
        }
    }

    #[test]
    fn stokes_of_canonical_fields() {
        let conv = Convention::Standard;
        assert_relative_eq!(
            jones_to_stokes(&jones::field_horizontal::<f64>(), conv),
            mueller::stokes_horizontal(),
            epsilon = TOL
        );
        assert_relative_eq!(
            jones_to_stokes(&jones::field_linear(PI / 3.0), conv),
            mueller::stokes_linear(PI / 3.0),
            epsilon = TOL
        );
        assert_relative_eq!(
            jones_to_stokes(&jones::field_right_circular::<f64>(conv), conv),
            mueller::stokes_right_circular(),
            epsilon = TOL
        );
        let alt = Convention::Alternate;
        assert_relative_eq!(
            jones_to_stokes(&jones::field_left_circular::<f64>(alt), alt),
            mueller::stokes_left_circular(),
            epsilon = TOL
        );
    }

    #[test]
    fn batch_rows_are_flattened_row_major() {
        let ops = vec![jones::op_linear_polarizer(0.2), jones::op_mirror::<f64>(), sample_jones()];
        let rows = jones_ops_to_mueller_rows(&ops, Convention::Standard);
        assert_eq!(rows.dim(), (3, 16));
        for (index, op) in ops.iter().enumerate() {
            let m = jones_op_to_mueller_op(op, Convention::Standard);
            for k in 0..16 {
                assert_eq!(rows[[index, k]], m[(k / 4, k % 4)]);
            }
        }
    }
}

/// Halved coherency-matrix expansion of `jones`, before the real part is taken.
///
/// The imaginary parts cancel for any Jones operator; they are kept here so
/// the cancellation can be checked.
pub(crate) fn coherency_expansion<T: Real>(
    jones: &JonesMatrix<T>,
    convention: Convention,
) -> Matrix4<Complex<T>> {
    let j = convention.orient_matrix(*jones);
    let c = j.map(|z| z.conj());
    let i = Complex::<T>::i();

    let (j00, j01, j10, j11) = (j[(0, 0)], j[(0, 1)], j[(1, 0)], j[(1, 1)]);
    let (c00, c01, c10, c11) = (c[(0, 0)], c[(0, 1)], c[(1, 0)], c[(1, 1)]);

    let raw = Matrix4::new(
        j00 * c00 + j01 * c01 + j10 * c10 + j11 * c11,
        j00 * c00 + j10 * c10 - j01 * c01 - j11 * c11,
        j01 * c00 + j11 * c10 + j00 * c01 + j10 * c11,
        i * (j01 * c00 + j11 * c10 - j00 * c01 - j10 * c11),
        j00 * c00 + j01 * c01 - j10 * c10 - j11 * c11,
        j00 * c00 - j10 * c10 - j01 * c01 + j11 * c11,
        j00 * c01 + j01 * c00 - j10 * c11 - j11 * c10,
        i * (j01 * c00 + j10 * c11 - j11 * c10 - j00 * c01),
        j00 * c10 + j10 * c00 + j01 * c11 + j11 * c01,
        j00 * c10 + j10 * c00 - j01 * c11 - j11 * c01,
        j00 * c11 + j01 * c10 + j10 * c01 + j11 * c00,
        i * (-j00 * c11 + j01 * c10 - j10 * c01 + j11 * c00),
        i * (j00 * c10 + j01 * c11 - j10 * c00 - j11 * c01),
        i * (j00 * c10 - j01 * c11 - j10 * c00 + j11 * c01),
        i * (j00 * c11 + j01 * c10 - j10 * c01 - j11 * c00),
        j00 * c11 - j01 * c10 - j10 * c01 + j11 * c00,
    );
    let half = lit::<T>(0.5);
    raw.map(|z| z * half)
}

/// Mueller matrix equivalent to the Jones matrix `jones`.
pub fn jones_op_to_mueller_op<T: Real>(
    jones: &JonesMatrix<T>,
    convention: Convention,
) -> MuellerMatrix<T> {
    coherency_expansion(jones, convention).map(|z| z.re)
}

/// Jones matrix whose Mueller matrix is `m`.
///
/// **Context**: A Mueller matrix discards the absolute phase of the
/// operator, so the reduction is only defined up to a global phase. The
/// phase is fixed by making J00 real and non-negative. When |J00|^2 is
/// negligible next to the largest squared entry, the largest entry is made
/// real instead, so operators such as [[0, 1], [i, 0]] keep the relative
/// phase of their off-diagonal entries. The reduction is meaningful for
/// Mueller matrices of non-depolarizing elements, i.e. those produced by
/// [`jones_op_to_mueller_op`].
///
/// **How it Works**: Each entry's magnitude is the square root of one of the
/// four sums (M00 +- M01 +- M10 +- M11) / 2. Sums and differences of the
/// off-diagonal Mueller blocks give every cross product Jx conj(Jy), and the
/// phase of each entry is the argument of its product with the reference
/// entry. Round-off that drives a radicand negative is clamped to zero.
pub fn mueller_op_to_jones_op<T: Real>(
    m: &MuellerMatrix<T>,
    convention: Convention,
) -> JonesMatrix<T> {
    let half = lit::<T>(0.5);
    let radical = |x: T| (x * half).max(T::zero()).sqrt();
    let (m00, m01, m10, m11) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);

    // entries in row-major order: J00, J01, J10, J11
    let magnitudes = [
        radical(m00 + m01 + m10 + m11),
        radical(m00 - m01 + m10 - m11),
        radical(m00 + m01 - m10 - m11),
        radical(m00 - m01 - m10 + m11),
    ];

    let product = |re: T, im: T| Complex::new(re * half, im * half);
    let j01_j00 = product(m[(0, 2)] + m[(1, 2)], -(m[(0, 3)] + m[(1, 3)]));
    let j10_j00 = product(m[(2, 0)] + m[(2, 1)], m[(3, 0)] + m[(3, 1)]);
    let j11_j00 = product(m[(2, 2)] + m[(3, 3)], m[(3, 2)] - m[(2, 3)]);
    let j11_j10 = product(m[(0, 2)] - m[(1, 2)], m[(1, 3)] - m[(0, 3)]);
    let j11_j01 = product(m[(2, 0)] - m[(2, 1)], m[(3, 0)] - m[(3, 1)]);
    let j10_j01 = product(m[(2, 2)] - m[(3, 3)], m[(3, 2)] + m[(2, 3)]);

    // cross[x][y] = Jx conj(Jy); the diagonal only needs a zero phase
    let one = Complex::from(T::one());
    let cross = [
        [one, j01_j00.conj(), j10_j00.conj(), j11_j00.conj()],
        [j01_j00, one, j10_j01.conj(), j11_j01.conj()],
        [j10_j00, j10_j01, one, j11_j10.conj()],
        [j11_j00, j11_j01, j11_j10, one],
    ];

    let largest = (1..4).fold(0, |best, k| {
        if magnitudes[k] > magnitudes[best] {
            k
        } else {
            best
        }
    });
    let negligible = lit::<T>(config::REDUCTION_TOLERANCE) * magnitudes[largest].powi(2);
    let reference = if magnitudes[0].powi(2) > negligible {
        0
    } else {
        largest
    };

    let entry = |k: usize| Complex::from_polar(magnitudes[k], cross[k][reference].arg());
    let jones = Matrix2::new(entry(0), entry(1), entry(2), entry(3));
    convention.orient_matrix(jones)
}

/// Stokes vector of the Jones vector `j`.
///
/// S3 is 2 Im(conj(Ex) Ey) under the standard convention and its negative
/// under the alternate one, so right circular light has S3 = +1 in both.
pub fn jones_to_stokes<T: Real>(j: &JonesVector<T>, convention: Convention) -> StokesVector<T> {
    let (ex, ey) = (j[0], j[1]);
    let two = lit::<T>(2.0);
    let (ix, iy) = (ex.norm_sqr(), ey.norm_sqr());
    let s2 = two * (ex * ey.conj()).re;
    let s3 = two * (ex.conj() * ey).im;
    let s3 = if convention.is_alternate() { -s3 } else { s3 };
    Vector4::new(ix + iy, ix - iy, s2, s3)
}

/// Expands every operator in `ops` and returns one row per operator holding
/// its Mueller matrix flattened in row-major order.
pub fn jones_ops_to_mueller_rows<T: Real>(
    ops: &[JonesMatrix<T>],
    convention: Convention,
) -> Array2<T> {
    let muellers: Vec<MuellerMatrix<T>> = ops
        .par_iter()
        .map(|op| jones_op_to_mueller_op(op, convention))
        .collect();

    let mut rows = Array2::<T>::zeros((ops.len(), 16));
    for (mut row, m) in rows.outer_iter_mut().zip(muellers.iter()) {
        for (k, value) in row.iter_mut().enumerate() {
            *value = m[(k / 4, k % 4)];
        }
    }
    rows
}
