//! Sign convention for phase and rotation sense.
//!
//! Two conventions are in common use for the Jones calculus:
//! - **Standard**: the wave is written as exp(i(wt - kz)) and the sectional
//!   pattern is viewed looking back along the optical axis towards the source.
//! - **Alternate**: the complex conjugate of the above (Hecht, Fowler,
//!   Wikipedia).
//!
//! Every constructor whose result depends on the convention takes it as an
//! explicit [`Convention`] argument. Callers that prefer a process-wide
//! choice set it once with [`set_convention`] and pass
//! [`Convention::current()`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use nalgebra::{Complex, Matrix2, Vector2};
use serde::Deserialize;

use crate::scalar::Real;

static ALTERNATE: AtomicBool = AtomicBool::new(false);

#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Sign convention used by every convention-dependent constructor.
///
/// Deserializes from the lowercase names `"standard"` and `"alternate"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// exp(i(wt - kz)), viewed looking back towards the source.
    #[default]
    Standard,
    /// The complex conjugate of the standard convention.
    Alternate,
}

impl Convention {
    /// Returns the process-wide convention, read at call time.
    pub fn current() -> Self {
        if ALTERNATE.load(Ordering::Relaxed) {
            Convention::Alternate
        } else {
            Convention::Standard
        }
    }

    /// True for [`Convention::Alternate`], the convention that conjugates.
    pub fn is_alternate(self) -> bool {
        self == Convention::Alternate
    }

    /// Conjugates `z` under the alternate convention.
    pub(crate) fn orient<T: Real>(self, z: Complex<T>) -> Complex<T> {
        if self.is_alternate() {
            z.conj()
        } else {
            z
        }
    }

    pub(crate) fn orient_vector<T: Real>(self, v: Vector2<Complex<T>>) -> Vector2<Complex<T>> {
        v.map(|z| self.orient(z))
    }

    pub(crate) fn orient_matrix<T: Real>(self, m: Matrix2<Complex<T>>) -> Matrix2<Complex<T>> {
        m.map(|z| self.orient(z))
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Standard => write!(f, "standard"),
            Convention::Alternate => write!(f, "alternate"),
        }
    }
}

/// Sets the process-wide convention returned by [`Convention::current`].
///
/// Only calls made after this one are affected. Values already built keep
/// the convention they were built with.
pub fn set_convention(convention: Convention) {
    log::debug!("polarization sign convention set to {}", convention);
    ALTERNATE.store(convention.is_alternate(), Ordering::Relaxed);
}
