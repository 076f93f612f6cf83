//! Jones and Mueller calculus for polarized light.
//!
//! The crate has two algebras and a bridge between them:
//! - [`jones`]: complex 2x2 operators acting on complex 2-component field
//!   vectors, for fully polarized light; [`ellipse`] and [`interpret`]
//!   describe and classify such fields
//! - [`mueller`]: real 4x4 operators acting on Stokes vectors, which also
//!   represent partially polarized light
//! - [`bridge`]: conversions from Jones operators and fields to their Mueller
//!   and Stokes equivalents, and back
//!
//! Results that depend on the sign convention for phase take an explicit
//! [`Convention`]. A process-wide default can be set with [`set_convention`]
//! or loaded from configuration through [`settings`].
//!
//! ```rust
//! use polarcalc::{bridge, jones, mueller, Convention};
//!
//! let conv = Convention::Standard;
//! let qwp = jones::op_quarter_wave_plate(std::f64::consts::FRAC_PI_4, conv);
//! let stokes = bridge::jones_to_stokes(&(qwp * jones::field_horizontal()), conv);
//! assert!((stokes - mueller::stokes_right_circular()).norm() < 1e-12);
//! ```

pub mod bridge;
pub mod config;
pub mod convention;
pub mod ellipse;
pub mod error;
pub mod fresnel;
pub mod interpret;
pub mod jones;
pub mod mueller;
pub mod scalar;
pub mod settings;

pub use convention::{set_convention, Convention};
pub use error::{PolarError, Result};
pub use jones::{JonesMatrix, JonesVector};
pub use mueller::{MuellerMatrix, StokesVector};
pub use scalar::Real;
