//! Error types returned by the polarization algebras.

use thiserror::Error;

/// Failures of the Jones and Mueller routines.
///
/// Every operation in this crate is a pure function of its inputs, so errors
/// are always local to the call that produced them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolarError {
    /// A state vector built from a slice had the wrong number of components.
    #[error("{kind} must have {expected} components, found {found}")]
    InvalidShape {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// The state carries no polarized light that could be represented.
    #[error("degenerate state: {0}")]
    DegenerateState(String),
}

pub type Result<T> = std::result::Result<T, PolarError>;
