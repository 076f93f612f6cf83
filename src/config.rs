/// Tolerance used when classifying a Jones vector as linear or circular.
pub const INTERPRET_TOLERANCE: f64 = 1e-12;
/// Degree of polarization this far below 1 is reported as a dropped unpolarized residual.
pub const POLARIZATION_TOLERANCE: f64 = 1e-9;
/// Fraction of the largest squared Jones magnitude below which J00 is too small to
/// serve as the phase reference when reducing a Mueller matrix.
pub const REDUCTION_TOLERANCE: f64 = 1e-12;
