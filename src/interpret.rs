//! Classification of a Jones vector into a human-readable description.
//!
//! The decision order is fixed:
//! 1. a relative phase that is a multiple of pi is **linear**;
//! 2. otherwise equal amplitudes are **circular** when the phase is +-pi/2
//!    and right/left **elliptical** by the sign of the phase;
//! 3. otherwise unequal amplitudes are right/left **elliptical** by the sign
//!    of the phase.
//!
//! The result is a structured [`Interpretation`]; its `Display` renders the
//! familiar text report, e.g.
//!
//! ```text
//! Intensity is 1.000
//! Phase is 90.0°
//! Right circular polarization
//! ```

use std::fmt;

use nalgebra::Complex;

use crate::config;
use crate::ellipse;
use crate::error::Result;
use crate::jones::{self, JonesVector};
use crate::scalar::{lit, Real};


/// Polarization class of a Jones vector. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Polarization<T> {
    /// Linear, at `angle` counter-clockwise from the x-axis.
    Linear { angle: T },
    RightCircular,
    LeftCircular,
    RightElliptical { ellipticity_angle: T, azimuth: T },
    LeftElliptical { ellipticity_angle: T, azimuth: T },
}

/// Intensity, relative phase and class of a Jones vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpretation<T> {
    pub intensity: T,
    /// Phase of Ey relative to Ex [radians].
    pub phase: T,
    pub polarization: Polarization<T>,
}

/// Classifies `j` with the default tolerance.
pub fn interpret<T: Real>(j: &JonesVector<T>) -> Interpretation<T> {
    interpret_with_tolerance(j, lit::<T>(config::INTERPRET_TOLERANCE))
}

/// Classifies a slice that should hold exactly two field components.
pub fn interpret_slice<T: Real>(components: &[Complex<T>]) -> Result<Interpretation<T>> {
    let j = jones::field_from_slice(components)?;
    Ok(interpret(&j))
}

/// Classifies `j`, treating values within `eps` as equal.
pub fn interpret_with_tolerance<T: Real>(j: &JonesVector<T>, eps: T) -> Interpretation<T> {
    let phase = ellipse::phase(j);
    let (mag1, mag2) = (j[0].norm(), j[1].norm());
    let elliptical = || {
        let ellipticity_angle = ellipse::ellipticity_angle(j);
        let azimuth = ellipse::ellipse_azimuth(j);
        if phase > T::zero() {
            Polarization::RightElliptical {
                ellipticity_angle,
                azimuth,
            }
        } else {
            Polarization::LeftElliptical {
                ellipticity_angle,
                azimuth,
            }
        }
    };

    let polarization = if ellipse::is_linear_phase(phase, eps) {
        Polarization::Linear {
            angle: mag2.atan2(mag1),
        }
    } else if (mag1 - mag2).abs() < eps {
        if (phase - T::FRAC_PI_2()).abs() < eps {
            Polarization::RightCircular
        } else if (phase + T::FRAC_PI_2()).abs() < eps {
            Polarization::LeftCircular
        } else {
            elliptical()
        }
    } else {
        elliptical()
    };

    Interpretation {
        intensity: ellipse::intensity(j),
        phase,
        polarization,
    }
}

impl<T: Real + fmt::Display> fmt::Display for Interpretation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Intensity is {:.3}", self.intensity)?;
        writeln!(f, "Phase is {:.1}°", self.phase.to_degrees())?;
        match self.polarization {
            Polarization::Linear { angle } => write!(
                f,
                "Linear polarization at {:.6} degrees CCW from x-axis",
                angle.to_degrees()
            ),
            Polarization::RightCircular => write!(f, "Right circular polarization"),
            Polarization::LeftCircular => write!(f, "Left circular polarization"),
            Polarization::RightElliptical {
                ellipticity_angle,
                azimuth,
            } => write_elliptical(f, "Right", ellipticity_angle, azimuth),
            Polarization::LeftElliptical {
                ellipticity_angle,
                azimuth,
            } => write_elliptical(f, "Left", ellipticity_angle, azimuth),
        }
    }
}

fn write_elliptical<T: Real + fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    hand: &str,
    ellipticity_angle: T,
    azimuth: T,
) -> fmt::Result {
    writeln!(f, "{} elliptical polarization", hand)?;
    writeln!(f, "    ellipticity is {:.1}°", ellipticity_angle.to_degrees())?;
    write!(f, "    rotated {:.1}° respect to the axes", azimuth.to_degrees())
}
