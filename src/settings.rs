use anyhow::Result;
use config::{Config, Environment, File, FileFormat};
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::config::INTERPRET_TOLERANCE;
use crate::convention::{set_convention, Convention};
use crate::interpret::{self, Interpretation};
use crate::jones::JonesVector;
use crate::scalar::{lit, Real};

/// Built-in defaults, compiled into the library so that loading never depends
/// on the working directory.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Prefix of environment variables that override configuration values,
/// e.g. `POLAR_CONVENTION=alternate`.
const ENV_PREFIX: &str = "POLAR";


/// Runtime configuration for the library.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Settings {
    pub convention: Convention,
    /// Tolerance used when classifying Jones vectors.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    INTERPRET_TOLERANCE
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            convention: Convention::default(),
            tolerance: default_tolerance(),
        }
    }
}

impl Settings {
    /// Makes [`Settings::convention`] the process-wide convention.
    pub fn apply(&self) {
        set_convention(self.convention);
    }

    /// Classifies `j` with the configured tolerance.
    pub fn interpret<T: Real>(&self, j: &JonesVector<T>) -> Interpretation<T> {
        interpret::interpret_with_tolerance(j, lit::<T>(self.tolerance))
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.tolerance.is_finite() && self.tolerance > 0.0,
            "Tolerance must be finite and greater than 0, found {}",
            self.tolerance
        );
        Ok(())
    }
}

/// Loads the built-in defaults only.
pub fn load_default_config() -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    debug!("loaded default configuration: {}", settings);

    Ok(settings)
}

/// Loads the built-in defaults, then the optional file at `path`, then any
/// `POLAR_*` environment variables, each layer overriding the previous one.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    if let Some(path) = path {
        debug!("using configuration file: {:?}", path);
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings: Settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    debug!("loaded configuration: {}", settings);

    Ok(settings)
}

/// Loads the built-in defaults overridden by the TOML document `toml`.
pub fn load_config_str(toml: &str) -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Convention: {}
  - Tolerance: {:e}
  ",
            self.convention, self.tolerance,
        )
    }
}
