use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, VehicleType};

/// Settings of a ramp build, usually read from a TOML file
///
/// ```toml
/// vehicle = "car"
/// threads = 4
/// progress_every = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Vehicle type the ramp is prepared for
    pub vehicle: VehicleType,
    /// Worker threads for the weight calculation, rayon's global pool when unset
    pub threads: Option<usize>,
    /// Log leaps progress every this many enters
    pub progress_every: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleType::Car,
            threads: None,
            progress_every: 10,
        }
    }
}

impl BuildConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds invalid values.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        let config: BuildConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a zero thread count or progress interval.
    pub fn validate(&self) -> Result<(), Error> {
        if self.threads == Some(0) {
            return Err(Error::InvalidData(
                "threads must be greater than zero".to_string(),
            ));
        }
        if self.progress_every == 0 {
            return Err(Error::InvalidData(
                "progress_every must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
