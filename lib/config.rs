//! TOML configuration for constructing a descriptor.
//!
//! ```toml
//! field = 1e-4            # tesla; omit for field-free
//! levels = ["5S1/2", "5P3/2"]  # omit to include every level
//! ```

use std::{ fs, path::Path };
use serde::Deserialize;
use tracing::debug;
use crate::{
    atom::LevelFilter,
    error::{ AtomResult, ConfigurationError },
    level::Level,
};

/// Construction parameters for a species descriptor.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtomConfig {
    /// Magnetic field magnitude [T].
    #[serde(default)]
    pub field: Option<f64>,
    /// Levels to include, in spectroscopic notation.
    #[serde(default)]
    pub levels: Option<Vec<String>>,
}

impl AtomConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> AtomResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a configuration file.
    pub fn load<P>(path: P) -> AtomResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), ?config, "loaded atom config");
        Ok(config)
    }

    /// Parse the configured level names into a [`LevelFilter`].
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigurationError> {
        match &self.levels {
            None => Ok(LevelFilter::All),
            Some(names) => {
                names.iter()
                    .map(|name| name.parse::<Level>())
                    .collect::<Result<LevelFilter, _>>()
            },
        }
    }
}
