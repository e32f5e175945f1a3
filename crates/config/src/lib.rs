//! ipmap Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Only the maps to build have to be spelled out.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use ipmap_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     "[[maps]]\nname = \"ip_to_aws\"\n[[maps.sources]]\nname = \"aws\"\npath = \"aws.map\"",
//! )
//! .unwrap();
//! assert_eq!(config.maps.len(), 1);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [global]
//! outdir = "maps"
//! ipv6 = true
//!
//! [[maps]]
//! name = "ip_to_provider"
//! merge = "push"
//!
//! [[maps.sources]]
//! name = "aws"
//! path = "data/aws.map"
//! output = "ip_to_aws"
//!
//! [[maps.sources]]
//! name = "gcp"
//! path = "data/gcp.map"
//! output = "ip_to_gcp"
//! ```

mod error;
mod global;
mod logging;
mod maps;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use global::GlobalConfig;
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use maps::{MapConfig, MergeStrategy, SourceConfig, SourceType};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Global settings (output directory, address families)
    pub global: GlobalConfig,

    /// Maps to build
    pub maps: Vec<MapConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Maps that will be built, in declaration order
    pub fn enabled_maps(&self) -> impl Iterator<Item = &MapConfig> {
        self.maps.iter().filter(|map| map.enabled)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
