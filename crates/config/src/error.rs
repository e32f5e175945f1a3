//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Two maps share a name, and therefore an output file
    #[error("map '{0}' is defined more than once")]
    DuplicateMap(String),

    /// Two sources of one map share a name
    #[error("map '{map}' has more than one source named '{source_name}'")]
    DuplicateSource {
        /// Map name
        map: String,
        /// Repeated source name
        source_name: String,
    },

    /// A per-source output would overwrite a map
    #[error("output '{output}' of source '{source_name}' collides with map '{output}'")]
    OutputCollision {
        /// Source declaring the output
        source_name: String,
        /// Colliding output name
        output: String,
    },

    /// Validation error - required field missing
    #[error("{component} '{name}' is missing required field '{field}'")]
    MissingField {
        /// Component type (e.g., "map", "source")
        component: &'static str,
        /// Name of the component
        name: String,
        /// Missing field name
        field: &'static str,
    },

    /// Validation error - invalid value
    #[error("{component} '{name}' has invalid {field}: {message}")]
    InvalidValue {
        /// Component type
        component: &'static str,
        /// Name of the component
        name: String,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },

    /// No maps enabled
    #[error("no maps are enabled - at least one map must be enabled")]
    NoMapsEnabled,
}

impl ConfigError {
    /// Create a DuplicateSource error
    pub fn duplicate_source(map: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::DuplicateSource {
            map: map.into(),
            source_name: source_name.into(),
        }
    }

    /// Create an OutputCollision error
    pub fn output_collision(source_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self::OutputCollision {
            source_name: source_name.into(),
            output: output.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
    ) -> Self {
        Self::MissingField {
            component,
            name: name.into(),
            field,
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            component,
            name: name.into(),
            field,
            message: message.into(),
        }
    }
}
