//! Error types for the driver framework.

use thiserror::Error;

/// Result type alias using [`DriverError`].
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that can occur in a driver.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration parse error.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Configuration validation error.
    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    /// A required key is absent from the driver configuration.
    #[error("Missing required configuration key '{0}'")]
    MissingConfigKey(String),

    /// A driver configuration key has an unusable value.
    #[error("Invalid value for configuration key '{key}': {reason}")]
    InvalidConfigValue { key: String, reason: String },

    /// A registry row lacks a required field.
    #[error("Registry row is missing required field '{0}'")]
    MissingField(String),

    /// Registry configuration text could not be parsed.
    #[error("Failed to parse registry configuration: {0}")]
    RegistryParse(String),

    /// No register with this name is configured.
    #[error("Point not found: {0}")]
    UnknownPoint(String),

    /// Write attempted on a read-only register.
    #[error("Trying to write to a point configured read only: {0}")]
    ReadOnly(String),

    /// Revert requested for a point with neither a default nor a tracked value.
    #[error("No clean value available for point: {0}")]
    NoCleanValue(String),

    /// Network-level failure talking to the device.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a configuration validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ConfigValidation(msg.into())
    }

    /// Create an invalid configuration value error.
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a transport-layer failure.
    pub fn transport<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(source))
    }
}

impl From<csv::Error> for DriverError {
    fn from(err: csv::Error) -> Self {
        Self::RegistryParse(err.to_string())
    }
}
