//! Application configuration.
//!
//! Settings load from an INI file (`taclink.ini` by default) with one
//! `[section]` per concern. Missing files, sections, or keys fall back to
//! defaults; malformed values are configuration errors rather than silent
//! fallbacks.

mod file;
mod settings;

pub use file::{load_config, DEFAULT_CONFIG_FILE};
pub use settings::{Config, LoggingSettings, ReceiverSettings};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be parsed as INI.
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// A key holds a value of the wrong type or range.
    #[error("Invalid value for [{section}] {key}: '{value}'")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}
