//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. These
//! are pure data types with no parsing logic.

use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Datalink receiver settings.
    pub receiver: ReceiverSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Receiver configuration (`[receiver]`).
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverSettings {
    /// Address to bind.
    pub bind_address: String,
    /// UDP port to listen on.
    pub port: u16,
    /// Socket receive timeout.
    pub recv_timeout: Duration,
}

impl Default for ReceiverSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 49_604,
            recv_timeout: Duration::from_millis(500),
        }
    }
}

/// Logging configuration (`[logging]`).
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for log files.
    pub directory: String,
    /// Log file name.
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file: "taclink.log".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.receiver.port, 49_604);
        assert_eq!(config.receiver.bind_address, "0.0.0.0");
        assert_eq!(config.logging.directory, "logs");
        assert_eq!(config.logging.file, "taclink.log");
    }
}
