//! INI config file loading.

use std::path::Path;
use std::time::Duration;

use ini::Ini;
use tracing::debug;

use super::settings::{Config, LoggingSettings, ReceiverSettings};
use super::ConfigError;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "taclink.ini";

/// Load configuration from an INI file.
///
/// A missing file yields the defaults. Missing sections or keys fall back
/// per key; malformed values are errors.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let ini = Ini::load_from_file(path).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(Config {
        receiver: load_receiver(&ini)?,
        logging: load_logging(&ini),
    })
}

fn load_receiver(ini: &Ini) -> Result<ReceiverSettings, ConfigError> {
    let mut settings = ReceiverSettings::default();
    let Some(section) = ini.section(Some("receiver")) else {
        return Ok(settings);
    };

    if let Some(address) = section.get("bind_address") {
        settings.bind_address = address.to_string();
    }
    if let Some(port) = section.get("port") {
        settings.port = parse_value("receiver", "port", port)?;
    }
    if let Some(timeout_ms) = section.get("recv_timeout_ms") {
        let millis: u64 = parse_value("receiver", "recv_timeout_ms", timeout_ms)?;
        settings.recv_timeout = Duration::from_millis(millis);
    }
    Ok(settings)
}

fn load_logging(ini: &Ini) -> LoggingSettings {
    let mut settings = LoggingSettings::default();
    let Some(section) = ini.section(Some("logging")) else {
        return settings;
    };

    if let Some(directory) = section.get("directory") {
        settings.directory = directory.to_string();
    }
    if let Some(file) = section.get("file") {
        settings.file = file.to_string();
    }
    settings
}

fn parse_value<T: std::str::FromStr>(
    section: &str,
    key: &str,
    value: &str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}
