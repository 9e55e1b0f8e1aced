//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use taclink::config::ConfigError;
use taclink::ingest::ReceiverError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration error
    Config(ConfigError),
    /// Datalink receiver error
    Receiver(ReceiverError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Receiver(ReceiverError::SocketBind { port, .. }) = self {
            eprintln!();
            eprintln!("Common issues:");
            eprintln!("  1. Port {} already in use by another process", port);
            eprintln!("  2. Binding a privileged port without permission");
            eprintln!("  3. The configured bind address is not local to this host");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Receiver(e) => write!(f, "Datalink receiver error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Receiver(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<ReceiverError> for CliError {
    fn from(e: ReceiverError) -> Self {
        CliError::Receiver(e)
    }
}
