//! FABANK - First Atlantic Bank kiosk demo
//!
//! A terminal rendition of the bank's self-service kiosks: an ATM,
//! a loan portal, a customer-service desk, and a guided transfer
//! mini-game. All balances and verdicts are simulated locally.

use std::fmt;

// Public re-exports
pub mod app;
pub mod bank;
pub mod config;
pub mod flow;
pub mod models;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum FabError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Session history persistence error
    PersistenceError(String),
}

impl fmt::Display for FabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FabError::IoError(err) => write!(f, "I/O error: {}", err),
            FabError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            FabError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            FabError::PersistenceError(msg) => write!(f, "Session history error: {}", msg),
        }
    }
}

impl std::error::Error for FabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FabError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FabError {
    fn from(err: std::io::Error) -> Self {
        FabError::IoError(err)
    }
}

impl From<serde_json::Error> for FabError {
    fn from(err: serde_json::Error) -> Self {
        FabError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for FabError {
    fn from(err: toml::de::Error) -> Self {
        FabError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for FabError {
    fn from(err: toml::ser::Error) -> Self {
        FabError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

impl FabError {
    /// Convert error to a message suitable for the kiosk status bar
    pub fn user_message(&self) -> String {
        match self {
            FabError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings file.", msg)
            }
            FabError::PersistenceError(_) => {
                "Failed to save session history. Check disk space and permissions.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for FABANK operations
pub type Result<T> = std::result::Result<T, FabError>;

// Common types and constants
pub const APP_NAME: &str = "fabank";
pub const CONFIG_FILE: &str = "fabank.toml";
pub const HISTORY_FILE: &str = "history.json";
pub const MAX_HISTORY_ENTRIES: usize = 100;
