//! Configuration management module
//!
//! Handles loading, saving, and validation of the kiosk demo
//! parameters: the seeded account, currency, demo PIN, and the
//! synthetic processing delays.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::{FabError, Result, APP_NAME, CONFIG_FILE};

pub mod persistence;

/// Synthetic processing delays, in milliseconds
///
/// These model the fake network latency shown before balances,
/// receipts, and loan verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingDelays {
    /// Withdraw/deposit confirmation delay
    pub transaction_ms: u64,
    /// Balance retrieval delay
    pub balance_ms: u64,
    /// Loan application verdict delay
    pub decision_ms: u64,
    /// Virtual-queue position assignment delay
    pub queue_ms: u64,
    /// Chat bot reply delay
    pub chat_ms: u64,
}

impl Default for ProcessingDelays {
    fn default() -> Self {
        Self {
            transaction_ms: 2000,
            balance_ms: 1500,
            decision_ms: 3000,
            queue_ms: 1500,
            chat_ms: 1000,
        }
    }
}

/// Kiosk configuration structure containing all demo parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Opening balance of the demo account
    pub opening_balance: f64,
    /// Currency code prefixed to displayed amounts
    pub currency: String,
    /// Masked card number shown in the ATM status bar
    pub card_mask: String,
    /// Account holder shown in the loan portal status bar
    pub account_holder: String,
    /// GHS-per-USD rate used by the support desk
    pub usd_rate: f64,
    /// PIN accepted by the transfer mini-game
    pub demo_pin: String,
    /// Synthetic processing delays
    pub delays: ProcessingDelays,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            opening_balance: 2547.63,
            currency: "GHC".to_string(),
            card_mask: "**** **** **** 5678".to_string(),
            account_holder: "John Doe".to_string(),
            usd_rate: 14.5,
            demo_pin: "1234".to_string(),
            delays: ProcessingDelays::default(),
        }
    }
}

impl KioskConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening balance
    pub fn with_opening_balance(mut self, balance: f64) -> Self {
        self.opening_balance = balance;
        self
    }

    /// Set the currency code
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    /// Set the demo PIN
    pub fn with_demo_pin(mut self, pin: &str) -> Self {
        self.demo_pin = pin.to_string();
        self
    }

    /// Set all processing delays
    pub fn with_delays(mut self, delays: ProcessingDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Withdraw/deposit confirmation delay
    pub fn transaction_delay(&self) -> Duration {
        Duration::from_millis(self.delays.transaction_ms)
    }

    /// Balance retrieval delay
    pub fn balance_delay(&self) -> Duration {
        Duration::from_millis(self.delays.balance_ms)
    }

    /// Loan verdict delay
    pub fn decision_delay(&self) -> Duration {
        Duration::from_millis(self.delays.decision_ms)
    }

    /// Queue assignment delay
    pub fn queue_delay(&self) -> Duration {
        Duration::from_millis(self.delays.queue_ms)
    }

    /// Chat reply delay
    pub fn chat_delay(&self) -> Duration {
        Duration::from_millis(self.delays.chat_ms)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.opening_balance.is_finite() {
            return Err(FabError::ConfigError(
                "Opening balance must be a finite number".to_string(),
            ));
        }

        if self.currency.is_empty() {
            return Err(FabError::ConfigError(
                "Currency code must not be empty".to_string(),
            ));
        }

        if self.usd_rate <= 0.0 {
            return Err(FabError::ConfigError(format!(
                "USD rate must be positive, got {}",
                self.usd_rate
            )));
        }

        if self.demo_pin.len() != 4 || !self.demo_pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(FabError::ConfigError(
                "Demo PIN must be exactly 4 digits".to_string(),
            ));
        }

        const MAX_DELAY_MS: u64 = 60_000;
        let delays = [
            self.delays.transaction_ms,
            self.delays.balance_ms,
            self.delays.decision_ms,
            self.delays.queue_ms,
            self.delays.chat_ms,
        ];
        for delay in delays {
            if delay == 0 || delay > MAX_DELAY_MS {
                return Err(FabError::ConfigError(format!(
                    "Processing delays must be between 1 and {} ms, got {}",
                    MAX_DELAY_MS, delay
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            FabError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            FabError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FabError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| FabError::ConfigError(format!("Failed to serialize configuration: {}", e)))?;

        fs::write(&config_path, content).map_err(|e| {
            FabError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/fabank/fabank.toml or the platform equivalent
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            FabError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
