//! Configuration loader and validator
//!
//! Loads driver configuration from TOML files in the configs/ directory.

use crate::nunchuk::{ControllerOptions, DEFAULT_POLL_INTERVAL_MS, NUNCHUK_ADDRESS};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub driver: DriverSettings,

    #[serde(default)]
    pub bus: BusSettings,
}

/// Driver behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSettings {
    /// Log every decoded status (does not change bus traffic)
    #[serde(default)]
    pub debug: bool,

    /// Event surface polling period in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            debug: false,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Bus endpoint the peripheral sits on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusSettings {
    /// Bus number (`/dev/i2c-N`)
    #[serde(default = "default_bus")]
    pub bus: u8,

    /// 7-bit peripheral address
    #[serde(default = "default_address")]
    pub address: u16,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            bus: default_bus(),
            address: default_address(),
        }
    }
}

fn default_poll_interval_ms() -> u64 { DEFAULT_POLL_INTERVAL_MS }
fn default_bus() -> u8 { 1 }
fn default_address() -> u16 { NUNCHUK_ADDRESS }

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        info!("Loading configuration from: {}", path_ref.display());

        let content = std::fs::read_to_string(path_ref)?;
        let config = Self::from_toml(&content)?;

        info!("✓ Config loaded");
        Ok(config)
    }

    /// Load default configuration from configs/default.toml
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("configs/default.toml")
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;

        debug!("  - Debug logging: {}", config.driver.debug);
        debug!("  - Poll interval: {} ms", config.driver.poll_interval_ms);
        debug!("  - Bus: {} @ 0x{:02X}", config.bus.bus, config.bus.address);

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.driver.poll_interval_ms) {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be between 1 and 1000".into()
            ));
        }

        if self.bus.address > 0x7F {
            return Err(ConfigError::Invalid(
                format!("address 0x{:X} is not a 7-bit bus address", self.bus.address)
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.driver.poll_interval_ms)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions { debug: self.driver.debug }
    }
}
