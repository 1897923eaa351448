//! Configuration for locsim
//!
//! Loads the service settings and device table from a TOML file. Every
//! section is optional; missing values fall back to defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Logical name of the location simulation service
pub const DEFAULT_SERVICE_NAME: &str = "com.apple.dt.simulatelocation";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    /// Known devices and the endpoints their service is reachable at
    pub devices: Vec<DeviceConfig>,
}

/// Service channel settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Logical service name (used in diagnostics)
    pub name: String,
    /// Connection setup timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Per-write timeout in milliseconds, blocks indefinitely when unset
    pub write_timeout_ms: Option<u64>,
}

/// A device reachable through a service endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Device identifier
    pub udid: String,
    /// Endpoint address, `host:port`
    pub address: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            connect_timeout_ms: 5000,
            write_timeout_ms: Some(5000),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        // A zero timeout is rejected by the socket layer
        self.write_timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use locsim::config::Config;
    ///
    /// let config = Config::load("locsim.toml")?;
    /// # Ok::<(), locsim::Error>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Find a device by identifier
    pub fn device(&self, udid: &str) -> Option<&DeviceConfig> {
        self.devices.iter().find(|d| d.udid == udid)
    }
}
