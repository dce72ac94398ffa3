//! Configuration management.

use anyhow::{bail, Context, Result};
use sensorbar_core::{SensorConfig, DEFAULT_INTERVAL_SECS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Polling interval in seconds
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Whether tooltips are rendered
    #[serde(default = "default_tooltip")]
    pub tooltip: bool,

    /// Sensors to poll, each on its own task
    #[serde(default)]
    pub sensors: Vec<SensorEntry>,
}

/// One configured sensor instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorEntry {
    /// Name reported with every output line
    #[serde(default = "default_name")]
    pub name: String,

    /// Interval override in seconds
    #[serde(default)]
    pub interval: Option<u64>,

    /// Tooltip override
    #[serde(default)]
    pub tooltip: Option<bool>,

    /// Sensor selection, thresholds and templates
    #[serde(flatten)]
    pub sensor: SensorConfig,
}

impl SensorEntry {
    /// Effective polling interval.
    pub fn interval(&self, global_secs: u64) -> Duration {
        Duration::from_secs(self.interval.unwrap_or(global_secs))
    }

    /// Effective tooltip flag.
    pub fn tooltip(&self, global: bool) -> bool {
        self.tooltip.unwrap_or(global)
    }
}

// Default value functions
fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_tooltip() -> bool {
    true
}

fn default_name() -> String {
    "temperature".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Parses and validates configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.sensors.is_empty() {
            bail!("No sensors configured");
        }
        if self.interval == 0 {
            bail!("interval must be at least 1 second");
        }
        for entry in &self.sensors {
            if entry.interval == Some(0) {
                bail!("Sensor '{}': interval must be at least 1 second", entry.name);
            }
        }
        Ok(())
    }
}
