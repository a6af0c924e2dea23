// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! Configuration module

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Log level
    pub log_level: String,

    /// Monitored devices, keyed by device ID
    pub devices: BTreeMap<String, DeviceConfig>,

    /// Analysis configuration
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "WellSense".to_string(),
            log_level: "info".to_string(),
            devices: BTreeMap::new(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Default configuration path
    pub fn default_path() -> PathBuf {
        PathBuf::from("./config/wellsense.toml")
    }
}

/// Configuration for one monitored device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: String,

    /// API key for the sensor data source
    pub api_key: String,

    /// Device/system identifier at the data source
    pub system_id: String,

    /// (latitude, longitude) for outdoor condition lookups
    pub coordinates: (f64, f64),
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Default moving average window in points
    pub moving_average_window: usize,

    /// Default aggregation period for exports ("hourly", "daily", "weekly")
    pub default_aggregation: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            moving_average_window: 5,
            default_aggregation: "daily".to_string(),
        }
    }
}
