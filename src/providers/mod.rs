// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! Data provider contracts - sensor feeds and outdoor conditions
//!
//! Transport, authentication, and retry policy live behind these traits;
//! the scoring core only sees in-memory series. Providers must fail with a
//! distinct error when data is unavailable so callers never fabricate
//! results from defaults.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DeviceConfig;
use crate::measurement::ParameterSeries;

/// Provider failure taxonomy
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The source could not return data for this device; never mapped to an
    /// empty result
    #[error("data unavailable for device '{device}': {reason}")]
    Unavailable { device: String, reason: String },

    /// The source answered with something the provider could not interpret
    #[error("invalid response from data source: {0}")]
    InvalidResponse(String),
}

/// Source of indoor sensor measurement series
#[async_trait]
pub trait SensorDataProvider: Send + Sync {
    /// Latest measurements: one point per parameter type
    async fn latest_measurements(
        &self,
        device: &DeviceConfig,
    ) -> Result<Vec<ParameterSeries>, ProviderError>;

    /// Historical measurements over a date range, many points per type
    async fn historical_measurements(
        &self,
        device: &DeviceConfig,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ParameterSeries>, ProviderError>;
}

/// Source of outdoor weather and pollution conditions
#[async_trait]
pub trait OutdoorDataProvider: Send + Sync {
    /// Current conditions at the given coordinates
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<OutdoorConditions, ProviderError>;
}

/// Outdoor weather and air quality snapshot
///
/// Contextual display only; never fed into compliance scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutdoorConditions {
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub coordinates: (f64, f64),

    // Weather
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub description: Option<String>,

    // Air quality; AQI on the 1-5 category scale
    pub aqi: Option<u8>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub co: Option<f64>,
}
