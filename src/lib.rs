// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! WellSense - Indoor Air Quality Compliance & Analytics Engine
//!
//! Scores indoor air quality measurements against a multi-standard
//! building-health rubric and computes descriptive time-series analytics:
//! - WELL Building Standard v2 / ASHRAE 62.1+55 / WHO Indoor thresholds
//! - Per-parameter 0-4 classification and certification tier mapping
//! - Feature-level rollups (WELL A01-A08, T01-T07)
//! - ROI-ranked remediation roadmap toward the next certification tier
//! - Statistics, trends, period aggregation, exceedances, pattern detection
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      WellSense Engine                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────┐   ┌────────────────────────┐ │
//! │  │ Providers │ → │  Analysis  │   │   WELL Scoring Core    │ │
//! │  │ (sensors, │   │ (stats,    │   │ (thresholds, engine,   │ │
//! │  │  outdoor) │   │  patterns) │   │  features, roadmap)    │ │
//! │  └───────────┘   └────────────┘   └────────────────────────┘ │
//! │        ↓               ↓                      ↓              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │                 Monitor (per device)                 │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scoring and analysis cores are pure and stateless: they take
//! in-memory series, never mutate inputs, and are safe to call from many
//! tasks at once. I/O lives exclusively behind the provider traits.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod measurement;
pub mod providers;
pub mod well;

// Re-exports for convenience
pub use analysis::{DataAggregator, PatternDetector};
pub use config::{Config, DeviceConfig};
pub use engine::Monitor;
pub use measurement::{Measurement, ParameterSeries};
pub use providers::{OutdoorConditions, OutdoorDataProvider, ProviderError, SensorDataProvider};
pub use well::{ComplianceAssessment, ComplianceEngine, Roadmap, WellFeature};

/// WellSense version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WellSense name
pub const NAME: &str = "WellSense";
