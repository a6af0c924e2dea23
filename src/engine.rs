// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! Monitoring engine - fetches series through a provider and runs the
//! scoring core per device

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::{DataAggregator, PatternDetector, PatternReport, SeriesStatistics, TrendAnalysis};
use crate::config::DeviceConfig;
use crate::providers::{ProviderError, SensorDataProvider};
use crate::well::{
    group_by_feature, roadmap, ComplianceAssessment, ComplianceEngine, FeatureCompliance, Roadmap,
    lookup, normalize_parameter_name,
};

/// Statistics and trend for one parameter over a historical range
#[derive(Debug, Clone, Serialize)]
pub struct ParameterStatistics {
    pub parameter: String,
    pub unit: String,
    pub statistics: SeriesStatistics,
    pub trend: TrendAnalysis,
}

/// Orchestrates data retrieval and the pure scoring core.
///
/// All analysis is per device and side-effect free, so independent devices
/// can be assessed concurrently in any order.
pub struct Monitor<P> {
    provider: P,
    engine: ComplianceEngine,
    aggregator: DataAggregator,
    patterns: PatternDetector,
}

impl<P: SensorDataProvider> Monitor<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            engine: ComplianceEngine::new(),
            aggregator: DataAggregator::new(),
            patterns: PatternDetector::new(),
        }
    }

    /// WELL compliance assessment from the device's latest measurements
    pub async fn assess_device(
        &self,
        device: &DeviceConfig,
    ) -> Result<ComplianceAssessment, ProviderError> {
        let series = self.provider.latest_measurements(device).await?;
        debug!(device = %device.name, series = series.len(), "assessing compliance");

        let assessment = self.engine.assess(&device.name, &series, Utc::now());
        info!(
            device = %device.name,
            percentage = assessment.percentage,
            level = %assessment.well_level,
            "compliance assessed"
        );
        Ok(assessment)
    }

    /// Assess many devices concurrently; fails on the first provider error
    pub async fn assess_devices(
        &self,
        devices: &[DeviceConfig],
    ) -> Result<Vec<ComplianceAssessment>, ProviderError> {
        try_join_all(devices.iter().map(|d| self.assess_device(d))).await
    }

    /// Per-feature compliance rollup from the device's latest measurements
    pub async fn feature_compliance(
        &self,
        device: &DeviceConfig,
    ) -> Result<BTreeMap<&'static str, FeatureCompliance>, ProviderError> {
        let series = self.provider.latest_measurements(device).await?;
        Ok(group_by_feature(&series, &self.engine))
    }

    /// ROI-ranked improvement roadmap toward the next certification tier
    pub async fn improvement_roadmap(&self, device: &DeviceConfig) -> Result<Roadmap, ProviderError> {
        let assessment = self.assess_device(device).await?;
        Ok(roadmap(&assessment))
    }

    /// Statistics and trend per parameter over a historical range
    pub async fn historical_statistics(
        &self,
        device: &DeviceConfig,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ParameterStatistics>, ProviderError> {
        let series = self.provider.historical_measurements(device, start, end).await?;

        Ok(series
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| ParameterStatistics {
                parameter: normalize_parameter_name(&s.kind),
                unit: s.unit.clone(),
                statistics: self.aggregator.statistics(&s.measurements),
                trend: self.aggregator.trend(&s.measurements),
            })
            .collect())
    }

    /// Hour-of-day / day-of-week pattern report for one parameter.
    ///
    /// `None` when the range holds no data for that parameter; this is a
    /// normal no-data case, not a provider failure.
    pub async fn detect_patterns(
        &self,
        device: &DeviceConfig,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        parameter: &str,
    ) -> Result<Option<PatternReport>, ProviderError> {
        let series = self.provider.historical_measurements(device, start, end).await?;
        let normalized = normalize_parameter_name(parameter);

        let found = series
            .iter()
            .find(|s| normalize_parameter_name(&s.kind) == normalized)
            .filter(|s| !s.is_empty());

        Ok(found.map(|s| {
            self.patterns
                .detect_patterns(&s.measurements, lookup(&normalized))
        }))
    }
}
