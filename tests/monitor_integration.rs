// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! End-to-end pipeline tests through the public API: one office with a
//! midday CO2 problem, assessed, grouped, planned, and analyzed.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use wellsense::analysis::{ExceedanceDirection, Period, Trend};
use wellsense::config::DeviceConfig;
use wellsense::{
    DataAggregator, Measurement, Monitor, ParameterSeries, ProviderError, SensorDataProvider,
};

struct FixtureProvider;

fn office() -> DeviceConfig {
    DeviceConfig {
        name: "Office A".to_string(),
        api_key: "test-key".to_string(),
        system_id: "sys-1".to_string(),
        coordinates: (40.4168, -3.7038),
    }
}

fn point(id: &str, value: f64, ts: DateTime<Utc>) -> Measurement {
    Measurement::new(id, value, ts)
}

/// Three days of hourly CO2 starting on a Monday, spiking every afternoon,
/// plus clean PM2.5.
fn history() -> Vec<ParameterSeries> {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();

    let mut co2 = ParameterSeries::new("s-co2", "co2", "ppm");
    let mut pm25 = ParameterSeries::new("s-pm25", "PM2.5", "µg/m³");
    for day in 0..3 {
        for hour in 0..24 {
            let ts = start + Duration::days(day) + Duration::hours(hour);
            let value = if (13..=15).contains(&hour) { 1250.0 } else { 580.0 };
            co2.measurements.push(point(&format!("c{day}-{hour}"), value, ts));
            pm25.measurements.push(point(&format!("p{day}-{hour}"), 6.0, ts));
        }
    }
    vec![co2, pm25]
}

#[async_trait]
impl SensorDataProvider for FixtureProvider {
    async fn latest_measurements(
        &self,
        _device: &DeviceConfig,
    ) -> Result<Vec<ParameterSeries>, ProviderError> {
        let ts = Utc.with_ymd_and_hms(2026, 3, 4, 14, 0, 0).unwrap();
        let mut co2 = ParameterSeries::new("s-co2", "co2", "ppm");
        co2.measurements.push(point("c-latest", 1250.0, ts));
        let mut pm25 = ParameterSeries::new("s-pm25", "PM2.5", "µg/m³");
        pm25.measurements.push(point("p-latest", 6.0, ts));
        Ok(vec![co2, pm25])
    }

    async fn historical_measurements(
        &self,
        _device: &DeviceConfig,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<ParameterSeries>, ProviderError> {
        Ok(history())
    }
}

#[tokio::test]
async fn full_pipeline_flags_the_afternoon_co2_problem() {
    let monitor = Monitor::new(FixtureProvider);
    let device = office();
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();

    // Snapshot: co2 at 1250 scores 1, pm25 at 6 scores 4; 5/8 = 62.5% Silver
    let assessment = monitor.assess_device(&device).await.unwrap();
    assert_eq!(assessment.percentage, 62.5);
    assert_eq!(assessment.well_level, "WELL Silver Eligible");
    assert!(assessment
        .recommendations
        .iter()
        .any(|r| r.starts_with("PRIORITY: CO2")));

    // Feature view: only A01 and A03 have data; A03 fails its 50% cut
    let features = monitor.feature_compliance(&device).await.unwrap();
    assert_eq!(features.keys().copied().collect::<Vec<_>>(), vec!["A01", "A03"]);
    assert!(features["A01"].compliant);
    assert!(!features["A03"].compliant);

    // Roadmap: the only improvable parameter is co2
    let plan = monitor.improvement_roadmap(&device).await.unwrap();
    assert_eq!(plan.target_level.as_deref(), Some("WELL Gold Eligible"));
    assert_eq!(plan.priority_actions.len(), 1);
    assert_eq!(plan.priority_actions[0].parameter, "co2");
    assert_eq!(plan.parameters_to_target, Some(1));

    // History: the index midpoint lands mid-day-1, so the second half holds
    // twice the spike hours and the trend reads as increasing
    let stats = monitor
        .historical_statistics(&device, start, end)
        .await
        .unwrap();
    let co2_stats = stats.iter().find(|s| s.parameter == "co2").unwrap();
    assert_eq!(co2_stats.statistics.count, 72);
    assert_eq!(co2_stats.statistics.max, Some(1250.0));
    assert_eq!(co2_stats.trend.trend, Trend::Increasing);

    // Patterns: business-hours peak, hours 13-15 elevated above good (800)
    let report = monitor
        .detect_patterns(&device, start, end, "co2")
        .await
        .unwrap()
        .expect("co2 history present");
    assert_eq!(report.elevated_hours, vec![13, 14, 15]);
    assert!(matches!(report.peak_hour, Some(13..=15)));
}

#[tokio::test]
async fn aggregation_views_over_the_same_history() {
    let series = history();
    let co2 = &series[0].measurements;
    let aggregator = DataAggregator::new();

    // 3 daily buckets, each holding a full day
    let daily = aggregator.aggregate_by_period(co2, Period::Daily);
    assert_eq!(daily.len(), 3);
    assert!(daily.values().all(|b| b.count == 24));
    assert!(daily.contains_key("2026-03-02"));

    // 9 spike readings above the 1000 ppm Silver cut
    let spikes = aggregator.exceedances(co2, 1000.0, ExceedanceDirection::Above);
    assert_eq!(spikes.len(), 9);
    assert!(spikes.iter().all(|e| e.difference == 250.0));
}
