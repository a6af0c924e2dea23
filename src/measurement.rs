// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! Measurement and parameter series value types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped sensor measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Measurement identifier assigned by the data source
    pub id: String,

    /// Numeric value in the parameter's unit
    pub value: f64,

    /// Time of observation (UTC)
    pub timestamp: DateTime<Utc>,
}

impl Measurement {
    pub fn new(id: impl Into<String>, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            value,
            timestamp,
        }
    }
}

/// Time series for a single air quality parameter (e.g. co2, pm25)
///
/// Measurements are kept in arrival order. Timestamps are usually ascending
/// but irregular or out-of-order intervals must be tolerated downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSeries {
    /// Series identifier assigned by the data source
    pub id: String,

    /// Parameter type as reported by the sensor ("co2", "PM2.5", ...)
    pub kind: String,

    /// Measurement unit ("ppm", "µg/m³", ...)
    pub unit: String,

    /// Ordered measurements (arrival order)
    pub measurements: Vec<Measurement>,
}

impl ParameterSeries {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            unit: unit.into(),
            measurements: Vec::new(),
        }
    }

    /// Most recent value, by arrival order. `None` for an empty series.
    pub fn latest_value(&self) -> Option<f64> {
        self.measurements.last().map(|m| m.value)
    }

    /// Timestamp of the most recent measurement
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.measurements.last().map(|m| m.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_latest_value_is_last_by_arrival() {
        let mut series = ParameterSeries::new("s1", "co2", "ppm");
        let t0 = Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();

        series.measurements.push(Measurement::new("m1", 640.0, t1));
        // Out-of-order arrival: latest still means last element
        series.measurements.push(Measurement::new("m2", 610.0, t0));

        assert_eq!(series.latest_value(), Some(610.0));
        assert_eq!(series.latest_timestamp(), Some(t0));
    }

    #[test]
    fn test_empty_series_short_circuits() {
        let series = ParameterSeries::new("s1", "co2", "ppm");
        assert!(series.is_empty());
        assert_eq!(series.latest_value(), None);
        assert_eq!(series.latest_timestamp(), None);
    }
}
