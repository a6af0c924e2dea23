//! Statistical aggregation for measurement time series

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;

/// Statistical summary of one series
///
/// `count == 0` leaves every other field `None`; a single point yields a
/// standard deviation of 0.0 and no quartiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
}

/// Trend direction classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// First-half vs second-half trend comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub trend: Trend,
    pub change_percentage: f64,
    pub first_half_avg: Option<f64>,
    pub second_half_avg: Option<f64>,
}

/// Time bucket granularity for period aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Hourly,
    Daily,
    Weekly,
}

/// Aggregate statistics for one time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Which side of the threshold counts as a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceedanceDirection {
    Above,
    Below,
}

/// A single threshold violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exceedance {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub value: f64,
    pub threshold: f64,

    /// value - threshold; negative for below-threshold violations
    pub difference: f64,
}

/// One point of a moving average series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAveragePoint {
    /// Timestamp of the window's last measurement
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub mean: f64,
}

/// Statistical aggregation and analysis over measurement series.
///
/// All methods are pure; inputs are never mutated and nothing is cached
/// across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataAggregator;

impl DataAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Comprehensive statistics for a series
    pub fn statistics(&self, measurements: &[Measurement]) -> SeriesStatistics {
        if measurements.is_empty() {
            return SeriesStatistics::default();
        }

        let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();
        let count = values.len();

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);

        let mean = values.iter().sum::<f64>() / count as f64;
        let median = median_of_sorted(&sorted);

        let std_dev = if count > 1 {
            let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let (q1, q3) = if count >= 2 {
            (
                Some(quantile_exclusive(&sorted, 0.25)),
                Some(quantile_exclusive(&sorted, 0.75)),
            )
        } else {
            (None, None)
        };

        SeriesStatistics {
            count,
            min: Some(sorted[0]),
            max: Some(sorted[count - 1]),
            mean: Some(mean),
            median: Some(median),
            std_dev: Some(std_dev),
            q1,
            q3,
        }
    }

    /// Compare the first half of the series against the second half.
    ///
    /// Odd-length series put the extra element in the second half. A change
    /// beyond ±5% classifies as increasing/decreasing; fewer than two points
    /// yields `InsufficientData`.
    pub fn trend(&self, measurements: &[Measurement]) -> TrendAnalysis {
        if measurements.len() < 2 {
            return TrendAnalysis {
                trend: Trend::InsufficientData,
                change_percentage: 0.0,
                first_half_avg: None,
                second_half_avg: None,
            };
        }

        let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();
        let midpoint = values.len() / 2;

        let first_avg = values[..midpoint].iter().sum::<f64>() / midpoint as f64;
        let second_avg =
            values[midpoint..].iter().sum::<f64>() / (values.len() - midpoint) as f64;

        let change = if first_avg != 0.0 {
            (second_avg - first_avg) / first_avg.abs() * 100.0
        } else if second_avg == 0.0 {
            0.0
        } else {
            100.0
        };

        let trend = if change > 5.0 {
            Trend::Increasing
        } else if change < -5.0 {
            Trend::Decreasing
        } else {
            Trend::Stable
        };

        TrendAnalysis {
            trend,
            change_percentage: change,
            first_half_avg: Some(first_avg),
            second_half_avg: Some(second_avg),
        }
    }

    /// Bucket measurements by period and aggregate each bucket.
    ///
    /// Bucket keys sort ascending lexicographically: "%Y-%m-%d %H:00" for
    /// hourly, "%Y-%m-%d" for daily, and the ISO year-week composite "%G-W%V"
    /// for weekly (avoids week-number collisions across year boundaries).
    pub fn aggregate_by_period(
        &self,
        measurements: &[Measurement],
        period: Period,
    ) -> BTreeMap<String, PeriodStats> {
        let format = match period {
            Period::Hourly => "%Y-%m-%d %H:00",
            Period::Daily => "%Y-%m-%d",
            Period::Weekly => "%G-W%V",
        };

        let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for m in measurements {
            buckets
                .entry(m.timestamp.format(format).to_string())
                .or_default()
                .push(m.value);
        }

        buckets
            .into_iter()
            .map(|(key, mut values)| {
                values.sort_by(f64::total_cmp);
                let count = values.len();
                let stats = PeriodStats {
                    count,
                    min: values[0],
                    max: values[count - 1],
                    mean: values.iter().sum::<f64>() / count as f64,
                    median: median_of_sorted(&values),
                };
                (key, stats)
            })
            .collect()
    }

    /// All measurements violating the threshold in the given direction,
    /// in input order
    pub fn exceedances(
        &self,
        measurements: &[Measurement],
        threshold: f64,
        direction: ExceedanceDirection,
    ) -> Vec<Exceedance> {
        measurements
            .iter()
            .filter(|m| match direction {
                ExceedanceDirection::Above => m.value > threshold,
                ExceedanceDirection::Below => m.value < threshold,
            })
            .map(|m| Exceedance {
                timestamp: m.timestamp,
                value: m.value,
                threshold,
                difference: m.value - threshold,
            })
            .collect()
    }

    /// Time-weighted average accounting for irregular sampling intervals.
    ///
    /// Each value is weighted by the seconds until the next measurement; the
    /// final point only bounds the last interval, so the series tail is
    /// under-weighted. `None` below two points or when the total weight is
    /// not positive.
    pub fn time_weighted_average(&self, measurements: &[Measurement]) -> Option<f64> {
        if measurements.len() < 2 {
            return None;
        }

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for pair in measurements.windows(2) {
            let interval =
                (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 1000.0;
            weighted_sum += pair[0].value * interval;
            total_weight += interval;
        }

        if total_weight > 0.0 {
            Some(weighted_sum / total_weight)
        } else {
            None
        }
    }

    /// Moving average over contiguous windows, stamped with the timestamp of
    /// each window's last point. Empty when the series is shorter than the
    /// window.
    pub fn moving_average(
        &self,
        measurements: &[Measurement],
        window_size: usize,
    ) -> Vec<MovingAveragePoint> {
        if window_size == 0 || measurements.len() < window_size {
            return Vec::new();
        }

        measurements
            .windows(window_size)
            .map(|window| MovingAveragePoint {
                timestamp: window[window_size - 1].timestamp,
                mean: window.iter().map(|m| m.value).sum::<f64>() / window_size as f64,
            })
            .collect()
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Exclusive-method quantile: position p * (n + 1), linearly interpolated and
/// clamped to the data range. Matches the conventional Q1/Q3 definition.
fn quantile_exclusive(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let position = p * (n as f64 + 1.0);
    let clamped = position.clamp(1.0, n as f64);
    let lower = clamped.floor() as usize - 1;
    let gamma = clamped - clamped.floor();

    if lower + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lower] + gamma * (sorted[lower + 1] - sorted[lower])
    }
}
