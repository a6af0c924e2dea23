// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! Pattern detection - hour-of-day and day-of-week recurrence analysis

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;
use crate::well::thresholds::ParameterThreshold;

/// Where in the day the peak falls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakPeriod {
    /// Peak between 09:00 and 17:00; typically occupancy-driven
    BusinessHours,
    /// Peak before 09:00; HVAC may start too late
    EarlyMorning,
    /// Peak after 17:00; review after-hours ventilation
    Evening,
}

/// Weekday/weekend imbalance beyond 20%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancySkew {
    WeekdayHigher,
    WeekendHigher,
}

/// Recurrence analysis for one parameter's measurement history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    /// Average value per hour of day (0-23); only observed hours present
    pub hourly_averages: BTreeMap<u32, f64>,

    /// Average value per day of week (Monday = 0 .. Sunday = 6)
    pub daily_averages: BTreeMap<u32, f64>,

    pub peak_hour: Option<u32>,
    pub trough_hour: Option<u32>,
    pub peak_day: Option<u32>,
    pub trough_day: Option<u32>,

    pub peak_period: Option<PeakPeriod>,
    pub occupancy_skew: Option<OccupancySkew>,

    /// Hours whose average exceeds the parameter's "good" target; populated
    /// only when a threshold definition is supplied
    pub elevated_hours: Vec<u32>,
}

/// Hour-of-day / day-of-week pattern detector
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Bucket measurements by hour of day and day of week and locate
    /// recurring peaks and troughs.
    ///
    /// Timestamps are used as carried; no timezone reinterpretation. Ties on
    /// bucket averages resolve to the earliest bucket.
    pub fn detect_patterns(
        &self,
        measurements: &[Measurement],
        threshold: Option<&ParameterThreshold>,
    ) -> PatternReport {
        let mut hourly: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        let mut daily: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

        for m in measurements {
            hourly.entry(m.timestamp.hour()).or_default().push(m.value);
            daily
                .entry(m.timestamp.weekday().num_days_from_monday())
                .or_default()
                .push(m.value);
        }

        let hourly_averages: BTreeMap<u32, f64> = hourly
            .into_iter()
            .map(|(h, v)| (h, v.iter().sum::<f64>() / v.len() as f64))
            .collect();
        let daily_averages: BTreeMap<u32, f64> = daily
            .into_iter()
            .map(|(d, v)| (d, v.iter().sum::<f64>() / v.len() as f64))
            .collect();

        let (peak_hour, trough_hour) = extremes(&hourly_averages);
        let (peak_day, trough_day) = extremes(&daily_averages);

        let peak_period = peak_hour.map(|h| {
            if (9..=17).contains(&h) {
                PeakPeriod::BusinessHours
            } else if h < 9 {
                PeakPeriod::EarlyMorning
            } else {
                PeakPeriod::Evening
            }
        });

        let occupancy_skew = weekday_weekend_skew(&daily_averages);

        let elevated_hours = match threshold {
            Some(t) => {
                let target = t.good_target();
                hourly_averages
                    .iter()
                    .filter(|(_, &avg)| avg > target)
                    .map(|(&h, _)| h)
                    .collect()
            }
            None => Vec::new(),
        };

        PatternReport {
            hourly_averages,
            daily_averages,
            peak_hour,
            trough_hour,
            peak_day,
            trough_day,
            peak_period,
            occupancy_skew,
            elevated_hours,
        }
    }
}

/// Peak and trough bucket keys; first occurrence wins on ties
fn extremes(averages: &BTreeMap<u32, f64>) -> (Option<u32>, Option<u32>) {
    let mut peak: Option<(u32, f64)> = None;
    let mut trough: Option<(u32, f64)> = None;

    for (&key, &avg) in averages {
        match peak {
            Some((_, best)) if avg <= best => {}
            _ => peak = Some((key, avg)),
        }
        match trough {
            Some((_, worst)) if avg >= worst => {}
            _ => trough = Some((key, avg)),
        }
    }

    (peak.map(|(k, _)| k), trough.map(|(k, _)| k))
}

fn weekday_weekend_skew(daily_averages: &BTreeMap<u32, f64>) -> Option<OccupancySkew> {
    let weekday: Vec<f64> = (0..5).filter_map(|d| daily_averages.get(&d).copied()).collect();
    let weekend: Vec<f64> = (5..7).filter_map(|d| daily_averages.get(&d).copied()).collect();

    if weekday.is_empty() || weekend.is_empty() {
        return None;
    }

    let weekday_avg = weekday.iter().sum::<f64>() / weekday.len() as f64;
    let weekend_avg = weekend.iter().sum::<f64>() / weekend.len() as f64;

    if weekday_avg <= 0.0 || weekend_avg <= 0.0 {
        return None;
    }

    if weekday_avg > weekend_avg * 1.2 {
        Some(OccupancySkew::WeekdayHigher)
    } else if weekend_avg > weekday_avg * 1.2 {
        Some(OccupancySkew::WeekendHigher)
    } else {
        None
    }
}
