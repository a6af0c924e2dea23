// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! WELL Building Standard threshold registry and parameter classification
//!
//! Threshold values come from:
//! - WELL Building Standard v2 (Features A01-A08, T01-T07)
//! - ASHRAE 62.1 & 55 (ventilation & thermal comfort)
//! - WHO Indoor Air Quality Guidelines (2010 + 2021)
//!
//! When multiple limits exist, the strictest value governs compliance.

/// Cut points shared by the pollutant and indicator threshold forms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub excellent: f64,
    pub good: f64,
    pub acceptable: f64,
    pub poor: f64,
}

/// Threshold definition for one parameter
///
/// An explicit tag selects the comparison direction; every variant carries
/// only the fields that apply to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdDef {
    /// Lower is better; values above `poor` score 0
    Pollutant(Bands),

    /// Higher is better; same cut points, inverted comparison
    Indicator(Bands),

    /// Optimal band; scores 4 inside optimal, 2 inside acceptable, 0 outside
    Range {
        optimal_min: f64,
        optimal_max: f64,
        acceptable_min: f64,
        acceptable_max: f64,
    },
}

/// Registry entry: threshold definition plus unit and governing feature tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterThreshold {
    pub def: ThresholdDef,
    pub unit: &'static str,
    pub feature: &'static str,
}

impl ParameterThreshold {
    /// Classify a measured value into a 0-4 score and qualitative level.
    ///
    /// Comparisons are inclusive and evaluated best-tier first, so a value
    /// exactly on a boundary lands in the better tier.
    pub fn classify(&self, value: f64) -> (u8, &'static str) {
        match self.def {
            ThresholdDef::Pollutant(b) => {
                if value <= b.excellent {
                    (4, "Excellent (WELL Platinum)")
                } else if value <= b.good {
                    (3, "Good (WELL Gold)")
                } else if value <= b.acceptable {
                    (2, "Acceptable (WELL Silver)")
                } else if value <= b.poor {
                    (1, "Poor")
                } else {
                    (0, "Very Poor")
                }
            }
            ThresholdDef::Indicator(b) => {
                if value >= b.excellent {
                    (4, "Excellent")
                } else if value >= b.good {
                    (3, "Good")
                } else if value >= b.acceptable {
                    (2, "Acceptable")
                } else if value >= b.poor {
                    (1, "Poor")
                } else {
                    (0, "Very Poor")
                }
            }
            ThresholdDef::Range {
                optimal_min,
                optimal_max,
                acceptable_min,
                acceptable_max,
            } => {
                if value >= optimal_min && value <= optimal_max {
                    (4, "Excellent (WELL Platinum)")
                } else if value >= acceptable_min && value <= acceptable_max {
                    (2, "Acceptable")
                } else {
                    (0, "Out of Range")
                }
            }
        }
    }

    pub fn is_higher_better(&self) -> bool {
        matches!(self.def, ThresholdDef::Indicator(_))
    }

    pub fn is_range_based(&self) -> bool {
        matches!(self.def, ThresholdDef::Range { .. })
    }

    /// Value marking the "Good" tier, used as an improvement target and as
    /// the elevated marker in pattern analysis. For range parameters this is
    /// the upper optimal bound.
    pub fn good_target(&self) -> f64 {
        match self.def {
            ThresholdDef::Pollutant(b) | ThresholdDef::Indicator(b) => b.good,
            ThresholdDef::Range { optimal_max, .. } => optimal_max,
        }
    }

    /// Cut point a value must reach to earn the given score.
    ///
    /// Only meaningful for the banded forms; range parameters have no
    /// intermediate tiers.
    pub fn band_for_score(&self, score: u8) -> Option<f64> {
        let bands = match self.def {
            ThresholdDef::Pollutant(b) | ThresholdDef::Indicator(b) => b,
            ThresholdDef::Range { .. } => return None,
        };
        match score {
            4 => Some(bands.excellent),
            3 => Some(bands.good),
            2 => Some(bands.acceptable),
            1 => Some(bands.poor),
            _ => None,
        }
    }
}

macro_rules! pollutant {
    ($ex:expr, $good:expr, $acc:expr, $poor:expr, $unit:expr, $feature:expr) => {
        ParameterThreshold {
            def: ThresholdDef::Pollutant(Bands {
                excellent: $ex,
                good: $good,
                acceptable: $acc,
                poor: $poor,
            }),
            unit: $unit,
            feature: $feature,
        }
    };
}

macro_rules! indicator {
    ($ex:expr, $good:expr, $acc:expr, $poor:expr, $unit:expr, $feature:expr) => {
        ParameterThreshold {
            def: ThresholdDef::Indicator(Bands {
                excellent: $ex,
                good: $good,
                acceptable: $acc,
                poor: $poor,
            }),
            unit: $unit,
            feature: $feature,
        }
    };
}

// Particulate matter (µg/m³)
static PM25: ParameterThreshold = pollutant!(8.0, 15.0, 25.0, 35.0, "µg/m³", "A01 - Fine Particulates");
static PM10: ParameterThreshold = pollutant!(20.0, 45.0, 50.0, 150.0, "µg/m³", "A01 - Coarse Particles");
static PM4: ParameterThreshold = pollutant!(10.0, 20.0, 30.0, 50.0, "µg/m³", "A01 - Particulates");
static PM1: ParameterThreshold = pollutant!(5.0, 15.0, 25.0, 40.0, "µg/m³", "A01 - Ultrafine Particulates");

// Gases
static CO2: ParameterThreshold = pollutant!(600.0, 800.0, 1000.0, 1500.0, "ppm", "A03 - Ventilation Effectiveness");
static CO: ParameterThreshold = pollutant!(7.0, 9.0, 30.0, 87.0, "ppm", "A06 - Combustion Control");
static NO2: ParameterThreshold = pollutant!(21.0, 40.0, 100.0, 200.0, "ppb", "A05 - Combustion Sources");
static O3: ParameterThreshold = pollutant!(51.0, 70.0, 100.0, 240.0, "ppb", "A05 - Ozone Control");

// VOCs and formaldehyde
static FORMALDEHYDE: ParameterThreshold = pollutant!(9.0, 16.0, 30.0, 100.0, "µg/m³", "A05 - Enhanced Air Quality");
static VOCS: ParameterThreshold = pollutant!(200.0, 300.0, 500.0, 1000.0, "ppb", "A05 - Volatile Organics");

// Thermal comfort (range-based, ASHRAE 55 operative ranges)
static TEMPERATURE: ParameterThreshold = ParameterThreshold {
    def: ThresholdDef::Range {
        optimal_min: 20.0,
        optimal_max: 24.0,
        acceptable_min: 18.0,
        acceptable_max: 26.0,
    },
    unit: "°C",
    feature: "T01/T06 - Thermal Performance",
};
static HUMIDITY: ParameterThreshold = ParameterThreshold {
    def: ThresholdDef::Range {
        optimal_min: 30.0,
        optimal_max: 60.0,
        acceptable_min: 20.0,
        acceptable_max: 70.0,
    },
    unit: "%",
    feature: "T07 - Humidity Control",
};

// Composite indicators (0-100 scale, higher is better)
static IAQ: ParameterThreshold = indicator!(80.0, 60.0, 40.0, 20.0, "index", "A08 - Air Quality Monitoring");
static COVID19: ParameterThreshold = indicator!(80.0, 60.0, 40.0, 20.0, "index", "A08 - Virus Resistance");
static THERMAL_INDICATOR: ParameterThreshold = indicator!(80.0, 60.0, 40.0, 20.0, "index", "T01 - Thermal Comfort");
static VENTILATION_INDICATOR: ParameterThreshold = indicator!(80.0, 60.0, 40.0, 20.0, "index", "A03 - Ventilation Efficiency");

/// Normalize a parameter name to its canonical registry form.
///
/// Case-insensitive, whitespace-trimmed, with a fixed alias table for the
/// naming variants sensors report in the wild.
pub fn normalize_parameter_name(name: &str) -> String {
    let normalized = name.trim().to_lowercase();
    let canonical = match normalized.as_str() {
        "pm2.5" | "pm2_5" | "pm_25" => "pm25",
        "pm_10" => "pm10",
        "pm_4" => "pm4",
        "pm_1" => "pm1",
        "tvoc" | "tvocs" => "vocs",
        "hcho" => "formaldehyde",
        "temp" => "temperature",
        "rh" | "relative_humidity" => "humidity",
        "iaq_indicator" => "iaq",
        "thermal_indicator" => "thermalindicator",
        "ventilation_indicator" => "ventilationindicator",
        other => other,
    };
    canonical.to_string()
}

/// Look up the threshold entry for a parameter, normalizing the name first.
///
/// Unknown parameters yield `None`; callers skip them rather than erroring.
pub fn lookup(parameter: &str) -> Option<&'static ParameterThreshold> {
    let normalized = normalize_parameter_name(parameter);
    match normalized.as_str() {
        "pm25" => Some(&PM25),
        "pm10" => Some(&PM10),
        "pm4" => Some(&PM4),
        "pm1" => Some(&PM1),
        "co2" => Some(&CO2),
        "co" => Some(&CO),
        "no2" => Some(&NO2),
        "o3" => Some(&O3),
        "formaldehyde" => Some(&FORMALDEHYDE),
        "vocs" => Some(&VOCS),
        "temperature" => Some(&TEMPERATURE),
        "humidity" => Some(&HUMIDITY),
        "iaq" => Some(&IAQ),
        "covid19" => Some(&COVID19),
        "thermalindicator" => Some(&THERMAL_INDICATOR),
        "ventilationindicator" => Some(&VENTILATION_INDICATOR),
        _ => None,
    }
}

/// Whether higher values are better for this parameter
pub fn is_higher_better(parameter: &str) -> bool {
    lookup(parameter).map(|t| t.is_higher_better()).unwrap_or(false)
}

/// Whether this parameter uses range-based (optimal band) thresholds
pub fn is_range_based(parameter: &str) -> bool {
    lookup(parameter).map(|t| t.is_range_based()).unwrap_or(false)
}
