// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! WELL Building Standard compliance assessment engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::measurement::ParameterSeries;
use crate::well::features::features_for_parameter;
use crate::well::thresholds::{lookup, normalize_parameter_name};

/// Assessment of a single parameter against WELL thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAssessment {
    /// Canonical parameter name
    pub parameter: String,

    /// Latest measured value
    pub value: f64,

    /// Measurement unit
    pub unit: String,

    /// Score on the 0-4 scale
    pub score: u8,

    /// Qualitative level ("Excellent (WELL Platinum)", "Poor", ...)
    pub level: String,

    /// Whether this parameter meets the WELL compliance cut (score >= 2)
    pub well_compliant: bool,

    /// Which standard/feature clause was applied
    pub threshold_used: String,
}

/// Complete WELL compliance assessment for one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAssessment {
    pub device_name: String,
    pub timestamp: DateTime<Utc>,

    /// Sum of per-parameter scores
    pub overall_score: u32,

    /// 4 x number of parameters that had a threshold and a latest value
    pub max_score: u32,

    /// overall_score / max_score x 100, rounded to one decimal (0 when max is 0)
    pub percentage: f64,

    /// Certification tier eligibility
    pub well_level: String,

    /// Per-parameter assessments, in input order
    pub parameters: Vec<ParameterAssessment>,

    /// Actionable recommendations, in input parameter order
    pub recommendations: Vec<String>,
}

/// Engine for assessing WELL Building Standard compliance
///
/// Stateless; safe to share across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceEngine;

impl ComplianceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Assess WELL compliance for a set of parameter series.
    ///
    /// Series without a resolvable threshold or without any measurement are
    /// silently excluded from both the numerator and the denominator.
    pub fn assess(
        &self,
        device_name: &str,
        series: &[ParameterSeries],
        now: DateTime<Utc>,
    ) -> ComplianceAssessment {
        let mut assessments = Vec::new();
        let mut total_score = 0u32;
        let mut max_score = 0u32;

        for param in series {
            if param.latest_value().is_none() {
                continue;
            }
            if let Some(assessment) = self.assess_parameter(param) {
                total_score += assessment.score as u32;
                max_score += 4;
                assessments.push(assessment);
            }
        }

        let percentage = if max_score > 0 {
            round1(total_score as f64 / max_score as f64 * 100.0)
        } else {
            0.0
        };
        let well_level = determine_well_level(percentage).to_string();
        let recommendations = generate_recommendations(&assessments);

        ComplianceAssessment {
            device_name: device_name.to_string(),
            timestamp: now,
            overall_score: total_score,
            max_score,
            percentage,
            well_level,
            parameters: assessments,
            recommendations,
        }
    }

    /// Assess one parameter series, or `None` when it has no threshold or no data
    pub fn assess_parameter(&self, param: &ParameterSeries) -> Option<ParameterAssessment> {
        let normalized = normalize_parameter_name(&param.kind);
        let threshold = lookup(&normalized)?;
        let value = param.latest_value()?;

        let (score, level) = threshold.classify(value);

        Some(ParameterAssessment {
            parameter: normalized,
            value,
            unit: param.unit.clone(),
            score,
            level: level.to_string(),
            well_compliant: score >= 2,
            threshold_used: threshold.feature.to_string(),
        })
    }
}

/// Map a percentage score to a WELL certification tier (inclusive lower bounds)
pub fn determine_well_level(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "WELL Platinum Eligible"
    } else if percentage >= 75.0 {
        "WELL Gold Eligible"
    } else if percentage >= 60.0 {
        "WELL Silver Eligible"
    } else if percentage >= 40.0 {
        "WELL Bronze Eligible"
    } else {
        "Below WELL Standards"
    }
}

/// Build parameter-specific recommendations, preserving input order.
///
/// Score <= 1 gets a priority block with the top two mitigation strategies of
/// every feature tracking the parameter; score == 2 gets a lighter note with
/// the next tier target; score >= 3 produces nothing.
fn generate_recommendations(assessments: &[ParameterAssessment]) -> Vec<String> {
    let mut recommendations = Vec::new();

    for assessment in assessments {
        if assessment.score <= 1 {
            let mut rec = format!(
                "PRIORITY: {} is {}\n  Current value: {} {}",
                assessment.parameter.to_uppercase(),
                assessment.level,
                assessment.value,
                assessment.unit,
            );

            for feature in features_for_parameter(&assessment.parameter) {
                rec.push_str(&format!("\n  {} - {}:", feature.id, feature.name));
                for strategy in feature.mitigation_strategies.iter().take(2) {
                    rec.push_str(&format!("\n    - {strategy}"));
                }
            }

            recommendations.push(rec);
        } else if assessment.score == 2 {
            let mut rec = format!(
                "{} is acceptable but could be improved\n  Current value: {} {}",
                assessment.parameter.to_uppercase(),
                assessment.value,
                assessment.unit,
            );

            if let Some(target) = lookup(&assessment.parameter).and_then(|t| t.band_for_score(3)) {
                rec.push_str(&format!(
                    "\n  Target for 'Good' level: {} {}",
                    target, assessment.unit
                ));
            }

            recommendations.push(rec);
        }
    }

    if recommendations.is_empty() {
        recommendations.push(
            "All parameters are within excellent or good ranges. \
             Maintain current conditions for WELL compliance."
                .to_string(),
        );
    }

    recommendations
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Measurement;
    use chrono::TimeZone;

    fn series(kind: &str, unit: &str, value: f64) -> ParameterSeries {
        let mut s = ParameterSeries::new(format!("{kind}-series"), kind, unit);
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        s.measurements.push(Measurement::new("m0", value, ts));
        s
    }

    #[test]
    fn test_excellent_co2_scores_platinum() {
        let engine = ComplianceEngine::new();
        let data = vec![series("co2", "ppm", 600.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        assert_eq!(assessment.overall_score, 4);
        assert_eq!(assessment.max_score, 4);
        assert_eq!(assessment.percentage, 100.0);
        assert!(assessment.well_level.contains("Platinum"));
        assert_eq!(assessment.parameters[0].level, "Excellent (WELL Platinum)");
    }

    #[test]
    fn test_very_poor_co2_is_priority_recommendation() {
        let engine = ComplianceEngine::new();
        let data = vec![series("co2", "ppm", 2000.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        let param = &assessment.parameters[0];
        assert_eq!(param.score, 0);
        assert!(!param.well_compliant);
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.starts_with("PRIORITY: CO2")));
        // Mitigation strategies come from A03
        assert!(assessment.recommendations[0].contains("Ventilation Effectiveness"));
    }

    #[test]
    fn test_unknown_parameters_are_skipped() {
        let engine = ComplianceEngine::new();
        let data = vec![series("radon", "Bq/m³", 120.0), series("co2", "ppm", 600.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        assert_eq!(assessment.parameters.len(), 1);
        assert_eq!(assessment.max_score, 4);
    }

    #[test]
    fn test_empty_input_yields_zero_percentage() {
        let engine = ComplianceEngine::new();
        let assessment = engine.assess("Office A", &[], Utc::now());

        assert_eq!(assessment.max_score, 0);
        assert_eq!(assessment.percentage, 0.0);
        assert_eq!(assessment.well_level, "Below WELL Standards");
    }

    #[test]
    fn test_empty_series_excluded_from_denominator() {
        let engine = ComplianceEngine::new();
        let empty = ParameterSeries::new("s", "co2", "ppm");
        let data = vec![empty, series("pm25", "µg/m³", 8.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        assert_eq!(assessment.max_score, 4);
        assert_eq!(assessment.parameters.len(), 1);
    }

    #[test]
    fn test_indicator_parameter_compliant() {
        let engine = ComplianceEngine::new();
        let data = vec![series("iaq", "index", 85.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        let param = &assessment.parameters[0];
        assert_eq!(param.score, 4);
        assert!(param.well_compliant);
    }

    #[test]
    fn test_acceptable_parameter_gets_improvement_note() {
        let engine = ComplianceEngine::new();
        let data = vec![series("co2", "ppm", 950.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        assert_eq!(assessment.parameters[0].score, 2);
        assert!(assessment.recommendations[0].contains("could be improved"));
        assert!(assessment.recommendations[0].contains("800"));
    }

    #[test]
    fn test_all_compliant_maintain_message() {
        let engine = ComplianceEngine::new();
        let data = vec![series("co2", "ppm", 550.0), series("pm25", "µg/m³", 12.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        assert_eq!(assessment.recommendations.len(), 1);
        assert!(assessment.recommendations[0].contains("Maintain current conditions"));
    }

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(determine_well_level(90.0), "WELL Platinum Eligible");
        assert_eq!(determine_well_level(89.9), "WELL Gold Eligible");
        assert_eq!(determine_well_level(75.0), "WELL Gold Eligible");
        assert_eq!(determine_well_level(60.0), "WELL Silver Eligible");
        assert_eq!(determine_well_level(40.0), "WELL Bronze Eligible");
        assert_eq!(determine_well_level(39.9), "Below WELL Standards");
    }

    #[test]
    fn test_assessment_serializes_to_json() {
        let engine = ComplianceEngine::new();
        let data = vec![series("co2", "ppm", 600.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["device_name"], "Office A");
        assert_eq!(json["well_level"], "WELL Platinum Eligible");
        assert_eq!(json["parameters"][0]["parameter"], "co2");
        assert_eq!(json["parameters"][0]["well_compliant"], true);
    }

    #[test]
    fn test_recommendations_preserve_input_order() {
        let engine = ComplianceEngine::new();
        let data = vec![series("pm25", "µg/m³", 60.0), series("co2", "ppm", 2000.0)];
        let assessment = engine.assess("Office A", &data, Utc::now());

        assert!(assessment.recommendations[0].contains("PM25"));
        assert!(assessment.recommendations[1].contains("CO2"));
    }
}
