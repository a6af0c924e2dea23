// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! WELL Building Standard v2 feature definitions and feature-level rollup

use std::collections::BTreeMap;

use serde::Serialize;

use crate::measurement::ParameterSeries;
use crate::well::compliance::{determine_well_level, ComplianceEngine, ParameterAssessment};
use crate::well::thresholds::normalize_parameter_name;

/// WELL Building Standard v2 feature definition
///
/// A feature aggregates one or more parameters; a parameter may belong to
/// more than one feature. Parameter sets use canonical (normalized) names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WellFeature {
    /// Feature identifier, e.g. "A01"
    pub id: &'static str,
    pub name: &'static str,

    /// "Air" or "Thermal"
    pub category: &'static str,
    pub description: &'static str,

    /// Canonical parameter names tracked by this feature
    pub parameters: &'static [&'static str],
    pub health_impact: &'static str,

    /// Ordered by expected impact
    pub mitigation_strategies: &'static [&'static str],
}

/// WELL v2 feature registry (static, immutable)
pub static WELL_FEATURES: [WellFeature; 8] = [
    WellFeature {
        id: "A01",
        name: "Fine Particulates",
        category: "Air",
        description: "Filtration and source control of particulate matter",
        parameters: &["pm25", "pm10", "pm4", "pm1"],
        health_impact: "Respiratory health, cardiovascular effects, premature mortality",
        mitigation_strategies: &[
            "Install MERV 13+ or HEPA filtration systems",
            "Seal building envelope to reduce outdoor infiltration",
            "Control indoor emission sources (cooking, combustion)",
            "Monitor outdoor conditions and adjust fresh air intake accordingly",
            "Implement regular filter maintenance schedule",
        ],
    },
    WellFeature {
        id: "A03",
        name: "Ventilation Effectiveness",
        category: "Air",
        description: "Adequate outdoor air ventilation to dilute indoor pollutants",
        parameters: &["co2", "ventilationindicator"],
        health_impact: "Cognitive performance, reduced sick building syndrome symptoms",
        mitigation_strategies: &[
            "Increase outdoor air intake rate to meet ASHRAE 62.1 standards",
            "Verify HVAC system operation and damper positions",
            "Implement demand-controlled ventilation (DCV) systems",
            "Check and replace air filters regularly",
            "Verify occupancy levels match design capacity",
        ],
    },
    WellFeature {
        id: "A05",
        name: "Enhanced Air Quality",
        category: "Air",
        description: "Control of VOCs, formaldehyde, and ozone",
        parameters: &["vocs", "formaldehyde", "o3"],
        health_impact: "Respiratory irritation, carcinogenic risk (formaldehyde), eye and throat irritation",
        mitigation_strategies: &[
            "Use low-VOC materials and furnishings",
            "Ensure adequate ventilation during and after renovations",
            "Monitor outdoor ozone levels and adjust ventilation",
            "Activate carbon filtration for VOC removal",
            "Implement source control measures for formaldehyde emissions",
        ],
    },
    WellFeature {
        id: "A06",
        name: "Combustion Minimization",
        category: "Air",
        description: "Control of combustion-generated pollutants",
        parameters: &["co", "no2"],
        health_impact: "Carbon monoxide poisoning, respiratory irritation, cardiovascular effects",
        mitigation_strategies: &[
            "Eliminate indoor combustion sources where possible",
            "Inspect and maintain combustion appliances regularly",
            "Verify proper venting of combustion equipment",
            "Install CO detectors and alarms in appropriate locations",
            "Ensure adequate ventilation in areas with combustion equipment",
        ],
    },
    WellFeature {
        id: "A08",
        name: "Air Quality Monitoring",
        category: "Air",
        description: "Continuous monitoring of indoor air quality parameters",
        parameters: &["iaq", "covid19"],
        health_impact: "Awareness and responsive management of air quality conditions",
        mitigation_strategies: &[
            "Maintain continuous monitoring systems",
            "Display air quality data to occupants in real-time",
            "Implement automated responses to poor air quality conditions",
            "Establish protocols for addressing air quality issues",
        ],
    },
    WellFeature {
        id: "T01",
        name: "Thermal Performance",
        category: "Thermal",
        description: "Maintenance of comfortable temperature ranges",
        parameters: &["temperature", "thermalindicator"],
        health_impact: "Occupant comfort, productivity, thermal stress prevention",
        mitigation_strategies: &[
            "Adjust HVAC temperature setpoints to meet ASHRAE 55 standards",
            "Verify proper operation of heating/cooling equipment",
            "Address thermal bridging and insulation issues",
            "Provide local temperature control where possible",
            "Consider seasonal adjustments to temperature ranges",
        ],
    },
    WellFeature {
        id: "T06",
        name: "Adaptive Thermal Comfort",
        category: "Thermal",
        description: "Temperature and humidity control for occupant comfort",
        parameters: &["temperature", "humidity"],
        health_impact: "Occupant satisfaction, productivity, thermal comfort",
        mitigation_strategies: &[
            "Adjust temperature based on occupant feedback",
            "Provide seasonal temperature adjustments",
            "Enable occupant control of local thermal conditions",
            "Consider clothing and metabolic rate in temperature settings",
        ],
    },
    WellFeature {
        id: "T07",
        name: "Humidity Control",
        category: "Thermal",
        description: "Maintenance of appropriate humidity levels (30-60% RH)",
        parameters: &["humidity"],
        health_impact: "Mold prevention, respiratory comfort, viral transmission reduction",
        mitigation_strategies: &[
            "Activate humidification system if relative humidity < 30%",
            "Activate dehumidification system if relative humidity > 60%",
            "Check for water intrusion or leaks",
            "Verify HVAC humidity control operation",
            "Monitor seasonal humidity variations",
        ],
    },
];

/// All features that track the given parameter (canonical name expected)
pub fn features_for_parameter(parameter: &str) -> Vec<&'static WellFeature> {
    WELL_FEATURES
        .iter()
        .filter(|f| f.parameters.contains(&parameter))
        .collect()
}

/// Feature definition by ID ("A01", "T07", ...)
pub fn feature_by_id(feature_id: &str) -> Option<&'static WellFeature> {
    WELL_FEATURES.iter().find(|f| f.id == feature_id)
}

/// Feature-level compliance rollup
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCompliance {
    pub feature_id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub health_impact: &'static str,

    /// Sum of per-parameter scores for this feature
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,

    /// Same tier mapping as the device-level assessment
    pub level: String,

    /// Feature compliance uses a coarser cut than the per-parameter flag:
    /// at least half the achievable points
    pub compliant: bool,

    pub assessments: Vec<ParameterAssessment>,

    /// Top mitigation strategies for this feature (first three)
    pub mitigation_strategies: Vec<&'static str>,
}

/// Group parameter series by WELL feature and roll up compliance per feature.
///
/// Features with no matching series are omitted entirely; no zero entries.
pub fn group_by_feature(
    series: &[ParameterSeries],
    engine: &ComplianceEngine,
) -> BTreeMap<&'static str, FeatureCompliance> {
    let mut grouped = BTreeMap::new();

    for feature in WELL_FEATURES.iter() {
        let matching: Vec<&ParameterSeries> = series
            .iter()
            .filter(|s| {
                feature
                    .parameters
                    .contains(&normalize_parameter_name(&s.kind).as_str())
            })
            .collect();

        if matching.is_empty() {
            continue;
        }

        let mut assessments = Vec::new();
        let mut total_score = 0u32;
        let mut max_score = 0u32;

        for param in matching {
            if let Some(assessment) = engine.assess_parameter(param) {
                total_score += assessment.score as u32;
                max_score += 4;
                assessments.push(assessment);
            }
        }

        let percentage = if max_score > 0 {
            (total_score as f64 / max_score as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        grouped.insert(
            feature.id,
            FeatureCompliance {
                feature_id: feature.id,
                name: feature.name,
                category: feature.category,
                health_impact: feature.health_impact,
                score: total_score,
                max_score,
                percentage,
                level: determine_well_level(percentage).to_string(),
                compliant: percentage >= 50.0,
                assessments,
                mitigation_strategies: feature.mitigation_strategies.iter().take(3).copied().collect(),
            },
        );
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Measurement;
    use chrono::{TimeZone, Utc};

    fn series(kind: &str, unit: &str, value: f64) -> ParameterSeries {
        let mut s = ParameterSeries::new(format!("{kind}-series"), kind, unit);
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        s.measurements.push(Measurement::new("m0", value, ts));
        s
    }

    #[test]
    fn test_features_for_parameter() {
        let ids: Vec<&str> = features_for_parameter("temperature")
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["T01", "T06"]);

        assert!(features_for_parameter("pm25").iter().any(|f| f.id == "A01"));
        assert!(features_for_parameter("unknown").is_empty());
    }

    #[test]
    fn test_grouping_omits_unmatched_features() {
        let engine = ComplianceEngine::new();
        let data = vec![series("pm25", "µg/m³", 8.0), series("co2", "ppm", 600.0)];
        let grouped = group_by_feature(&data, &engine);

        let ids: Vec<&str> = grouped.keys().copied().collect();
        assert_eq!(ids, vec!["A01", "A03"]);
    }

    #[test]
    fn test_feature_rollup_scores() {
        let engine = ComplianceEngine::new();
        // pm25 excellent (4) + pm10 acceptable (2) under A01
        let data = vec![series("pm25", "µg/m³", 8.0), series("pm10", "µg/m³", 48.0)];
        let grouped = group_by_feature(&data, &engine);

        let a01 = &grouped["A01"];
        assert_eq!(a01.score, 6);
        assert_eq!(a01.max_score, 8);
        assert_eq!(a01.percentage, 75.0);
        assert!(a01.compliant);
        assert_eq!(a01.assessments.len(), 2);
        assert_eq!(a01.mitigation_strategies.len(), 3);
    }

    #[test]
    fn test_feature_compliance_uses_fifty_percent_cut() {
        let engine = ComplianceEngine::new();
        // co2 at 1500 scores 1 of 4 = 25%, non-compliant at feature level too
        let poor = vec![series("co2", "ppm", 1500.0)];
        let grouped = group_by_feature(&poor, &engine);
        assert!(!grouped["A03"].compliant);

        // score 2 of 4 = 50%, feature-compliant even though barely acceptable
        let acceptable = vec![series("co2", "ppm", 1000.0)];
        let grouped = group_by_feature(&acceptable, &engine);
        assert!(grouped["A03"].compliant);
    }

    #[test]
    fn test_shared_parameter_appears_in_multiple_features() {
        let engine = ComplianceEngine::new();
        let data = vec![series("humidity", "%", 45.0)];
        let grouped = group_by_feature(&data, &engine);

        assert!(grouped.contains_key("T06"));
        assert!(grouped.contains_key("T07"));
        assert!(!grouped.contains_key("T01"));
    }
}
