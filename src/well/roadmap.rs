// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/wellsense-rs

//! ROI-ranked improvement roadmap toward the next WELL certification tier

use serde::Serialize;

use crate::well::compliance::ComplianceAssessment;
use crate::well::thresholds::{lookup, ThresholdDef};

/// Certification tier breakpoints, ascending
const TIER_BREAKPOINTS: [(f64, &str); 4] = [
    (40.0, "WELL Bronze Eligible"),
    (60.0, "WELL Silver Eligible"),
    (75.0, "WELL Gold Eligible"),
    (90.0, "WELL Platinum Eligible"),
];

/// One candidate improvement, ranked by return on investment
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapAction {
    pub parameter: String,
    pub current_value: f64,
    pub current_score: u8,

    /// Score points recoverable by bringing the parameter to excellent
    pub potential_gain: u8,

    /// Human-readable effort estimate
    pub effort_description: String,

    /// potential_gain / effort; higher means cheaper wins
    pub roi: f64,
}

/// Improvement roadmap toward the next certification tier
#[derive(Debug, Clone, Serialize)]
pub struct Roadmap {
    pub current_level: String,
    pub current_percentage: f64,

    /// `None` when already Platinum-eligible; nothing left to plan
    pub target_level: Option<String>,
    pub target_percentage: Option<f64>,

    /// Approximate score points required to reach the target tier
    pub points_needed: u32,

    /// Top five actions by ROI (stable order on ties)
    pub priority_actions: Vec<RoadmapAction>,

    /// Parameters already at score 2 or 3; small pushes to excellent
    pub quick_wins: Vec<String>,

    /// How many top-ROI parameters suffice to reach the target, when any
    /// combination does
    pub parameters_to_target: Option<usize>,
}

/// Plan an ROI-ordered roadmap from an existing assessment.
///
/// The points estimate and per-parameter effort are heuristics; the roadmap
/// ranks remediation priority, it does not guarantee the target tier.
pub fn roadmap(assessment: &ComplianceAssessment) -> Roadmap {
    let current = assessment.percentage;

    let target = TIER_BREAKPOINTS.iter().find(|(pct, _)| *pct > current);

    let Some(&(target_pct, target_level)) = target else {
        // Already at the top tier; maintain
        return Roadmap {
            current_level: assessment.well_level.clone(),
            current_percentage: current,
            target_level: None,
            target_percentage: None,
            points_needed: 0,
            priority_actions: Vec::new(),
            quick_wins: Vec::new(),
            parameters_to_target: None,
        };
    };

    let points_needed =
        ((target_pct - current) * assessment.max_score as f64 / 100.0).ceil() as u32;

    let mut actions: Vec<RoadmapAction> = assessment
        .parameters
        .iter()
        .filter(|p| p.score < 4)
        .filter_map(|p| {
            let threshold = lookup(&p.parameter)?;
            let gain = 4 - p.score;

            let (effort, description) = match threshold.def {
                ThresholdDef::Range {
                    optimal_min,
                    optimal_max,
                    ..
                } => {
                    // Distance to the nearest optimal band edge
                    let distance = if p.value < optimal_min {
                        optimal_min - p.value
                    } else {
                        p.value - optimal_max
                    };
                    (
                        distance,
                        format!(
                            "Shift by {:.1} {} into the {:.0}-{:.0} optimal band",
                            distance, p.unit, optimal_min, optimal_max
                        ),
                    )
                }
                ThresholdDef::Indicator(_) => {
                    let next = threshold.band_for_score(p.score + 1)?;
                    let distance = next - p.value;
                    (
                        distance,
                        format!("Increase by {:.1} {} to reach the next tier", distance, p.unit),
                    )
                }
                ThresholdDef::Pollutant(_) => {
                    let next = threshold.band_for_score(p.score + 1)?;
                    let distance = p.value - next;
                    (
                        distance,
                        format!("Reduce by {:.1} {} to reach the next tier", distance, p.unit),
                    )
                }
            };

            let roi = if effort > 0.0 {
                gain as f64 / effort.max(0.1)
            } else {
                // Zero-effort wins rank highest
                gain as f64 * 10.0
            };

            Some(RoadmapAction {
                parameter: p.parameter.clone(),
                current_value: p.value,
                current_score: p.score,
                potential_gain: gain,
                effort_description: description,
                roi,
            })
        })
        .collect();

    // Stable sort: ties keep input parameter order
    actions.sort_by(|a, b| b.roi.partial_cmp(&a.roi).unwrap_or(std::cmp::Ordering::Equal));

    let parameters_to_target = {
        let mut cumulative = 0u32;
        let mut reached = None;
        for (i, action) in actions.iter().enumerate() {
            cumulative += action.potential_gain as u32;
            if cumulative >= points_needed {
                reached = Some(i + 1);
                break;
            }
        }
        reached
    };

    let quick_wins = assessment
        .parameters
        .iter()
        .filter(|p| p.score == 2 || p.score == 3)
        .map(|p| p.parameter.clone())
        .collect();

    actions.truncate(5);

    Roadmap {
        current_level: assessment.well_level.clone(),
        current_percentage: current,
        target_level: Some(target_level.to_string()),
        target_percentage: Some(target_pct),
        points_needed,
        priority_actions: actions,
        quick_wins,
        parameters_to_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{Measurement, ParameterSeries};
    use crate::well::compliance::ComplianceEngine;
    use chrono::{TimeZone, Utc};

    fn series(kind: &str, unit: &str, value: f64) -> ParameterSeries {
        let mut s = ParameterSeries::new(format!("{kind}-series"), kind, unit);
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        s.measurements.push(Measurement::new("m0", value, ts));
        s
    }

    fn assess(data: &[ParameterSeries]) -> ComplianceAssessment {
        ComplianceEngine::new().assess("Office A", data, Utc::now())
    }

    #[test]
    fn test_platinum_needs_no_roadmap() {
        let assessment = assess(&[series("co2", "ppm", 550.0), series("pm25", "µg/m³", 6.0)]);
        let plan = roadmap(&assessment);

        assert!(plan.target_level.is_none());
        assert!(plan.priority_actions.is_empty());
        assert_eq!(plan.points_needed, 0);
    }

    #[test]
    fn test_next_tier_is_smallest_breakpoint_above() {
        // co2 1200 scores 1, pm25 8 scores 4: 5/8 = 62.5% -> Silver, target Gold
        let assessment = assess(&[series("co2", "ppm", 1200.0), series("pm25", "µg/m³", 8.0)]);
        let plan = roadmap(&assessment);

        assert_eq!(plan.target_level.as_deref(), Some("WELL Gold Eligible"));
        assert_eq!(plan.target_percentage, Some(75.0));
        // ceil((75 - 62.5) * 8 / 100) = 1
        assert_eq!(plan.points_needed, 1);
        assert_eq!(plan.parameters_to_target, Some(1));
    }

    #[test]
    fn test_actions_ranked_by_roi() {
        // co2 1200: gain 3, effort 1200-1000 = 200, roi 0.015
        // pm25 30:  gain 3, effort 30-25 = 5, roi 0.6
        let assessment = assess(&[series("co2", "ppm", 1200.0), series("pm25", "µg/m³", 30.0)]);
        let plan = roadmap(&assessment);

        assert_eq!(plan.priority_actions.len(), 2);
        assert_eq!(plan.priority_actions[0].parameter, "pm25");
        assert!(plan.priority_actions[0].roi > plan.priority_actions[1].roi);
        assert!(plan.priority_actions[0]
            .effort_description
            .starts_with("Reduce by 5.0"));
    }

    #[test]
    fn test_range_effort_is_distance_to_optimal_edge() {
        let assessment = assess(&[series("temperature", "°C", 27.0), series("co2", "ppm", 2000.0)]);
        let plan = roadmap(&assessment);

        let temp = plan
            .priority_actions
            .iter()
            .find(|a| a.parameter == "temperature")
            .unwrap();
        // 27 - 24 = 3 toward the optimal band
        assert!(temp.effort_description.contains("3.0"));
        assert_eq!(temp.potential_gain, 4);
    }

    #[test]
    fn test_indicator_effort_is_distance_up() {
        // iaq 50 scores 2; next tier at 60 -> effort 10, gain 2
        let assessment = assess(&[series("iaq", "index", 50.0), series("co2", "ppm", 2000.0)]);
        let plan = roadmap(&assessment);

        let iaq = plan
            .priority_actions
            .iter()
            .find(|a| a.parameter == "iaq")
            .unwrap();
        assert!(iaq.effort_description.starts_with("Increase by 10.0"));
        assert!(plan.quick_wins.contains(&"iaq".to_string()));
    }

    #[test]
    fn test_priority_actions_capped_at_five() {
        let data = vec![
            series("co2", "ppm", 1200.0),
            series("pm25", "µg/m³", 30.0),
            series("pm10", "µg/m³", 120.0),
            series("vocs", "ppb", 800.0),
            series("no2", "ppb", 150.0),
            series("co", "ppm", 50.0),
        ];
        let assessment = assess(&data);
        let plan = roadmap(&assessment);

        assert_eq!(plan.priority_actions.len(), 5);
    }

    #[test]
    fn test_no_false_completion_claim() {
        // Single very poor parameter: 0/4 = 0%, target Bronze at 40%.
        // points_needed = ceil(40 * 4 / 100) = 2, gain 4 covers it.
        let assessment = assess(&[series("co2", "ppm", 5000.0)]);
        let plan = roadmap(&assessment);
        assert_eq!(plan.parameters_to_target, Some(1));

        // No assessable parameters at all: nothing can suffice
        let empty = assess(&[]);
        let plan = roadmap(&empty);
        assert_eq!(plan.parameters_to_target, None);
        assert!(plan.priority_actions.is_empty());
    }
}
