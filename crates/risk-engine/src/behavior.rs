//! Behavioral Category Scoring

use crate::aggregator::EventBreakdown;
use serde::{Deserialize, Serialize};

/// Behavior scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Points deducted per event in a category
    pub event_penalty: f64,
    /// Consistency score used when no statistics are available
    pub default_consistency: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            event_penalty: 10.0,
            default_consistency: 75.0,
        }
    }
}

/// Normalized 0-100 score per behavioral category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    /// Penalized by overspeed events
    pub speed_control: f64,
    /// Penalized by hard-braking events
    pub braking_smoothness: f64,
    /// Penalized by aggressive-acceleration events
    pub acceleration_smoothness: f64,
    /// Penalized by sharp-turn events
    pub turn_smoothness: f64,
    /// Mirrors the window's average risk score
    pub consistency: f64,
}

/// Maps event counts to per-category behavior scores
pub struct BehaviorScorer {
    config: BehaviorConfig,
}

impl BehaviorScorer {
    /// Create a scorer with the given config
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config }
    }

    /// Score each category; `average_risk_score` is `None` when the
    /// window holds no samples.
    pub fn score(
        &self,
        breakdown: &EventBreakdown,
        average_risk_score: Option<f64>,
    ) -> BehaviorProfile {
        BehaviorProfile {
            speed_control: self.category_score(breakdown.overspeed),
            braking_smoothness: self.category_score(breakdown.braking),
            acceleration_smoothness: self.category_score(breakdown.aggressive_accel),
            turn_smoothness: self.category_score(breakdown.sharp_turn),
            consistency: average_risk_score.unwrap_or(self.config.default_consistency),
        }
    }

    fn category_score(&self, count: u64) -> f64 {
        (100.0 - self.config.event_penalty * count as f64).clamp(0.0, 100.0)
    }
}

impl Default for BehaviorScorer {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_breakdown_scores_full_marks() {
        let scorer = BehaviorScorer::default();
        let profile = scorer.score(&EventBreakdown::default(), Some(88.0));
        assert_eq!(profile.speed_control, 100.0);
        assert_eq!(profile.braking_smoothness, 100.0);
        assert_eq!(profile.acceleration_smoothness, 100.0);
        assert_eq!(profile.turn_smoothness, 100.0);
        assert_eq!(profile.consistency, 88.0);
    }

    #[test]
    fn test_ten_events_clamp_to_zero() {
        let scorer = BehaviorScorer::default();
        let breakdown = EventBreakdown {
            overspeed: 10,
            braking: 14,
            ..Default::default()
        };
        let profile = scorer.score(&breakdown, Some(50.0));
        assert_eq!(profile.speed_control, 0.0);
        assert_eq!(profile.braking_smoothness, 0.0);
    }

    #[test]
    fn test_partial_penalties() {
        let scorer = BehaviorScorer::default();
        let breakdown = EventBreakdown {
            aggressive_accel: 3,
            sharp_turn: 1,
            ..Default::default()
        };
        let profile = scorer.score(&breakdown, Some(70.0));
        assert_eq!(profile.acceleration_smoothness, 70.0);
        assert_eq!(profile.turn_smoothness, 90.0);
    }

    #[test]
    fn test_missing_statistics_use_default_consistency() {
        let scorer = BehaviorScorer::default();
        let profile = scorer.score(&EventBreakdown::default(), None);
        assert_eq!(profile.consistency, 75.0);
    }
}
