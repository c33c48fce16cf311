//! Rule-Based Safety Tip Generation

use risk_engine::EventBreakdown;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tip priority tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipPriority {
    High,
    Medium,
    Low,
}

/// One actionable safety tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyTip {
    pub title: String,
    pub description: String,
    pub priority: TipPriority,
}

impl SafetyTip {
    fn new(title: &str, description: &str, priority: TipPriority) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            priority,
        }
    }
}

/// Advisory thresholds; a category's tip fires when its event count
/// strictly exceeds the threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    pub overspeed_threshold: u64,
    pub braking_threshold: u64,
    pub aggressive_accel_threshold: u64,
    pub sharp_turn_threshold: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            overspeed_threshold: 5,
            braking_threshold: 5,
            aggressive_accel_threshold: 3,
            sharp_turn_threshold: 3,
        }
    }
}

/// Generates prioritized safety tips from the window's event breakdown.
///
/// Rules are evaluated in a fixed declaration order; output keeps that
/// order. When no rule matches, a single positive-reinforcement tip is
/// emitted so the list is never empty.
pub struct AdvisoryEngine {
    config: AdvisoryConfig,
}

impl AdvisoryEngine {
    /// Create an engine with the given thresholds
    pub fn new(config: AdvisoryConfig) -> Self {
        Self { config }
    }

    /// Evaluate the rules against an event breakdown
    pub fn advise(&self, breakdown: &EventBreakdown) -> Vec<SafetyTip> {
        let mut tips = Vec::new();

        if breakdown.overspeed > self.config.overspeed_threshold {
            tips.push(SafetyTip::new(
                "Reduce Overspeeding",
                "You exceeded speed limits multiple times. Try using cruise control on highways.",
                TipPriority::High,
            ));
        }

        if breakdown.braking > self.config.braking_threshold {
            tips.push(SafetyTip::new(
                "Improve Braking Habits",
                "Frequent sudden braking detected. Maintain safe following distance and anticipate stops.",
                TipPriority::High,
            ));
        }

        if breakdown.aggressive_accel > self.config.aggressive_accel_threshold {
            tips.push(SafetyTip::new(
                "Gentle Acceleration",
                "Aggressive acceleration wastes fuel and increases risk. Accelerate smoothly and gradually.",
                TipPriority::Medium,
            ));
        }

        if breakdown.sharp_turn > self.config.sharp_turn_threshold {
            tips.push(SafetyTip::new(
                "Smooth Turning",
                "Sharp turns can be dangerous. Slow down before turns and steer gently.",
                TipPriority::Medium,
            ));
        }

        if tips.is_empty() {
            tips.push(SafetyTip::new(
                "Excellent Driving!",
                "Keep up the great work! Your driving behavior is exemplary.",
                TipPriority::Low,
            ));
        }

        debug!("Generated {} safety tips", tips.len());
        tips
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new(AdvisoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overspeed_tip_only() {
        let engine = AdvisoryEngine::default();
        let breakdown = EventBreakdown {
            overspeed: 6,
            ..Default::default()
        };

        let tips = engine.advise(&breakdown);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].title, "Reduce Overspeeding");
        assert_eq!(tips[0].priority, TipPriority::High);
    }

    #[test]
    fn test_clean_breakdown_gets_positive_tip() {
        let engine = AdvisoryEngine::default();
        let tips = engine.advise(&EventBreakdown::default());
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].title, "Excellent Driving!");
        assert_eq!(tips[0].priority, TipPriority::Low);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let engine = AdvisoryEngine::default();
        // Counts exactly at the thresholds do not fire
        let breakdown = EventBreakdown {
            overspeed: 5,
            braking: 5,
            aggressive_accel: 3,
            sharp_turn: 3,
        };
        let tips = engine.advise(&breakdown);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].priority, TipPriority::Low);
    }

    #[test]
    fn test_rules_fire_in_declaration_order() {
        let engine = AdvisoryEngine::default();
        let breakdown = EventBreakdown {
            overspeed: 9,
            braking: 7,
            aggressive_accel: 4,
            sharp_turn: 11,
        };

        let tips = engine.advise(&breakdown);
        let titles: Vec<&str> = tips.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Reduce Overspeeding",
                "Improve Braking Habits",
                "Gentle Acceleration",
                "Smooth Turning",
            ]
        );
        assert_eq!(tips[0].priority, TipPriority::High);
        assert_eq!(tips[2].priority, TipPriority::Medium);
    }

    #[test]
    fn test_no_positive_tip_alongside_warnings() {
        let engine = AdvisoryEngine::default();
        let breakdown = EventBreakdown {
            sharp_turn: 4,
            ..Default::default()
        };
        let tips = engine.advise(&breakdown);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].title, "Smooth Turning");
    }
}
