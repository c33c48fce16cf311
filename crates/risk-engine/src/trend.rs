//! Risk Score Trend Analysis

use serde::{Deserialize, Serialize};

/// Directional classification of the recent risk-score sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Recent scores rising: driving is getting safer
    Improving,
    /// Recent scores falling
    Declining,
    /// Enough data, no meaningful movement
    Stable,
    /// Not enough data to judge
    Neutral,
}

/// Trend over the most recent scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Percentage-point difference between the half-window means
    pub magnitude: f64,
}

/// Trend analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Number of trailing scores compared, split into two halves
    pub window: usize,
    /// Minimum half-window mean difference to call a direction
    pub delta_threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 10,
            delta_threshold: 5.0,
        }
    }
}

/// Classifies the direction of the recent risk-score sequence
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    /// Create an analyzer with the given config
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Compare the two halves of the last `window` scores.
    ///
    /// Fewer than `window` scores is a distinct `Neutral` state, not
    /// `Stable`: callers can tell "no data yet" from "flat".
    pub fn analyze(&self, scores: &[f64]) -> Trend {
        let window = self.config.window;
        if window < 2 || scores.len() < window {
            return Trend {
                direction: TrendDirection::Neutral,
                magnitude: 0.0,
            };
        }

        let recent = &scores[scores.len() - window..];
        let half = window / 2;
        let diff = mean(&recent[half..]) - mean(&recent[..half]);

        if diff > self.config.delta_threshold {
            Trend {
                direction: TrendDirection::Improving,
                magnitude: diff,
            }
        } else if diff < -self.config.delta_threshold {
            Trend {
                direction: TrendDirection::Declining,
                magnitude: -diff,
            }
        } else {
            Trend {
                direction: TrendDirection::Stable,
                magnitude: 0.0,
            }
        }
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new(TrendConfig::default())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
