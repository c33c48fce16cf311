//! Instantaneous Risk Scoring

use chrono::Timelike;
use sample_store::{RiskAssessment, RiskLevel, TelemetrySample};
use serde::{Deserialize, Serialize};

/// Penalty weights for the scoring function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Penalty when the overspeed flag is raised
    pub overspeed_penalty: f64,
    /// Penalty when the hard-braking flag is raised
    pub braking_penalty: f64,
    /// Penalty when the aggressive-acceleration flag is raised
    pub aggressive_accel_penalty: f64,
    /// Penalty when the sharp-turn flag is raised
    pub sharp_turn_penalty: f64,
    /// Penalty applied inside the night window
    pub night_penalty: f64,
    /// First hour of the night window (UTC, inclusive)
    pub night_start_hour: u32,
    /// Last hour of the night window (UTC, inclusive)
    pub night_end_hour: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            overspeed_penalty: 25.0,
            braking_penalty: 20.0,
            aggressive_accel_penalty: 20.0,
            sharp_turn_penalty: 15.0,
            night_penalty: 20.0,
            night_start_hour: 22,
            night_end_hour: 5,
        }
    }
}

/// Maps a single sample to a risk score and level.
///
/// Higher score means safer driving. Scoring starts at 100 and subtracts
/// a penalty per raised event flag plus a night-driving penalty, clamped
/// to [0, 100]. Raising any flag can only lower the score.
pub struct RiskClassifier {
    config: ClassifierConfig,
}

impl RiskClassifier {
    /// Create a classifier with the given weights
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Score a sample. Pure and total: every input yields a score in
    /// [0, 100] and the band derived from it.
    pub fn classify(&self, sample: &TelemetrySample) -> RiskAssessment {
        let c = &self.config;
        let mut penalty = 0.0;

        if sample.flags.overspeed {
            penalty += c.overspeed_penalty;
        }
        if sample.flags.braking {
            penalty += c.braking_penalty;
        }
        if sample.flags.aggressive_accel {
            penalty += c.aggressive_accel_penalty;
        }
        if sample.flags.sharp_turn {
            penalty += c.sharp_turn_penalty;
        }
        if self.is_night(sample.timestamp.hour()) {
            penalty += c.night_penalty;
        }

        let risk_score = (100.0 - penalty).clamp(0.0, 100.0);
        RiskAssessment {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
        }
    }

    /// The night window wraps midnight when start > end (e.g. 22..5)
    fn is_night(&self, hour: u32) -> bool {
        let (start, end) = (self.config.night_start_hour, self.config.night_end_hour);
        if start <= end {
            (start..=end).contains(&hour)
        } else {
            hour >= start || hour <= end
        }
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
