//! Rolling Window Statistics

use sample_store::ClassifiedSample;
use serde::{Deserialize, Serialize};

/// Per-category event counts over a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBreakdown {
    pub overspeed: u64,
    pub braking: u64,
    pub aggressive_accel: u64,
    pub sharp_turn: u64,
}

impl EventBreakdown {
    /// Sum of all category counts
    pub fn total(&self) -> u64 {
        self.overspeed + self.braking + self.aggressive_accel + self.sharp_turn
    }
}

/// Point-in-time summary of the retention window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Samples currently in the window
    pub total_data_points: usize,
    /// Mean risk score, 0 when the window is empty
    pub average_risk_score: f64,
    /// Mean speed in km/h, 0 when the window is empty
    pub average_speed: f64,
    /// Highest speed seen in the window
    pub max_speed: f64,
    /// Lowest risk score seen in the window
    pub min_risk_score: f64,
    /// Highest risk score seen in the window
    pub max_risk_score: f64,
    /// Sum of all event counts
    pub total_events: u64,
    /// Per-category event counts
    pub events_breakdown: EventBreakdown,
}

impl Statistics {
    /// Compute statistics over a window of classified samples.
    ///
    /// Single pass over the window; an empty window yields the all-zero
    /// sentinel rather than an error.
    pub fn compute<'a, I>(window: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedSample>,
    {
        let mut stats = Self::default();
        let mut speed_sum = 0.0;
        let mut score_sum = 0.0;
        let mut min_score = f64::MAX;
        let mut max_score = f64::MIN;

        for entry in window {
            stats.total_data_points += 1;
            speed_sum += entry.sample.speed;
            score_sum += entry.assessment.risk_score;
            stats.max_speed = stats.max_speed.max(entry.sample.speed);
            min_score = min_score.min(entry.assessment.risk_score);
            max_score = max_score.max(entry.assessment.risk_score);

            let flags = &entry.sample.flags;
            if flags.overspeed {
                stats.events_breakdown.overspeed += 1;
            }
            if flags.braking {
                stats.events_breakdown.braking += 1;
            }
            if flags.aggressive_accel {
                stats.events_breakdown.aggressive_accel += 1;
            }
            if flags.sharp_turn {
                stats.events_breakdown.sharp_turn += 1;
            }
        }

        if stats.total_data_points > 0 {
            let n = stats.total_data_points as f64;
            stats.average_speed = speed_sum / n;
            stats.average_risk_score = score_sum / n;
            stats.min_risk_score = min_score;
            stats.max_risk_score = max_score;
        }
        stats.total_events = stats.events_breakdown.total();

        stats
    }
}
