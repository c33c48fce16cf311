//! Telemetry Sample Store
//!
//! Owns the core data model and the time-bounded, append-only history of
//! classified telemetry samples.

mod store;

pub use store::{SampleStore, StoreError, DEFAULT_RETENTION_HOURS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete risk-event flags derived from a sample and its predecessor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFlags {
    /// Speed above the configured limit
    pub overspeed: bool,
    /// Hard deceleration since the previous sample
    pub braking: bool,
    /// Hard acceleration since the previous sample
    pub aggressive_accel: bool,
    /// Rapid heading change since the previous sample
    pub sharp_turn: bool,
}

impl EventFlags {
    /// Number of flags currently raised
    pub fn active_count(&self) -> u32 {
        self.overspeed as u32
            + self.braking as u32
            + self.aggressive_accel as u32
            + self.sharp_turn as u32
    }

    /// Check if any flag is raised
    pub fn any(&self) -> bool {
        self.active_count() > 0
    }
}

/// One telemetry reading from a vehicle unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Reporting unit identifier (opaque to the engine)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Sample time; must not regress across the stream
    pub timestamp: DateTime<Utc>,
    /// Vehicle speed (km/h)
    pub speed: f64,
    /// Engine RPM
    pub rpm: u32,
    /// GPS latitude in degrees (absent = unknown, never zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// GPS longitude in degrees (absent = unknown, never zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// GPS course over ground in degrees [0, 360)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    /// Derived flags, filled in by the event detector (caller input ignored)
    #[serde(default)]
    pub flags: EventFlags,
}

/// Risk level band for a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score >= 80
    Low,
    /// Score in [60, 80)
    Medium,
    /// Score < 60
    High,
}

impl RiskLevel {
    /// Band for a score; ties at a band edge resolve to the safer band
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RiskLevel::Low
        } else if score >= 60.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Risk assessment attached to a sample at classification time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Score in [0, 100]; higher is safer
    pub risk_score: f64,
    /// Band derived from the score
    pub risk_level: RiskLevel,
}

/// Sample plus its assessment, as retained by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedSample {
    #[serde(flatten)]
    pub sample: TelemetrySample,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}
