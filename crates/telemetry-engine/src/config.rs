//! Engine Configuration

use advisory::AdvisoryConfig;
use data_validator::ValidationConfig;
use risk_engine::{BehaviorConfig, ClassifierConfig, DetectorConfig, TrendConfig};
use sample_store::DEFAULT_RETENTION_HOURS;
use serde::{Deserialize, Serialize};

/// Full configuration surface of the engine.
///
/// Every field deserializes with a default so partial config files and
/// environment overrides compose cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Sample retention window in hours
    #[serde(default = "default_retention_hours")]
    pub retention_hours: i64,
    /// Accepted input ranges
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Event detection thresholds
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Risk scoring weights
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Trend window and delta threshold
    #[serde(default)]
    pub trend: TrendConfig,
    /// Behavior scoring parameters
    #[serde(default)]
    pub behavior: BehaviorConfig,
    /// Safety tip thresholds
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

fn default_retention_hours() -> i64 {
    DEFAULT_RETENTION_HOURS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retention_hours: DEFAULT_RETENTION_HOURS,
            validation: ValidationConfig::default(),
            detector: DetectorConfig::default(),
            classifier: ClassifierConfig::default(),
            trend: TrendConfig::default(),
            behavior: BehaviorConfig::default(),
            advisory: AdvisoryConfig::default(),
        }
    }
}
