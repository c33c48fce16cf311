//! Engine Facade Implementation

use crate::config::EngineConfig;
use advisory::{AdvisoryEngine, SafetyTip};
use chrono::{DateTime, Duration, Utc};
use data_validator::{ValidationError, Validator};
use risk_engine::{
    BehaviorProfile, BehaviorScorer, EventDetector, RiskClassifier, Statistics, Trend,
    TrendAnalyzer,
};
use sample_store::{
    ClassifiedSample, EventFlags, RiskLevel, SampleStore, StoreError, TelemetrySample,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors local to a single ingest call.
///
/// A failed ingest drops the offending sample and never touches
/// previously retained state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    /// Sample fields failed validation
    #[error("invalid sample: {0}")]
    InvalidSample(#[from] ValidationError),
    /// Sample timestamp regressed behind the stream
    #[error(transparent)]
    OutOfOrderSample(#[from] StoreError),
}

/// What the ingest path computed for an accepted sample
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub flags: EventFlags,
}

/// Current-instant view of the engine
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub latest: Option<ClassifiedSample>,
    pub statistics: Statistics,
}

/// One point of the speed / risk-score history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub speed: f64,
    pub risk_score: f64,
}

/// Derived driving report: trend, behavior profile, and safety tips
#[derive(Debug, Clone, Serialize)]
pub struct DriverInsights {
    pub trend: Trend,
    pub behavior: BehaviorProfile,
    pub tips: Vec<SafetyTip>,
}

/// The telemetry aggregation and risk-classification engine.
///
/// Single logical writer (`ingest` takes `&mut self`); every other
/// operation is a pure read over the retained window. Callers needing
/// concurrent access wrap the engine in `Arc<RwLock<_>>` so readers see
/// each append as one atomic step.
pub struct TelemetryEngine {
    store: SampleStore,
    validator: Validator,
    detector: EventDetector,
    classifier: RiskClassifier,
    trend: TrendAnalyzer,
    behavior: BehaviorScorer,
    advisory: AdvisoryEngine,
}

impl TelemetryEngine {
    /// Build an engine from its configuration surface
    pub fn new(config: EngineConfig) -> Self {
        info!(
            "Creating telemetry engine (retention {} h)",
            config.retention_hours
        );
        Self {
            store: SampleStore::new(Duration::hours(config.retention_hours)),
            validator: Validator::new(config.validation),
            detector: EventDetector::new(config.detector),
            classifier: RiskClassifier::new(config.classifier),
            trend: TrendAnalyzer::new(config.trend),
            behavior: BehaviorScorer::new(config.behavior),
            advisory: AdvisoryEngine::new(config.advisory),
        }
    }

    /// Validate, flag, classify, and retain one sample.
    ///
    /// Caller-supplied flags are ignored; the detector recomputes them
    /// against the previous retained sample.
    pub fn ingest(
        &mut self,
        mut sample: TelemetrySample,
    ) -> Result<IngestOutcome, IngestError> {
        self.validator.validate(&sample)?;

        sample.flags = self
            .detector
            .detect(&sample, self.store.latest().map(|entry| &entry.sample));
        let assessment = self.classifier.classify(&sample);
        let outcome = IngestOutcome {
            risk_score: assessment.risk_score,
            risk_level: assessment.risk_level,
            flags: sample.flags,
        };

        self.store.append(ClassifiedSample { sample, assessment })?;
        debug!(
            "Ingested sample: score {:.1} ({:?})",
            outcome.risk_score, outcome.risk_level
        );
        Ok(outcome)
    }

    /// Latest sample plus window statistics in one consistent view
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            latest: self.store.latest().cloned(),
            statistics: self.statistics(),
        }
    }

    /// Statistics over the current retention window
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(self.store.window())
    }

    /// Speed / risk-score sequence covering the trailing `hours`.
    ///
    /// Measured back from the newest retained sample; the retention
    /// window caps how far back the result can reach.
    pub fn history(&self, hours: i64) -> Vec<HistoryPoint> {
        let Some(latest) = self.store.latest() else {
            return Vec::new();
        };

        let cutoff = latest.sample.timestamp - Duration::hours(hours.max(0));
        self.store
            .samples_since(cutoff)
            .map(|entry| HistoryPoint {
                timestamp: entry.sample.timestamp,
                speed: entry.sample.speed,
                risk_score: entry.assessment.risk_score,
            })
            .collect()
    }

    /// Trend, behavior profile, and safety tips for the current window
    pub fn insights(&self) -> DriverInsights {
        let statistics = self.statistics();
        let scores = self.store.recent_scores(self.store.len());
        let average = (statistics.total_data_points > 0)
            .then_some(statistics.average_risk_score);

        DriverInsights {
            trend: self.trend.analyze(&scores),
            behavior: self.behavior.score(&statistics.events_breakdown, average),
            tips: self.advisory.advise(&statistics.events_breakdown),
        }
    }

    /// Number of retained samples
    pub fn sample_count(&self) -> usize {
        self.store.len()
    }
}

impl Default for TelemetryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
