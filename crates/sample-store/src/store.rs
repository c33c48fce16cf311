//! Retention-Windowed Sample Store

use crate::ClassifiedSample;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::debug;

/// Default retention window in hours
pub const DEFAULT_RETENTION_HOURS: i64 = 24;

/// Errors from the append path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Incoming timestamp regresses behind the newest retained sample
    #[error("sample at {incoming} precedes last appended sample at {last}")]
    OutOfOrderSample {
        incoming: DateTime<Utc>,
        last: DateTime<Utc>,
    },
}

/// Append-only, time-bounded history of classified samples.
///
/// The stream clock doubles as the eviction clock: each append evicts
/// entries older than the incoming timestamp minus the retention window,
/// so the store never consults the wall clock.
pub struct SampleStore {
    samples: VecDeque<ClassifiedSample>,
    retention: Duration,
}

impl SampleStore {
    /// Create a store with the given retention window
    pub fn new(retention: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            retention,
        }
    }

    /// Create a store with the default 24 h retention
    pub fn with_default_retention() -> Self {
        Self::new(Duration::hours(DEFAULT_RETENTION_HOURS))
    }

    /// Append a classified sample.
    ///
    /// Rejects timestamps that regress behind the newest retained sample,
    /// leaving the store unmodified; equal timestamps are accepted.
    /// Eviction of expired entries happens as part of the same append.
    pub fn append(&mut self, entry: ClassifiedSample) -> Result<(), StoreError> {
        if let Some(last) = self.samples.back() {
            if entry.sample.timestamp < last.sample.timestamp {
                return Err(StoreError::OutOfOrderSample {
                    incoming: entry.sample.timestamp,
                    last: last.sample.timestamp,
                });
            }
        }

        let cutoff = entry.sample.timestamp - self.retention;
        self.samples.push_back(entry);

        let mut evicted = 0usize;
        while let Some(front) = self.samples.front() {
            if front.sample.timestamp < cutoff {
                self.samples.pop_front();
                evicted += 1;
            } else {
                break;
            }
        }
        if evicted > 0 {
            debug!("Evicted {} samples past the retention window", evicted);
        }

        Ok(())
    }

    /// Iterate retained samples, oldest first
    pub fn window(&self) -> impl Iterator<Item = &ClassifiedSample> {
        self.samples.iter()
    }

    /// Retained samples at or after the cutoff, oldest first
    pub fn samples_since(&self, cutoff: DateTime<Utc>) -> impl Iterator<Item = &ClassifiedSample> {
        self.samples
            .iter()
            .skip_while(move |s| s.sample.timestamp < cutoff)
    }

    /// Most recent sample, if any
    pub fn latest(&self) -> Option<&ClassifiedSample> {
        self.samples.back()
    }

    /// Risk scores of the most recent `count` samples, oldest first
    pub fn recent_scores(&self, count: usize) -> Vec<f64> {
        let skip = self.samples.len().saturating_sub(count);
        self.samples
            .iter()
            .skip(skip)
            .map(|s| s.assessment.risk_score)
            .collect()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the store holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Configured retention window
    pub fn retention(&self) -> Duration {
        self.retention
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventFlags, RiskAssessment, RiskLevel, TelemetrySample};
    use chrono::TimeZone;

    fn sample_at(minutes: i64, score: f64) -> ClassifiedSample {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()
            + Duration::minutes(minutes);
        ClassifiedSample {
            sample: TelemetrySample {
                device_id: None,
                timestamp,
                speed: 60.0,
                rpm: 1800,
                latitude: None,
                longitude: None,
                heading: None,
                flags: EventFlags::default(),
            },
            assessment: RiskAssessment {
                risk_score: score,
                risk_level: RiskLevel::from_score(score),
            },
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = SampleStore::with_default_retention();
        for i in 0..5 {
            store.append(sample_at(i, 100.0 - i as f64)).unwrap();
        }

        assert_eq!(store.len(), 5);
        let scores: Vec<f64> = store.window().map(|s| s.assessment.risk_score).collect();
        assert_eq!(scores, vec![100.0, 99.0, 98.0, 97.0, 96.0]);
        assert_eq!(store.latest().unwrap().assessment.risk_score, 96.0);
    }

    #[test]
    fn test_rejects_out_of_order() {
        let mut store = SampleStore::with_default_retention();
        store.append(sample_at(10, 90.0)).unwrap();

        let err = store.append(sample_at(5, 80.0)).unwrap_err();
        assert!(matches!(err, StoreError::OutOfOrderSample { .. }));

        // Store unmodified by the failed append
        assert_eq!(store.len(), 1);
        assert_eq!(store.latest().unwrap().assessment.risk_score, 90.0);
    }

    #[test]
    fn test_accepts_equal_timestamps() {
        let mut store = SampleStore::with_default_retention();
        store.append(sample_at(10, 90.0)).unwrap();
        store.append(sample_at(10, 85.0)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_evicts_past_retention() {
        let mut store = SampleStore::new(Duration::hours(1));
        store.append(sample_at(0, 90.0)).unwrap();
        store.append(sample_at(30, 85.0)).unwrap();
        // Two hours in: the first two samples are now outside the window
        store.append(sample_at(120, 80.0)).unwrap();

        assert_eq!(store.len(), 2);
        let scores: Vec<f64> = store.window().map(|s| s.assessment.risk_score).collect();
        assert_eq!(scores, vec![85.0, 80.0]);
    }

    #[test]
    fn test_sample_exactly_at_cutoff_is_retained() {
        let mut store = SampleStore::new(Duration::hours(1));
        store.append(sample_at(0, 90.0)).unwrap();
        store.append(sample_at(60, 80.0)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_recent_scores_tail() {
        let mut store = SampleStore::with_default_retention();
        for i in 0..8 {
            store.append(sample_at(i, 50.0 + i as f64)).unwrap();
        }

        assert_eq!(store.recent_scores(3), vec![55.0, 56.0, 57.0]);
        // Asking for more than retained returns everything
        assert_eq!(store.recent_scores(100).len(), 8);
    }

    #[test]
    fn test_samples_since() {
        let mut store = SampleStore::with_default_retention();
        for i in 0..6 {
            store.append(sample_at(i * 10, 90.0)).unwrap();
        }

        let cutoff = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
        assert_eq!(store.samples_since(cutoff).count(), 3);
    }
}
