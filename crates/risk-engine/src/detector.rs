//! Risk Event Detection

use sample_store::{EventFlags, TelemetrySample};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Detection thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Speed above which the overspeed flag is raised (km/h)
    pub overspeed_kmh: f64,
    /// Deceleration treated as hard braking (km/h per second)
    pub hard_brake_kmh_per_sec: f64,
    /// Acceleration treated as aggressive (km/h per second)
    pub aggressive_accel_kmh_per_sec: f64,
    /// Heading change rate treated as a sharp turn (degrees per second)
    pub sharp_turn_deg_per_sec: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            overspeed_kmh: 80.0,
            hard_brake_kmh_per_sec: 15.0,
            aggressive_accel_kmh_per_sec: 12.0,
            sharp_turn_deg_per_sec: 30.0,
        }
    }
}

/// Derives discrete risk-event flags from a sample and its predecessor
pub struct EventDetector {
    config: DetectorConfig,
}

impl EventDetector {
    /// Create a detector with the given thresholds
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Detect event flags for `sample`.
    ///
    /// `overspeed` needs only the current sample. The delta flags
    /// (`braking`, `aggressive_accel`, `sharp_turn`) need a predecessor
    /// and stay false without one; a single point never implies a delta.
    pub fn detect(
        &self,
        sample: &TelemetrySample,
        previous: Option<&TelemetrySample>,
    ) -> EventFlags {
        let mut flags = EventFlags {
            overspeed: sample.speed > self.config.overspeed_kmh,
            ..EventFlags::default()
        };

        let Some(prev) = previous else {
            return flags;
        };

        let elapsed =
            (sample.timestamp - prev.timestamp).num_milliseconds() as f64 / 1000.0;
        if elapsed <= 0.0 {
            return flags;
        }

        let speed_rate = (sample.speed - prev.speed) / elapsed;
        flags.braking = -speed_rate > self.config.hard_brake_kmh_per_sec;
        flags.aggressive_accel = speed_rate > self.config.aggressive_accel_kmh_per_sec;

        if let (Some(heading), Some(prev_heading)) = (sample.heading, prev.heading) {
            let turn_rate = angular_difference(heading, prev_heading) / elapsed;
            flags.sharp_turn = turn_rate > self.config.sharp_turn_deg_per_sec;
        }

        if flags.any() {
            debug!(
                "Risk events at {}: {:?} (speed rate {:.1} km/h/s)",
                sample.timestamp, flags, speed_rate
            );
        }

        flags
    }
}

impl Default for EventDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

/// Minimal angular difference between two headings, in [0, 180]
fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn sample(seconds: i64, speed: f64, heading: Option<f64>) -> TelemetrySample {
        TelemetrySample {
            device_id: None,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
                + Duration::seconds(seconds),
            speed,
            rpm: 2000,
            latitude: None,
            longitude: None,
            heading,
            flags: EventFlags::default(),
        }
    }

    #[test]
    fn test_first_sample_has_no_delta_flags() {
        let detector = EventDetector::default();
        // Massive speed, but no predecessor: only overspeed may fire
        let flags = detector.detect(&sample(0, 120.0, Some(90.0)), None);
        assert!(flags.overspeed);
        assert!(!flags.braking);
        assert!(!flags.aggressive_accel);
        assert!(!flags.sharp_turn);
    }

    #[test]
    fn test_overspeed_threshold_is_strict() {
        let detector = EventDetector::default();
        assert!(!detector.detect(&sample(0, 79.9, None), None).overspeed);
        assert!(!detector.detect(&sample(0, 80.0, None), None).overspeed);
        assert!(detector.detect(&sample(0, 80.1, None), None).overspeed);
    }

    #[test]
    fn test_hard_braking() {
        let detector = EventDetector::default();
        let prev = sample(0, 80.0, None);
        // 30 km/h lost in one second
        let flags = detector.detect(&sample(1, 50.0, None), Some(&prev));
        assert!(flags.braking);
        assert!(!flags.aggressive_accel);
    }

    #[test]
    fn test_aggressive_acceleration() {
        let detector = EventDetector::default();
        let prev = sample(0, 40.0, None);
        let flags = detector.detect(&sample(1, 55.0, None), Some(&prev));
        assert!(flags.aggressive_accel);
        assert!(!flags.braking);
    }

    #[test]
    fn test_gentle_speed_change_raises_nothing() {
        let detector = EventDetector::default();
        let prev = sample(0, 60.0, None);
        let flags = detector.detect(&sample(2, 66.0, None), Some(&prev));
        assert!(!flags.braking);
        assert!(!flags.aggressive_accel);
    }

    #[test]
    fn test_sharp_turn() {
        let detector = EventDetector::default();
        let prev = sample(0, 50.0, Some(10.0));
        let flags = detector.detect(&sample(1, 50.0, Some(80.0)), Some(&prev));
        assert!(flags.sharp_turn);
    }

    #[test]
    fn test_heading_wraparound() {
        let detector = EventDetector::default();
        // 350 -> 10 degrees is a 20 degree turn, not 340
        let prev = sample(0, 50.0, Some(350.0));
        let flags = detector.detect(&sample(1, 50.0, Some(10.0)), Some(&prev));
        assert!(!flags.sharp_turn);
    }

    #[test]
    fn test_missing_heading_never_turns() {
        let detector = EventDetector::default();
        let prev = sample(0, 50.0, None);
        let flags = detector.detect(&sample(1, 50.0, Some(170.0)), Some(&prev));
        assert!(!flags.sharp_turn);
    }

    #[test]
    fn test_zero_elapsed_has_no_delta_flags() {
        let detector = EventDetector::default();
        let prev = sample(0, 100.0, Some(0.0));
        let flags = detector.detect(&sample(0, 20.0, Some(180.0)), Some(&prev));
        assert!(!flags.braking);
        assert!(!flags.sharp_turn);
    }
}
