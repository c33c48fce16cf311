//! DriveGuard Data Simulator
//!
//! Fabricates vehicle telemetry and posts it to a running API server,
//! standing in for the in-vehicle unit during development. Scenarios
//! rotate randomly between safe, normal, and aggressive driving so the
//! dashboard has something interesting to show.

use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use sample_store::{EventFlags, TelemetrySample};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Posting cadence of the simulated unit
const SEND_INTERVAL: Duration = Duration::from_secs(2);

/// Default ingest endpoint, overridable via DRIVEGUARD_API
const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/v1/telemetry";

/// Driving scenario being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Safe,
    Normal,
    Aggressive,
}

impl Scenario {
    fn pick(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => Scenario::Safe,
            1 => Scenario::Normal,
            _ => Scenario::Aggressive,
        }
    }
}

/// Generate one sample; `heading` persists across calls so the course
/// wanders instead of jumping
fn generate_sample(rng: &mut impl Rng, heading: &mut f64, scenario: Scenario) -> TelemetrySample {
    let speed: f64 = match scenario {
        Scenario::Safe => rng.gen_range(40.0..70.0),
        Scenario::Normal => rng.gen_range(55.0..85.0),
        Scenario::Aggressive => rng.gen_range(80.0..110.0),
    };

    // RPM loosely tracks speed
    let rpm = (speed * 30.0 + rng.gen_range(-100.0..100.0)).clamp(800.0, 5000.0) as u32;

    // Wander around the Bangalore demo region
    let latitude = 12.9716 + rng.gen_range(-0.02..0.02);
    let longitude = 77.5946 + rng.gen_range(-0.02..0.02);

    // Heading drifts gently, with the occasional hard swerve when
    // driving aggressively
    let swerve = scenario == Scenario::Aggressive && rng.gen_bool(0.3);
    let delta = if swerve {
        rng.gen_range(60.0..120.0)
    } else {
        rng.gen_range(-10.0..10.0)
    };
    *heading = (*heading + delta).rem_euclid(360.0);

    TelemetrySample {
        device_id: Some("SIMULATOR_001".to_string()),
        timestamp: Utc::now(),
        speed: (speed * 10.0).round() / 10.0,
        rpm,
        latitude: Some(latitude),
        longitude: Some(longitude),
        heading: Some(*heading),
        flags: EventFlags::default(),
    }
}

/// The ingest response fields the simulator reports on
#[derive(Debug, Deserialize)]
struct IngestReply {
    risk_score: f64,
    risk_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let endpoint =
        std::env::var("DRIVEGUARD_API").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

    info!("=== DriveGuard Data Simulator ===");
    info!("Posting to {} every {:?}", endpoint, SEND_INTERVAL);

    let client = reqwest::Client::new();
    let mut heading = 90.0_f64;
    let mut count = 0u64;

    loop {
        count += 1;
        let (scenario, sample) = {
            let mut rng = rand::thread_rng();
            let scenario = Scenario::pick(&mut rng);
            (scenario, generate_sample(&mut rng, &mut heading, scenario))
        };

        match client.post(&endpoint).json(&sample).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<IngestReply>().await {
                    Ok(reply) => info!(
                        "[{count:04}] {scenario:?} | speed {:.1} km/h | score {:.1} ({})",
                        sample.speed, reply.risk_score, reply.risk_level
                    ),
                    Err(err) => warn!("[{count:04}] bad response body: {err}"),
                }
            }
            Ok(response) => warn!("[{count:04}] HTTP {}", response.status()),
            Err(err) => warn!("[{count:04}] {err} - is the server running?"),
        }

        tokio::time::sleep(SEND_INTERVAL).await;
    }
}
