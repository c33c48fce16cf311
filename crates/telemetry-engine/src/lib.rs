//! Telemetry Risk Monitor Engine
//!
//! Composes the sample store, validator, and analytics into a single
//! engine with an explicit read/write boundary: one writer ingests
//! samples, any number of readers take derived snapshots. The engine
//! holds no rendering or transport concerns; any frontend can poll its
//! read operations on whatever cadence it likes.

mod config;
mod engine;

pub use config::EngineConfig;
pub use engine::{
    DriverInsights, HistoryPoint, IngestError, IngestOutcome, Snapshot, TelemetryEngine,
};
