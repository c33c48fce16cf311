//! API Route Handlers

pub mod history;
pub mod insights;
pub mod statistics;
pub mod telemetry;
