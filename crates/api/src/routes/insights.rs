//! Insights Routes

use axum::{extract::State, Json};

use crate::SharedState;
use telemetry_engine::DriverInsights;

/// Trend, behavior profile, and safety tips for the current window
pub async fn get_insights(State(state): State<SharedState>) -> Json<DriverInsights> {
    let state = state.read().await;
    Json(state.engine.insights())
}
