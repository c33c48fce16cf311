//! Statistics Routes

use axum::{extract::State, Json};
use serde::Serialize;

use crate::SharedState;
use risk_engine::Statistics;

/// Response for the statistics endpoint
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub status: String,
    pub statistics: Statistics,
}

/// Rolling statistics over the retention window
pub async fn get_statistics(State(state): State<SharedState>) -> Json<StatisticsResponse> {
    let state = state.read().await;

    Json(StatisticsResponse {
        status: "success".to_string(),
        statistics: state.engine.statistics(),
    })
}
