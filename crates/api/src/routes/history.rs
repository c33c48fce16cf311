//! History Routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::SharedState;
use telemetry_engine::HistoryPoint;

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Trailing duration to cover, in hours
    #[serde(default = "default_hours")]
    pub hours: i64,
}

fn default_hours() -> i64 {
    24
}

/// Response for the history endpoint
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryPoint>,
    pub count: usize,
}

/// Speed and risk-score history for charts
pub async fn get_history(
    State(state): State<SharedState>,
    Query(params): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let state = state.read().await;
    let history = state.engine.history(params.hours);

    Json(HistoryResponse {
        count: history.len(),
        history,
    })
}
