//! Telemetry Routes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::SharedState;
use sample_store::{ClassifiedSample, EventFlags, RiskLevel, TelemetrySample};
use telemetry_engine::{IngestError, Snapshot};

/// Response for an accepted sample
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub flags: EventFlags,
}

/// Error body for a rejected sample
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

/// Ingest one telemetry sample
pub async fn ingest(
    State(state): State<SharedState>,
    Json(sample): Json<TelemetrySample>,
) -> Result<Json<IngestResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut state = state.write().await;

    match state.engine.ingest(sample) {
        Ok(outcome) => Ok(Json(IngestResponse {
            status: "success".to_string(),
            risk_score: outcome.risk_score,
            risk_level: outcome.risk_level,
            flags: outcome.flags,
        })),
        Err(err) => {
            let code = match err {
                IngestError::InvalidSample(_) => StatusCode::BAD_REQUEST,
                IngestError::OutOfOrderSample(_) => StatusCode::UNPROCESSABLE_ENTITY,
            };
            Err((
                code,
                Json(ErrorResponse {
                    status: "error".to_string(),
                    error: err.to_string(),
                }),
            ))
        }
    }
}

/// Response for the latest-sample endpoint
#[derive(Debug, Serialize)]
pub struct LatestResponse {
    pub data: Option<ClassifiedSample>,
}

/// Most recent classified sample, if any
pub async fn get_latest(State(state): State<SharedState>) -> Json<LatestResponse> {
    let state = state.read().await;
    Json(LatestResponse {
        data: state.engine.snapshot().latest,
    })
}

/// Latest sample plus window statistics in one consistent response
pub async fn get_snapshot(State(state): State<SharedState>) -> Json<Snapshot> {
    let state = state.read().await;
    Json(state.engine.snapshot())
}
