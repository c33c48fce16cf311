//! Driver Safety Telemetry API Server
//!
//! REST API for the driver-safety dashboard: ingests vehicle telemetry
//! and serves risk snapshots, statistics, history, and insights.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod rate_limit;
mod routes;
mod settings;

pub use rate_limit::{create_governor_config, RateLimitConfig};
pub use settings::Settings;

use telemetry_engine::TelemetryEngine;

/// Application state shared across handlers
pub struct AppState {
    /// The telemetry engine (single writer, many readers)
    pub engine: TelemetryEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state around a configured engine
    pub fn new(engine: TelemetryEngine) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Shared handle used by every handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub uptime_seconds: u64,
    pub sample_count: usize,
}

/// Create the application router.
///
/// The ingest route carries its own rate limit; the dashboard reads are
/// cheap, idempotent polls and stay unlimited. CORS is permissive since
/// the dashboard is served from a separate origin.
pub fn create_router(state: SharedState) -> Router {
    let governor_config = create_governor_config(&RateLimitConfig::default());

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route(
            "/api/v1/telemetry",
            post(routes::telemetry::ingest).layer(GovernorLayer {
                config: governor_config,
            }),
        )
        .route(
            "/api/v1/telemetry/latest",
            get(routes::telemetry::get_latest),
        )
        .route("/api/v1/snapshot", get(routes::telemetry::get_snapshot))
        .route("/api/v1/statistics", get(routes::statistics::get_statistics))
        .route("/api/v1/history", get(routes::history::get_history))
        .route("/api/v1/insights", get(routes::insights::get_insights))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        sample_count: state.engine.sample_count(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let engine = TelemetryEngine::new(settings.engine.clone());
    let state = Arc::new(RwLock::new(AppState::new(engine)));
    let app = create_router(state);

    info!("Starting API server on {}", settings.listen_addr);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    // Peer addresses feed the rate limiter's key extractor
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
