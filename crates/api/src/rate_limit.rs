//! Rate Limiting for the Ingest Route
//!
//! Vehicle units post on a fixed cadence, so the ingest endpoint gets a
//! GCRA limiter (via tower_governor) keyed by peer IP. Requires the
//! service to be built with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config with X-RateLimit-* response headers enabled
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Seconds per replenished request
    pub per_second: u64,
    /// Burst size (max requests served immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,  // One sample per second steady state
            burst_size: 10, // Absorb a unit flushing a backlog
        }
    }
}

impl RateLimitConfig {
    /// Strict config for a single low-rate unit
    pub fn strict() -> Self {
        Self {
            per_second: 2,
            burst_size: 3,
        }
    }
}

/// Create a rate limiting governor config.
///
/// Adds X-RateLimit-After / -Limit / -Remaining headers so a unit can
/// see its remaining quota.
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.per_second)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .expect("rate limit config must be non-zero"),
    )
}
