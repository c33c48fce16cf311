//! Safety Advisory System
//!
//! Provides rule-based, priority-tagged safety tips derived from the
//! current window's event breakdown.

mod engine;

pub use engine::{AdvisoryConfig, AdvisoryEngine, SafetyTip, TipPriority};
