// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod metrics;
pub mod prediction;
pub mod stats;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::ScoringConfig;
pub use crate::engine::HealthScoreEngine;
pub use crate::error::InputError;
pub use crate::input::HealthInput;
pub use crate::prediction::{Difficulty, Prediction, ScoreComponents};

/// Build the HTTP router from the environment's scoring config.
///
/// Metrics are not installed here (the recorder is process-global); the
/// binary merges `/metrics` on top.
pub fn app() -> anyhow::Result<axum::Router> {
    let cfg = ScoringConfig::load()?;
    let engine = HealthScoreEngine::new(cfg)?;
    Ok(router(AppState::new(engine)))
}
