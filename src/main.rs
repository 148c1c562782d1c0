//! StepSync Health Score API - Binary Entrypoint
//! Boots the Axum HTTP server: scoring config, engine, routes and `/metrics`.

use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stepsync::metrics::Metrics;
use stepsync::{router, AppState, HealthScoreEngine, ScoringConfig};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - STEPSYNC_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("STEPSYNC_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("predict=info,config=info,api=info,warn"));

    // Shuttle may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();
    info!("Starting up StepSync Health Score API...");

    // Built once, never mutated afterwards.
    let cfg = ScoringConfig::load()?;
    let metrics = Metrics::init(&cfg.thresholds)?;
    let engine = HealthScoreEngine::new(cfg)?;

    let state = AppState::new(engine);
    let app = router(state).merge(metrics.router());

    info!("API startup complete");
    Ok(app.into())
}
