use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::Thresholds;
use crate::prediction::Prediction;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and publish the static threshold gauges.
    pub fn init(thresholds: &Thresholds) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;

        record_thresholds(thresholds);
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn record_thresholds(thresholds: &Thresholds) {
    gauge!("scoring_easy_threshold").set(thresholds.easy);
    gauge!("scoring_medium_threshold").set(thresholds.medium);
}

/// No-op until a recorder is installed.
pub fn record_prediction(p: &Prediction) {
    counter!("predictions_total", "difficulty" => p.difficulty.as_str()).increment(1);
    histogram!("health_score").record(p.health_score);
    histogram!("prediction_confidence").record(p.confidence);
}

pub fn record_rejection(field: &'static str) {
    counter!("prediction_rejections_total", "field" => field).increment(1);
}
