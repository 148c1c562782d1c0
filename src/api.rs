use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::Thresholds;
use crate::engine::HealthScoreEngine;
use crate::error::InputError;
use crate::input::HealthInput;
use crate::metrics;
use crate::prediction::Prediction;
use crate::stats::ScoreStats;

const FEATURE_NAMES: [&str; 3] = ["age", "bmi", "workout_frequency"];
const VALIDATION_HELP: &str = "Please ensure all fields are numbers, age and bmi are greater \
than 0, and workout_frequency is between 0 and 7. Expected fields: age, bmi, workout_frequency";

#[derive(Clone)]
pub struct AppState {
    engine: Arc<HealthScoreEngine>,
    stats: ScoreStats,
}

impl AppState {
    /// Wraps the engine and surveys its score distribution once.
    pub fn new(engine: HealthScoreEngine) -> Self {
        let stats = ScoreStats::survey(&engine);
        Self {
            engine: Arc::new(engine),
            stats,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/model-info", get(model_info))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PredictReq {
    age: f64,
    bmi: f64,
    workout_frequency: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictResp {
    difficulty_level: &'static str,
    confidence_score: f64,
    recommendation: &'static str,
    health_score: f64,
    debug_info: DebugInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugInfo {
    input_data: InputData,
    health_score: f64,
    thresholds: ThresholdsOut,
    score_components: ComponentsOut,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InputData {
    age: f64,
    bmi: f64,
    workout_frequency: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThresholdsOut {
    easy_threshold: f64,
    medium_threshold: f64,
}

impl From<&Thresholds> for ThresholdsOut {
    fn from(t: &Thresholds) -> Self {
        Self {
            easy_threshold: t.easy,
            medium_threshold: t.medium,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentsOut {
    age_score: f64,
    bmi_score: f64,
    workout_score: f64,
}

impl From<&Prediction> for PredictResp {
    fn from(p: &Prediction) -> Self {
        Self {
            difficulty_level: p.difficulty.as_str(),
            confidence_score: round3(p.confidence),
            recommendation: p.recommendation,
            health_score: round3(p.health_score),
            debug_info: DebugInfo {
                input_data: InputData {
                    age: p.input.age(),
                    bmi: p.input.bmi(),
                    workout_frequency: p.input.workout_frequency(),
                },
                health_score: round3(p.health_score),
                thresholds: ThresholdsOut::from(&p.thresholds),
                score_components: ComponentsOut {
                    age_score: round3(p.components.age_score),
                    bmi_score: round3(p.components.bmi_score),
                    workout_score: round3(p.components.workout_score),
                },
            },
        }
    }
}

/// Floats on the wire are rounded to 3 decimals.
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictReq>, JsonRejection>,
) -> Result<Json<PredictResp>, ApiError> {
    let Json(req) = payload?;

    let input = HealthInput::new(req.age, req.bmi, req.workout_frequency).inspect_err(|e| {
        warn!(target: "api", error = %e, "rejected prediction input");
        metrics::record_rejection(e.field());
    })?;

    let p = state.engine.predict(&input);
    info!(
        target: "predict",
        age = input.age(),
        bmi = input.bmi(),
        workout_frequency = input.workout_frequency(),
        health_score = p.health_score,
        confidence = p.confidence,
        difficulty = %p.difficulty,
        "prediction served"
    );
    metrics::record_prediction(&p);

    Ok(Json(PredictResp::from(&p)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    model_type: &'static str,
    feature_names: [&'static str; 3],
    thresholds: ThresholdsOut,
    weights: WeightsOut,
    health_score_stats: ScoreStats,
}

#[derive(Debug, Serialize)]
struct WeightsOut {
    age: f64,
    bmi: f64,
    workout: f64,
}

fn model_info_of(state: &AppState) -> ModelInfo {
    let cfg = state.engine.config();
    ModelInfo {
        model_type: "Health Score Model",
        feature_names: FEATURE_NAMES,
        thresholds: ThresholdsOut::from(&cfg.thresholds),
        weights: WeightsOut {
            age: cfg.weights.age,
            bmi: cfg.weights.bmi,
            workout: cfg.weights.workout,
        },
        health_score_stats: state.stats,
    }
}

async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(model_info_of(&state))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthOut {
    status: &'static str,
    model_loaded: bool,
    model_info: ModelInfo,
}

async fn health(State(state): State<AppState>) -> Json<HealthOut> {
    Json(HealthOut {
        status: "healthy",
        model_loaded: true,
        model_info: model_info_of(&state),
    })
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "StepSync Health Score API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "predict": "/predict",
            "health": "/health",
            "modelInfo": "/model-info",
            "metrics": "/metrics"
        }
    }))
}

/* ----------------------------
Error responses
---------------------------- */

#[derive(Debug)]
pub enum ApiError {
    /// Body missing, not JSON, wrong types, or unknown fields.
    Malformed(JsonRejection),
    /// Well-formed body with a metric outside its hard domain.
    Invalid(InputError),
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::Malformed(r)
    }
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        ApiError::Invalid(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    code: u16,
    message: &'static str,
    details: Vec<String>,
    help: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::Malformed(r) => {
                warn!(target: "api", rejection = %r.body_text(), "invalid request body");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Validation error",
                    r.body_text(),
                )
            }
            ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, "Invalid input", e.to_string()),
        };

        let body = ErrorBody {
            status: "error",
            code: status.as_u16(),
            message,
            details: vec![detail],
            help: VALIDATION_HELP,
        };
        (status, Json(body)).into_response()
    }
}
