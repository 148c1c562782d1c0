// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /, GET /health, GET /model-info
// - POST /predict (happy path, domain rejection, malformed bodies)

use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, StatusCode};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use stepsync::{router, AppState, HealthScoreEngine};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Router over the built-in default parameters (no config file, no env).
fn test_router() -> Router {
    router(AppState::new(HealthScoreEngine::default()))
}

async fn send(req: Request<Body>) -> (StatusCode, Json) {
    let resp = test_router().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    (status, v)
}

fn post_predict(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("build POST /predict")
}

#[tokio::test]
async fn root_lists_endpoints() {
    let req = Request::get("/").body(Body::empty()).unwrap();
    let (status, v) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], json!("healthy"));
    assert_eq!(v["endpoints"]["predict"], json!("/predict"));
    assert_eq!(v["endpoints"]["modelInfo"], json!("/model-info"));
}

#[tokio::test]
async fn health_reports_loaded_model_and_thresholds() {
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, v) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["modelLoaded"], json!(true));
    assert_eq!(v["modelInfo"]["thresholds"]["easyThreshold"], json!(0.6));
    assert_eq!(v["modelInfo"]["thresholds"]["mediumThreshold"], json!(0.88));
}

#[tokio::test]
async fn model_info_exposes_weights_and_stats() {
    let req = Request::get("/model-info").body(Body::empty()).unwrap();
    let (status, v) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["modelType"], json!("Health Score Model"));
    assert_eq!(
        v["featureNames"],
        json!(["age", "bmi", "workout_frequency"])
    );
    assert_eq!(v["weights"]["workout"], json!(0.5));

    let stats = &v["healthScoreStats"];
    let min = stats["min"].as_f64().unwrap();
    let mean = stats["mean"].as_f64().unwrap();
    let max = stats["max"].as_f64().unwrap();
    assert!(0.0 <= min && min <= mean && mean <= max && max <= 1.0);
    assert!(stats["std"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn predict_returns_medium_for_reference_profile() {
    let payload = json!({ "age": 25, "bmi": 22.5, "workout_frequency": 3 });
    let (status, v) = send(post_predict(payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);

    // Contract checks for UI consumers
    assert_eq!(v["difficultyLevel"], json!("Medium"));
    assert_eq!(v["healthScore"], json!(0.824));
    assert!(v["confidenceScore"].as_f64().unwrap() > 0.0);
    assert!(v["recommendation"]
        .as_str()
        .unwrap()
        .contains("moderate intensity"));

    let dbg = &v["debugInfo"];
    assert_eq!(dbg["inputData"]["age"], json!(25.0));
    assert_eq!(dbg["scoreComponents"]["ageScore"], json!(1.0));
    assert_eq!(dbg["thresholds"]["mediumThreshold"], json!(0.88));
}

#[tokio::test]
async fn predict_extreme_profiles() {
    let (_, easy) =
        send(post_predict(json!({ "age": 70, "bmi": 35, "workout_frequency": 0 }).to_string()))
            .await;
    assert_eq!(easy["difficultyLevel"], json!("Easy"));

    let (_, hard) =
        send(post_predict(json!({ "age": 28, "bmi": 21, "workout_frequency": 5 }).to_string()))
            .await;
    assert_eq!(hard["difficultyLevel"], json!("Hard"));
}

#[tokio::test]
async fn predict_rejects_out_of_domain_values_with_400() {
    for payload in [
        json!({ "age": -5, "bmi": 22, "workout_frequency": 3 }),
        json!({ "age": 30, "bmi": 0, "workout_frequency": 3 }),
        json!({ "age": 30, "bmi": 22, "workout_frequency": 8 }),
    ] {
        let (status, v) = send(post_predict(payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(v["status"], json!("error"));
        assert_eq!(v["code"], json!(400));
        assert_eq!(v["message"], json!("Invalid input"));
        assert!(v["details"][0].as_str().unwrap().contains("is invalid"));
    }
}

#[tokio::test]
async fn predict_rejects_malformed_bodies_with_422() {
    for body in [
        json!({ "age": 30, "bmi": 22 }).to_string(),
        json!({ "age": "thirty", "bmi": 22, "workout_frequency": 3 }).to_string(),
        json!({ "age": 30, "bmi": 22, "workout_frequency": 3, "height": 180 }).to_string(),
    ] {
        let (status, v) = send(post_predict(body.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
        assert_eq!(v["code"], json!(422));
        assert_eq!(v["message"], json!("Validation error"));
        assert!(v["help"].as_str().unwrap().contains("workout_frequency"));
    }
}

#[tokio::test]
async fn predict_rejects_non_json_with_422() {
    let req = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from("age=30"))
        .unwrap();
    let (status, v) = send(req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["status"], json!("error"));
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/predict")
        .header("origin", "https://app.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert!(resp
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn app_builds_from_repo_config() {
    // cargo runs integration tests from the crate root, where config/scoring.toml lives
    let app = stepsync::app().expect("app() should build a Router");
    let resp = app
        .oneshot(Request::get("/model-info").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
