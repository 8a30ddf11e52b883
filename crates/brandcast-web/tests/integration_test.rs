//! Router tests for brandcast-web using in-process requests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use brandcast_common::test_utils::{create_temp_dir, uniform_events, write_daily_csv, write_event_log};
use brandcast_config::Config;
use brandcast_engine::BrandEngine;
use brandcast_forecast::test_utils::write_default_model;
use brandcast_web::{build_router, AppState};
use std::path::Path;
use tower::ServiceExt;

fn app(dir: &Path) -> axum::Router {
    let mut config = Config::default();
    config.artifacts.dir = dir.to_path_buf();
    config.chart.show_labels = false;
    let engine = BrandEngine::from_config(config).unwrap();
    build_router(AppState::new(engine).unwrap())
}

fn post_form(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_get_index_shows_form() {
    let dir = create_temp_dir();
    let response = app(dir.path())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<option value="Nike">Nike</option>"#));
    assert!(html.contains(r#"<option value="None">None</option>"#));
    assert!(!html.contains("scrollIntoView"));
}

#[tokio::test]
async fn test_post_renders_prediction_and_chart() {
    let dir = create_temp_dir();
    let values: Vec<f64> = (1..=20).map(f64::from).collect();
    write_daily_csv(dir.path(), "Nike", &values);
    write_daily_csv(dir.path(), "Adidas", &values);
    write_default_model(dir.path(), "Nike", 0.5);
    write_event_log(
        &dir.path().join("Social Media Engagement Dataset.csv"),
        &uniform_events("Nike", 4, "Positive", &["Tuesday"]),
    );

    let response = app(dir.path())
        .oneshot(post_form("brand=Nike&comp_brand=Adidas"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("10.5000"));
    assert!(html.contains("Trending DOWN"));
    assert!(html.contains("#ff4757"));
    assert!(html.contains("Tuesday"));
    assert!(html.contains("Positive 100%"));
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains("scrollIntoView"));
}

#[tokio::test]
async fn test_missing_artifacts_render_without_prediction() {
    let dir = create_temp_dir();
    let response = app(dir.path())
        .oneshot(post_form("brand=Google&comp_brand=None"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No trained model or daily data for Google."));
    assert!(!html.contains("data:image/png"));
    assert!(!html.contains("Trending"));
}

#[tokio::test]
async fn test_unknown_brand_is_bad_request() {
    let dir = create_temp_dir();
    let response = app(dir.path())
        .oneshot(post_form("brand=Puma"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(dir.path()).oneshot(post_form("comp_brand=None")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inference_failure_is_server_error() {
    let dir = create_temp_dir();
    write_daily_csv(dir.path(), "Apple", &[1.0, 2.0, 3.0]);
    write_default_model(dir.path(), "Apple", 0.5);

    // Three rows cannot fill a 14-day lookback window.
    let response = app(dir.path()).oneshot(post_form("brand=Apple")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("lookback"));
}

#[tokio::test]
async fn test_health_reports_event_log() {
    let dir = create_temp_dir();
    let response = app(dir.path())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["event_log_loaded"], false);
    assert_eq!(json["brands"].as_array().map(Vec::len), Some(4));
}
