//! # HTTP API Tests
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

use tincture::TinctureError;
use tincture::preview::{PreviewBackend, PreviewRequest, PreviewResponse};
use tincture::server::{AppState, ServerConfig, router};

/// Backend answering every template with the same two shift rows.
/// Templates named `slow-*` answer after 200 ms.
struct FixedBackend;

#[async_trait]
impl PreviewBackend for FixedBackend {
    async fn fetch(&self, request: &PreviewRequest) -> Result<PreviewResponse, TinctureError> {
        if request.template_id.starts_with("slow-") {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        if request.template_id == "missing" {
            return Err(TinctureError::Transport("HTTP 404".into()));
        }
        Ok(serde_json::from_value(json!({
            "ok": true,
            "columns": ["Timestamp", "Seed", "Husk"],
            "data": [
                {"Timestamp": "2024-05-01 06:00", "Seed": 12, "Husk": 4},
                {"Timestamp": "2024-05-01 07:00", "Seed": 15, "Husk": 5}
            ]
        }))?)
    }
}

fn app() -> Router {
    let config = ServerConfig {
        listen_addr: "127.0.0.1:0".into(),
        backend_url: "http://backend.invalid".into(),
    };
    router(Arc::new(AppState::with_backend(config, Box::new(FixedBackend))))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    send_to(app(), request).await
}

async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    });
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_defaults() {
    let request = Request::builder()
        .uri("/api/style/defaults")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chart"]["type"], json!("bar"));
    assert_eq!(body["excel"]["sheet_name"], json!("Report"));
}

#[tokio::test]
async fn test_resolve_legacy_shape() {
    let (status, body) = send(post(
        "/api/style/resolve",
        json!({"ChartStyle": "{\"chartType\": \"line\"}"}),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chart"]["type"], json!("line"));
    assert_eq!(body["chart"]["dpi"], json!(100));
}

#[tokio::test]
async fn test_merge_replaces_arrays() {
    let (status, body) = send(post(
        "/api/style/merge",
        json!({
            "base": {"chart": {"palette": {"colors": ["#aa0000", "#bb0000"]}}},
            "patch": {"chart": {"palette": {"colors": ["#cc0000"]}}}
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["merged"]["chart"]["palette"]["colors"], json!(["#cc0000"]));
    assert_eq!(body["resolved"]["chart"]["palette"]["colors"], json!(["#cc0000"]));
}

#[tokio::test]
async fn test_chart_build() {
    let (status, body) = send(post(
        "/api/chart/build",
        json!({
            "style": {"chart": {"type": "line"}},
            "data": [{"x": "2024-01-01T00:00", "y": 10}, {"x": "2024-01-01T01:00", "y": 20}]
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ready"));
    assert_eq!(body["chart"]["kind"], json!("line"));
    assert_eq!(body["chart"]["x_axis"], json!({"type": "time", "unit": "minute"}));
    assert_eq!(body["chart"]["datasets"][0]["data"][1]["y"], json!(20.0));
}

#[tokio::test]
async fn test_chart_build_empty_and_invalid() {
    let (status, body) = send(post("/api/chart/build", json!({"data": []}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "no_data"}));

    let (status, _) = send(post(
        "/api/chart/build",
        json!({
            "data": [{"y": 1}],
            "chart_area": {"left": 100.0, "top": 0.0, "right": 10.0, "bottom": 50.0}
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_chart() {
    let (status, body) = send(post(
        "/api/preview",
        json!({
            "request": {
                "template_id": "shift-a",
                "format": "chart",
                "period_type": "shift",
                "time_of_day": "06:00"
            }
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session"].is_string());
    assert_eq!(body["loading"], json!(false));
    assert_eq!(body["preview"]["kind"], json!("chart"));
    let datasets = body["preview"]["chart"]["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[1]["label"], json!("Husk"));
}

#[tokio::test]
async fn test_preview_backend_failure() {
    let (status, body) = send(post(
        "/api/preview",
        json!({
            "request": {
                "template_id": "missing",
                "format": "table",
                "period_type": "day",
                "time_of_day": "00:00"
            }
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!("Transport error: HTTP 404"));
}

fn preview_body(session: Option<&str>, template: &str) -> Value {
    json!({
        "session": session,
        "request": {
            "template_id": template,
            "format": "text",
            "period_type": "shift",
            "time_of_day": "06:00"
        }
    })
}

#[tokio::test]
async fn test_preview_sessions_do_not_interfere() {
    let app = app();
    let first = tokio::spawn(send_to(app.clone(), post("/api/preview", preview_body(None, "slow-a"))));
    tokio::time::sleep(Duration::from_millis(50)).await;
    let (status_b, body_b) = send_to(app.clone(), post("/api/preview", preview_body(None, "b"))).await;
    let (status_a, body_a) = first.await.unwrap();

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_ne!(body_a["session"], body_b["session"]);
    assert_eq!(body_a["request"]["template_id"], json!("slow-a"));
    assert_eq!(body_b["request"]["template_id"], json!("b"));
}

#[tokio::test]
async fn test_newer_preview_in_session_wins() {
    let app = app();
    let (status, opened) = send_to(app.clone(), post("/api/preview", preview_body(None, "a"))).await;
    assert_eq!(status, StatusCode::OK);
    let session = opened["session"].as_str().unwrap().to_string();

    let older = tokio::spawn(send_to(
        app.clone(),
        post("/api/preview", preview_body(Some(&session), "slow-a")),
    ));
    tokio::time::sleep(Duration::from_millis(50)).await;
    let (status_b, body_b) =
        send_to(app.clone(), post("/api/preview", preview_body(Some(&session), "b"))).await;
    let (status_a, body_a) = older.await.unwrap();

    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(body_b["session"], json!(session));
    assert_eq!(body_b["generation"], json!(3));
    assert_eq!(status_a, StatusCode::CONFLICT);
    assert_eq!(body_a, json!("Superseded by a newer request"));
}

#[tokio::test]
async fn test_preview_unknown_session() {
    let (status, _) = send(post(
        "/api/preview",
        preview_body(Some("8a0d5f7e-2c1b-4c3e-9d4f-1a2b3c4d5e6f"), "a"),
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(post("/api/preview", preview_body(Some("not-a-uuid"), "a"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
