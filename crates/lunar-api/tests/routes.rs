//! In-process tests for the HTTP endpoints.
//!
//! Each test builds an `App`, wires `routes::build_router` to it and drives
//! the router via `tower::ServiceExt::oneshot`; no socket is bound.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lunar_api::routes::{self, AppState};
use lunar_core::Config;
use lunar_core::app::{App, AppBuilder};
use lunar_core::domain::MessageEnvelope;
use lunar_core::ports::{DeliveryQueue, MessageWriter};
use serde_json::{Value, json};
use tower::ServiceExt; // oneshot

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_app() -> App {
    let config = Config {
        poll_interval: Duration::from_millis(10),
        ..Config::default()
    };
    AppBuilder::new().config(config).build().unwrap()
}

fn router(app: &App) -> axum::Router {
    routes::build_router(AppState {
        ingest: app.ingest.clone(),
        reader: app.reader(),
    })
}

async fn call(router: axum::Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

fn parse_json(b: Bytes) -> Value {
    serde_json::from_slice(&b).expect("body is not valid JSON")
}

fn launched(channel: &str, number: i64, speed: i64) -> Value {
    json!({
        "metadata": {
            "channel": channel,
            "messageNumber": number,
            "messageTime": "2022-02-02T19:39:05.86337+01:00",
            "messageType": "RocketLaunched"
        },
        "message": {"type": "Falcon-9", "launchSpeed": speed, "mission": "ARTEMIS"}
    })
}

async fn seed(app: &App, channel: &str, number: i64, speed: i64) {
    let envelope: MessageEnvelope = serde_json::from_value(launched(channel, number, speed)).unwrap();
    app.store.apply(&envelope).await.unwrap();
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_ok() {
    let app = make_app();
    let (status, body) = call(router(&app), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(body)["status"], "ok");
}

// ---------------------------------------------------------------------------
// POST /messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_message_is_accepted_and_queued() {
    let app = make_app();
    let (status, _) = call(
        router(&app),
        post_json("/messages", launched("ch-1", 1, 500).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let counts = app.queue.counts(&app.config.topic).await.unwrap();
    assert_eq!(counts.queued, 1);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = make_app();
    let (status, body) = call(router(&app), post_json("/messages", r#"{"metadata":{"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse_json(body)["code"], 400);
    assert_eq!(app.queue.counts(&app.config.topic).await.unwrap().queued, 0);
}

#[tokio::test]
async fn invalid_envelope_is_rejected() {
    let app = make_app();
    let mut body = launched("ch-1", 1, 500);
    body["metadata"]["messageTime"] = json!("yesterday");

    let (status, resp) = call(router(&app), post_json("/messages", body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = parse_json(resp);
    assert_eq!(json["code"], 400);
    assert!(json["message"].as_str().unwrap().contains("messageTime"));
}

#[tokio::test]
async fn invalid_payload_is_rejected() {
    let app = make_app();
    let mut body = launched("ch-1", 1, 500);
    body["metadata"]["messageType"] = json!("RocketSpeedIncreased");
    body["message"] = json!({"by": 0});

    let (status, _) = call(router(&app), post_json("/messages", body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.queue.counts(&app.config.topic).await.unwrap().queued, 0);
}

#[tokio::test]
async fn unknown_type_is_rejected() {
    let app = make_app();
    let mut body = launched("ch-1", 1, 500);
    body["metadata"]["messageType"] = json!("RocketLanded");

    let (status, resp) = call(router(&app), post_json("/messages", body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(parse_json(resp)["message"].as_str().unwrap().contains("RocketLanded"));
}

#[tokio::test]
async fn accepted_message_becomes_visible() {
    let app = make_app();
    let consumers = app.start();

    let (status, _) = call(
        router(&app),
        post_json("/messages", launched("ch-9", 1, 700).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let mut found = None;
    for _ in 0..100 {
        let (status, body) = call(router(&app), get("/api/rockets/ch-9")).await;
        if status == StatusCode::OK {
            found = Some(parse_json(body));
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    consumers.shutdown_and_join().await;

    let rocket = found.expect("rocket never became visible");
    assert_eq!(rocket["channel"], "ch-9");
    assert_eq!(rocket["speed"], 700);
    assert_eq!(rocket["status"], "ACTIVE");
    assert_eq!(rocket["lastMessageNumber"], 1);
}

// ---------------------------------------------------------------------------
// GET /api/rockets/:channel
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_channel_is_404() {
    let app = make_app();
    let (status, body) = call(router(&app), get("/api/rockets/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = parse_json(body);
    assert_eq!(json["code"], 404);
    assert_eq!(json["message"], "channel not found");
}

#[tokio::test]
async fn get_known_channel_returns_state() {
    let app = make_app();
    seed(&app, "ch-1", 3, 500).await;

    let (status, body) = call(router(&app), get("/api/rockets/ch-1")).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse_json(body);
    assert_eq!(json["type"], "Falcon-9");
    assert_eq!(json["mission"], "ARTEMIS");
    assert_eq!(json["lastMessageNumber"], 3);
    assert!(json["updatedAt"].is_string());
}

// ---------------------------------------------------------------------------
// GET /api/rockets
// ---------------------------------------------------------------------------

fn channels(body: Bytes) -> Vec<String> {
    parse_json(body)
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["channel"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn list_defaults_to_channel_ascending() {
    let app = make_app();
    seed(&app, "b", 1, 100).await;
    seed(&app, "c", 1, 300).await;
    seed(&app, "a", 1, 200).await;

    let (status, body) = call(router(&app), get("/api/rockets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(channels(body), ["a", "b", "c"]);
}

#[tokio::test]
async fn list_by_speed_descending() {
    let app = make_app();
    seed(&app, "b", 1, 100).await;
    seed(&app, "c", 1, 300).await;
    seed(&app, "a", 1, 200).await;

    let (status, body) = call(router(&app), get("/api/rockets?sort=speed&order=desc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(channels(body), ["c", "a", "b"]);
}

#[tokio::test]
async fn list_of_empty_store_is_empty_array() {
    let app = make_app();
    let (status, body) = call(router(&app), get("/api/rockets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(body), json!([]));
}

#[tokio::test]
async fn list_rejects_bad_sort_and_order() {
    let app = make_app();

    let (status, body) = call(router(&app), get("/api/rockets?sort=mission")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse_json(body)["code"], 400);

    let (status, _) = call(router(&app), get("/api/rockets?order=sideways")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(router(&app), get("/api/rockets?sort=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
