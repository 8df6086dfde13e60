mod common;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use url_shortener::domain::event_queue::EventDispatcher;
use url_shortener::domain::repositories::{MappingStore, PutOutcome, StoreError};
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::RandomIdGenerator;

/// Store whose backend cannot be reached.
struct DownStore;

#[async_trait]
impl MappingStore for DownStore {
    async fn put_if_absent(&self, _short_id: &str, _url: &str) -> Result<PutOutcome, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _short_id: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "down"
    }
}

fn down_state() -> (AppState, tokio::sync::mpsc::Receiver<url_shortener::domain::analytics_event::AnalyticsEvent>) {
    let (events, rx) = EventDispatcher::channel(100);
    let state = AppState::new(
        Arc::new(DownStore),
        Arc::new(RandomIdGenerator::default()),
        events,
        common::test_short_urls(),
        false,
    );
    (state, rx)
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["event_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_closed_event_queue() {
    let (state, _store, rx) = common::create_test_state();
    drop(rx);

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["event_queue"]["status"], "error");
}

#[tokio::test]
async fn test_health_store_down() {
    let (state, _rx) = down_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<serde_json::Value>()["checks"]["store"]["status"],
        "error"
    );
}

#[tokio::test]
async fn test_store_down_hides_details() {
    let (state, _rx) = down_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    assert_eq!(created.status_code(), 500);
    assert_eq!(
        created.json::<serde_json::Value>(),
        json!({ "error": "Internal server error" })
    );

    let resolved = server.get("/abcd1234").await;
    assert_eq!(resolved.status_code(), 500);
    assert_eq!(
        resolved.json::<serde_json::Value>(),
        json!({ "error": "Internal server error" })
    );
}
