mod common;

use axum::Router;
use axum::http::{Method, header};
use axum_test::TestServer;
use serde_json::json;
use url_shortener::domain::analytics_event::EventKind;
use url_shortener::domain::repositories::{MappingStore, PutOutcome};
use url_shortener::routes::app_router;

#[tokio::test]
async fn test_redirect_success() {
    let (state, store, _rx) = common::create_test_state();
    store
        .put_if_absent("redirect1", "https://example.com/target")
        .await
        .unwrap();

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let (state, _store, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await
        .json::<serde_json::Value>();
    let short_id = created["short_id"].as_str().unwrap();

    let response = server.get(&format!("/{}", short_id)).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/page");
}

#[tokio::test]
async fn test_redirect_is_idempotent() {
    let (state, store, _rx) = common::create_test_state();
    store
        .put_if_absent("same1234", "https://example.com/same")
        .await
        .unwrap();

    let server = TestServer::new(common::test_app(state)).unwrap();

    let first = server.get("/same1234").await;
    let second = server.get("/same1234").await;

    assert_eq!(first.header("location"), second.header("location"));
    assert_eq!(
        store.put_if_absent("same1234", "https://other.example.com").await.unwrap(),
        PutOutcome::AlreadyExists
    );
}

#[tokio::test]
async fn test_redirect_queues_event() {
    let (state, store, mut rx) = common::create_test_state();
    store
        .put_if_absent("evt12345", "https://example.com/evt")
        .await
        .unwrap();

    let server = TestServer::new(common::test_app(state)).unwrap();

    server
        .get("/evt12345")
        .add_header("Referer", "https://news.example.com")
        .await;

    let event = rx.try_recv().unwrap();
    assert_eq!(event.event, EventKind::Redirect);
    assert_eq!(event.short_id, "evt12345");
    assert_eq!(event.original_url.as_deref(), Some("https://example.com/evt"));
    assert_eq!(event.meta.referrer.as_deref(), Some("https://news.example.com"));
    assert_eq!(event.meta.client_ip.as_deref(), Some(common::TEST_CLIENT_IP));
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store, mut rx) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/doesnotexist").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "error": "Not found" })
    );

    let event = rx.try_recv().unwrap();
    assert_eq!(event.event, EventKind::NotFound);
    assert_eq!(event.short_id, "doesnotexist");
    assert!(event.original_url.is_none());
}

#[tokio::test]
async fn test_redirect_oversized_id() {
    let (state, _store, mut rx) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get(&format!("/{}", "a".repeat(17))).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "error": "Invalid short_id" })
    );
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_max_length_id_is_looked_up() {
    let (state, _store, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get(&format!("/{}", "a".repeat(16))).await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_empty_id() {
    let (state, _store, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Invalid short_id"
    );
}

#[tokio::test]
async fn test_redirect_cors_headers() {
    let (state, store, _rx) = common::create_test_state();
    store
        .put_if_absent("cors1234", "https://example.com")
        .await
        .unwrap();

    let server = TestServer::new(common::test_app(state)).unwrap();

    let found = server.get("/cors1234").await;
    let missing = server.get("/missing1").await;
    let preflight = server.method(Method::OPTIONS, "/cors1234").await;

    assert_eq!(preflight.status_code(), 204);

    for response in [found, missing, preflight] {
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_METHODS),
            "GET,OPTIONS"
        );
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_HEADERS),
            "Content-Type"
        );
    }
}

#[tokio::test]
async fn test_redirect_trailing_slash() {
    let (state, store, _rx) = common::create_test_state();
    store
        .put_if_absent("slash123", "https://example.com/slash")
        .await
        .unwrap();

    let app = Router::new().fallback_service(app_router(state));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/slash123/").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/slash");
}
