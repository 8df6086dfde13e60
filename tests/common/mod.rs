#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;
use url_shortener::api;
use url_shortener::domain::analytics_event::AnalyticsEvent;
use url_shortener::domain::event_queue::EventDispatcher;
use url_shortener::domain::event_worker::{EventWorkerSettings, run_event_worker};
use url_shortener::domain::repositories::{EventSink, MappingStore, SinkError};
use url_shortener::error::AppError;
use url_shortener::infrastructure::persistence::MemoryMappingStore;
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::{IdGenerator, RandomIdGenerator};
use url_shortener::utils::short_url::ShortUrlSettings;

pub const TEST_CLIENT_IP: &str = "127.0.0.1";

pub fn test_short_urls() -> ShortUrlSettings {
    ShortUrlSettings {
        scheme: "https".to_string(),
        default_host: "short.ly".to_string(),
    }
}

/// State over a fresh in-memory store; events stay in the returned queue.
pub fn create_test_state() -> (AppState, Arc<MemoryMappingStore>, mpsc::Receiver<AnalyticsEvent>) {
    create_test_state_with_generator(Arc::new(RandomIdGenerator::default()))
}

pub fn create_test_state_with_generator(
    generator: Arc<dyn IdGenerator>,
) -> (AppState, Arc<MemoryMappingStore>, mpsc::Receiver<AnalyticsEvent>) {
    let store = Arc::new(MemoryMappingStore::new());
    let (events, rx) = EventDispatcher::channel(100);

    let state = AppState::new(
        store.clone() as Arc<dyn MappingStore>,
        generator,
        events,
        test_short_urls(),
        false,
    );

    (state, store, rx)
}

/// State whose events are delivered to `sink` by a running event worker.
pub fn create_test_state_with_sink(sink: Arc<dyn EventSink>) -> AppState {
    let store = Arc::new(MemoryMappingStore::new());
    let (events, rx) = EventDispatcher::channel(100);

    tokio::spawn(run_event_worker(
        rx,
        sink,
        EventWorkerSettings {
            concurrency: 2,
            timeout: Duration::from_millis(50),
            max_retries: 1,
        },
    ));

    AppState::new(
        store,
        Arc::new(RandomIdGenerator::default()),
        events,
        test_short_urls(),
        false,
    )
}

/// Public routes over `state`, with a fixed peer address.
pub fn test_app(state: AppState) -> Router {
    api::routes::router()
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

/// Sink that rejects every record and counts the attempts.
#[derive(Default)]
pub struct FailingSink {
    pub attempts: AtomicUsize,
}

impl FailingSink {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSink for FailingSink {
    async fn emit(&self, _event: &AnalyticsEvent) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Delivery("sink is down".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Sink that never answers within the worker timeout.
pub struct HangingSink;

#[async_trait]
impl EventSink for HangingSink {
    async fn emit(&self, _event: &AnalyticsEvent) -> Result<(), SinkError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "hanging"
    }
}

/// Generator replaying a fixed list of identifiers.
pub struct SequenceGenerator {
    ids: Mutex<Vec<String>>,
}

impl SequenceGenerator {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().rev().map(|id| id.to_string()).collect()),
        }
    }
}

impl IdGenerator for SequenceGenerator {
    fn generate(&self) -> Result<String, AppError> {
        self.ids
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| AppError::internal("sequence exhausted"))
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
