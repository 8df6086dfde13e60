//! HTTP server initialization and runtime setup.
//!
//! Handles store and sink connections, event worker spawning, and the Axum
//! server lifecycle including graceful shutdown.

use crate::config::{Config, EventSinkKind, StoreBackend};
use crate::domain::event_queue::EventDispatcher;
use crate::domain::event_worker::{EventWorkerSettings, run_event_worker};
use crate::domain::repositories::{EventSink, MappingStore};
use crate::infrastructure::persistence::{MemoryMappingStore, PgMappingStore, RedisMappingStore};
use crate::infrastructure::sinks::{LogEventSink, NullEventSink, RedisStreamSink};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomIdGenerator;
use crate::utils::short_url::ShortUrlSettings;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How long the event worker may keep draining after the server stopped.
const EVENT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Mapping store (memory, PostgreSQL or Redis)
/// - Event sink and background event worker
/// - Axum HTTP server
///
/// On `SIGINT` / `SIGTERM` the server stops accepting connections, finishes
/// in-flight requests, then gives the event worker a bounded time to drain.
///
/// # Errors
///
/// Returns an error if:
/// - Store or Redis connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let redis = connect_redis(&config).await?;
    let store = build_store(&config, redis.clone()).await?;
    let sink = build_sink(&config, redis)?;

    let (events, events_rx) = EventDispatcher::channel(config.event_queue_capacity);
    let worker = tokio::spawn(run_event_worker(
        events_rx,
        sink,
        EventWorkerSettings {
            concurrency: config.event_worker_concurrency,
            timeout: Duration::from_millis(config.event_sink_timeout_ms),
            ..EventWorkerSettings::default()
        },
    ));

    let state = AppState::new(
        store,
        Arc::new(RandomIdGenerator::new(config.short_id_length)),
        events,
        short_url_settings(&config),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router and its state are dropped, closing the event queue.
    match tokio::time::timeout(EVENT_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => tracing::info!("Event worker drained"),
        Ok(Err(e)) => tracing::error!("Event worker panicked: {}", e),
        Err(_) => tracing::warn!(
            "Event worker did not drain within {:?}, pending events dropped",
            EVENT_DRAIN_TIMEOUT
        ),
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Short URL settings derived from the configuration.
pub fn short_url_settings(config: &Config) -> ShortUrlSettings {
    ShortUrlSettings {
        scheme: config.short_url_scheme.clone(),
        default_host: config.default_host.clone(),
    }
}

/// Opens one shared Redis connection when the store or the sink needs it.
pub async fn connect_redis(config: &Config) -> Result<Option<ConnectionManager>> {
    if !config.needs_redis() {
        return Ok(None);
    }

    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL is required for the configured backend")?;

    let client = redis::Client::open(redis_url).context("Invalid REDIS_URL")?;
    let conn = ConnectionManager::new(client)
        .await
        .context("Failed to connect to Redis")?;

    tracing::info!("Connected to Redis");
    Ok(Some(conn))
}

/// Builds the configured mapping store.
pub async fn build_store(
    config: &Config,
    redis: Option<ConnectionManager>,
) -> Result<Arc<dyn MappingStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory mapping store, mappings are lost on restart");
            Ok(Arc::new(MemoryMappingStore::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            let store = PgMappingStore::new(Arc::new(pool), &config.mapping_table);
            store
                .ensure_schema()
                .await
                .context("Failed to prepare mapping table")?;

            Ok(Arc::new(store))
        }
        StoreBackend::Redis => {
            let conn = redis.context("Redis connection is required for the redis backend")?;
            Ok(Arc::new(RedisMappingStore::new(conn, &config.mapping_table)))
        }
    }
}

/// Builds the configured analytics event sink.
pub fn build_sink(config: &Config, redis: Option<ConnectionManager>) -> Result<Arc<dyn EventSink>> {
    let sink: Arc<dyn EventSink> = match config.event_sink {
        EventSinkKind::Log => Arc::new(LogEventSink::new()),
        EventSinkKind::None => Arc::new(NullEventSink::new()),
        EventSinkKind::Redis => {
            let conn = redis.context("Redis connection is required for the redis event sink")?;
            Arc::new(RedisStreamSink::new(conn, &config.event_stream))
        }
    };

    tracing::info!("Event sink: {}", sink.name());
    Ok(sink)
}

/// Resolves when the process receives `SIGINT` or `SIGTERM`.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server");
}
