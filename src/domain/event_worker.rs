//! Background delivery of analytics events to the configured sink.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::repositories::{EventSink, SinkError};

/// Base delay of the retry backoff, in milliseconds.
const RETRY_BASE_MS: u64 = 10;

/// Tuning for [`run_event_worker`].
#[derive(Debug, Clone, Copy)]
pub struct EventWorkerSettings {
    /// Events delivered at the same time.
    pub concurrency: usize,
    /// Upper bound for a single `emit` call.
    pub timeout: Duration,
    /// Retries after the first failed attempt.
    pub max_retries: usize,
}

impl Default for EventWorkerSettings {
    fn default() -> Self {
        Self {
            concurrency: 4,
            timeout: Duration::from_millis(500),
            max_retries: 2,
        }
    }
}

/// Drains the event queue until every sender is dropped.
///
/// Each event is delivered on its own task, at most `settings.concurrency` at
/// a time. Delivery failures are logged and counted, never propagated.
/// Returns after the queue is closed and all in-flight deliveries finished.
pub async fn run_event_worker(
    mut rx: mpsc::Receiver<AnalyticsEvent>,
    sink: Arc<dyn EventSink>,
    settings: EventWorkerSettings,
) {
    let semaphore = Arc::new(Semaphore::new(settings.concurrency.max(1)));
    let mut tasks = JoinSet::new();

    info!(sink = sink.name(), "Event worker started");

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let sink = sink.clone();
        tasks.spawn(async move {
            let _ = deliver(sink.as_ref(), &event, settings).await;
            drop(permit);
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}

    info!("Event worker stopped");
}

/// Delivers one event with a bounded timeout per attempt and retry backoff.
///
/// # Errors
///
/// Returns the last [`SinkError`] once all attempts failed. The error has
/// already been logged when it is returned.
pub async fn deliver(
    sink: &dyn EventSink,
    event: &AnalyticsEvent,
    settings: EventWorkerSettings,
) -> Result<(), SinkError> {
    let timeout = settings.timeout;
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MS)
        .map(jitter)
        .take(settings.max_retries);

    let result = Retry::spawn(strategy, move || async move {
        match tokio::time::timeout(timeout, sink.emit(event)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SinkError::Timeout(timeout_ms)),
        }
    })
    .await;

    match &result {
        Ok(()) => {
            debug!(
                sink = sink.name(),
                event = event.event.as_str(),
                short_id = %event.short_id,
                "analytics event delivered"
            );
        }
        Err(e) => {
            metrics::counter!("shortener_events_failed_total").increment(1);
            warn!(
                sink = sink.name(),
                event = event.event.as_str(),
                short_id = %event.short_id,
                error = %e,
                "analytics event dropped after retries"
            );
        }
    }

    result
}
