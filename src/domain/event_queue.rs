//! Non-blocking hand-off of analytics events to the background worker.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::analytics_event::AnalyticsEvent;

/// Sending half of the analytics event queue.
///
/// [`EventDispatcher::dispatch`] never waits: when the queue is full or the
/// worker has stopped, the event is dropped with a warning.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    tx: mpsc::Sender<AnalyticsEvent>,
}

impl EventDispatcher {
    pub fn new(tx: mpsc::Sender<AnalyticsEvent>) -> Self {
        Self { tx }
    }

    /// Creates a dispatcher together with the receiving half of its queue.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AnalyticsEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Queues `event` for delivery without blocking the caller.
    pub fn dispatch(&self, event: AnalyticsEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("shortener_events_dropped_total", "reason" => "full")
                    .increment(1);
                warn!(
                    event = event.event.as_str(),
                    short_id = %event.short_id,
                    "analytics queue full, event dropped"
                );
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("shortener_events_dropped_total", "reason" => "closed")
                    .increment(1);
                warn!(
                    event = event.event.as_str(),
                    short_id = %event.short_id,
                    "analytics queue closed, event dropped"
                );
            }
        }
    }

    /// Returns `true` once the worker side of the queue is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Free slots left in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}
