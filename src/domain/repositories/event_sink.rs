//! Event sink contract for analytics records.

use crate::domain::analytics_event::AnalyticsEvent;
use async_trait::async_trait;

/// Errors reported by an event sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Delivery did not finish within the configured timeout.
    #[error("event delivery timed out after {0}ms")]
    Timeout(u64),

    /// The sink rejected the record or could not be reached.
    #[error("event delivery failed: {0}")]
    Delivery(String),
}

/// Best-effort destination for analytics records.
///
/// Callers never let a sink failure affect the request that produced the
/// event; failures are logged and dropped by the event worker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Delivers one record.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Delivery`] if the record could not be delivered.
    async fn emit(&self, event: &AnalyticsEvent) -> Result<(), SinkError>;

    /// Short sink name for logs.
    fn name(&self) -> &'static str;
}
