//! Event sink writing analytics records to the structured log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::repositories::{EventSink, SinkError};

/// Emits each record as a `tracing` event on the `analytics` target.
///
/// With `LOG_FORMAT=json` every record becomes one JSON log line that a log
/// shipper can forward to an analytics pipeline.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for LogEventSink {
    async fn emit(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        let record =
            serde_json::to_string(event).map_err(|e| SinkError::Delivery(e.to_string()))?;

        info!(
            target: "analytics",
            event = event.event.as_str(),
            short_id = %event.short_id,
            record = %record,
            "analytics event"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
