//! No-op event sink for disabled analytics.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::repositories::{EventSink, SinkError};

/// An event sink that discards every record.
///
/// Used when `EVENT_SINK=none`.
pub struct NullEventSink;

impl NullEventSink {
    /// Creates a new NullEventSink instance.
    pub fn new() -> Self {
        debug!("Using NullEventSink (analytics disabled)");
        Self
    }
}

impl Default for NullEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for NullEventSink {
    async fn emit(&self, _event: &AnalyticsEvent) -> Result<(), SinkError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
