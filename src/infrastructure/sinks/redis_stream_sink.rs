//! Redis Streams event sink.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::repositories::{EventSink, SinkError};

/// Appends analytics records to a Redis stream.
///
/// Each record is one stream entry with a single `event` field holding the
/// JSON document: `XADD <stream> * event <json>`.
pub struct RedisStreamSink {
    conn: ConnectionManager,
    stream: String,
}

impl RedisStreamSink {
    /// Creates a sink appending to `stream`.
    pub fn new(conn: ConnectionManager, stream: &str) -> Self {
        info!(stream = %stream, "Using Redis stream event sink");
        Self {
            conn,
            stream: stream.to_string(),
        }
    }
}

#[async_trait]
impl EventSink for RedisStreamSink {
    async fn emit(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        let record =
            serde_json::to_string(event).map_err(|e| SinkError::Delivery(e.to_string()))?;
        let mut conn = self.conn.clone();

        let entry_id = redis::cmd("XADD")
            .arg(&self.stream)
            .arg("*")
            .arg("event")
            .arg(record)
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| SinkError::Delivery(e.to_string()))?;

        debug!("XADD {} -> {}", self.stream, entry_id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
