//! Analytics event sinks.
//!
//! - [`LogEventSink`] - Structured log records (default)
//! - [`RedisStreamSink`] - Redis stream entries
//! - [`NullEventSink`] - Discards everything

mod log_sink;
mod null_sink;
mod redis_stream_sink;

pub use log_sink::LogEventSink;
pub use null_sink::NullEventSink;
pub use redis_stream_sink::RedisStreamSink;
