//! HTTP middleware for CORS headers and request tracing.

pub mod cors;
pub mod tracing;
