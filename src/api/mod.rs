//! HTTP boundary of the service.
//!
//! Translates requests into shortener and resolver calls and their results
//! into JSON responses with CORS headers.
//!
//! # Modules
//!
//! - [`dto`] - Request and response bodies
//! - [`extract`] - Request metadata extractor for analytics events
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS and tracing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
