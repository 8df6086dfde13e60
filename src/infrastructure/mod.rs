//! Infrastructure layer for external integrations.
//!
//! This layer implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Mapping store backends (memory, PostgreSQL, Redis)
//! - [`sinks`] - Analytics event sinks (log, Redis stream, no-op)

pub mod persistence;
pub mod sinks;
