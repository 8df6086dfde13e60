//! Mapping store implementations.
//!
//! - [`MemoryMappingStore`] - In-process map (development and tests)
//! - [`PgMappingStore`] - PostgreSQL table with `ON CONFLICT DO NOTHING` inserts
//! - [`RedisMappingStore`] - Redis keys written with `SET NX`

pub mod memory_mapping_store;
pub mod pg_mapping_store;
pub mod redis_mapping_store;

pub use memory_mapping_store::MemoryMappingStore;
pub use pg_mapping_store::PgMappingStore;
pub use redis_mapping_store::RedisMappingStore;
