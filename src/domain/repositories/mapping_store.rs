//! Mapping store contract.

use async_trait::async_trait;

/// Outcome of a create-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The mapping was stored.
    Created,
    /// A mapping with the same identifier already exists; nothing was written.
    AlreadyExists,
}

/// Errors reported by a mapping store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached (connection, pool, IO or timeout).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with an unexpected error.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Key-value persistence for `short_id -> original_url` mappings.
///
/// Implementations must make [`MappingStore::put_if_absent`] atomic per key
/// and provide read-after-write consistency for a single key. Mappings are
/// never updated or deleted through this interface.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryMappingStore`] - in-process map
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::RedisMappingStore`] - Redis keys
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Stores `original_url` under `short_id` unless the key is taken.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be reached.
    /// Returns [`StoreError::Backend`] on any other backend failure.
    async fn put_if_absent(&self, short_id: &str, original_url: &str)
    -> Result<PutOutcome, StoreError>;

    /// Looks up the URL stored under `short_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Same as [`MappingStore::put_if_absent`].
    async fn get(&self, short_id: &str) -> Result<Option<String>, StoreError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
