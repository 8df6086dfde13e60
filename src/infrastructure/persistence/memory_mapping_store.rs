//! In-process mapping store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};

/// Mapping store backed by a sharded concurrent map.
///
/// The entry API holds the shard lock across the existence check and the
/// insert, which makes `put_if_absent` atomic per key. Contents live only as
/// long as the process.
#[derive(Debug, Default)]
pub struct MemoryMappingStore {
    storage: DashMap<String, String>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn put_if_absent(
        &self,
        short_id: &str,
        original_url: &str,
    ) -> Result<PutOutcome, StoreError> {
        match self.storage.entry(short_id.to_string()) {
            Entry::Occupied(_) => Ok(PutOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(original_url.to_string());
                Ok(PutOutcome::Created)
            }
        }
    }

    async fn get(&self, short_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.storage.get(short_id).map(|entry| entry.value().clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryMappingStore::new();

        let outcome = store
            .put_if_absent("abc123", "https://example.com")
            .await
            .unwrap();
        assert_eq!(outcome, PutOutcome::Created);

        let url = store.get("abc123").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = MemoryMappingStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_does_not_overwrite() {
        let store = MemoryMappingStore::new();

        store
            .put_if_absent("abc123", "https://example.com")
            .await
            .unwrap();
        let outcome = store
            .put_if_absent("abc123", "https://other.com")
            .await
            .unwrap();

        assert_eq!(outcome, PutOutcome::AlreadyExists);
        assert_eq!(
            store.get("abc123").await.unwrap().as_deref(),
            Some("https://example.com")
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_put_single_winner() {
        let store = Arc::new(MemoryMappingStore::new());
        let mut handles = Vec::new();

        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .put_if_absent("contended", &format!("https://example.com/{}", i))
                    .await
                    .unwrap()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() == PutOutcome::Created {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }
}
