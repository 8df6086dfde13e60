//! Redis implementation of the mapping store.

use async_trait::async_trait;
use redis::RedisError;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};

/// Redis-backed mapping store.
///
/// Each mapping is one string key `<namespace>:<short_id>`. Create-if-absent
/// is `SET key value NX`, which Redis executes atomically.
pub struct RedisMappingStore {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisMappingStore {
    /// Creates a store over an established connection manager.
    pub fn new(conn: ConnectionManager, namespace: &str) -> Self {
        info!(namespace = %namespace, "Using Redis mapping store");
        Self {
            conn,
            namespace: namespace.to_string(),
        }
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_id: &str) -> String {
        format!("{}:{}", self.namespace, short_id)
    }
}

#[async_trait]
impl MappingStore for RedisMappingStore {
    async fn put_if_absent(
        &self,
        short_id: &str,
        original_url: &str,
    ) -> Result<PutOutcome, StoreError> {
        let key = self.build_key(short_id);
        let mut conn = self.conn.clone();

        let reply = redis::cmd("SET")
            .arg(&key)
            .arg(original_url)
            .arg("NX")
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(map_redis_error)?;

        match reply {
            Some(_) => {
                debug!("Redis SET NX: {} created", key);
                Ok(PutOutcome::Created)
            }
            None => {
                debug!("Redis SET NX: {} already exists", key);
                Ok(PutOutcome::AlreadyExists)
            }
        }
    }

    async fn get(&self, short_id: &str) -> Result<Option<String>, StoreError> {
        let key = self.build_key(short_id);
        let mut conn = self.conn.clone();

        redis::cmd("GET")
            .arg(&key)
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(map_redis_error)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// Splits Redis errors into "cannot reach the server" and everything else.
pub fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal()
    {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Backend(e.to_string())
    }
}
