//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};

/// PostgreSQL mapping store.
///
/// Rows live in a single table whose name comes from configuration. The
/// table name is validated as a plain SQL identifier before it reaches this
/// type, so it is safe to splice into statements.
pub struct PgMappingStore {
    pool: Arc<PgPool>,
    insert_sql: String,
    select_sql: String,
    table: String,
}

impl PgMappingStore {
    /// Creates a new store over `table` with a database connection pool.
    pub fn new(pool: Arc<PgPool>, table: &str) -> Self {
        Self {
            pool,
            insert_sql: format!(
                "INSERT INTO {} (short_id, original_url) VALUES ($1, $2) \
                 ON CONFLICT (short_id) DO NOTHING",
                table
            ),
            select_sql: format!("SELECT original_url FROM {} WHERE short_id = $1", table),
            table: table.to_string(),
        }
    }

    /// Creates the mapping table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                short_id VARCHAR(16) PRIMARY KEY, \
                original_url VARCHAR(2048) NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\
             )",
            self.table
        );

        sqlx::query(&ddl)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        info!(table = %self.table, "Mapping table ready");
        Ok(())
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn put_if_absent(
        &self,
        short_id: &str,
        original_url: &str,
    ) -> Result<PutOutcome, StoreError> {
        let result = sqlx::query(&self.insert_sql)
            .bind(short_id)
            .bind(original_url)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            Ok(PutOutcome::AlreadyExists)
        } else {
            Ok(PutOutcome::Created)
        }
    }

    async fn get(&self, short_id: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>(&self.select_sql)
            .bind(short_id)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Splits SQLx errors into "cannot reach the database" and everything else.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        other => StoreError::Backend(other.to_string()),
    }
}
