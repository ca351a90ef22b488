//! # PostgreSQL Cancel Store
//!
//! Persistent cancel store backed by a single table. Monotonicity and
//! idempotency come from the primary key plus `ON CONFLICT DO NOTHING`:
//! an identity row is only ever inserted, never updated or deleted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cancel_gate::store::PostgresCancelStore;
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresCancelStore::new(pool);
//! store.ensure_schema().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{CancelStore, StoreError};

/// Cancel store backed by a PostgreSQL table.
#[derive(Debug, Clone)]
pub struct PostgresCancelStore {
    pool: PgPool,
}

impl PostgresCancelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS canceled_messages (
                message_id TEXT PRIMARY KEY,
                canceled_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        debug!("cancel store schema ensured");
        Ok(())
    }
}

#[async_trait]
impl CancelStore for PostgresCancelStore {
    async fn is_canceled(&self, message_id: &str) -> Result<bool, StoreError> {
        let canceled: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM canceled_messages WHERE message_id = $1)",
        )
        .bind(message_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(canceled)
    }

    async fn cancel(&self, message_ids: &[String]) -> Result<(), StoreError> {
        if message_ids.is_empty() {
            return Ok(());
        }
        // Single statement for the whole list; duplicates and already-canceled
        // identities are absorbed by ON CONFLICT.
        sqlx::query(
            r#"
            INSERT INTO canceled_messages (message_id)
            SELECT DISTINCT unnest($1::text[])
            ON CONFLICT (message_id) DO NOTHING
            "#,
        )
        .bind(message_ids)
        .execute(&self.pool)
        .await?;
        debug!(count = message_ids.len(), "marked identities canceled");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
