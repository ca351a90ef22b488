//! # Cancel Store
//!
//! Polymorphic backend for cancellation state. Conceptually a monotonic set of
//! canceled message identities: once an identity is marked canceled it never
//! becomes "not canceled" again, and re-marking it is a no-op.
//!
//! The store is the only shared mutable resource in the gating protocol; it
//! must support concurrent reads and writes from arbitrarily many workers.
//! Implementations provide store-local read-your-writes consistency;
//! cross-worker visibility is best-effort by design.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::InMemoryCancelStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresCancelStore;

/// Connectivity/backend errors from a cancel store.
///
/// The gate never retries these; they propagate to the broker's dispatch
/// layer, which owns retry policy.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cancel store connection error: {message}")]
    Connection { message: String },

    #[error("cancel store backend error: {operation}: {message}")]
    Backend { operation: String, message: String },
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a backend error for a named operation.
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::connection(err.to_string())
            }
            other => Self::backend("query", other.to_string()),
        }
    }
}

/// Capability contract for cancellation state.
///
/// Both operations may block on network/storage I/O; callers apply whatever
/// timeout policy their transport layer provides. This trait imposes none.
#[async_trait]
pub trait CancelStore: Send + Sync {
    /// Whether the identity has been marked canceled.
    ///
    /// Fails only on connectivity/backend errors. Must never return a stale
    /// `false` after a `cancel` call the same caller can observe.
    async fn is_canceled(&self, message_id: &str) -> Result<bool, StoreError>;

    /// Mark every listed identity canceled.
    ///
    /// Idempotent per identity. Partial failure may surface as an error
    /// without rollback; no atomicity across the list is guaranteed.
    async fn cancel(&self, message_ids: &[String]) -> Result<(), StoreError>;

    /// Backend name for logging and diagnostics.
    fn backend_name(&self) -> &'static str;
}
