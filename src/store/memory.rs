//! # In-Memory Cancel Store
//!
//! Lock-free shared-set backend for embedded single-process deployments and
//! tests. State does not survive a restart; multi-process workers need the
//! persistent backend instead.

use async_trait::async_trait;
use dashmap::DashSet;

use super::{CancelStore, StoreError};

/// Cancel store backed by a concurrent in-process set.
#[derive(Debug, Default)]
pub struct InMemoryCancelStore {
    canceled: DashSet<String>,
}

impl InMemoryCancelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities currently marked canceled.
    pub fn len(&self) -> usize {
        self.canceled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canceled.is_empty()
    }
}

#[async_trait]
impl CancelStore for InMemoryCancelStore {
    async fn is_canceled(&self, message_id: &str) -> Result<bool, StoreError> {
        Ok(self.canceled.contains(message_id))
    }

    async fn cancel(&self, message_ids: &[String]) -> Result<(), StoreError> {
        for message_id in message_ids {
            self.canceled.insert(message_id.clone());
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
