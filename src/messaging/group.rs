//! # Group Descriptor
//!
//! Cancellation-relevant shape of a message group.
//!
//! Lives in this shared low-level module so that composition logic (which
//! builds groups at enqueue time) and the cancellation middleware (which
//! consumes them at dispatch time) can both import it without a module cycle.

use serde::{Deserialize, Serialize};

/// Immutable description of a set of related messages and the cancellation
/// policy they share.
///
/// Once embedded in a message's options the member list never changes for
/// that message. Member order is enqueue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    /// Identities of every message in the group, in enqueue order. Includes
    /// the carrying message's own identity.
    pub message_ids: Vec<String>,
    /// Whether a failure of one member cancels the rest of the group.
    pub cancel_on_error: bool,
}

impl GroupDescriptor {
    /// Create a new group descriptor.
    pub fn new(message_ids: Vec<String>, cancel_on_error: bool) -> Self {
        Self {
            message_ids,
            cancel_on_error,
        }
    }

    /// Number of messages in the group.
    pub fn len(&self) -> usize {
        self.message_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.message_ids.is_empty()
    }
}
