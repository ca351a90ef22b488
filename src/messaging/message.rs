//! # Message Structures
//!
//! Defines the unit of deferred work that workers pull from a queue: a stable
//! identity, the name of the actor that handles it, and a typed options
//! structure carrying per-message configuration.
//!
//! Options are modeled as explicit optional fields rather than an untyped
//! key/value bag; an absent field means "default / not applicable". The only
//! option the cancellation gate consumes is the embedded [`GroupDescriptor`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json;
use uuid::Uuid;

use crate::messaging::group::GroupDescriptor;

/// A unit of deferred work bound to an actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Globally unique, stable identity for this message's lifetime.
    pub message_id: String,
    /// Name of the registered actor that handles this message.
    pub actor_name: String,
    /// Handler arguments as an opaque JSON payload.
    pub args: serde_json::Value,
    /// Per-message configuration set at enqueue time.
    pub options: MessageOptions,
    /// When the message was created.
    pub enqueued_at: DateTime<Utc>,
}

/// Per-message options, set upstream by composition/enqueue logic and
/// read-only to the dispatch pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageOptions {
    /// Group this message belongs to, if any. Absent means the message is not
    /// part of any group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupDescriptor>,
}

impl Message {
    /// Create a new message for an actor with a fresh UUID identity.
    pub fn new(actor_name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            actor_name: actor_name.into(),
            args,
            options: MessageOptions::default(),
            enqueued_at: Utc::now(),
        }
    }

    /// Create a message with an explicit identity. Used by transports that
    /// assign identities upstream and by tests.
    pub fn with_id(
        message_id: impl Into<String>,
        actor_name: impl Into<String>,
        args: serde_json::Value,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            actor_name: actor_name.into(),
            args,
            options: MessageOptions::default(),
            enqueued_at: Utc::now(),
        }
    }

    /// Attach a group descriptor to this message.
    pub fn with_group(mut self, group: GroupDescriptor) -> Self {
        self.options.group = Some(group);
        self
    }

    /// Convert to JSON for queue storage.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Parse a message from its queue representation.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_message_has_unique_identity_and_no_group() {
        let a = Message::new("add", json!([1, 2]));
        let b = Message::new("add", json!([1, 2]));
        assert_ne!(a.message_id, b.message_id);
        assert!(a.options.group.is_none());
    }

    #[test]
    fn group_survives_queue_round_trip() {
        let group = GroupDescriptor::new(vec!["a".into(), "b".into()], true);
        let message = Message::with_id("b", "add", json!([1, 2])).with_group(group.clone());

        let json = message.to_json().unwrap();
        let back = Message::from_json(json).unwrap();

        assert_eq!(back.message_id, "b");
        assert_eq!(back.options.group, Some(group));
    }

    #[test]
    fn absent_group_is_omitted_from_wire_form() {
        let message = Message::with_id("x", "add", json!([]));
        let json = message.to_json().unwrap();
        assert!(json["options"].get("group").is_none());
    }
}
