//! # Gate Error Types
//!
//! Structured error handling for the cancellation gate using thiserror.
//!
//! The one error kind dispatch layers must care about is
//! [`GateError::MessageCanceled`]: it signals a deliberate skip, not a handler
//! bug, and must bypass the broker's retry/backoff path. Everything else
//! surfaces verbatim so the broker can apply its own policy.

use crate::store::StoreError;
use thiserror::Error;

/// Errors produced by the cancellation gate.
#[derive(Error, Debug)]
pub enum GateError {
    /// The message was canceled before its handler ran. Terminal and
    /// non-retryable; the handler body was never invoked.
    #[error("message {message_id} has been canceled")]
    MessageCanceled { message_id: String },

    /// The broker has no actor registered under the requested name.
    #[error("actor not found: {actor_name}")]
    ActorNotFound { actor_name: String },

    /// Invalid registration-time configuration, e.g. an actor option no
    /// middleware consumes.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A connectivity/backend error from the cancel store, passed through
    /// untouched. The gate performs no retries; retry policy belongs to the
    /// broker's dispatch layer.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GateError {
    /// Create a cancellation error for a message identity.
    pub fn message_canceled(message_id: impl Into<String>) -> Self {
        Self::MessageCanceled {
            message_id: message_id.into(),
        }
    }

    /// Create an actor lookup error.
    pub fn actor_not_found(actor_name: impl Into<String>) -> Self {
        Self::ActorNotFound {
            actor_name: actor_name.into(),
        }
    }

    /// Create a registration-time configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error is the deliberate-skip signal. Dispatch layers use
    /// this to route the message out of the retry path.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::MessageCanceled { .. })
    }
}

pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_recognizable() {
        let err = GateError::message_canceled("m1");
        assert!(err.is_cancellation());
        assert_eq!(err.to_string(), "message m1 has been canceled");
    }

    #[test]
    fn store_errors_are_not_cancellations() {
        let err = GateError::from(StoreError::connection("connection refused"));
        assert!(!err.is_cancellation());
    }

    #[test]
    fn actor_not_found_is_not_a_cancellation() {
        let err = GateError::actor_not_found("missing");
        assert!(!err.is_cancellation());
        assert_eq!(err.to_string(), "actor not found: missing");
    }
}
