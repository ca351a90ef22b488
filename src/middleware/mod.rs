//! # Middleware Hooks
//!
//! The uniform hook surface a broker invokes around every dispatch: one hook
//! immediately before handler execution and one immediately after, plus the
//! declaration of which actor-option keys a middleware consumes.
//!
//! Hooks run concurrently across workers for different messages; a middleware
//! must be safe for shared reuse without locking.

use async_trait::async_trait;
use serde_json::Value;

use crate::broker::Broker;
use crate::error::Result;
use crate::messaging::Message;

pub mod cancel;

pub use cancel::CancelGate;

/// Outcome of a handler execution, as reported to `after_process_message`.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// The handler ran to completion, optionally producing a result value.
    Completed(Option<Value>),
    /// The handler raised an error.
    Failed {
        /// Rendered handler error, for logging only.
        error: String,
    },
}

impl DispatchOutcome {
    /// Outcome for a handler that failed with the given error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A dispatch-pipeline middleware.
///
/// All hooks default to no-ops so implementations only override the points
/// they care about.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Actor-option keys this middleware consumes, so actor-registration
    /// tooling can validate them.
    fn actor_options(&self) -> &'static [&'static str] {
        &[]
    }

    /// Invoked immediately before the handler for `message` runs. Returning
    /// an error aborts the dispatch; the handler body is never invoked.
    async fn before_process_message(&self, broker: &dyn Broker, message: &Message) -> Result<()> {
        let _ = (broker, message);
        Ok(())
    }

    /// Invoked exactly once per dispatch after the handler completes or
    /// fails, and also when the dispatch was aborted before execution.
    async fn after_process_message(
        &self,
        broker: &dyn Broker,
        message: &Message,
        outcome: &DispatchOutcome,
    ) -> Result<()> {
        let _ = (broker, message, outcome);
        Ok(())
    }
}
