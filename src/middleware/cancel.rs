//! # Cancellation Gate
//!
//! Middleware that checks whether a message was canceled before letting its
//! handler run, and propagates cancellation across a group when a grouped
//! member fails.
//!
//! ## Overview
//!
//! The gate sits on the critical path of every dispatch. Eligibility is
//! resolved per dispatch from the actor's `cancelable` override, falling back
//! to the gate-level default fixed at construction. Ineligible actors incur
//! zero store round-trips. Eligible messages found canceled abort with
//! [`GateError::MessageCanceled`], which the dispatch layer treats as a
//! deliberate skip rather than an application failure.
//!
//! A sibling already past its own gate check when group cancellation is
//! written runs to completion; there is no preemption of in-flight handlers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cancel_gate::middleware::CancelGate;
//! use cancel_gate::store::InMemoryCancelStore;
//! use std::sync::Arc;
//!
//! let gate = CancelGate::new(Arc::new(InMemoryCancelStore::new()))
//!     .with_default_cancelable(false);
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::broker::{Actor, Broker};
use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::messaging::Message;
use crate::middleware::{DispatchOutcome, Middleware};
use crate::store::CancelStore;

/// Actor-option key for the per-actor eligibility override.
pub const CANCELABLE_OPTION: &str = "cancelable";

/// Cancellation-gating middleware.
///
/// Holds only the store handle and the immutable gate-level default, so a
/// single instance is shared across all workers without locking.
pub struct CancelGate {
    store: Arc<dyn CancelStore>,
    default_cancelable: bool,
}

impl CancelGate {
    /// Create a gate over a cancel store. Actors are ineligible for
    /// cancellation checks by default; opt in per actor or via
    /// [`with_default_cancelable`](Self::with_default_cancelable).
    pub fn new(store: Arc<dyn CancelStore>) -> Self {
        Self {
            store,
            default_cancelable: false,
        }
    }

    /// Set the gate-level default eligibility. Fixed from here on; the gate
    /// never mutates it after construction.
    pub fn with_default_cancelable(mut self, cancelable: bool) -> Self {
        self.default_cancelable = cancelable;
        self
    }

    /// Create a gate from loaded configuration.
    pub fn from_config(store: Arc<dyn CancelStore>, config: &GateConfig) -> Self {
        Self::new(store).with_default_cancelable(config.cancelable)
    }

    /// Resolve whether an actor's messages are eligible for cancellation
    /// checks: the actor's own override when present, else the gate default.
    /// Pure; no store access.
    pub fn resolve_cancelable(&self, actor: &Actor) -> bool {
        actor.options.cancelable.unwrap_or(self.default_cancelable)
    }
}

#[async_trait]
impl Middleware for CancelGate {
    fn actor_options(&self) -> &'static [&'static str] {
        &[CANCELABLE_OPTION]
    }

    async fn before_process_message(&self, broker: &dyn Broker, message: &Message) -> Result<()> {
        let actor = broker.get_actor(&message.actor_name)?;

        if !self.resolve_cancelable(&actor) {
            // Ineligible actors must not cost a store round-trip.
            return Ok(());
        }

        if self.store.is_canceled(&message.message_id).await? {
            info!(
                message_id = %message.message_id,
                actor = %message.actor_name,
                "skipping canceled message"
            );
            return Err(GateError::message_canceled(&message.message_id));
        }

        Ok(())
    }

    async fn after_process_message(
        &self,
        _broker: &dyn Broker,
        message: &Message,
        outcome: &DispatchOutcome,
    ) -> Result<()> {
        // Group propagation only ever happens on failure.
        let error = match outcome {
            DispatchOutcome::Completed(_) => return Ok(()),
            DispatchOutcome::Failed { error } => error,
        };

        let Some(group) = &message.options.group else {
            return Ok(());
        };

        if !group.cancel_on_error {
            return Ok(());
        }

        debug!(
            message_id = %message.message_id,
            group_size = group.len(),
            error = %error,
            "grouped message failed, canceling siblings"
        );
        self.store.cancel(&group.message_ids).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::ActorRegistry;
    use crate::messaging::GroupDescriptor;
    use crate::store::InMemoryCancelStore;
    use serde_json::json;

    fn registry_with(actor: Actor) -> ActorRegistry {
        let mut registry = ActorRegistry::new();
        let gate = CancelGate::new(Arc::new(InMemoryCancelStore::new()));
        registry.register_middleware_options(&gate);
        registry.declare_actor(actor).unwrap();
        registry
    }

    #[test]
    fn actor_override_beats_gate_default() {
        let store = Arc::new(InMemoryCancelStore::new());

        let gate = CancelGate::new(Arc::clone(&store) as Arc<dyn CancelStore>)
            .with_default_cancelable(true);
        assert!(!gate.resolve_cancelable(&Actor::new("a").with_cancelable(false)));

        let gate = CancelGate::new(store as Arc<dyn CancelStore>).with_default_cancelable(false);
        assert!(gate.resolve_cancelable(&Actor::new("a").with_cancelable(true)));
    }

    #[test]
    fn config_supplies_the_gate_default() {
        let store = Arc::new(InMemoryCancelStore::new());
        let config = GateConfig { cancelable: true };
        let gate = CancelGate::from_config(store, &config);
        assert!(gate.resolve_cancelable(&Actor::new("a")));
    }

    #[test]
    fn gate_default_applies_without_override() {
        let store = Arc::new(InMemoryCancelStore::new());
        let gate = CancelGate::new(store).with_default_cancelable(true);
        assert!(gate.resolve_cancelable(&Actor::new("a")));
    }

    #[tokio::test]
    async fn canceled_message_is_skipped_before_execution() {
        let store = Arc::new(InMemoryCancelStore::new());
        store.cancel(&["m1".to_string()]).await.unwrap();

        let gate =
            CancelGate::new(Arc::clone(&store) as Arc<dyn CancelStore>).with_default_cancelable(true);
        let registry = registry_with(Actor::new("add"));
        let message = Message::with_id("m1", "add", json!([1, 2]));

        let err = gate
            .before_process_message(&registry, &message)
            .await
            .unwrap_err();
        assert!(err.is_cancellation());
        assert!(matches!(
            err,
            GateError::MessageCanceled { message_id } if message_id == "m1"
        ));
    }

    #[tokio::test]
    async fn uncanceled_message_proceeds() {
        let store = Arc::new(InMemoryCancelStore::new());
        let gate = CancelGate::new(store).with_default_cancelable(true);
        let registry = registry_with(Actor::new("add"));
        let message = Message::with_id("m1", "add", json!([1, 2]));

        gate.before_process_message(&registry, &message)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_actor_surfaces_lookup_error() {
        let store = Arc::new(InMemoryCancelStore::new());
        let gate = CancelGate::new(store);
        let registry = ActorRegistry::new();
        let message = Message::with_id("m1", "ghost", json!([]));

        let err = gate
            .before_process_message(&registry, &message)
            .await
            .unwrap_err();
        assert!(matches!(err, GateError::ActorNotFound { .. }));
    }

    #[tokio::test]
    async fn group_failure_cancels_all_members() {
        let store = Arc::new(InMemoryCancelStore::new());
        let gate = CancelGate::new(Arc::clone(&store) as Arc<dyn CancelStore>);
        let registry = registry_with(Actor::new("add"));

        let group = GroupDescriptor::new(vec!["a".into(), "b".into(), "c".into()], true);
        let message = Message::with_id("b", "add", json!([])).with_group(group);

        gate.after_process_message(&registry, &message, &DispatchOutcome::failed("boom"))
            .await
            .unwrap();

        assert!(store.is_canceled("a").await.unwrap());
        assert!(store.is_canceled("b").await.unwrap());
        assert!(store.is_canceled("c").await.unwrap());
    }

    #[tokio::test]
    async fn success_never_propagates() {
        let store = Arc::new(InMemoryCancelStore::new());
        let gate = CancelGate::new(Arc::clone(&store) as Arc<dyn CancelStore>);
        let registry = registry_with(Actor::new("add"));

        let group = GroupDescriptor::new(vec!["a".into(), "b".into()], true);
        let message = Message::with_id("a", "add", json!([])).with_group(group);

        gate.after_process_message(
            &registry,
            &message,
            &DispatchOutcome::Completed(Some(json!(3))),
        )
        .await
        .unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn cancel_on_error_false_never_propagates() {
        let store = Arc::new(InMemoryCancelStore::new());
        let gate = CancelGate::new(Arc::clone(&store) as Arc<dyn CancelStore>);
        let registry = registry_with(Actor::new("add"));

        let group = GroupDescriptor::new(vec!["a".into(), "b".into()], false);
        let message = Message::with_id("a", "add", json!([])).with_group(group);

        gate.after_process_message(&registry, &message, &DispatchOutcome::failed("boom"))
            .await
            .unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn ungrouped_failure_touches_nothing() {
        let store = Arc::new(InMemoryCancelStore::new());
        let gate = CancelGate::new(Arc::clone(&store) as Arc<dyn CancelStore>);
        let registry = registry_with(Actor::new("add"));
        let message = Message::with_id("x", "add", json!([]));

        gate.after_process_message(&registry, &message, &DispatchOutcome::failed("boom"))
            .await
            .unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn gate_declares_its_actor_option() {
        let gate = CancelGate::new(Arc::new(InMemoryCancelStore::new()));
        assert_eq!(gate.actor_options(), &["cancelable"]);
    }
}
