//! # Broker Contract
//!
//! The slice of the broker this middleware consumes: actor lookup by name and
//! the actor's per-handler configuration. The dispatch loop, queueing, and
//! retry policy live outside this crate; only the lookup seam is declared
//! here so the gate can be tested and embedded against any broker.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GateError, Result};
use crate::middleware::Middleware;

/// A registered handler plus its per-handler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Registration name; messages reference it via `actor_name`.
    pub name: String,
    /// Per-actor configuration set at registration time.
    pub options: ActorOptions,
}

/// Per-actor options, with explicit optional fields. Absent means "use the
/// gate-level default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorOptions {
    /// Override for cancellation eligibility. `Some(true)` makes the actor's
    /// messages eligible for cancellation checks even when the gate default
    /// says otherwise, and vice versa.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelable: Option<bool>,
}

impl Actor {
    /// Create an actor with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ActorOptions::default(),
        }
    }

    /// Set the cancellation eligibility override.
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.options.cancelable = Some(cancelable);
        self
    }
}

/// Actor lookup as seen by middlewares.
///
/// `get_actor` is a registry read; it never touches the cancel store or any
/// other I/O-bound resource.
pub trait Broker: Send + Sync {
    /// Look up a registered actor by name.
    fn get_actor(&self, actor_name: &str) -> Result<Actor>;
}

/// In-process actor registry for embedded deployments and tests.
///
/// Registration validates that any option an actor sets is recognized by at
/// least one registered middleware, so configuration typos fail at declare
/// time rather than silently at dispatch time.
#[derive(Default)]
pub struct ActorRegistry {
    actors: DashMap<String, Actor>,
    recognized_options: Vec<&'static str>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the actor-option keys a middleware consumes.
    pub fn register_middleware_options(&mut self, middleware: &dyn Middleware) {
        for key in middleware.actor_options() {
            if !self.recognized_options.contains(key) {
                self.recognized_options.push(*key);
            }
        }
    }

    /// Actor-option keys recognized by the registered middlewares.
    pub fn recognized_options(&self) -> &[&'static str] {
        &self.recognized_options
    }

    /// Register an actor, validating its option keys.
    pub fn declare_actor(&self, actor: Actor) -> Result<()> {
        if actor.options.cancelable.is_some() && !self.recognized_options.contains(&"cancelable") {
            return Err(GateError::configuration(format!(
                "actor {} sets option 'cancelable' but no middleware consumes it",
                actor.name
            )));
        }
        debug!(actor = %actor.name, "actor declared");
        self.actors.insert(actor.name.clone(), actor);
        Ok(())
    }

    /// Number of registered actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl Broker for ActorRegistry {
    fn get_actor(&self, actor_name: &str) -> Result<Actor> {
        self.actors
            .get(actor_name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GateError::actor_not_found(actor_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::CancelGate;
    use crate::store::InMemoryCancelStore;
    use std::sync::Arc;

    #[test]
    fn lookup_returns_declared_actor() {
        let mut registry = ActorRegistry::new();
        let gate = CancelGate::new(Arc::new(InMemoryCancelStore::new()));
        registry.register_middleware_options(&gate);
        assert_eq!(registry.recognized_options(), &["cancelable"]);

        registry
            .declare_actor(Actor::new("add").with_cancelable(true))
            .unwrap();

        let actor = registry.get_actor("add").unwrap();
        assert_eq!(actor.name, "add");
        assert_eq!(actor.options.cancelable, Some(true));
    }

    #[test]
    fn unknown_actor_fails_lookup() {
        let registry = ActorRegistry::new();
        let err = registry.get_actor("missing").unwrap_err();
        assert!(matches!(err, GateError::ActorNotFound { .. }));
    }

    #[test]
    fn option_without_consumer_is_rejected() {
        let registry = ActorRegistry::new();
        let err = registry
            .declare_actor(Actor::new("add").with_cancelable(true))
            .unwrap_err();
        assert!(matches!(err, GateError::Configuration { .. }));
    }
}
