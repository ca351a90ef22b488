#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Cancel Gate
//!
//! Cancellation gating and propagation middleware for distributed task-queue
//! brokers.
//!
//! ## Overview
//!
//! Workers pull messages from a queue and, before executing a message's
//! handler, must decide whether that message was canceled since it was
//! enqueued. This crate provides the middleware that makes that decision:
//! it resolves per-actor eligibility, queries a pluggable cancel store,
//! short-circuits execution with a distinct non-retryable error when a
//! message is canceled, and propagates cancellation across a message group
//! when a grouped member fails.
//!
//! Queueing, persistence, retry policy, and the dispatch loop stay with the
//! broker; this crate only declares the seams it consumes
//! ([`broker::Broker`], [`store::CancelStore`]) and the hook surface it
//! exposes ([`middleware::Middleware`]).
//!
//! ## Key properties
//!
//! - **Zero store cost for ineligible actors**: eligibility is resolved from
//!   registry state alone; only eligible messages pay a store round-trip.
//! - **Deliberate skip, not failure**: a canceled message aborts with
//!   [`error::GateError::MessageCanceled`], recognizable to the dispatch
//!   layer so it bypasses retry/backoff.
//! - **Best-effort group propagation**: cancellation state is monotonic and
//!   idempotent; siblings already running are never preempted.
//! - **Lock-free sharing**: the gate holds only immutable configuration and
//!   a store handle, safe for concurrent reuse across workers.
//!
//! ## Quick start
//!
//! ```rust
//! use cancel_gate::broker::{Actor, ActorRegistry};
//! use cancel_gate::messaging::Message;
//! use cancel_gate::middleware::{CancelGate, Middleware};
//! use cancel_gate::store::InMemoryCancelStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> cancel_gate::Result<()> {
//! let store = Arc::new(InMemoryCancelStore::new());
//! let gate = CancelGate::new(store);
//!
//! let mut registry = ActorRegistry::new();
//! registry.register_middleware_options(&gate);
//! registry.declare_actor(Actor::new("add").with_cancelable(true))?;
//!
//! let message = Message::new("add", serde_json::json!([1, 2]));
//! gate.before_process_message(&registry, &message).await?;
//! // ... run the handler, then report the outcome:
//! # Ok(())
//! # }
//! ```

pub mod broker;
pub mod config;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod middleware;
pub mod store;

pub use broker::{Actor, ActorOptions, ActorRegistry, Broker};
pub use config::GateConfig;
pub use error::{GateError, Result};
pub use messaging::{GroupDescriptor, Message, MessageOptions};
pub use middleware::{CancelGate, DispatchOutcome, Middleware};
pub use store::{CancelStore, InMemoryCancelStore, StoreError};
#[cfg(feature = "postgres")]
pub use store::PostgresCancelStore;
