//! # Messaging Types
//!
//! Value types shared across the dispatch pipeline: the message itself and
//! the group descriptor consumed by cancellation propagation.

pub mod group;
pub mod message;

pub use group::GroupDescriptor;
pub use message::{Message, MessageOptions};
