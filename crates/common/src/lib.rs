//! Shared identifiers and spatial types used by every spacefight crate.

mod types;

pub use types::{EntityId, NodeId, Transform};
