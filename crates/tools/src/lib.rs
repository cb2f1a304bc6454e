//! Developer tooling: read-only inspection of a running engine.
//!
//! # Invariants
//! - Inspection never mutates the engine.

mod inspector;

pub use inspector::{EngineInspector, EngineSummary, EntityInfo};
