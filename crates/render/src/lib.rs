//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene graph and camera; they never mutate them.
//! - Only nodes reachable from the scene root are drawn.
//!
//! GPU backends live with the host. The debug text renderer stands in for them
//! in headless runs, logging, and tests.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};
