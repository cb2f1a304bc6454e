//! Scene graph: the render surface the engine hands to a renderer.
//!
//! # Invariants
//! - Every stored node has at most one parent and appears exactly once in that
//!   parent's child list.
//! - Instantiating a template always produces fresh node ids; two instances never
//!   share mutable node state.
//! - A node is "in the scene" only while it is reachable from the root.

mod camera;
mod graph;
mod node;

pub use camera::Camera;
pub use graph::{SceneError, SceneGraph};
pub use node::{Geometry, Material, Node, NodeKind, NodeTemplate};
