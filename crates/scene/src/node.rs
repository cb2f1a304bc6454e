use glam::Vec2;
use serde::{Deserialize, Serialize};
use spacefight_common::{NodeId, Transform};

/// Shape of a mesh node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Sphere {
        radius: f32,
        segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    /// Mesh data that came from an imported model file.
    Imported {
        mesh: String,
        primitives: usize,
        vertex_count: usize,
    },
}

/// Surface description for a mesh node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: [f32; 4],
    /// Name of a registered texture, if the surface is textured.
    pub texture: Option<String>,
    pub uv_repeat: Vec2,
    /// Ignore scene lighting.
    pub unlit: bool,
    /// Render the inside faces (skyboxes).
    pub back_side: bool,
    pub depth_test: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            texture: None,
            uv_repeat: Vec2::ONE,
            unlit: false,
            back_side: false,
            depth_test: true,
        }
    }
}

impl Material {
    pub fn textured(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(texture.into()),
            ..Self::default()
        }
    }

    /// Flat, unlit color from a `0xRRGGBB` value.
    pub fn unlit_rgb(rgb: u32) -> Self {
        Self {
            color: rgb_to_linear(rgb),
            unlit: true,
            ..Self::default()
        }
    }

    pub fn with_uv_repeat(mut self, u: f32, v: f32) -> Self {
        self.uv_repeat = Vec2::new(u, v);
        self
    }
}

fn rgb_to_linear(rgb: u32) -> [f32; 4] {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Placeholder with nothing to draw.
    Empty,
    /// Pure transform parent (model roots, scene root).
    Group,
    Mesh {
        geometry: Geometry,
        material: Material,
    },
    AmbientLight {
        color: u32,
        intensity: f32,
    },
    DirectionalLight {
        color: u32,
        intensity: f32,
    },
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Group => "group",
            Self::Mesh { .. } => "mesh",
            Self::AmbientLight { .. } => "ambient-light",
            Self::DirectionalLight { .. } => "directional-light",
        }
    }
}

/// Owned description of a node subtree.
///
/// Loaded models are kept as templates; the scene graph stamps out a fresh copy
/// of the whole subtree on every instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    /// Lower values draw first.
    pub render_order: i32,
    pub children: Vec<NodeTemplate>,
}

impl NodeTemplate {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::default(),
            render_order: 0,
            children: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new("empty", NodeKind::Empty)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Mesh { geometry, material })
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_render_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }

    pub fn with_child(mut self, child: NodeTemplate) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeTemplate>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeTemplate::node_count).sum::<usize>()
    }
}

/// A node stored in the scene graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub render_order: i32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
