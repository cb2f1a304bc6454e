use spacefight_scene::{Camera, NodeKind, SceneGraph};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene graph and the camera, then produces output.
/// It never mutates either.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene as seen from `camera`.
    fn render(&self, scene: &SceneGraph, camera: &Camera) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces an indented outline of the node tree. Useful for CLI output,
/// logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Skip nodes deeper than this below the root.
    pub max_depth: Option<usize>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneGraph, camera: &Camera) -> String {
        let mut out = String::new();
        let nodes = scene.traverse();
        let _ = writeln!(out, "=== Scene ({} nodes) ===", nodes.len());
        let p = camera.position;
        let f = camera.forward();
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.2}",
            p.x,
            p.y,
            p.z,
            f.x,
            f.y,
            f.z,
            camera.fov.to_degrees(),
            camera.aspect
        );

        for (depth, node) in nodes {
            if self.max_depth.is_some_and(|max| depth > max) {
                continue;
            }
            let p = node.transform.position;
            let detail = match &node.kind {
                NodeKind::Mesh { material, .. } => match &material.texture {
                    Some(texture) => format!(" texture={texture}"),
                    None => String::new(),
                },
                NodeKind::AmbientLight { intensity, .. }
                | NodeKind::DirectionalLight { intensity, .. } => {
                    format!(" intensity={intensity:.2}")
                }
                _ => String::new(),
            };
            let _ = writeln!(
                out,
                "{}[{}] {} {} pos=({:.2}, {:.2}, {:.2}){}",
                "  ".repeat(depth),
                node.id.short(),
                node.name,
                node.kind.label(),
                p.x,
                p.y,
                p.z,
                detail
            );
        }

        out
    }
}
