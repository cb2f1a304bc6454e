use glam::Vec3;
use spacefight_common::EntityId;
use spacefight_engine::{Behavior, Engine};
use spacefight_scene::{Geometry, Material, NodeTemplate};
use std::f32::consts::PI;

use crate::orient::rotate_local_y;

/// Chase camera: eases toward a point behind and above the target and looks
/// where the target is heading.
#[derive(Debug, Clone, Copy)]
pub struct CameraFollow {
    target: EntityId,
    /// Camera position in the target's frame.
    pub offset: Vec3,
    /// Fraction of the remaining distance closed per second.
    pub rate: f32,
}

impl CameraFollow {
    pub fn new(target: EntityId) -> Self {
        Self {
            target,
            offset: Vec3::new(0.0, 1.0, -3.5),
            rate: 5.0,
        }
    }
}

impl Behavior for CameraFollow {
    fn update(&mut self, _me: EntityId, engine: &mut Engine) {
        let Some(target) = engine.transform(self.target).copied() else {
            return;
        };
        let dt = engine.dt();
        let goal = target.position + target.rotation * self.offset;
        let camera = engine.camera_mut();
        camera.position += (goal - camera.position) * (self.rate * dt);
        // The camera looks down its -Z; turn it around to face the target's +Z.
        camera.rotation = rotate_local_y(target.rotation, PI);
    }
}

/// Inside-out background sphere, drawn first and never depth tested.
pub fn skybox_template() -> NodeTemplate {
    let mut material = Material::textured("space").with_uv_repeat(2.0, 2.0);
    material.unlit = true;
    material.back_side = true;
    material.depth_test = false;
    NodeTemplate::mesh(
        "skybox",
        Geometry::Sphere {
            radius: 1.0,
            segments: 10,
        },
        material,
    )
    .with_render_order(-999)
}

/// Keeps the background centered on the camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct Skybox;

impl Behavior for Skybox {
    fn update(&mut self, me: EntityId, engine: &mut Engine) {
        let position = engine.camera().position;
        if let Some(transform) = engine.transform_mut(me) {
            transform.position = position;
        }
    }
}
