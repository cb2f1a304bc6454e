use glam::{Quat, Vec3};
use spacefight_common::{EntityId, Transform};
use spacefight_engine::{Behavior, Engine};
use spacefight_scene::{Geometry, Material, NodeTemplate};

use crate::orient::{rotate_local_x, rotate_local_y};
use crate::rng::SplitMix64;

/// Textured low-poly sphere of radius 1; size comes from the transform scale.
pub fn asteroid_template(transform: Transform) -> NodeTemplate {
    NodeTemplate::mesh(
        "asteroid",
        Geometry::Sphere {
            radius: 1.0,
            segments: 8,
        },
        Material::textured("asteroid").with_uv_repeat(2.0, 2.0),
    )
    .with_transform(transform)
}

/// Placements for `count` asteroids. The first sits at the origin at unit
/// scale; the rest are scattered through a cube of half-size `radius`.
pub fn asteroid_field(count: usize, radius: f32, seed: u64) -> Vec<Transform> {
    let mut rng = SplitMix64::new(seed);
    (0..count)
        .map(|i| {
            if i == 0 {
                return Transform::default();
            }
            let position = Vec3::new(
                rng.range(-radius, radius),
                rng.range(-radius, radius),
                rng.range(-radius, radius),
            );
            let tilt = Quat::from_euler(
                glam::EulerRot::XYZ,
                rng.range(0.0, std::f32::consts::TAU),
                rng.range(0.0, std::f32::consts::TAU),
                0.0,
            );
            Transform::from_position(position)
                .with_rotation(tilt)
                .with_scale(rng.range(0.5, 2.5))
        })
        .collect()
}

/// Constant tumble about the local X and Y axes.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    /// Radians per second about local X and Y.
    pub rate: (f32, f32),
}

impl Default for Spin {
    fn default() -> Self {
        Self { rate: (0.1, 0.2) }
    }
}

impl Behavior for Spin {
    fn update(&mut self, me: EntityId, engine: &mut Engine) {
        let dt = engine.dt();
        if let Some(transform) = engine.transform_mut(me) {
            let rotation = rotate_local_x(transform.rotation, self.rate.0 * dt);
            transform.rotation = rotate_local_y(rotation, self.rate.1 * dt);
        }
    }
}
