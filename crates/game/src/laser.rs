use glam::Vec3;
use spacefight_common::{EntityId, Transform};
use spacefight_engine::{Behavior, Engine};
use spacefight_scene::{Geometry, Material, NodeTemplate};

use crate::config::LaserConfig;
use crate::{ASTEROID, Scoreboard};

/// Laser bolt mesh: a thin red cylinder along its local Y axis.
pub fn laser_template(transform: Transform) -> NodeTemplate {
    NodeTemplate::mesh(
        "laser",
        Geometry::Cylinder {
            radius_top: 0.08,
            radius_bottom: 0.08,
            height: 2.0,
            segments: 16,
        },
        Material::unlit_rgb(0xff0000),
    )
    .with_transform(transform)
}

/// Projectile: flies along its local +Y, expires after its lifetime, and
/// destroys the first asteroid it touches.
#[derive(Debug, Clone)]
pub struct Laser {
    remaining: f32,
    speed: f32,
    margin: f32,
    score: Scoreboard,
}

impl Laser {
    pub fn new(config: &LaserConfig, score: Scoreboard) -> Self {
        Self {
            remaining: config.lifetime,
            speed: config.speed,
            margin: config.collision_margin,
            score,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl Behavior for Laser {
    fn update(&mut self, me: EntityId, engine: &mut Engine) {
        let dt = engine.dt();
        self.remaining -= dt;

        let Some(transform) = engine.transform_mut(me) else {
            return;
        };
        let heading = transform.rotation * Vec3::Y;
        transform.position += heading * self.speed * dt;
        let position = transform.position;

        if self.remaining <= 0.0 {
            engine.mark_for_removal(me);
        }

        if let Some(target) = first_hit(engine, position, self.margin) {
            engine.mark_for_removal(target);
            engine.mark_for_removal(me);
            self.score.add_point();
            tracing::debug!(laser = %me, asteroid = %target, score = self.score.get(), "asteroid destroyed");
        }
    }
}

/// First live asteroid, in list order, whose hit radius (largest scale
/// component plus `margin`) contains `position`.
fn first_hit(engine: &Engine, position: Vec3, margin: f32) -> Option<EntityId> {
    engine
        .entities()
        .tagged(ASTEROID)
        .filter(|entity| !entity.pending_removal)
        .find_map(|entity| {
            let transform = engine.scene().transform(entity.node())?;
            let radius = transform.scale.max_element() + margin;
            (transform.position.distance(position) <= radius).then_some(entity.id())
        })
}
