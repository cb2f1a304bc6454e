//! Demo gameplay scripts for the space-shooter scene.
//!
//! Each script is a [`Behavior`](spacefight_engine::Behavior) attached to an
//! entity at spawn time. [`populate`] builds the whole scene once the assets
//! from [`demo_manifest`] are loaded.

mod asteroid;
mod builtin;
mod config;
mod flight;
mod follow;
mod hud;
mod laser;
mod orient;
mod rng;
mod score;
mod ship;

pub use asteroid::{Spin, asteroid_field, asteroid_template};
pub use builtin::{BuiltinAssetSource, demo_manifest};
pub use config::{GameConfig, LaserConfig, ShipConfig};
pub use flight::{FlightModel, steer};
pub use follow::{CameraFollow, Skybox, skybox_template};
pub use hud::Hud;
pub use laser::{Laser, laser_template};
pub use orient::{rotate_local_x, rotate_local_y, rotate_local_z};
pub use rng::SplitMix64;
pub use score::Scoreboard;
pub use ship::Ship;

use glam::Vec3;
use spacefight_common::Transform;
use spacefight_engine::{Engine, EngineError, EntityDesc};
use spacefight_scene::{NodeKind, NodeTemplate};

/// Tag of laser-destroyable targets.
pub const ASTEROID: &str = "asteroid";
pub const LASER: &str = "laser";
pub const SHIP: &str = "ship";

/// Spawn the demo scene: asteroid field, player ship, chase camera, skybox,
/// lights and HUD. Returns the scoreboard the lasers count hits on.
pub fn populate(engine: &mut Engine, config: &GameConfig) -> Result<Scoreboard, EngineError> {
    let score = Scoreboard::new();

    engine.texture("asteroid")?;
    for transform in asteroid_field(config.asteroid_count, config.field_radius, config.asteroid_seed) {
        engine.spawn(
            EntityDesc::new(asteroid_template(transform))
                .tagged(ASTEROID)
                .with_behavior(Spin::default()),
        );
    }

    let mut ship_model = engine.model("spaceship")?;
    ship_model.transform.position = config.ship.start;
    ship_model.transform.scale = Vec3::splat(config.ship.scale);
    let ship = engine.spawn(EntityDesc::new(ship_model).tagged(SHIP).with_behavior(Ship::new(
        config.ship.clone(),
        config.laser.clone(),
        score.clone(),
    )));

    engine.spawn(EntityDesc::empty().with_behavior(CameraFollow::new(ship)));

    engine.texture("space")?;
    engine.spawn(EntityDesc::new(skybox_template()).with_behavior(Skybox));

    engine.spawn(EntityDesc::new(NodeTemplate::new(
        "ambient light",
        NodeKind::AmbientLight {
            color: 0xffffff,
            intensity: 0.5,
        },
    )));
    engine.spawn(EntityDesc::new(
        NodeTemplate::new(
            "sun",
            NodeKind::DirectionalLight {
                color: 0xffffff,
                intensity: 2.0,
            },
        )
        .with_transform(Transform::from_position(Vec3::new(1.0, 1.0, 0.0))),
    ));

    engine.overlay_mut().set_cursor_visible(false);
    engine.spawn(EntityDesc::empty().with_behavior(Hud::new(score.clone())));

    tracing::info!(
        asteroids = config.asteroid_count,
        entities = engine.entities().len(),
        "demo scene populated"
    );
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacefight_engine::EngineConfig;
    use spacefight_input::InputEvent;
    use std::time::Duration;

    async fn boot(config: GameConfig) -> (Engine, Scoreboard) {
        let mut score = None;
        let engine = Engine::boot(
            EngineConfig::default(),
            &demo_manifest(),
            &BuiltinAssetSource,
            |engine| {
                score = Some(populate(engine, &config)?);
                Ok(())
            },
        )
        .await
        .unwrap();
        (engine, score.unwrap())
    }

    #[tokio::test]
    async fn populate_builds_the_scene() {
        let config = GameConfig {
            asteroid_count: 3,
            ..GameConfig::default()
        };
        let (engine, score) = boot(config).await;

        // 3 asteroids, ship, camera, skybox, two lights, HUD.
        assert_eq!(engine.entities().len(), 9);
        assert_eq!(engine.entities().tagged(ASTEROID).count(), 3);
        assert_eq!(engine.entities().tagged(SHIP).count(), 1);
        assert!(!engine.overlay().cursor_visible());
        assert_eq!(score.get(), 0);

        let ship = engine.entities().tagged(SHIP).next().unwrap().id();
        let transform = engine.transform(ship).unwrap();
        assert_eq!(transform.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(transform.scale, Vec3::splat(0.2));
    }

    #[tokio::test]
    async fn each_ship_model_is_a_fresh_copy() {
        let (mut engine, _) = boot(GameConfig::default()).await;
        let before = engine.scene().len();
        let model = engine.model("spaceship").unwrap();
        let other = engine.spawn(EntityDesc::new(model.clone()));
        assert_eq!(engine.scene().len(), before + model.node_count());

        engine.transform_mut(other).unwrap().position = Vec3::splat(9.0);
        let ship = engine.entities().tagged(SHIP).next().unwrap().id();
        assert_eq!(engine.transform(ship).unwrap().position, Vec3::new(0.0, 0.0, 2.0));
    }

    #[tokio::test]
    async fn shooting_the_origin_asteroid_scores() {
        let config = GameConfig {
            asteroid_count: 1,
            ..GameConfig::default()
        };
        let (mut engine, score) = boot(config).await;
        // Face the ship back toward the asteroid at the origin.
        let ship = engine.entities().tagged(SHIP).next().unwrap().id();
        engine.transform_mut(ship).unwrap().rotation = glam::Quat::from_rotation_y(std::f32::consts::PI);
        engine.handle_input(&InputEvent::ButtonDown(0));

        for _ in 0..5 {
            engine.step(Duration::from_millis(20));
        }
        assert_eq!(score.get(), 1);
        assert_eq!(engine.entities().tagged(ASTEROID).count(), 0);
        assert_eq!(engine.overlay().label("score"), Some("Score: 1"));
    }
}
