use glam::{Quat, Vec2, Vec3};
use spacefight_common::{EntityId, Transform};
use spacefight_engine::{Behavior, Engine, EntityDesc};
use spacefight_input::InputState;
use std::f32::consts::FRAC_PI_2;

use crate::config::{LaserConfig, ShipConfig};
use crate::flight::{FlightModel, steer};
use crate::laser::{Laser, laser_template};
use crate::orient::{rotate_local_x, rotate_local_y, rotate_local_z};
use crate::{LASER, Scoreboard};

/// Player ship: pointer steering, keyboard thrust and roll, twin lasers.
#[derive(Debug, Clone)]
pub struct Ship {
    config: ShipConfig,
    laser: LaserConfig,
    flight: FlightModel,
    cooldown: f32,
    score: Scoreboard,
}

impl Ship {
    pub fn new(config: ShipConfig, laser: LaserConfig, score: Scoreboard) -> Self {
        Self {
            flight: FlightModel::new(config.velocity_decay),
            config,
            laser,
            cooldown: 0.0,
            score,
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.flight.velocity
    }

    /// Thrust in the ship frame: +Z forward, +X left strafe, +Y up.
    fn local_thrust(&self, input: &InputState) -> Vec3 {
        let mut thrust = Vec3::ZERO;
        if input.is_pressed("w") {
            thrust.z += self.config.forward_thrust;
        }
        if input.is_pressed("s") {
            thrust.z -= self.config.thrust;
        }
        if input.is_pressed("a") {
            thrust.x += self.config.thrust;
        }
        if input.is_pressed("d") {
            thrust.x -= self.config.thrust;
        }
        if input.is_pressed(" ") {
            thrust.y += self.config.thrust;
        }
        if input.is_pressed("shift") {
            thrust.y -= self.config.thrust;
        }
        thrust
    }

    fn roll_rate(&self, input: &InputState) -> f32 {
        let mut rate = 0.0;
        if input.is_pressed("e") {
            rate += self.config.max_turn_speed;
        }
        if input.is_pressed("q") {
            rate -= self.config.max_turn_speed;
        }
        rate
    }

    fn fire(&self, engine: &mut Engine, position: Vec3, rotation: Quat) {
        let bolt_rotation = rotate_local_x(rotation, FRAC_PI_2);
        for side in [1.0, -1.0] {
            let muzzle = self.laser.muzzle * Vec3::new(side, 1.0, 1.0);
            let transform = Transform {
                position: position + rotation * muzzle,
                rotation: bolt_rotation,
                ..Transform::default()
            };
            engine.spawn(
                EntityDesc::new(laser_template(transform))
                    .tagged(LASER)
                    .with_behavior(Laser::new(&self.laser, self.score.clone())),
            );
        }
        if let Err(err) = engine.play_sound("laser", self.laser.volume) {
            tracing::warn!(%err, "laser sound unavailable");
        }
    }
}

impl Behavior for Ship {
    fn update(&mut self, me: EntityId, engine: &mut Engine) {
        let dt = engine.dt();
        let viewport = engine.viewport();
        let input = engine.input();
        let turn = input
            .pointer()
            .map(|pointer| {
                steer(
                    pointer - viewport.center(),
                    viewport.height as f32 * 0.5,
                    &self.config,
                )
            })
            .unwrap_or(Vec2::ZERO);
        let roll = self.roll_rate(input);
        let thrust = self.local_thrust(input);
        let trigger = input.is_pressed("mouse0");

        let Some(transform) = engine.transform_mut(me) else {
            return;
        };
        let mut rotation = rotate_local_y(transform.rotation, turn.x * dt);
        rotation = rotate_local_x(rotation, turn.y * dt);
        rotation = rotate_local_z(rotation, roll * dt);
        transform.rotation = rotation;
        self.flight
            .integrate(&mut transform.position, rotation * thrust, dt);
        let position = transform.position;

        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
        if self.cooldown <= 0.0 && trigger {
            self.cooldown = self.config.laser_cooldown;
            self.fire(engine, position, rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacefight_assets::{Asset, AssetRegistry, AudioClip};
    use spacefight_engine::EngineConfig;
    use spacefight_input::InputEvent;
    use spacefight_scene::NodeTemplate;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(20);

    fn setup() -> (Engine, EntityId, Scoreboard) {
        let mut assets = AssetRegistry::new();
        assets.insert("laser", Asset::Audio(AudioClip::new(vec![1u8, 2, 3])));
        let mut engine = Engine::with_assets(EngineConfig::default(), assets);
        let score = Scoreboard::new();
        let ship = engine.spawn(
            EntityDesc::new(NodeTemplate::group("spaceship")).with_behavior(Ship::new(
                ShipConfig::default(),
                LaserConfig::default(),
                score.clone(),
            )),
        );
        (engine, ship, score)
    }

    #[test]
    fn idle_ship_stays_put() {
        let (mut engine, ship, _) = setup();
        engine.step(FRAME);
        assert_eq!(engine.transform(ship).unwrap().position, Vec3::ZERO);
        assert_eq!(engine.transform(ship).unwrap().rotation, Quat::IDENTITY);
    }

    #[test]
    fn forward_key_moves_along_the_nose() {
        let (mut engine, ship, _) = setup();
        engine.handle_input(&InputEvent::KeyDown("w".into()));
        for _ in 0..10 {
            engine.step(FRAME);
        }
        let position = engine.transform(ship).unwrap().position;
        assert!(position.z > 0.0);
        assert!(position.x.abs() < 1e-6 && position.y.abs() < 1e-6);
    }

    #[test]
    fn thrust_follows_orientation() {
        let (mut engine, ship, _) = setup();
        engine.transform_mut(ship).unwrap().rotation = Quat::from_rotation_y(FRAC_PI_2);
        engine.handle_input(&InputEvent::KeyDown(" ".into()));
        engine.handle_input(&InputEvent::KeyDown("w".into()));
        engine.step(FRAME);
        let position = engine.transform(ship).unwrap().position;
        // Nose is world +X after the yaw, up is still +Y.
        assert!(position.x > 0.0);
        assert!(position.y > 0.0);
        assert!(position.z.abs() < 1e-5);
    }

    #[test]
    fn pointer_in_deadzone_does_not_turn() {
        let (mut engine, ship, _) = setup();
        let center = engine.viewport().center();
        engine.handle_input(&InputEvent::PointerMoved {
            x: center.x + 10.0,
            y: center.y,
        });
        engine.step(FRAME);
        assert_eq!(engine.transform(ship).unwrap().rotation, Quat::IDENTITY);
    }

    #[test]
    fn pointer_right_yaws_right() {
        let (mut engine, ship, _) = setup();
        let viewport = engine.viewport();
        engine.handle_input(&InputEvent::PointerMoved {
            x: viewport.width as f32,
            y: viewport.center().y,
        });
        engine.step(FRAME);
        let nose = engine.transform(ship).unwrap().rotation * Vec3::Z;
        // Seen from behind, screen right is world -X.
        assert!(nose.x < 0.0);
    }

    #[test]
    fn firing_spawns_two_lasers_and_respects_cooldown() {
        let (mut engine, ship, _) = setup();
        engine.handle_input(&InputEvent::ButtonDown(0));
        engine.step(FRAME);

        let lasers: Vec<EntityId> = engine.entities().tagged(LASER).map(|e| e.id()).collect();
        assert_eq!(lasers.len(), 2);
        let left = engine.transform(lasers[0]).unwrap().position;
        let right = engine.transform(lasers[1]).unwrap().position;
        assert!(left.abs_diff_eq(Vec3::new(0.7, 0.0, 1.2), 1e-5));
        assert!(right.abs_diff_eq(Vec3::new(-0.7, 0.0, 1.2), 1e-5));
        let heading = engine.transform(lasers[0]).unwrap().rotation * Vec3::Y;
        assert!(heading.abs_diff_eq(Vec3::Z, 1e-5));

        let cues = engine.drain_sound_cues();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].clip, "laser");

        // 0.15 s of cooldown at 20 ms frames: the next pair comes 8 frames later.
        for _ in 0..6 {
            engine.step(FRAME);
        }
        assert_eq!(engine.entities().tagged(LASER).count(), 2);
        engine.step(FRAME);
        engine.step(FRAME);
        assert_eq!(engine.entities().tagged(LASER).count(), 4);
        assert!(engine.entity(ship).is_some());
    }

    #[test]
    fn missing_sound_does_not_stop_firing() {
        let mut engine = Engine::with_assets(EngineConfig::default(), AssetRegistry::new());
        engine.spawn(EntityDesc::empty().with_behavior(Ship::new(
            ShipConfig::default(),
            LaserConfig::default(),
            Scoreboard::new(),
        )));
        engine.handle_input(&InputEvent::ButtonDown(0));
        engine.step(FRAME);
        assert_eq!(engine.entities().tagged(LASER).count(), 2);
        assert!(engine.drain_sound_cues().is_empty());
    }
}
