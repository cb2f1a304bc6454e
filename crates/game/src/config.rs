use glam::Vec3;
use serde::{Deserialize, Serialize};
use spacefight_engine::EngineError;
use std::path::Path;

/// Gameplay tunables for the demo scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Asteroids in the field. The first always sits at the origin.
    pub asteroid_count: usize,
    pub asteroid_seed: u64,
    /// Half the edge length of the cube the field is scattered in.
    pub field_radius: f32,
    pub ship: ShipConfig,
    pub laser: LaserConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asteroid_count: 12,
            asteroid_seed: 0x5eed,
            field_radius: 40.0,
            ship: ShipConfig::default(),
            laser: LaserConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub start: Vec3,
    pub scale: f32,
    /// Acceleration from the forward key.
    pub forward_thrust: f32,
    /// Acceleration from reverse, strafe and vertical keys.
    pub thrust: f32,
    /// Fraction of velocity kept after one second without thrust.
    pub velocity_decay: f32,
    /// Peak yaw/pitch/roll rate in radians per second.
    pub max_turn_speed: f32,
    /// Pointer distance from the viewport center, as a fraction of half its
    /// height, below which the ship does not turn.
    pub steer_deadzone: f32,
    /// Pointer distance at which turning reaches full rate.
    pub steer_max_radius: f32,
    pub laser_cooldown: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            start: Vec3::new(0.0, 0.0, 2.0),
            scale: 0.2,
            forward_thrust: 5.0,
            thrust: 2.0,
            velocity_decay: 0.3,
            max_turn_speed: 1.5,
            steer_deadzone: 0.2,
            steer_max_radius: 0.7,
            laser_cooldown: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    pub speed: f32,
    pub lifetime: f32,
    /// Added to a target's scale to get its hit radius.
    pub collision_margin: f32,
    /// Muzzle position in the ship frame; the second laser mirrors X.
    pub muzzle: Vec3,
    pub volume: f32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            speed: 100.0,
            lifetime: 3.0,
            collision_margin: 0.5,
            muzzle: Vec3::new(0.7, 0.0, 1.2),
            volume: 1.0,
        }
    }
}
