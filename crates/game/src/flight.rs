use glam::{Vec2, Vec3};

use crate::config::ShipConfig;

/// Velocity state integrated with explicit Euler steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightModel {
    pub velocity: Vec3,
    /// Fraction of velocity kept per second; applied as `decay^dt` each step.
    pub decay_per_second: f32,
}

impl FlightModel {
    pub fn new(decay_per_second: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            decay_per_second,
        }
    }

    /// One step: `v += a*dt`, `p += v*dt`, `v *= decay^dt`.
    pub fn integrate(&mut self, position: &mut Vec3, acceleration: Vec3, dt: f32) {
        self.velocity += acceleration * dt;
        *position += self.velocity * dt;
        self.velocity *= self.decay_per_second.powf(dt);
    }
}

/// Yaw and pitch rates (radians per second) for a pointer offset from the
/// viewport center.
///
/// Turning starts past the deadzone and ramps linearly to full rate at
/// `steer_max_radius`, both measured in half viewport heights. The rate is
/// split between yaw and pitch by the offset's direction. Pointer right yaws
/// the nose right (negative yaw), pointer down pitches it down.
pub fn steer(offset: Vec2, half_height: f32, config: &ShipConfig) -> Vec2 {
    if half_height <= 0.0 {
        return Vec2::ZERO;
    }
    let distance = offset.length() / half_height;
    if distance <= config.steer_deadzone {
        return Vec2::ZERO;
    }
    let span = (config.steer_max_radius - config.steer_deadzone).max(f32::EPSILON);
    let mult = ((distance - config.steer_deadzone) / span).min(1.0);
    let manhattan = offset.x.abs() + offset.y.abs();
    if manhattan == 0.0 {
        return Vec2::ZERO;
    }
    let rate = config.max_turn_speed * mult / manhattan;
    Vec2::new(-offset.x * rate, offset.y * rate)
}
