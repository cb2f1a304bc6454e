//! Rotations about an object's own axes.
//!
//! Post-multiplying the orientation applies the turn in the local frame, so
//! pitch, yaw and roll compose freely without gimbal lock.

use glam::Quat;

/// Pitch: turn about the local X axis.
pub fn rotate_local_x(rotation: Quat, angle: f32) -> Quat {
    (rotation * Quat::from_rotation_x(angle)).normalize()
}

/// Yaw: turn about the local Y axis.
pub fn rotate_local_y(rotation: Quat, angle: f32) -> Quat {
    (rotation * Quat::from_rotation_y(angle)).normalize()
}

/// Roll: turn about the local Z axis.
pub fn rotate_local_z(rotation: Quat, angle: f32) -> Quat {
    (rotation * Quat::from_rotation_z(angle)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn turns_are_about_local_axes() {
        // Yaw a quarter turn: the nose (+Z) now points along world +X.
        let yawed = rotate_local_y(Quat::IDENTITY, FRAC_PI_2);
        assert!(approx(yawed * Vec3::Z, Vec3::X));

        // Pitching afterwards turns about the yawed X axis (world -Z), not world X.
        let pitched = rotate_local_x(yawed, FRAC_PI_2);
        assert!(approx(pitched * Vec3::Z, Vec3::NEG_Y));
        assert!(approx(pitched * Vec3::X, Vec3::NEG_Z));
    }

    #[test]
    fn roll_keeps_the_nose() {
        let start = rotate_local_x(Quat::IDENTITY, 0.3);
        let rolled = rotate_local_z(start, 1.0);
        assert!(approx(rolled * Vec3::Z, start * Vec3::Z));
    }

    #[test]
    fn opposite_turns_cancel() {
        let q = rotate_local_y(rotate_local_x(Quat::IDENTITY, 0.4), 0.7);
        let back = rotate_local_y(q, -0.7);
        assert!(back.abs_diff_eq(rotate_local_x(Quat::IDENTITY, 0.4), 1e-5));
    }
}
