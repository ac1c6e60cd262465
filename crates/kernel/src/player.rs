use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxbox_common::PhysicsConfig;
use voxbox_common::math::normalize;

/// First-person player state. `position` is the eye point used by physics;
/// the feet sit `eye_height` below it.
///
/// yaw = 0, pitch = 0 looks down -Z; positive yaw turns right, positive
/// pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub grounded: bool,
}

impl PlayerState {
    /// Player standing at the world origin, at rest, looking down -Z.
    pub fn spawn(config: &PhysicsConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.eye_height, 0.0),
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            grounded: false,
        }
    }

    /// Unit view direction from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        forward_vector(self.yaw, self.pitch)
    }

    /// Horizontal unit vector to the player's right.
    pub fn right(&self) -> Vec3 {
        right_vector(self.yaw)
    }

    /// Camera eye, `eye_offset` above the physics position.
    pub fn eye(&self, eye_offset: f32) -> Vec3 {
        self.position + Vec3::Y * eye_offset
    }

    pub fn feet(&self, eye_height: f32) -> Vec3 {
        self.position - Vec3::Y * eye_height
    }

    /// Apply a mouse-look delta in radians; pitch is clamped to `±pitch_limit`.
    pub fn look(&mut self, d_yaw: f32, d_pitch: f32, pitch_limit: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-pitch_limit, pitch_limit);
    }
}

pub fn forward_vector(yaw: f32, pitch: f32) -> Vec3 {
    normalize(Vec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    ))
}

pub fn right_vector(yaw: f32) -> Vec3 {
    normalize(Vec3::new(yaw.cos(), 0.0, yaw.sin()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn spawn_is_at_origin_eye_height() {
        let p = PlayerState::spawn(&PhysicsConfig::default());
        assert_eq!(p.position, Vec3::new(0.0, 1.8, 0.0));
        assert_eq!(p.velocity, Vec3::ZERO);
        assert!(!p.grounded);
        assert_eq!(p.feet(1.8), Vec3::ZERO);
    }

    #[test]
    fn zero_yaw_looks_down_negative_z() {
        assert!(approx(forward_vector(0.0, 0.0), Vec3::NEG_Z));
        assert!(approx(right_vector(0.0), Vec3::X));
    }

    #[test]
    fn positive_yaw_turns_right() {
        assert!(approx(forward_vector(FRAC_PI_2, 0.0), Vec3::X));
        assert!(approx(right_vector(FRAC_PI_2), Vec3::Z));
    }

    #[test]
    fn right_is_forward_cross_up() {
        for yaw in [-2.0_f32, -0.3, 0.0, 0.7, 3.0] {
            let f = forward_vector(yaw, 0.0);
            assert!(approx(right_vector(yaw), normalize(f.cross(Vec3::Y))));
        }
    }

    #[test]
    fn pitch_is_clamped() {
        let mut p = PlayerState::spawn(&PhysicsConfig::default());
        p.look(0.5, 10.0, 1.4);
        assert_eq!(p.pitch, 1.4);
        assert_eq!(p.yaw, 0.5);
        p.look(0.0, -10.0, 1.4);
        assert_eq!(p.pitch, -1.4);
    }

    #[test]
    fn forward_is_unit_length() {
        for pitch in [-1.4_f32, -0.5, 0.0, 0.9, 1.4] {
            assert!((forward_vector(1.1, pitch).length() - 1.0).abs() < 1e-5);
        }
    }
}
