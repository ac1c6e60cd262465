use glam::{Mat4, Vec3};
use voxbox_common::CameraConfig;
use voxbox_common::math::{look_at, perspective};
use voxbox_kernel::PlayerState;

/// First-person camera derived from the player each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsCamera {
    pub eye: Vec3,
    pub forward: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl FpsCamera {
    pub fn from_player(player: &PlayerState, config: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: player.eye(config.eye_offset),
            forward: player.forward(),
            fov: config.fov_y_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye, self.eye + self.forward, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        perspective(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Projection * view for the player's current pose.
pub fn frame_transform(player: &PlayerState, config: &CameraConfig, aspect: f32) -> Mat4 {
    FpsCamera::from_player(player, config, aspect).view_projection()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use voxbox_common::PhysicsConfig;

    fn player_with_eye_at_origin() -> PlayerState {
        let mut p = PlayerState::spawn(&PhysicsConfig::default());
        p.position = Vec3::new(0.0, -0.5, 0.0);
        p
    }

    #[test]
    fn eye_sits_above_position() {
        let p = PlayerState::spawn(&PhysicsConfig::default());
        let cam = FpsCamera::from_player(&p, &CameraConfig::default(), 1.0);
        assert_eq!(cam.eye, Vec3::new(0.0, 2.3, 0.0));
        assert!((cam.fov - 60.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn point_ahead_is_inside_clip_volume() {
        let vp = frame_transform(&player_with_eye_at_origin(), &CameraConfig::default(), 16.0 / 9.0);
        let clip = vp * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!(clip.w > 0.0);
        let ndc_z = clip.z / clip.w;
        assert!((-1.0..=1.0).contains(&ndc_z));
        assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4);
    }

    #[test]
    fn point_behind_has_negative_w() {
        let vp = frame_transform(&player_with_eye_at_origin(), &CameraConfig::default(), 16.0 / 9.0);
        let clip = vp * Vec4::new(0.0, 0.0, 10.0, 1.0);
        assert!(clip.w < 0.0);
    }

    #[test]
    fn turning_right_moves_target_ahead() {
        let mut p = player_with_eye_at_origin();
        p.yaw = std::f32::consts::FRAC_PI_2;
        let vp = frame_transform(&p, &CameraConfig::default(), 1.0);
        let clip = vp * Vec4::new(10.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < 1e-4);
    }

    #[test]
    fn matches_glam_reference() {
        let p = player_with_eye_at_origin();
        let cam = FpsCamera::from_player(&p, &CameraConfig::default(), 1.5);
        let reference = Mat4::perspective_rh_gl(cam.fov, 1.5, 0.1, 200.0)
            * Mat4::look_at_rh(cam.eye, cam.eye + cam.forward, Vec3::Y);
        assert!(cam.view_projection().abs_diff_eq(reference, 1e-5));
    }

    #[test]
    fn steep_pitch_stays_finite() {
        let mut p = player_with_eye_at_origin();
        p.pitch = -1.4;
        let vp = frame_transform(&p, &CameraConfig::default(), 1.0);
        assert!(vp.is_finite());
    }
}
