//! Chase camera behind and above the player

use glam::{Mat4, Vec3};

use crate::settings::Settings;

/// Vertical field of view in degrees
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Camera {
    /// Place the camera `height` above and `distance` behind `target` (behind is +Z)
    pub fn follow(target: Vec3, height: f32, distance: f32) -> Self {
        Self {
            eye: target + Vec3::new(0.0, height, distance),
            target,
        }
    }

    pub fn from_settings(target: Vec3, settings: &Settings) -> Self {
        Self::follow(target, settings.camera_height, settings.camera_distance)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect.max(0.01), Z_NEAR, Z_FAR)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}
