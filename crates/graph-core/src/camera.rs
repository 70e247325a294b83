//! Orbit camera used by the frontends to look at the graph.
//!
//! Kept free of platform APIs so the same matrices and visibility test work on
//! every frontend.

use crate::constants::{camera_eye_vec3, CAMERA_FOVY_RADIANS, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::render::Bounds;
use glam::{Mat4, Quat, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: camera_eye_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Rotate the eye around the target's vertical axis.
    pub fn orbit(&mut self, yaw_radians: f32) {
        let offset = self.eye - self.target;
        self.eye = self.target + Quat::from_rotation_y(yaw_radians) * offset;
    }

    /// Conservative frustum test: false only when every corner of `bounds`
    /// lies outside the same clip plane.
    pub fn sees(&self, bounds: &Bounds) -> bool {
        let view_proj = self.view_projection();
        let clip = bounds
            .corners()
            .map(|c| view_proj * Vec4::new(c.x, c.y, c.z, 1.0));
        let outside = |test: fn(&Vec4) -> bool| clip.iter().all(test);
        !(outside(|p| p.x < -p.w)
            || outside(|p| p.x > p.w)
            || outside(|p| p.y < -p.w)
            || outside(|p| p.y > p.w)
            || outside(|p| p.z < 0.0)
            || outside(|p| p.z > p.w))
    }
}
