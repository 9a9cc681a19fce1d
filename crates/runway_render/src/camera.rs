//! Orbit camera
//!
//! The camera never moves itself: the scene is pushed away by the view
//! distance, tilted by the pitch, then turned by the yaw.

use runway_core::ViewState;
use runway_math::{mat4, Mat4};

/// Projection parameters plus view-matrix construction
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.5,
            far: 50.0,
        }
    }
}

impl OrbitCamera {
    pub fn new(fov: f32, near: f32, far: f32) -> Self {
        Self { fov, near, far }
    }

    /// `T(0, 0, -distance) * Rx(pitch) * Ry(yaw)`
    pub fn view_matrix(&self, view: &ViewState) -> Mat4 {
        mat4::chain(&[
            mat4::translation(0.0, 0.0, -view.distance),
            mat4::rotation_x(view.pitch),
            mat4::rotation_y(view.yaw),
        ])
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov, aspect, self.near, self.far)
    }
}
