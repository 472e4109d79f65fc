//! Camera Module
//!
//! First-person camera control and line-of-sight rays.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod fps_controller;
pub mod raycast;

pub use fps_controller::FPSCameraController;
pub use raycast::{DebugRay, Ray};

/// Camera component attached to a scene entity.
///
/// The entity's world transform supplies position and orientation; this only
/// carries projection data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 1.2, // ~69 degrees
            near: 0.1,
            far: 1000.0,
        }
    }
}
