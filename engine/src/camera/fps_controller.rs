//! FPS Camera Controller Module
//!
//! First-person camera where mouse movement directly rotates the view.
//! The player's look direction (what the pickup ray follows) comes from here.
//!
//! - Pitch clamped to ±89 degrees
//! - No smoothing

use glam::{Quat, Vec3};

/// Pitch limit constant: -89 degrees in radians
const PITCH_LIMIT_MIN: f32 = -89.0 * std::f32::consts::PI / 180.0;
/// Pitch limit constant: +89 degrees in radians
const PITCH_LIMIT_MAX: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// FPS Camera Controller
///
/// ## Usage
/// ```rust,ignore
/// let mut camera = FPSCameraController::new();
/// camera.apply_mouse_delta(mouse_dx, mouse_dy);
///
/// // Drive the camera entity in the scene
/// scene.get_mut(camera_entity)?.transform.rotation = camera.orientation();
/// ```
#[derive(Clone, Debug)]
pub struct FPSCameraController {
    /// Horizontal angle (radians) - unrestricted, wraps around
    pub yaw: f32,
    /// Vertical angle (radians) - clamped to pitch_limits
    pub pitch: f32,
    /// Mouse sensitivity in radians per pixel (default: 0.002)
    pub sensitivity: f32,
    /// Pitch limits (min, max) in radians
    pitch_limits: (f32, f32),
}

impl Default for FPSCameraController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
            pitch_limits: (PITCH_LIMIT_MIN, PITCH_LIMIT_MAX),
        }
    }
}

impl FPSCameraController {
    /// Create a new FPS camera controller with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an FPS camera controller with custom sensitivity
    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            ..Default::default()
        }
    }

    /// Set the pitch angle directly (in radians, will be clamped to limits)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Get the pitch limits in radians (min, max)
    #[inline]
    pub fn get_pitch_limits(&self) -> (f32, f32) {
        self.pitch_limits
    }

    /// Apply mouse movement delta to rotate the camera
    ///
    /// # Arguments
    /// * `dx` - Mouse movement in X (pixels). Positive = look right (increase yaw)
    /// * `dy` - Mouse movement in Y (pixels). Positive = look down (decrease pitch)
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Get the camera's forward direction vector
    ///
    /// # Coordinate System
    /// - +X = right
    /// - +Y = up
    /// - -Z = forward
    ///
    /// When yaw=0 and pitch=0, camera looks toward -Z.
    #[inline]
    pub fn get_forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Get the camera's right direction vector (horizontal, normalized)
    #[inline]
    pub fn get_right(&self) -> Vec3 {
        self.get_forward().cross(Vec3::Y).normalize()
    }

    /// Get the camera's up direction vector
    #[inline]
    pub fn get_up(&self) -> Vec3 {
        self.get_right().cross(self.get_forward()).normalize()
    }

    /// Rotation that maps local -Z onto [`Self::get_forward`].
    ///
    /// Yaw turns about world Y (clockwise seen from above), pitch about the
    /// camera's local X.
    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Point the camera from `from` toward a world position.
    pub fn look_at(&mut self, from: Vec3, target: Vec3) {
        let to_target = target - from;
        let distance = to_target.length();

        if distance > 0.001 {
            self.yaw = to_target.x.atan2(-to_target.z);
            self.pitch = (to_target.y / distance)
                .asin()
                .clamp(self.pitch_limits.0, self.pitch_limits.1);
        }
    }

    /// Reset camera orientation to default (looking toward -Z)
    pub fn reset_orientation(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let camera = FPSCameraController::new();
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.sensitivity, 0.002);
    }

    #[test]
    fn test_apply_mouse_delta() {
        let mut camera = FPSCameraController::new();
        camera.apply_mouse_delta(100.0, 100.0);

        assert!((camera.yaw - 0.2).abs() < 0.001);
        assert!((camera.pitch - (-0.2)).abs() < 0.001);
    }

    #[test]
    fn test_pitch_clamping() {
        let mut camera = FPSCameraController::new();
        camera.apply_mouse_delta(0.0, -100000.0);

        let max_pitch = 89.0 * std::f32::consts::PI / 180.0;
        assert!((camera.pitch - max_pitch).abs() < 0.001);
    }

    #[test]
    fn test_forward_vector_at_origin() {
        let camera = FPSCameraController::new();
        let forward = camera.get_forward();

        assert!(forward.x.abs() < 0.001);
        assert!(forward.y.abs() < 0.001);
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_orientation_matches_forward() {
        let mut camera = FPSCameraController::new();
        for (dx, dy) in [(0.0, 0.0), (300.0, 0.0), (-450.0, 120.0), (800.0, -300.0)] {
            camera.apply_mouse_delta(dx, dy);
            let rotated = camera.orientation() * Vec3::NEG_Z;
            let forward = camera.get_forward();
            assert!(
                (rotated - forward).length() < 0.001,
                "orientation {:?} disagrees with forward {:?}",
                rotated,
                forward
            );
        }
    }

    #[test]
    fn test_up_vector_perpendicular() {
        let mut camera = FPSCameraController::new();
        camera.apply_mouse_delta(50.0, 30.0);

        let forward = camera.get_forward();
        let right = camera.get_right();
        let up = camera.get_up();

        assert!(forward.dot(up).abs() < 0.001);
        assert!(right.dot(up).abs() < 0.001);
        assert!(up.y > 0.0);
    }

    #[test]
    fn test_look_at() {
        let mut camera = FPSCameraController::new();
        camera.look_at(Vec3::new(0.0, 1.0, 0.0), Vec3::new(3.0, 1.0, 0.0));

        let forward = camera.get_forward();
        assert!((forward - Vec3::X).length() < 0.001);
    }

    #[test]
    fn test_reset_orientation() {
        let mut camera = FPSCameraController::new();
        camera.apply_mouse_delta(500.0, 200.0);
        camera.reset_orientation();
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }
}
