//! Raycast Module
//!
//! Line-of-sight rays cast from the camera, plus the debug segment the host
//! draws to visualise them.

use glam::{Vec3, Vec4};

/// A world-space ray with a maximum travel distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Starting point in world space
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
    /// Hits farther than this are ignored (meters)
    pub max_distance: f32,
}

impl Ray {
    /// Create a ray. The direction is normalized; a zero direction yields a
    /// ray that never hits anything.
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            max_distance: max_distance.max(0.0),
        }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// End point of the ray at its maximum distance.
    #[inline]
    pub fn end(&self) -> Vec3 {
        self.at(self.max_distance)
    }

    /// Whether the ray has a usable direction.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction != Vec3::ZERO
    }
}

/// A line segment for debug visualisation (drawn by the host for one frame).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugRay {
    pub start: Vec3,
    pub end: Vec3,
    /// RGBA, 0-1
    pub color: Vec4,
}

impl DebugRay {
    pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

    /// Segment covering a ray up to its maximum distance.
    pub fn from_ray(ray: &Ray, color: Vec4) -> Self {
        Self {
            start: ray.origin,
            end: ray.end(),
            color,
        }
    }

    /// Segment length in meters.
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}
