//! Rigid body dynamics
//!
//! Point-mass bodies with gravity, linear drag and force accumulation.
//! Rotation is not simulated.
//!
//! # Example
//!
//! ```ignore
//! use object_pickup_engine::physics::{ForceMode, PhysicsConfig, RigidBody};
//! use glam::Vec3;
//!
//! let config = PhysicsConfig::default();
//! let mut body = RigidBody::with_mass(2.0);
//! body.add_force(Vec3::new(0.0, 0.0, -10.0), ForceMode::Impulse);
//! let displacement = body.integrate(&config, 1.0 / 60.0);
//! ```

use glam::Vec3;

/// How [`RigidBody::add_force`] interprets its vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceMode {
    /// Continuous force (N), scaled by dt and divided by mass
    #[default]
    Force,
    /// Continuous acceleration (m/s²), scaled by dt, mass ignored
    Acceleration,
    /// Instant impulse (N·s), divided by mass
    Impulse,
    /// Instant velocity change (m/s), mass ignored
    VelocityChange,
}

/// A simulated body attached to a scene entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    /// Linear velocity (meters/second)
    pub velocity: Vec3,
    /// Mass (kilograms)
    pub mass: f32,
    /// Linear damping per second (0 = none)
    pub drag: f32,
    /// Whether gravity applies
    pub use_gravity: bool,
    /// Kinematic bodies are moved by their transform only
    is_kinematic: bool,
    /// Continuous forces accumulated since the last step (N)
    force_accumulator: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 1.0,
            drag: 0.0,
            use_gravity: true,
            is_kinematic: false,
            force_accumulator: Vec3::ZERO,
        }
    }
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dynamic body with the given mass (clamped to avoid division by zero).
    pub fn with_mass(mass: f32) -> Self {
        Self {
            mass: mass.max(0.001),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_kinematic(&self) -> bool {
        self.is_kinematic
    }

    /// Switch between kinematic and dynamic.
    ///
    /// Becoming kinematic drops any velocity and pending forces, so a body
    /// released later starts from rest plus whatever is applied to it.
    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.is_kinematic = kinematic;
        if kinematic {
            self.velocity = Vec3::ZERO;
            self.force_accumulator = Vec3::ZERO;
        }
    }

    /// Apply a force. Ignored by kinematic bodies.
    ///
    /// `Impulse` and `VelocityChange` take effect immediately; `Force` and
    /// `Acceleration` are accumulated and applied over the next step.
    pub fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        if self.is_kinematic {
            return;
        }
        match mode {
            ForceMode::Force => self.force_accumulator += force,
            ForceMode::Acceleration => self.force_accumulator += force * self.mass,
            ForceMode::Impulse => self.velocity += force / self.mass,
            ForceMode::VelocityChange => self.velocity += force,
        }
    }

    /// Advance the body by `dt` seconds.
    ///
    /// Semi-implicit Euler:
    /// - velocity += (gravity + force / mass) * dt
    /// - velocity *= 1 / (1 + drag * dt)
    /// - displacement = velocity * dt
    ///
    /// # Returns
    /// The displacement to apply to the owning entity's position. Kinematic
    /// bodies always return zero.
    pub fn integrate(&mut self, config: &PhysicsConfig, dt: f32) -> Vec3 {
        if self.is_kinematic || dt <= 0.0 {
            return Vec3::ZERO;
        }

        let mut acceleration = self.force_accumulator / self.mass;
        if self.use_gravity {
            acceleration += config.gravity;
        }
        self.force_accumulator = Vec3::ZERO;

        self.velocity += acceleration * dt;
        if self.drag > 0.0 {
            self.velocity /= 1.0 + self.drag * dt;
        }

        self.velocity * dt
    }
}

/// Global simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration vector (m/s²)
    pub gravity: Vec3,
    /// Height of the ground plane bodies come to rest on
    pub ground_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            ground_height: 0.0,
        }
    }
}

impl PhysicsConfig {
    /// No gravity, ground far below
    pub fn zero_gravity() -> Self {
        Self {
            gravity: Vec3::ZERO,
            ground_height: f32::NEG_INFINITY,
        }
    }
}
