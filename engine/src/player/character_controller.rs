//! Character Controller
//!
//! Kinematic first-person walker: camera-relative WASD, sprint, jump with
//! coyote time, gravity, flat ground. The controller owns velocity only; the
//! position lives on the entity transform and is passed in each step.
//!
//! # Physics Model
//!
//! - Walk speed: 5.0 m/s
//! - Sprint speed: 10.0 m/s
//! - Acceleration: 50.0 m/s^2
//! - Deceleration: 30.0 m/s^2

use glam::Vec3;

use crate::input::MovementKeys;

/// Walking speed in m/s
pub const WALK_SPEED: f32 = 5.0;
/// Sprinting speed in m/s
pub const SPRINT_SPEED: f32 = 10.0;
/// Acceleration in m/s²
pub const ACCELERATION: f32 = 50.0;
/// Deceleration when no input
pub const DECELERATION: f32 = 30.0;
/// Jump velocity in m/s
pub const JUMP_VELOCITY: f32 = 8.0;
/// Gravity in m/s²
pub const GRAVITY: f32 = 20.0;
/// Time after leaving ground where jump is still allowed
pub const COYOTE_TIME: f32 = 0.1;

/// First-person character controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterController {
    /// Horizontal velocity (XZ plane)
    pub horizontal_velocity: Vec3,
    /// Vertical velocity (for jumping/falling)
    pub vertical_velocity: f32,
    /// Whether the character is currently on the ground
    pub is_grounded: bool,
    /// Y of the walkable ground plane
    pub ground_height: f32,
    /// Coyote time remaining (for forgiving jump timing)
    coyote_time_remaining: f32,
}

impl Default for CharacterController {
    fn default() -> Self {
        Self {
            horizontal_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            is_grounded: true,
            ground_height: 0.0,
            coyote_time_remaining: 0.0,
        }
    }
}

impl CharacterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grounded controller standing on a floor at `ground_height`.
    pub fn with_ground_height(ground_height: f32) -> Self {
        Self {
            ground_height,
            ..Self::default()
        }
    }

    /// Start out already moving horizontally (the Y component is ignored).
    pub fn with_horizontal_velocity(mut self, velocity: Vec3) -> Self {
        self.horizontal_velocity = Vec3::new(velocity.x, 0.0, velocity.z);
        self
    }

    /// Full velocity vector (m/s).
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.horizontal_velocity + Vec3::new(0.0, self.vertical_velocity, 0.0)
    }

    /// Magnitude of [`Self::velocity`].
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity().length()
    }

    /// Check if can currently jump
    pub fn can_jump(&self) -> bool {
        self.is_grounded || self.coyote_time_remaining > 0.0
    }

    /// Step the controller and return the new feet position.
    ///
    /// `camera_yaw` orients WASD: yaw 0 walks toward -Z.
    pub fn update(
        &mut self,
        position: Vec3,
        movement: &MovementKeys,
        camera_yaw: f32,
        delta_time: f32,
    ) -> Vec3 {
        let dt = delta_time.clamp(0.0001, 0.1);
        let mut position = position;

        let forward = Vec3::new(camera_yaw.sin(), 0.0, -camera_yaw.cos());
        let right = Vec3::new(-forward.z, 0.0, forward.x);

        let input_dir = (forward * movement.forward_axis() as f32
            + right * movement.right_axis() as f32)
            .normalize_or_zero();

        let target_speed = if movement.sprint { SPRINT_SPEED } else { WALK_SPEED };
        let target_velocity = input_dir * target_speed;

        if input_dir.length_squared() > 0.001 {
            let velocity_diff = target_velocity - self.horizontal_velocity;
            let accel_amount = ACCELERATION * dt;

            if velocity_diff.length() <= accel_amount {
                self.horizontal_velocity = target_velocity;
            } else {
                self.horizontal_velocity += velocity_diff.normalize() * accel_amount;
            }
        } else {
            let speed = self.horizontal_velocity.length();
            let decel_amount = DECELERATION * dt;
            if speed <= decel_amount {
                self.horizontal_velocity = Vec3::ZERO;
            } else {
                self.horizontal_velocity -= self.horizontal_velocity.normalize() * decel_amount;
            }
        }

        position += self.horizontal_velocity * dt;

        if movement.jump && self.can_jump() {
            self.vertical_velocity = JUMP_VELOCITY;
            self.is_grounded = false;
            self.coyote_time_remaining = 0.0;
        }

        if !self.is_grounded || self.vertical_velocity > 0.0 {
            self.vertical_velocity -= GRAVITY * dt;
            position.y += self.vertical_velocity * dt;
        }

        if !self.is_grounded {
            self.coyote_time_remaining = (self.coyote_time_remaining - dt).max(0.0);
        }

        if position.y <= self.ground_height {
            position.y = self.ground_height;
            self.vertical_velocity = 0.0;
            self.is_grounded = true;
        } else if self.is_grounded {
            self.is_grounded = false;
            self.coyote_time_remaining = COYOTE_TIME;
        }

        position
    }
}
