//! Player Module
//!
//! Provides player character movement.
//!
//! # Components
//!
//! - [`CharacterController`] - Camera-relative WASD walking with sprint, jump and gravity.
//!   Its velocity is what the pickup behavior scales throws by.

pub mod character_controller;

pub use character_controller::{
    CharacterController,
    WALK_SPEED, SPRINT_SPEED, ACCELERATION, DECELERATION,
    JUMP_VELOCITY, GRAVITY, COYOTE_TIME,
};
