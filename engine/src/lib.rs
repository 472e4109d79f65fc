//! Object Pickup Engine Library
//!
//! A small headless first-person engine layer and, on top of it, a
//! pickup-and-throw interaction: look at a tagged object, press interact to
//! hold it (shrunk, in front of the camera), press again to throw it along
//! the view direction with a speed-scaled impulse.
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic keyboard state, per-frame key edges, action bindings
//! - [`camera`] - FPS camera control, rays and debug ray segments
//! - [`physics`] - Rigid bodies, force modes, colliders and ray tests
//! - [`player`] - First-person character controller
//! - [`world`] - Scene graph with parenting, raycasts and the physics step
//! - [`game`] - Player rig, pickup behavior and its configuration
//!
//! # Example
//!
//! ```ignore
//! use object_pickup_engine::game::{ObjectPickup, PickupConfig, PlayerRig};
//! use object_pickup_engine::input::{InputState, KeyCode};
//! use object_pickup_engine::physics::PhysicsConfig;
//! use object_pickup_engine::world::Scene;
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! let rig = PlayerRig::spawn(&mut scene, Vec3::ZERO)?;
//! let mut pickup = ObjectPickup::new(PickupConfig::default(), rig.body, rig.hold_anchor);
//! pickup.start(&scene)?;
//!
//! let mut input = InputState::new();
//! input.begin_frame();
//! input.handle_key(KeyCode::E, true);
//! let event = pickup.update(&mut scene, &input, 1.0 / 60.0);
//! scene.step_physics(&PhysicsConfig::default(), 1.0 / 60.0);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{InputState, KeyCode, KeyboardState};
// Re-export player types
pub use player::CharacterController;
// Re-export scene types
pub use world::{Entity, EntityId, Scene, Transform};
