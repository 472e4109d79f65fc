//! Physics module
//!
//! Minimal custom physics: point-mass rigid bodies and ray queries against
//! box/sphere colliders. Enough to hold, throw and drop objects; no
//! body-body contacts.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`rigid_body`] - Bodies, force modes, integration
//! - [`collision`] - Colliders and ray intersection tests

pub mod collision;
pub mod rigid_body;
pub mod types;

pub use collision::{Collider, aabb_surface_normal, ray_aabb_intersect, ray_sphere_intersect};
pub use rigid_body::{ForceMode, PhysicsConfig, RigidBody};
pub use types::{Quat, Vec3};
