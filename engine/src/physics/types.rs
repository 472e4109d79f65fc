//! Math type re-exports from glam used by the physics and scene code.

pub use glam::{Mat4, Quat, Vec3};
