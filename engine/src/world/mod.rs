//! World Module
//!
//! The scene graph: entities, transforms, parenting, raycasts and the
//! per-frame physics step over the bodies it holds.

pub mod scene;

pub use scene::{Entity, EntityId, MAIN_CAMERA_TAG, RaycastHit, Scene, SceneError, Transform};
