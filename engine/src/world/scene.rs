//! Scene Graph
//!
//! Flat entity store with parent links. Each entity carries a local
//! [`Transform`] plus optional components (rigid body, collider, character
//! controller, camera). World transforms are composed on demand by walking
//! the parent chain.
//!
//! Reparenting keeps the entity's world pose, so attaching an object to a
//! hold point and detaching it again never makes it jump.

use std::collections::BTreeMap;
use std::fmt;

use glam::{Mat4, Quat, Vec3};
use log::trace;
use thiserror::Error;

use crate::camera::{Camera, Ray};
use crate::input::MovementKeys;
use crate::physics::{Collider, PhysicsConfig, RigidBody};
use crate::player::CharacterController;

/// Tag identifying the camera returned by [`Scene::main_camera`].
pub const MAIN_CAMERA_TAG: &str = "MainCamera";

/// Horizontal damping (per second) for bodies resting on the ground.
const GROUND_FRICTION: f32 = 4.0;

/// Handle to an entity in a [`Scene`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Raw index, for logging and debugging
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from scene graph operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),
    #[error("parenting {child} under {parent} would create a cycle")]
    ParentCycle { child: EntityId, parent: EntityId },
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: &'static str,
    },
}

/// Position, rotation and scale relative to the parent (or world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local-to-parent matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Decompose a matrix back into a transform (shear is discarded).
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }
}

/// A scene object.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub name: String,
    pub tag: Option<String>,
    pub transform: Transform,
    pub rigid_body: Option<RigidBody>,
    pub collider: Option<Collider>,
    pub character: Option<CharacterController>,
    pub camera: Option<Camera>,
    parent: Option<EntityId>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_rigid_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = Some(body);
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_character(mut self, character: CharacterController) -> Self {
        self.character = Some(character);
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Parent entity, `None` for roots.
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }
}

/// Result of a successful [`Scene::raycast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub entity: EntityId,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// Distance from ray origin
    pub distance: f32,
}

/// The entity store.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root entity.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.parent = None;
        trace!("spawn {} '{}'", id, entity.name);
        self.entities.insert(id, entity);
        id
    }

    /// Add an entity under `parent`; its transform is taken as local.
    pub fn spawn_child(&mut self, entity: Entity, parent: EntityId) -> Result<EntityId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownEntity(parent));
        }
        let id = self.spawn(entity);
        if let Some(spawned) = self.entities.get_mut(&id) {
            spawned.parent = Some(parent);
        }
        Ok(id)
    }

    /// Remove an entity. Its children become roots, keeping their world pose.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        if !self.contains(id) {
            return None;
        }
        for child in self.children(id) {
            if let Ok(world) = self.world_matrix(child) {
                if let Some(entity) = self.entities.get_mut(&child) {
                    entity.transform = Transform::from_matrix(world);
                    entity.parent = None;
                }
            }
        }
        trace!("despawn {}", id);
        self.entities.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Like [`Self::get`] but with an error for missing entities.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, SceneError> {
        self.entities.get(&id).ok_or(SceneError::UnknownEntity(id))
    }

    /// Like [`Self::get_mut`] but with an error for missing entities.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SceneError> {
        self.entities.get_mut(&id).ok_or(SceneError::UnknownEntity(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(&id, e)| (id, e))
    }

    /// First entity (lowest id) with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.iter().find(|(_, e)| e.name == name).map(|(id, _)| id)
    }

    /// Whether the entity exists and carries `tag`.
    pub fn compare_tag(&self, id: EntityId, tag: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_tag(tag))
    }

    /// Direct children of `id`.
    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        self.iter()
            .filter(|(_, e)| e.parent == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Whether `ancestor` appears in the parent chain of `id` (or is `id`).
    pub fn is_descendant_of(&self, id: EntityId, ancestor: EntityId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.get(node).and_then(|e| e.parent);
        }
        false
    }

    /// First camera entity tagged [`MAIN_CAMERA_TAG`].
    pub fn main_camera(&self) -> Option<EntityId> {
        self.iter()
            .find(|(_, e)| e.camera.is_some() && e.has_tag(MAIN_CAMERA_TAG))
            .map(|(id, _)| id)
    }

    /// Local-to-world matrix.
    pub fn world_matrix(&self, id: EntityId) -> Result<Mat4, SceneError> {
        let entity = self.entity(id)?;
        let local = entity.transform.matrix();
        match entity.parent {
            Some(parent) => Ok(self.world_matrix(parent)? * local),
            None => Ok(local),
        }
    }

    pub fn world_transform(&self, id: EntityId) -> Result<Transform, SceneError> {
        Ok(Transform::from_matrix(self.world_matrix(id)?))
    }

    pub fn world_position(&self, id: EntityId) -> Result<Vec3, SceneError> {
        Ok(self.world_matrix(id)?.transform_point3(Vec3::ZERO))
    }

    pub fn world_scale(&self, id: EntityId) -> Result<Vec3, SceneError> {
        Ok(self.world_transform(id)?.scale)
    }

    /// World-space look direction of an entity (its local -Z).
    pub fn forward(&self, id: EntityId) -> Result<Vec3, SceneError> {
        let world = self.world_matrix(id)?;
        Ok(world.transform_vector3(Vec3::NEG_Z).normalize_or_zero())
    }

    /// Move an entity so that its world position is `position`.
    pub fn set_world_position(&mut self, id: EntityId, position: Vec3) -> Result<(), SceneError> {
        let parent = self.entity(id)?.parent;
        let local = match parent {
            Some(parent) => self.world_matrix(parent)?.inverse().transform_point3(position),
            None => position,
        };
        self.entity_mut(id)?.transform.position = local;
        Ok(())
    }

    /// Reparent `child` under `parent` (or to the root with `None`), keeping
    /// its world pose.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<(), SceneError> {
        let world = self.world_matrix(child)?;

        let local = match parent {
            Some(parent) => {
                if !self.contains(parent) {
                    return Err(SceneError::UnknownEntity(parent));
                }
                if self.is_descendant_of(parent, child) {
                    return Err(SceneError::ParentCycle { child, parent });
                }
                self.world_matrix(parent)?.inverse() * world
            }
            None => world,
        };

        let entity = self.entity_mut(child)?;
        entity.transform = Transform::from_matrix(local);
        entity.parent = parent;
        Ok(())
    }

    /// Nearest collider hit along `ray`, within its max distance.
    ///
    /// Entities in `ignore`, and everything parented under them, are skipped.
    /// Colliders that contain the ray origin are not reported.
    pub fn raycast(&self, ray: &Ray, ignore: &[EntityId]) -> Option<RaycastHit> {
        if !ray.is_valid() {
            return None;
        }

        let mut best: Option<RaycastHit> = None;
        for (id, entity) in self.iter() {
            let Some(collider) = entity.collider else {
                continue;
            };
            if ignore.iter().any(|&skip| self.is_descendant_of(id, skip)) {
                continue;
            }
            let Ok(world) = self.world_transform(id) else {
                continue;
            };
            let Some((distance, normal)) =
                collider.ray_cast(world.position, world.scale, ray.origin, ray.direction)
            else {
                continue;
            };
            if distance > ray.max_distance {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(RaycastHit {
                    entity: id,
                    point: ray.at(distance),
                    normal,
                    distance,
                });
            }
        }
        best
    }

    /// Step the character controller on `id` and move the entity.
    ///
    /// Returns the new world position.
    pub fn move_character(
        &mut self,
        id: EntityId,
        movement: &MovementKeys,
        camera_yaw: f32,
        dt: f32,
    ) -> Result<Vec3, SceneError> {
        let mut character = self.entity(id)?.character.ok_or(SceneError::MissingComponent {
            entity: id,
            component: "CharacterController",
        })?;
        let position = self.world_position(id)?;
        let position = character.update(position, movement, camera_yaw, dt);

        self.entity_mut(id)?.character = Some(character);
        self.set_world_position(id, position)?;
        Ok(position)
    }

    /// Integrate every dynamic root body and rest it on the ground plane.
    ///
    /// Bodies with a parent follow their parent and are not simulated.
    pub fn step_physics(&mut self, config: &PhysicsConfig, dt: f32) {
        for entity in self.entities.values_mut() {
            if entity.parent.is_some() {
                continue;
            }
            let Some(body) = entity.rigid_body.as_mut() else {
                continue;
            };
            if body.is_kinematic() {
                continue;
            }

            let displacement = body.integrate(config, dt);
            entity.transform.position += displacement;

            let bottom = match entity.collider {
                Some(Collider::Box { half_extents }) => half_extents.y * entity.transform.scale.y.abs(),
                Some(Collider::Sphere { radius }) => radius * entity.transform.scale.abs().max_element(),
                None => 0.0,
            };
            let rest_height = config.ground_height + bottom;
            if entity.transform.position.y <= rest_height {
                entity.transform.position.y = rest_height;
                body.velocity.y = body.velocity.y.max(0.0);
                body.velocity.x /= 1.0 + GROUND_FRICTION * dt;
                body.velocity.z /= 1.0 + GROUND_FRICTION * dt;
            }
        }
    }
}
