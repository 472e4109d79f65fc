//! Object Pickup
//!
//! First-person grab-and-throw. Looking at a tagged object within range and
//! pressing interact attaches it to a hold anchor (usually parented to the
//! camera), turns its body kinematic and shrinks it toward a fraction of its
//! size. Pressing interact again restores its size, detaches it and launches
//! it along the view direction with an impulse that grows with the player's
//! current speed:
//!
//! ```text
//! throw_strength = base_throw_force + player_speed * max_throw_multiplier
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut pickup = ObjectPickup::new(PickupConfig::default(), player, hold_anchor);
//! pickup.start(&scene)?;
//!
//! // Each frame:
//! input.begin_frame();
//! // ... feed key events ...
//! if let Some(event) = pickup.update(&mut scene, &input, dt) {
//!     // react to PickedUp / Thrown / ...
//! }
//! scene.step_physics(&physics, dt);
//! ```

use glam::Vec3;
use log::{debug, error, info, warn};
use thiserror::Error;

use super::config::PickupConfig;
use crate::camera::{DebugRay, Ray};
use crate::input::InputState;
use crate::physics::ForceMode;
use crate::world::{EntityId, Scene, SceneError};

/// Errors raised while wiring the behavior to a scene.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickupError {
    #[error("no CharacterController on {0}; attach the pickup behavior to the player")]
    MissingCharacterController(EntityId),
    #[error("no camera assigned and the scene has no main camera")]
    NoCamera,
    #[error("hold anchor {0} does not exist")]
    MissingHoldAnchor(EntityId),
    #[error("pickup behavior used before start()")]
    NotStarted,
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// What the behavior is doing right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldState {
    Idle,
    Holding {
        entity: EntityId,
        /// Local scale at the moment of pickup, restored on throw
        original_scale: Vec3,
    },
}

/// Outcome of an interaction, returned to the caller for UI/audio hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupEvent {
    /// The object is now held.
    PickedUp { entity: EntityId },
    /// The object was released with this impulse (N·s).
    Thrown { entity: EntityId, impulse: Vec3 },
    /// Nothing within range along the view ray.
    RaycastMissed,
    /// Hit something that does not carry the pickup tag.
    NotPickupable { entity: EntityId },
    /// Hit a tagged object without a rigid body.
    MissingRigidBody { entity: EntityId },
}

/// Impulse magnitude for a throw at the given player speed.
pub fn throw_strength(config: &PickupConfig, player_speed: f32) -> f32 {
    config.base_throw_force + player_speed * config.max_throw_multiplier
}

/// Pickup-and-throw behavior attached to a player entity.
#[derive(Debug, Clone)]
pub struct ObjectPickup {
    config: PickupConfig,
    /// Player entity; must carry a CharacterController
    owner: EntityId,
    /// Held objects are parented here
    hold_anchor: EntityId,
    /// View the pickup ray is cast from; resolved to the main camera in start()
    camera: Option<EntityId>,
    state: HoldState,
    started: bool,
    last_debug_ray: Option<DebugRay>,
}

impl ObjectPickup {
    pub fn new(config: PickupConfig, owner: EntityId, hold_anchor: EntityId) -> Self {
        Self {
            config,
            owner,
            hold_anchor,
            camera: None,
            state: HoldState::Idle,
            started: false,
            last_debug_ray: None,
        }
    }

    /// Use a specific camera instead of the scene's main camera.
    pub fn with_camera(mut self, camera: EntityId) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Resolve scene references. Must succeed before [`Self::update`] does anything.
    pub fn start(&mut self, scene: &Scene) -> Result<(), PickupError> {
        let owner = scene.entity(self.owner)?;
        if owner.character.is_none() {
            error!(
                "CharacterController not found on '{}'; the pickup behavior must be attached to the player",
                owner.name
            );
            return Err(PickupError::MissingCharacterController(self.owner));
        }

        if !scene.contains(self.hold_anchor) {
            return Err(PickupError::MissingHoldAnchor(self.hold_anchor));
        }

        let camera = match self.camera.filter(|&id| scene.contains(id)) {
            Some(camera) => camera,
            None => scene.main_camera().ok_or(PickupError::NoCamera)?,
        };
        self.camera = Some(camera);
        self.started = true;
        debug!(
            "pickup ready: owner {} camera {} anchor {}",
            self.owner, camera, self.hold_anchor
        );
        Ok(())
    }

    pub fn config(&self) -> &PickupConfig {
        &self.config
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, HoldState::Holding { .. })
    }

    pub fn held_entity(&self) -> Option<EntityId> {
        match self.state {
            HoldState::Holding { entity, .. } => Some(entity),
            HoldState::Idle => None,
        }
    }

    pub fn camera(&self) -> Option<EntityId> {
        self.camera
    }

    /// Debug ray computed on the most recent update.
    pub fn last_debug_ray(&self) -> Option<DebugRay> {
        self.last_debug_ray
    }

    /// Per-frame tick.
    ///
    /// Interaction triggers on the frame `config.interact_key` goes down.
    /// Returns the interaction outcome on those frames.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        input: &InputState,
        dt: f32,
    ) -> Option<PickupEvent> {
        if !self.started {
            return None;
        }

        self.last_debug_ray = self
            .view_ray(scene)
            .ok()
            .map(|ray| DebugRay::from_ray(&ray, DebugRay::RED));

        self.release_if_taken(scene);

        let event = if input.just_pressed(self.config.interact_key) {
            let result = if self.is_holding() {
                self.throw_object(scene)
            } else {
                self.try_pickup(scene).map(Some)
            };
            match result {
                Ok(event) => event,
                Err(e) => {
                    warn!("interaction failed: {}", e);
                    None
                }
            }
        } else {
            None
        };

        if let HoldState::Holding {
            entity,
            original_scale,
        } = self.state
        {
            let target = original_scale * self.config.shrink_factor;
            let t = (dt * self.config.shrink_speed).clamp(0.0, 1.0);
            if let Some(held) = scene.get_mut(entity) {
                held.transform.scale = held.transform.scale.lerp(target, t);
            }
        }

        event
    }

    /// Cast the view ray and grab what it hits, if allowed.
    ///
    /// Does nothing to the scene unless the result is [`PickupEvent::PickedUp`].
    /// Calling this while already holding something returns the current hold.
    pub fn try_pickup(&mut self, scene: &mut Scene) -> Result<PickupEvent, PickupError> {
        if !self.started {
            return Err(PickupError::NotStarted);
        }
        if let HoldState::Holding { entity, .. } = self.state {
            return Ok(PickupEvent::PickedUp { entity });
        }

        let ray = self.view_ray(scene)?;
        let Some(hit) = scene.raycast(&ray, &[self.owner]) else {
            debug!("raycast did not hit anything");
            return Ok(PickupEvent::RaycastMissed);
        };

        let entity = scene.entity(hit.entity)?;
        debug!("raycast hit: '{}' at {:.2}m", entity.name, hit.distance);

        if !entity.has_tag(&self.config.pickup_tag) {
            warn!(
                "'{}' was hit but is not tagged '{}'",
                entity.name, self.config.pickup_tag
            );
            return Ok(PickupEvent::NotPickupable { entity: hit.entity });
        }
        if entity.rigid_body.is_none() {
            warn!("'{}' has no rigid body to pick up", entity.name);
            return Ok(PickupEvent::MissingRigidBody { entity: hit.entity });
        }

        let original_scale = entity.transform.scale;
        let name = entity.name.clone();

        scene.set_parent(hit.entity, Some(self.hold_anchor))?;
        let held = scene.entity_mut(hit.entity)?;
        if let Some(body) = held.rigid_body.as_mut() {
            body.set_kinematic(true);
        }
        held.transform.position = Vec3::ZERO;

        self.state = HoldState::Holding {
            entity: hit.entity,
            original_scale,
        };
        info!("picked up '{}'", name);
        Ok(PickupEvent::PickedUp { entity: hit.entity })
    }

    /// Release the held object and launch it along the view direction.
    ///
    /// Returns `Ok(None)` when nothing is held.
    pub fn throw_object(&mut self, scene: &mut Scene) -> Result<Option<PickupEvent>, PickupError> {
        if !self.started {
            return Err(PickupError::NotStarted);
        }
        let HoldState::Holding {
            entity,
            original_scale,
        } = self.state
        else {
            return Ok(None);
        };

        let direction = scene.forward(self.view_entity()?)?;
        let player_speed = self.player_speed(scene)?;
        let impulse = direction * throw_strength(&self.config, player_speed);

        // Released before the scene calls so an error cannot leave a stale hold
        self.state = HoldState::Idle;

        scene.entity_mut(entity)?.transform.scale = original_scale;
        scene.set_parent(entity, None)?;

        let thrown = scene.entity_mut(entity)?;
        if let Some(body) = thrown.rigid_body.as_mut() {
            body.set_kinematic(false);
            body.add_force(impulse, ForceMode::Impulse);
        }

        info!(
            "threw '{}' at speed {:.2} (impulse {:.2})",
            thrown.name,
            player_speed,
            impulse.length()
        );
        Ok(Some(PickupEvent::Thrown { entity, impulse }))
    }

    /// Ray from the camera along its forward, `pickup_range` long.
    pub fn view_ray(&self, scene: &Scene) -> Result<Ray, PickupError> {
        let camera = self.view_entity()?;
        Ok(Ray::new(
            scene.world_position(camera)?,
            scene.forward(camera)?,
            self.config.pickup_range,
        ))
    }

    fn view_entity(&self) -> Result<EntityId, PickupError> {
        self.camera.ok_or(PickupError::NotStarted)
    }

    fn player_speed(&self, scene: &Scene) -> Result<f32, PickupError> {
        scene
            .entity(self.owner)?
            .character
            .map(|c| c.speed())
            .ok_or(PickupError::MissingCharacterController(self.owner))
    }

    /// A held object that was despawned or moved off the anchor by someone
    /// else is no longer ours. If it still exists it gets its size back and
    /// goes dynamic where it stands.
    fn release_if_taken(&mut self, scene: &mut Scene) {
        let HoldState::Holding {
            entity,
            original_scale,
        } = self.state
        else {
            return;
        };

        let Some(held) = scene.get_mut(entity) else {
            warn!("held object {} is gone; releasing", entity);
            self.state = HoldState::Idle;
            return;
        };
        if held.parent() == Some(self.hold_anchor) {
            return;
        }

        warn!("'{}' was taken off the hold anchor; releasing", held.name);
        held.transform.scale = original_scale;
        if let Some(body) = held.rigid_body.as_mut() {
            body.set_kinematic(false);
        }
        self.state = HoldState::Idle;
    }
}
