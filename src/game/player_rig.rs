//! Player Rig
//!
//! The first-person player as a small entity hierarchy:
//!
//! ```text
//! player (CharacterController, box collider)
//! └── camera (Camera, tagged MainCamera) at eye height, rotated by mouse look
//!     └── hold anchor, in front of and slightly below the eyes
//! ```

use glam::Vec3;

use crate::camera::{Camera, FPSCameraController};
use crate::input::MovementKeys;
use crate::physics::Collider;
use crate::player::CharacterController;
use crate::world::{Entity, EntityId, MAIN_CAMERA_TAG, Scene, SceneError};

/// Eye height in meters
pub const PLAYER_EYE_HEIGHT: f32 = 1.7;
/// Hold anchor offset from the camera (camera space, -Z is forward)
pub const HOLD_OFFSET: Vec3 = Vec3::new(0.35, -0.3, -1.0);
/// Half extents of the player's body collider
const BODY_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 0.9, 0.4);

/// Entity handles making up the player plus its mouse look state.
#[derive(Debug, Clone)]
pub struct PlayerRig {
    pub body: EntityId,
    pub camera: EntityId,
    pub hold_anchor: EntityId,
    pub look: FPSCameraController,
}

impl PlayerRig {
    /// Spawn the rig with feet at `position`.
    pub fn spawn(scene: &mut Scene, position: Vec3) -> Result<Self, SceneError> {
        let body = scene.spawn(
            Entity::new("Player")
                .at(position)
                .with_character(CharacterController::with_ground_height(position.y))
                .with_collider(Collider::Box {
                    half_extents: BODY_HALF_EXTENTS,
                }),
        );
        let camera = scene.spawn_child(
            Entity::new("PlayerCamera")
                .with_tag(MAIN_CAMERA_TAG)
                .at(Vec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0))
                .with_camera(Camera::default()),
            body,
        )?;
        let hold_anchor = scene.spawn_child(Entity::new("HoldPosition").at(HOLD_OFFSET), camera)?;

        Ok(Self {
            body,
            camera,
            hold_anchor,
            look: FPSCameraController::new(),
        })
    }

    /// Eye position in world space.
    pub fn eye_position(&self, scene: &Scene) -> Result<Vec3, SceneError> {
        scene.world_position(self.camera)
    }

    /// Turn the view toward a world point.
    pub fn look_at(&mut self, scene: &mut Scene, target: Vec3) -> Result<(), SceneError> {
        let eye = self.eye_position(scene)?;
        self.look.look_at(eye, target);
        self.sync_camera(scene)
    }

    /// Apply mouse look and walk for one frame.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        movement: &MovementKeys,
        mouse_delta: (f32, f32),
        dt: f32,
    ) -> Result<Vec3, SceneError> {
        self.look.apply_mouse_delta(mouse_delta.0, mouse_delta.1);
        self.sync_camera(scene)?;
        scene.move_character(self.body, movement, self.look.yaw, dt)
    }

    fn sync_camera(&self, scene: &mut Scene) -> Result<(), SceneError> {
        scene.entity_mut(self.camera)?.transform.rotation = self.look.orientation();
        Ok(())
    }
}
