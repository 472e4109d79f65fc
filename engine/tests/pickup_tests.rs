//! Pickup Tests - grab, shrink, throw and the refusal cases
//!
//! Drives `ObjectPickup` through a real scene with a player rig, the way the
//! sandbox binary does, one frame at a time.

use glam::Vec3;
use object_pickup_engine::game::{
    HoldState, ObjectPickup, PickupConfig, PickupError, PickupEvent, PlayerRig, throw_strength,
};
use object_pickup_engine::input::{InputState, KeyCode};
use object_pickup_engine::physics::{Collider, PhysicsConfig, RigidBody};
use object_pickup_engine::player::CharacterController;
use object_pickup_engine::world::{Entity, EntityId, Scene};

const DT: f32 = 1.0 / 60.0;

struct Fixture {
    scene: Scene,
    rig: PlayerRig,
    pickup: ObjectPickup,
    input: InputState,
    item: EntityId,
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 0.001
}

fn crate_entity(position: Vec3) -> Entity {
    Entity::new("Crate")
        .with_tag("Pickup")
        .at(position)
        .with_collider(Collider::unit_box())
        .with_rigid_body(RigidBody::with_mass(2.0))
}

fn fixture_with(config: PickupConfig, item: Entity) -> Fixture {
    let mut scene = Scene::new();
    let mut rig = PlayerRig::spawn(&mut scene, Vec3::ZERO).unwrap();
    let item = scene.spawn(item);
    let target = scene.world_position(item).unwrap();
    rig.look_at(&mut scene, target).unwrap();

    let input = InputState::new();
    let mut pickup = ObjectPickup::new(config, rig.body, rig.hold_anchor);
    pickup.start(&scene).unwrap();

    Fixture {
        scene,
        rig,
        pickup,
        input,
        item,
    }
}

fn fixture() -> Fixture {
    fixture_with(PickupConfig::default(), crate_entity(Vec3::new(0.0, 0.5, -3.0)))
}

impl Fixture {
    /// One frame with the interact key going down.
    fn press(&mut self) -> Option<PickupEvent> {
        let key = self.pickup.config().interact_key;
        self.input.begin_frame();
        self.input.handle_key(key, false);
        self.input.begin_frame();
        self.input.handle_key(key, true);
        self.pickup.update(&mut self.scene, &self.input, DT)
    }

    /// Frames with no new key presses.
    fn idle(&mut self, frames: usize) -> Vec<PickupEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            self.input.begin_frame();
            if let Some(event) = self.pickup.update(&mut self.scene, &self.input, DT) {
                events.push(event);
            }
        }
        events
    }

    fn body(&self) -> RigidBody {
        self.scene.get(self.item).unwrap().rigid_body.unwrap()
    }
}

// ============================================================================
// Pickup
// ============================================================================

#[test]
fn test_pickup_attaches_to_hold_anchor() {
    let mut f = fixture();

    assert_eq!(f.press(), Some(PickupEvent::PickedUp { entity: f.item }));
    assert!(f.pickup.is_holding());
    assert_eq!(f.pickup.held_entity(), Some(f.item));

    let held = f.scene.get(f.item).unwrap();
    assert_eq!(held.parent(), Some(f.rig.hold_anchor));
    assert_eq!(held.transform.position, Vec3::ZERO);
    assert!(held.rigid_body.unwrap().is_kinematic());

    let anchor = f.scene.world_position(f.rig.hold_anchor).unwrap();
    assert!(approx(f.scene.world_position(f.item).unwrap(), anchor));
}

#[test]
fn test_pickup_records_original_scale() {
    let item = crate_entity(Vec3::new(0.0, 0.5, -3.0)).with_scale(Vec3::new(2.0, 1.0, 1.0));
    let mut f = fixture_with(PickupConfig::default(), item);
    f.press();

    match f.pickup.state() {
        HoldState::Holding { original_scale, .. } => {
            assert!(approx(original_scale, Vec3::new(2.0, 1.0, 1.0)));
        }
        HoldState::Idle => panic!("expected to be holding"),
    }
}

#[test]
fn test_held_object_shrinks_toward_factor() {
    let mut f = fixture();
    f.press();

    // First frame already moves 5/60 of the way
    let first = f.scene.get(f.item).unwrap().transform.scale;
    let expected = 1.0 - 0.5 * (5.0 / 60.0);
    assert!((first.x - expected).abs() < 0.001, "got {}", first.x);

    f.idle(180);
    let settled = f.scene.get(f.item).unwrap().transform.scale;
    assert!(approx(settled, Vec3::splat(0.5)), "got {:?}", settled);
}

#[test]
fn test_shrink_never_overshoots_on_long_frames() {
    let mut f = fixture();
    f.press();

    f.input.begin_frame();
    f.pickup.update(&mut f.scene, &f.input, 2.0);
    let scale = f.scene.get(f.item).unwrap().transform.scale;
    assert!(approx(scale, Vec3::splat(0.5)), "got {:?}", scale);
}

#[test]
fn test_held_key_triggers_once() {
    let mut f = fixture();
    f.press();

    // Key stays down: no throw
    let events = f.idle(30);
    assert!(events.is_empty());
    assert!(f.pickup.is_holding());
}

// ============================================================================
// Throw
// ============================================================================

#[test]
fn test_throw_restores_scale_and_detaches() {
    let item = crate_entity(Vec3::new(0.0, 0.5, -3.0)).with_scale(Vec3::new(2.0, 1.0, 1.0));
    let mut f = fixture_with(PickupConfig::default(), item);
    f.press();
    f.idle(60);

    let forward = f.scene.forward(f.rig.camera).unwrap();
    let event = f.press();

    let expected_impulse = forward * 10.0;
    match event {
        Some(PickupEvent::Thrown { entity, impulse }) => {
            assert_eq!(entity, f.item);
            assert!(approx(impulse, expected_impulse));
        }
        other => panic!("expected throw, got {:?}", other),
    }

    assert!(!f.pickup.is_holding());
    let thrown = f.scene.get(f.item).unwrap();
    assert_eq!(thrown.parent(), None);
    assert!(approx(thrown.transform.scale, Vec3::new(2.0, 1.0, 1.0)));

    let body = f.body();
    assert!(!body.is_kinematic());
    // Impulse / mass, starting from rest
    assert!(approx(body.velocity, expected_impulse / 2.0));
}

#[test]
fn test_throw_leaves_object_where_it_was_held() {
    let mut f = fixture();
    f.press();
    f.idle(10);

    let held_at = f.scene.world_position(f.item).unwrap();
    f.press();
    assert!(approx(f.scene.world_position(f.item).unwrap(), held_at));
}

#[test]
fn test_throw_strength_uses_player_speed() {
    let mut f = fixture();
    f.press();

    let player = f.scene.get_mut(f.rig.body).unwrap();
    player.character =
        Some(CharacterController::new().with_horizontal_velocity(Vec3::new(3.0, 0.0, -4.0)));

    let Some(PickupEvent::Thrown { impulse, .. }) = f.press() else {
        panic!("expected throw");
    };
    // 10 + 5 * 2
    assert!((impulse.length() - 20.0).abs() < 0.001);
    assert_eq!(throw_strength(f.pickup.config(), 5.0), 20.0);
}

#[test]
fn test_thrown_object_flies_and_lands() {
    let mut f = fixture();
    let physics = PhysicsConfig::default();
    f.press();
    f.rig
        .look_at(&mut f.scene, Vec3::new(0.0, 1.7, -30.0))
        .unwrap();
    f.press();

    for _ in 0..300 {
        f.scene.step_physics(&physics, DT);
    }

    let landed = f.scene.get(f.item).unwrap().transform.position;
    assert!((landed.y - 0.5).abs() < 0.001, "rests on its collider: {:?}", landed);
    assert!(landed.z < -3.0, "travelled along the view: {:?}", landed);
}

#[test]
fn test_pickup_again_after_throw() {
    let mut f = fixture();
    f.press();
    f.press();
    assert!(!f.pickup.is_holding());

    // The crate is still right in front of the camera
    assert_eq!(f.press(), Some(PickupEvent::PickedUp { entity: f.item }));
}

// ============================================================================
// Refusals
// ============================================================================

#[test]
fn test_untagged_object_is_not_picked_up() {
    let rock = Entity::new("Rock")
        .at(Vec3::new(0.0, 0.5, -3.0))
        .with_collider(Collider::unit_box())
        .with_rigid_body(RigidBody::new());
    let mut f = fixture_with(PickupConfig::default(), rock);

    assert_eq!(f.press(), Some(PickupEvent::NotPickupable { entity: f.item }));
    assert!(!f.pickup.is_holding());
    assert_eq!(f.scene.get(f.item).unwrap().parent(), None);
    assert!(!f.body().is_kinematic());
}

#[test]
fn test_tagged_object_without_body_is_not_picked_up() {
    let statue = Entity::new("Statue")
        .with_tag("Pickup")
        .at(Vec3::new(0.0, 0.5, -3.0))
        .with_collider(Collider::unit_box());
    let mut f = fixture_with(PickupConfig::default(), statue);

    assert_eq!(f.press(), Some(PickupEvent::MissingRigidBody { entity: f.item }));
    assert!(!f.pickup.is_holding());
    assert_eq!(f.scene.get(f.item).unwrap().parent(), None);
}

#[test]
fn test_object_out_of_range() {
    let mut f = fixture_with(PickupConfig::default(), crate_entity(Vec3::new(0.0, 0.5, -8.0)));
    assert_eq!(f.press(), Some(PickupEvent::RaycastMissed));
    assert!(!f.pickup.is_holding());
}

#[test]
fn test_longer_range_reaches_far_object() {
    let config = PickupConfig {
        pickup_range: 10.0,
        ..Default::default()
    };
    let mut f = fixture_with(config, crate_entity(Vec3::new(0.0, 0.5, -8.0)));
    assert_eq!(f.press(), Some(PickupEvent::PickedUp { entity: f.item }));
}

#[test]
fn test_nearer_obstacle_blocks_line_of_sight() {
    let mut f = fixture_with(PickupConfig::default(), crate_entity(Vec3::new(0.0, 1.7, -4.0)));
    f.rig
        .look_at(&mut f.scene, Vec3::new(0.0, 1.7, -4.0))
        .unwrap();
    let wall = f.scene.spawn(
        Entity::new("Wall")
            .at(Vec3::new(0.0, 1.7, -2.0))
            .with_collider(Collider::Box {
                half_extents: Vec3::new(2.0, 2.0, 0.1),
            }),
    );

    assert_eq!(f.press(), Some(PickupEvent::NotPickupable { entity: wall }));
}

#[test]
fn test_looking_away_misses() {
    let mut f = fixture();
    f.rig.look_at(&mut f.scene, Vec3::new(0.0, 10.0, 5.0)).unwrap();
    assert_eq!(f.press(), Some(PickupEvent::RaycastMissed));
}

#[test]
fn test_player_own_collider_is_ignored() {
    let mut f = fixture();
    // Looking straight down passes through the player's body collider
    f.rig.look_at(&mut f.scene, Vec3::new(0.0, 0.0, -0.01)).unwrap();
    assert_eq!(f.press(), Some(PickupEvent::RaycastMissed));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_start_requires_character_controller() {
    let mut scene = Scene::new();
    let rig = PlayerRig::spawn(&mut scene, Vec3::ZERO).unwrap();
    scene.get_mut(rig.body).unwrap().character = None;

    let mut pickup = ObjectPickup::new(PickupConfig::default(), rig.body, rig.hold_anchor);
    assert_eq!(
        pickup.start(&scene),
        Err(PickupError::MissingCharacterController(rig.body))
    );
}

#[test]
fn test_start_without_any_camera() {
    let mut scene = Scene::new();
    let player = scene.spawn(Entity::new("Player").with_character(CharacterController::new()));
    let anchor = scene.spawn_child(Entity::new("Hold"), player).unwrap();

    let mut pickup = ObjectPickup::new(PickupConfig::default(), player, anchor);
    assert_eq!(pickup.start(&scene), Err(PickupError::NoCamera));
}

#[test]
fn test_start_falls_back_to_main_camera() {
    let mut scene = Scene::new();
    let rig = PlayerRig::spawn(&mut scene, Vec3::ZERO).unwrap();

    let mut pickup = ObjectPickup::new(PickupConfig::default(), rig.body, rig.hold_anchor);
    pickup.start(&scene).unwrap();
    assert_eq!(pickup.camera(), Some(rig.camera));
}

#[test]
fn test_start_keeps_assigned_camera() {
    let mut scene = Scene::new();
    let rig = PlayerRig::spawn(&mut scene, Vec3::ZERO).unwrap();
    let other = scene.spawn(Entity::new("Other").at(Vec3::new(0.0, 5.0, 0.0)));

    let mut pickup =
        ObjectPickup::new(PickupConfig::default(), rig.body, rig.hold_anchor).with_camera(other);
    pickup.start(&scene).unwrap();
    assert_eq!(pickup.camera(), Some(other));
}

#[test]
fn test_start_rejects_missing_anchor() {
    let mut scene = Scene::new();
    let rig = PlayerRig::spawn(&mut scene, Vec3::ZERO).unwrap();
    scene.despawn(rig.hold_anchor);

    let mut pickup = ObjectPickup::new(PickupConfig::default(), rig.body, rig.hold_anchor);
    assert_eq!(
        pickup.start(&scene),
        Err(PickupError::MissingHoldAnchor(rig.hold_anchor))
    );
}

#[test]
fn test_despawned_held_object_is_released() {
    let mut f = fixture();
    f.press();
    f.scene.despawn(f.item);

    assert!(f.idle(1).is_empty());
    assert!(!f.pickup.is_holding());

    // Next press tries a fresh pickup instead of throwing
    assert_eq!(f.press(), Some(PickupEvent::RaycastMissed));
}

#[test]
fn test_object_taken_off_anchor_falls_at_full_size() {
    let mut f = fixture();
    f.press();
    f.idle(60);
    assert!(f.scene.get(f.item).unwrap().transform.scale.x < 0.6);

    f.scene.set_parent(f.item, None).unwrap();
    let held_y = f.scene.world_position(f.item).unwrap().y;
    assert!(f.idle(1).is_empty());

    assert!(!f.pickup.is_holding());
    assert!(!f.body().is_kinematic());
    assert!(approx(f.scene.get(f.item).unwrap().transform.scale, Vec3::ONE));

    let physics = PhysicsConfig::default();
    for _ in 0..120 {
        f.scene.step_physics(&physics, DT);
    }
    let rested_y = f.scene.world_position(f.item).unwrap().y;
    assert!(held_y > 0.9);
    assert!((rested_y - 0.5).abs() < 0.001);
}

#[test]
fn test_despawned_anchor_releases_held_object() {
    let mut f = fixture();
    f.press();
    f.idle(30);

    f.scene.despawn(f.rig.hold_anchor);
    f.idle(1);

    assert!(!f.pickup.is_holding());
    let item = f.scene.get(f.item).unwrap();
    assert_eq!(item.parent(), None);
    assert!(approx(item.transform.scale, Vec3::ONE));
    assert!(!f.body().is_kinematic());
}

#[test]
fn test_debug_ray_follows_camera() {
    let mut f = fixture();
    f.idle(1);

    let ray = f.pickup.last_debug_ray().unwrap();
    let eye = f.rig.eye_position(&f.scene).unwrap();
    assert!(approx(ray.start, eye));
    assert!((ray.length() - 5.0).abs() < 0.001);
    assert!(approx((ray.end - ray.start).normalize(), f.scene.forward(f.rig.camera).unwrap()));
}

#[test]
fn test_custom_interact_key() {
    let config = PickupConfig {
        interact_key: KeyCode::F,
        ..Default::default()
    };
    let mut f = fixture_with(config, crate_entity(Vec3::new(0.0, 0.5, -3.0)));

    // Fresh input with default bindings: the configured key alone decides
    f.input.begin_frame();
    f.input.handle_key(KeyCode::E, true);
    assert_eq!(f.pickup.update(&mut f.scene, &f.input, DT), None);
    assert!(!f.pickup.is_holding());

    assert_eq!(f.press(), Some(PickupEvent::PickedUp { entity: f.item }));
}

#[test]
fn test_interact_key_from_json_config() {
    let config = PickupConfig::from_json(r#"{ "interact_key": "G" }"#).unwrap();
    let mut f = fixture_with(config, crate_entity(Vec3::new(0.0, 0.5, -3.0)));

    f.input.begin_frame();
    f.input.handle_key(KeyCode::G, true);
    assert_eq!(
        f.pickup.update(&mut f.scene, &f.input, DT),
        Some(PickupEvent::PickedUp { entity: f.item })
    );
}

#[test]
fn test_direct_calls_without_input() {
    let mut f = fixture();
    assert_eq!(f.pickup.throw_object(&mut f.scene), Ok(None));
    assert_eq!(
        f.pickup.try_pickup(&mut f.scene),
        Ok(PickupEvent::PickedUp { entity: f.item })
    );
    // Already holding: reports the current hold, no second object
    assert_eq!(
        f.pickup.try_pickup(&mut f.scene),
        Ok(PickupEvent::PickedUp { entity: f.item })
    );
    assert!(matches!(
        f.pickup.throw_object(&mut f.scene),
        Ok(Some(PickupEvent::Thrown { .. }))
    ));
}
