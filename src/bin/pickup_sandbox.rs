//! Pickup Sandbox - headless pickup/throw playground
//!
//! Run with: `cargo run --bin pickup_sandbox [config.json]`
//!
//! Builds a small yard (a crate, a rock, a statue), then replays a scripted
//! input timeline at 60 Hz:
//! - look at the crate, interact: pick it up
//! - W: walk forward while it shrinks in hand
//! - interact: throw it (faster walking = harder throw)
//! - look at the rock / statue / sky and interact: the three refusal cases
//!
//! "Interact" is whatever `interact_key` the config names (E by default).
//!
//! Set `RUST_LOG=debug` to see raycast hits and misses, `trace` for the
//! per-frame debug ray.

use anyhow::{Context, Result};
use glam::Vec3;
use log::{info, trace};

use object_pickup_engine::game::{ObjectPickup, PickupConfig, PickupEvent, PlayerRig};
use object_pickup_engine::input::{InputState, KeyCode};
use object_pickup_engine::physics::{Collider, PhysicsConfig, RigidBody};
use object_pickup_engine::world::{Entity, EntityId, Scene};

const FRAME_DT: f32 = 1.0 / 60.0;
const TOTAL_FRAMES: u32 = 420;

/// One scripted input.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Tap the configured interact key
    Interact,
    Press(KeyCode),
    Release(KeyCode),
    LookAt(Vec3),
    /// Mouse delta in pixels
    Mouse(f32, f32),
}

fn script(crate_pos: Vec3, rock_pos: Vec3, statue_pos: Vec3) -> Vec<(u32, Step)> {
    vec![
        (0, Step::LookAt(crate_pos)),
        (10, Step::Interact),
        (30, Step::LookAt(Vec3::new(0.0, 2.5, -30.0))),
        (30, Step::Press(KeyCode::W)),
        (90, Step::Interact),
        (92, Step::Release(KeyCode::W)),
        (320, Step::LookAt(rock_pos)),
        (330, Step::Interact),
        (350, Step::LookAt(statue_pos)),
        (360, Step::Interact),
        (380, Step::Mouse(0.0, -800.0)),
        (390, Step::Interact),
    ]
}

/// Release then press, so the key goes down this frame even if a previous
/// tap left it held.
fn tap(input: &mut InputState, key: KeyCode) {
    input.handle_key(key, false);
    input.handle_key(key, true);
}

fn build_yard(scene: &mut Scene, tag: &str) -> (EntityId, EntityId, EntityId) {
    scene.spawn(
        Entity::new("Ground")
            .at(Vec3::new(0.0, -0.5, 0.0))
            .with_collider(Collider::Box {
                half_extents: Vec3::new(50.0, 0.5, 50.0),
            }),
    );
    let crate_box = scene.spawn(
        Entity::new("Crate")
            .with_tag(tag)
            .at(Vec3::new(0.0, 0.5, -3.0))
            .with_collider(Collider::unit_box())
            .with_rigid_body(RigidBody::with_mass(2.0)),
    );
    let rock = scene.spawn(
        Entity::new("Rock")
            .at(Vec3::new(3.0, 0.5, -2.0))
            .with_collider(Collider::Sphere { radius: 0.5 })
            .with_rigid_body(RigidBody::with_mass(40.0)),
    );
    let statue = scene.spawn(
        Entity::new("Statue")
            .with_tag(tag)
            .at(Vec3::new(-3.0, 1.0, -2.0))
            .with_scale(Vec3::new(1.0, 2.0, 1.0))
            .with_collider(Collider::unit_box()),
    );
    (crate_box, rock, statue)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => PickupConfig::load(&path)
            .with_context(|| format!("failed to load pickup config from {path}"))?,
        None => PickupConfig::default(),
    };
    info!(
        "pickup range {:.1}m, base throw {:.1}, speed multiplier {:.1}, interact key {:?}",
        config.pickup_range, config.base_throw_force, config.max_throw_multiplier, config.interact_key
    );

    let mut scene = Scene::new();
    let physics = PhysicsConfig::default();
    let (crate_box, rock, statue) = build_yard(&mut scene, &config.pickup_tag);
    let mut rig = PlayerRig::spawn(&mut scene, Vec3::ZERO).context("failed to spawn player")?;

    let mut input = InputState::new();
    let mut pickup = ObjectPickup::new(config, rig.body, rig.hold_anchor);
    pickup.start(&scene).context("pickup behavior could not start")?;

    let targets = [crate_box, rock, statue].map(|id| scene.world_position(id));
    let [Ok(crate_pos), Ok(rock_pos), Ok(statue_pos)] = targets else {
        anyhow::bail!("yard entities missing");
    };
    let timeline = script(crate_pos, rock_pos, statue_pos);

    for frame in 0..TOTAL_FRAMES {
        input.begin_frame();
        let mut mouse = (0.0, 0.0);
        for &(_, step) in timeline.iter().filter(|(at, _)| *at == frame) {
            match step {
                Step::Interact => tap(&mut input, pickup.config().interact_key),
                Step::Press(key) => {
                    input.handle_key(key, true);
                }
                Step::Release(key) => {
                    input.handle_key(key, false);
                }
                Step::LookAt(target) => rig.look_at(&mut scene, target)?,
                Step::Mouse(dx, dy) => mouse = (dx, dy),
            }
        }

        rig.update(&mut scene, &input.movement(), mouse, FRAME_DT)?;

        if let Some(event) = pickup.update(&mut scene, &input, FRAME_DT) {
            report(&scene, frame, event);
        }
        if let Some(ray) = pickup.last_debug_ray() {
            trace!("frame {frame}: debug ray {:?} -> {:?}", ray.start, ray.end);
        }

        scene.step_physics(&physics, FRAME_DT);
    }

    let crate_entity = scene.entity(crate_box)?;
    info!(
        "crate came to rest at {:.2?} with scale {:.2?}",
        crate_entity.transform.position, crate_entity.transform.scale
    );
    Ok(())
}

fn report(scene: &Scene, frame: u32, event: PickupEvent) {
    let name = |id: EntityId| scene.get(id).map_or("<gone>", |e| e.name.as_str());
    match event {
        PickupEvent::PickedUp { entity } => info!("frame {frame}: holding {}", name(entity)),
        PickupEvent::Thrown { entity, impulse } => {
            info!("frame {frame}: threw {} with impulse {:.2?}", name(entity), impulse)
        }
        PickupEvent::RaycastMissed => info!("frame {frame}: nothing in reach"),
        PickupEvent::NotPickupable { entity } => {
            info!("frame {frame}: {} cannot be picked up", name(entity))
        }
        PickupEvent::MissingRigidBody { entity } => {
            info!("frame {frame}: {} is fixed in place", name(entity))
        }
    }
}
