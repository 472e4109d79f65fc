//! Game Module
//!
//! Gameplay built on top of the engine: the player rig and the
//! pickup-and-throw behavior with its configuration.

pub mod config;
pub mod pickup;
pub mod player_rig;

pub use config::{ConfigError, PickupConfig};
pub use pickup::{HoldState, ObjectPickup, PickupError, PickupEvent, throw_strength};
pub use player_rig::{HOLD_OFFSET, PLAYER_EYE_HEIGHT, PlayerRig};
