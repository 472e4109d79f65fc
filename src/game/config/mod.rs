//! Config Module
//!
//! Gameplay tunables, loadable from JSON.

pub mod pickup_config;

pub use pickup_config::{ConfigError, PickupConfig};
