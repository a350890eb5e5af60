//! Weapon Forge — deterministic, versioned procedural weapon generation.
//!
//! A weapon id and a catalog version always produce the same weapon. The
//! catalog grows through an append-only history of deltas, so publishing a
//! new version never changes a weapon someone already has.

pub mod catalog;
pub mod core;
pub mod schema;

pub use crate::core::pipeline::{ForgeError, WeaponEngine};
pub use crate::schema::weapon::WeaponView;
