//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Externally driven ticks only (no scheduling, no suspension)
//! - Seeded RNG only
//! - No platform dependencies beyond the abstract `Surface` trait
//!
//! A tick runs Input, Physics, Collision, StateUpdate, and Cleanup in strict
//! order; nothing else mutates the state between ticks.

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod grid;
pub mod pool;
pub mod state;
pub mod tick;

pub use bounds::Aabb;
pub use collision::GridHandle;
pub use entity::{Body, Hostile, Pickup, PickupEffect, Player, Projectile, ProjectileOwner};
pub use grid::SpatialGrid;
pub use pool::{ObjectPool, Pooled};
pub use state::{GamePhase, GameState, Notification, ParallaxLayer};
pub use tick::{TickInput, tick};
