//! Arrowfall - a side-view archer defense arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, pooling, spatial hashing, collisions, game state)
//! - `surface`: Abstract drawable surface the entities render against
//! - `tuning`: Data-driven game balance
//!
//! The crate contains no scheduler, renderer, or input wiring: an external
//! driver supplies a [`sim::TickInput`] snapshot and a delta time to
//! [`sim::tick`] once per frame, then draws through a [`surface::Surface`]
//! implementation of its choosing.

pub mod sim;
pub mod surface;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest physics step a single tick may take; slow frames are clamped
    /// so a backgrounded session cannot produce an unbounded step
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Default viewport in logical units
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Height of the ground band at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 60.0;

    /// Off-screen margin inside which entities are still drawn
    pub const CULL_MARGIN: f32 = 50.0;
    /// Off-screen margin beyond which projectiles expire
    pub const PROJECTILE_MARGIN: f32 = 100.0;

    /// Entity footprints
    pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 50.0);
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(15.0, 3.0);
    pub const HOSTILE_SIZE: Vec2 = Vec2::new(35.0, 35.0);
    pub const PICKUP_SIZE: Vec2 = Vec2::new(30.0, 30.0);

    /// Player spawn column
    pub const PLAYER_START_X: f32 = 100.0;

    /// Total angular spread of a multi-shot fan (radians)
    pub const MULTI_SHOT_SPREAD: f32 = 0.3;

    /// Transient notification bounds
    pub const MAX_NOTIFICATIONS: usize = 8;
    pub const NOTIFICATION_SECS: f64 = 2.0;
}

/// Viewport dimensions in logical units
///
/// Used for spawn placement, culling bounds, and the ground plane. The core
/// never resizes it; the driver passes whatever the platform window maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top of the ground band
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - consts::GROUND_HEIGHT
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::VIEW_WIDTH,
            height: consts::VIEW_HEIGHT,
        }
    }
}
