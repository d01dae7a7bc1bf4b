//! Data-driven game balance
//!
//! Every gameplay number lives here so a balance pass never touches sim
//! code. Defaults reproduce the shipped tuning; a JSON file can override
//! any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failed to load a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay tuning values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_max_health: i32,
    /// Horizontal movement speed (units/s)
    pub player_move_speed: f32,
    /// Upward impulse applied on jump (units/s)
    pub player_jump_impulse: f32,
    /// Downward acceleration (units/s^2)
    pub player_gravity: f32,
    /// Seconds between shots before reload upgrades
    pub fire_interval: f32,
    /// Reload upgrades never push the interval below this
    pub fire_interval_floor: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    /// Base damage before the damage multiplier
    pub projectile_damage: f32,
    pub multi_shot_cap: u32,
    pub damage_mult_cap: f32,

    // === Hostiles ===
    pub hostile_health: i32,
    /// Leftward march speed (units/s)
    pub hostile_speed: f32,
    /// Damage dealt on contact with the player
    pub hostile_contact_damage: i32,
    /// Damage dealt when a hostile leaks off the left edge
    pub pass_damage: i32,

    // === Pickups ===
    /// Downward drift speed (units/s)
    pub pickup_fall_speed: f32,
    /// Probability a killed hostile drops a pickup
    pub pickup_drop_chance: f32,
    pub heal_amount: i32,
    pub damage_boost_step: f32,
    pub reload_boost_step: f32,

    // === Scoring ===
    pub kill_score: u32,
    pub pickup_score: u32,
    /// Score lost when a hostile leaks through (floored at zero)
    pub pass_penalty: u32,

    // === Spawn cadence ===
    pub hostile_spawn_interval: f32,
    pub pickup_spawn_interval: f32,

    // === Pool bounds ===
    pub projectile_prealloc: usize,
    pub projectile_capacity: usize,
    pub hostile_prealloc: usize,
    pub hostile_capacity: usize,
    pub pickup_prealloc: usize,
    pub pickup_capacity: usize,

    // === Broad phase ===
    /// Spatial grid cell size (units). Too small multiplies insertion cost,
    /// too large degrades toward brute force.
    pub grid_cell_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_max_health: 100,
            player_move_speed: 200.0,
            player_jump_impulse: 600.0,
            player_gravity: 1500.0,
            fire_interval: 0.5,
            fire_interval_floor: 0.1,

            projectile_speed: 500.0,
            projectile_damage: 25.0,
            multi_shot_cap: 5,
            damage_mult_cap: 3.0,

            hostile_health: 50,
            hostile_speed: 50.0,
            hostile_contact_damage: 10,
            pass_damage: 15,

            pickup_fall_speed: 50.0,
            pickup_drop_chance: 0.15,
            heal_amount: 30,
            damage_boost_step: 0.5,
            reload_boost_step: 0.1,

            kill_score: 100,
            pickup_score: 50,
            pass_penalty: 50,

            hostile_spawn_interval: 2.0,
            pickup_spawn_interval: 10.0,

            projectile_prealloc: 50,
            projectile_capacity: 200,
            hostile_prealloc: 20,
            hostile_capacity: 100,
            pickup_prealloc: 10,
            pickup_capacity: 50,

            grid_cell_size: 100.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load tuning, falling back to defaults when the file is absent or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"kill_score": 250}"#).unwrap();
        assert_eq!(tuning.kill_score, 250);
        assert_eq!(tuning.hostile_health, Tuning::default().hostile_health);
    }

    #[test]
    fn test_round_trip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.projectile_capacity, tuning.projectile_capacity);
        assert_eq!(back.pickup_drop_chance, tuning.pickup_drop_chance);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Path::new("/nonexistent/tuning.json"));
        assert_eq!(tuning.kill_score, Tuning::default().kill_score);
    }
}
