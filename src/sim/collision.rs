//! Collision resolution
//!
//! Runs once per frame after physics, before cleanup. The broad phase
//! rebuilds the spatial grid from active hostiles and pickups (the player
//! and projectiles are singular/few, so they query but are never indexed);
//! the narrow phase is the strict AABB overlap test in [`super::bounds`].

use glam::Vec2;
use rand::Rng;

use super::entity::{PickupEffect, ProjectileOwner};
use super::pool::Pooled;
use super::state::{GameState, push_notification};

/// Tagged reference to a grid-indexed entity
///
/// The payload is the slot index into the owning pool's active list; handles
/// stay valid for the whole frame because pools are only compacted by the
/// cleanup phase, after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHandle {
    Hostile(usize),
    Pickup(usize),
}

/// Rebuild the grid and resolve every interaction for this frame
pub fn resolve(state: &mut GameState) {
    rebuild_grid(state);
    resolve_projectiles(state);
    resolve_player(state);
}

/// Clear and refill the grid from active collidable entities
///
/// Only active entities are inserted, so a query can never surface an
/// entity that was already dead when the frame began.
fn rebuild_grid(state: &mut GameState) {
    let GameState {
        grid,
        hostiles,
        pickups,
        ..
    } = &mut *state;

    grid.clear();
    for (i, hostile) in hostiles.active().iter().enumerate() {
        if hostile.body().active && hostile.collidable() {
            grid.insert(GridHandle::Hostile(i), hostile.body().bounds());
        }
    }
    for (i, pickup) in pickups.active().iter().enumerate() {
        if pickup.body().active && pickup.collidable() {
            grid.insert(GridHandle::Pickup(i), pickup.body().bounds());
        }
    }
}

/// Projectiles vs. hostiles
///
/// Each projectile lands at most one hit per frame. When several hostiles
/// overlap it, the one whose center is nearest the projectile's center takes
/// the hit; exact ties resolve to the lowest slot index, so the outcome does
/// not depend on bucket iteration order. A hostile killed earlier this frame
/// still absorbs damage arithmetically (its health may go further negative),
/// but score and drops only fire on the health threshold crossing.
fn resolve_projectiles(state: &mut GameState) {
    let mut drops: Vec<(Vec2, PickupEffect)> = Vec::new();

    {
        let GameState {
            grid,
            projectiles,
            hostiles,
            score,
            kills,
            rng,
            tuning,
            ..
        } = &mut *state;

        for projectile in projectiles.active_mut() {
            if !projectile.body.active || projectile.owner == ProjectileOwner::Hostile {
                continue;
            }

            let mut best: Option<(usize, f32)> = None;
            for handle in grid.query_nearby(projectile.body.bounds()) {
                let GridHandle::Hostile(i) = handle else {
                    continue;
                };
                let hostile = &hostiles.active()[i];
                if !projectile.body.bounds().overlaps(hostile.body.bounds()) {
                    continue;
                }
                let dist = projectile
                    .body
                    .center()
                    .distance_squared(hostile.body.center());
                let closer = match best {
                    None => true,
                    Some((best_i, best_dist)) => {
                        dist < best_dist || (dist == best_dist && i < best_i)
                    }
                };
                if closer {
                    best = Some((i, dist));
                }
            }

            let Some((i, _)) = best else {
                continue;
            };
            projectile.deactivate();

            let hostile = &mut hostiles.active_mut()[i];
            if hostile.take_damage(projectile.damage) {
                *score += tuning.kill_score;
                *kills += 1;
                log::debug!("hostile down, score {score}");

                if rng.random::<f32>() < tuning.pickup_drop_chance {
                    let effect =
                        PickupEffect::ALL[rng.random_range(0..PickupEffect::ALL.len())];
                    // Drop from the top-center of the corpse
                    let pos = Vec2::new(
                        hostile.body.pos.x + hostile.body.size.x / 2.0,
                        hostile.body.pos.y,
                    );
                    drops.push((pos, effect));
                }
            }
        }
    }

    // Deferred so drop spawning never aliases the pools being resolved
    let GameState {
        pickups, tuning, ..
    } = &mut *state;
    for (pos, effect) in drops {
        if pickups.spawn(|p| p.activate(pos, effect, tuning)).is_none() {
            log::debug!("pickup pool exhausted; drop skipped");
        }
    }
}

/// Player vs. hostiles and pickups, one grid query for the frame
fn resolve_player(state: &mut GameState) {
    let GameState {
        grid,
        player,
        hostiles,
        pickups,
        score,
        notifications,
        time,
        tuning,
        ..
    } = &mut *state;

    for handle in grid.query_nearby(player.body.bounds()) {
        match handle {
            GridHandle::Hostile(i) => {
                let hostile = &mut hostiles.active_mut()[i];
                if hostile.body.active && hostile.body.bounds().overlaps(player.body.bounds()) {
                    player.take_damage(hostile.contact_damage);
                    hostile.deactivate();
                    push_notification(notifications, *time, "Hostile contact!".to_string());
                }
            }
            GridHandle::Pickup(i) => {
                let pickup = &mut pickups.active_mut()[i];
                if pickup.body.active && pickup.body.bounds().overlaps(player.body.bounds()) {
                    let message = pickup.apply(player, tuning);
                    pickup.deactivate();
                    *score += tuning.pickup_score;
                    push_notification(notifications, *time, message);
                }
            }
        }
    }
}
