//! Phased frame update
//!
//! One tick runs Input, Physics, Collision, StateUpdate, and Cleanup in
//! strict order. The core contains no scheduling primitive: an external
//! driver calls [`tick`] once per frame with an input snapshot and the
//! elapsed delta time, then renders from the state it owns.

use glam::Vec2;
use rand::Rng;

use crate::consts;

use super::collision;
use super::entity::PickupEffect;
use super::state::{GamePhase, GameState, push_notification};

/// Input snapshot for a single tick
///
/// Logical actions only; how they map to keys, buttons, or touches is the
/// platform collaborator's concern.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub fire: bool,
    /// Only honored while the run is over
    pub restart: bool,
    /// Pointer target for aimed fire; `None` auto-aims at the nearest hostile
    pub target: Option<Vec2>,
}

/// Advance the game by one tick
///
/// `dt` is clamped to [`consts::MAX_TICK_DT`] so a slow frame cannot produce
/// an unbounded physics step. After game over no phase logic runs; only the
/// restart signal is honored.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.min(consts::MAX_TICK_DT);

    if state.is_game_over() {
        if input.restart {
            state.restart();
        }
        return;
    }

    // --- Input phase: derive intents, mutate nothing else yet
    let move_x = (input.move_right as i32 - input.move_left as i32) as f32;
    let jump = input.move_up;
    let fire_target = input
        .fire
        .then(|| resolve_fire_target(state, input.target));

    // --- Physics phase
    for layer in &mut state.parallax {
        layer.update(dt, state.view);
    }
    state.player.update(dt, move_x, jump, state.view);
    if let Some(target) = fire_target {
        let GameState {
            player,
            projectiles,
            tuning,
            ..
        } = &mut *state;
        player.fire(target, projectiles, tuning);
    }
    state.projectiles.update(dt, state.view);
    state.pickups.update(dt, state.view);
    state.hostiles.update(dt, state.view);
    apply_leaks(state);

    // --- Collision phase
    collision::resolve(state);

    // --- StateUpdate phase
    state.time += dt as f64;
    spawn_hostiles(state, dt);
    spawn_pickups(state, dt);
    let now = state.time;
    state.notifications.retain(|n| n.expires_at > now);
    if state.player.health <= 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} kills {} leaked {}",
            state.score,
            state.kills,
            state.passed
        );
    }

    // --- Cleanup phase: reclaim this frame's deactivations before the next
    // tick's spawns can reuse their slots
    state.projectiles.recycle();
    state.hostiles.recycle();
    state.pickups.recycle();
}

/// Hostiles that crossed the left edge this tick hurt the player and score
fn apply_leaks(state: &mut GameState) {
    let GameState {
        hostiles,
        player,
        score,
        passed,
        notifications,
        time,
        tuning,
        ..
    } = &mut *state;

    for hostile in hostiles.active_mut() {
        if hostile.take_passed() {
            player.take_damage(tuning.pass_damage);
            *score = score.saturating_sub(tuning.pass_penalty);
            *passed += 1;
            push_notification(
                notifications,
                *time,
                format!("Hostile broke through! -{} pts", tuning.pass_penalty),
            );
        }
    }
}

/// Auto-aim: nearest active hostile by squared center distance, else
/// straight ahead at the right edge
fn resolve_fire_target(state: &GameState, target: Option<Vec2>) -> Vec2 {
    if let Some(t) = target {
        return t;
    }
    let from = state.player.body.center();
    let mut best: Option<(Vec2, f32)> = None;
    for hostile in state.hostiles.active() {
        if !hostile.body.active {
            continue;
        }
        let center = hostile.body.center();
        let dist = from.distance_squared(center);
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((center, dist));
        }
    }
    best.map(|(center, _)| center)
        .unwrap_or(Vec2::new(state.view.width, state.view.height / 2.0))
}

fn spawn_hostiles(state: &mut GameState, dt: f32) {
    state.hostile_spawn_timer += dt;
    while state.hostile_spawn_timer >= state.tuning.hostile_spawn_interval {
        state.hostile_spawn_timer -= state.tuning.hostile_spawn_interval;

        let view = state.view;
        let y = state.rng.random_range(50.0..view.height - 100.0);
        let GameState {
            hostiles, tuning, ..
        } = &mut *state;
        if hostiles
            .spawn(|h| h.activate(Vec2::new(view.width, y), tuning))
            .is_none()
        {
            log::debug!("hostile pool exhausted; wave spawn skipped");
        }
    }
}

fn spawn_pickups(state: &mut GameState, dt: f32) {
    state.pickup_spawn_timer += dt;
    while state.pickup_spawn_timer >= state.tuning.pickup_spawn_interval {
        state.pickup_spawn_timer -= state.tuning.pickup_spawn_interval;

        let view = state.view;
        let x = state.rng.random_range(25.0..view.width - 25.0);
        let effect = PickupEffect::ALL[state.rng.random_range(0..PickupEffect::ALL.len())];
        let GameState {
            pickups, tuning, ..
        } = &mut *state;
        if pickups
            .spawn(|p| p.activate(Vec2::new(x, -30.0), effect, tuning))
            .is_none()
        {
            log::debug!("pickup pool exhausted; timed spawn skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::consts::SIM_DT;
    use crate::tuning::Tuning;

    /// State with spawn timers parked so ticks only move hand-placed entities
    fn quiet_state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.hostile_spawn_interval = f32::INFINITY;
        tuning.pickup_spawn_interval = f32::INFINITY;
        GameState::new(1234, tuning, Viewport::default())
    }

    fn settle_player(state: &mut GameState) {
        while !state.player.on_ground {
            tick(state, &TickInput::default(), SIM_DT);
        }
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = GameState::new(1, Tuning::default(), Viewport::default());
        let interval = state.tuning.hostile_spawn_interval;
        let ticks = (interval / SIM_DT).ceil() as u32 + 1;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.hostiles.active_len() >= 1);
        // Spawned at the right edge
        let h = &state.hostiles.active()[0];
        assert!(h.body.pos.x > state.view.width - state.tuning.hostile_speed * interval);
    }

    #[test]
    fn test_game_over_by_end_of_state_update() {
        let mut state = quiet_state();
        settle_player(&mut state);
        state.player.health = 5;

        // A hostile overlapping the player deals contact damage this tick
        let tuning = state.tuning.clone();
        let pos = state.player.body.pos + glam::Vec2::new(10.0, 10.0);
        state
            .hostiles
            .spawn(|h| {
                h.activate(pos, &tuning);
                h.body.vel = glam::Vec2::ZERO;
                h.body.reset(pos);
            })
            .unwrap();

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_no_physics_after_game_over() {
        let mut state = quiet_state();
        settle_player(&mut state);
        state.player.health = 0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.is_game_over());

        let pos_before = state.player.body.pos;
        let time_before = state.time;
        let input = TickInput {
            move_right: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        assert_eq!(state.player.body.pos, pos_before);
        assert_eq!(state.time, time_before);
        assert_eq!(state.projectiles.active_len(), 0);
    }

    #[test]
    fn test_restart_signal_after_game_over() {
        let mut state = quiet_state();
        state.player.health = 0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.is_game_over());

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(!state.is_game_over());
        assert_eq!(state.player.health, state.player.max_health);
    }

    #[test]
    fn test_auto_aim_targets_nearest_hostile() {
        let mut state = quiet_state();
        settle_player(&mut state);

        let tuning = state.tuning.clone();
        let player_center = state.player.body.center();
        let far = player_center + glam::Vec2::new(500.0, -40.0);
        let near = player_center + glam::Vec2::new(200.0, -40.0);
        state.hostiles.spawn(|h| h.activate(far, &tuning)).unwrap();
        state.hostiles.spawn(|h| h.activate(near, &tuning)).unwrap();

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        assert_eq!(state.projectiles.active_len(), 1);
        let dir = state.projectiles.active()[0].dir;
        // Pointing at the near hostile: strongly rightward, slightly up
        assert!(dir.x > 0.9);
        assert!(dir.y < 0.0);
    }

    #[test]
    fn test_leak_penalizes_and_recycles() {
        let mut state = quiet_state();
        settle_player(&mut state);
        state.score = 100;

        let tuning = state.tuning.clone();
        // One tick of marching will carry it past the minus-width threshold
        let pos = glam::Vec2::new(-consts::HOSTILE_SIZE.x + 0.1, 300.0);
        state.hostiles.spawn(|h| h.activate(pos, &tuning)).unwrap();

        let health_before = state.player.health;
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.passed, 1);
        assert_eq!(state.score, 100 - state.tuning.pass_penalty);
        assert_eq!(
            state.player.health,
            health_before - state.tuning.pass_damage
        );
        // Cleanup already reclaimed the leaked hostile
        assert_eq!(state.hostiles.active_len(), 0);
    }

    #[test]
    fn test_score_floors_at_zero_on_leak() {
        let mut state = quiet_state();
        settle_player(&mut state);
        state.score = 10;

        let tuning = state.tuning.clone();
        let pos = glam::Vec2::new(-consts::HOSTILE_SIZE.x + 0.1, 300.0);
        state.hostiles.spawn(|h| h.activate(pos, &tuning)).unwrap();

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_notifications_expire() {
        let mut state = quiet_state();
        settle_player(&mut state);
        state.notify("hello");
        assert_eq!(state.notifications.len(), 1);

        let ticks = (consts::NOTIFICATION_SECS / SIM_DT as f64).ceil() as u32 + 2;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_fire_with_exhausted_pool_is_silent() {
        let mut tuning = Tuning::default();
        tuning.hostile_spawn_interval = f32::INFINITY;
        tuning.pickup_spawn_interval = f32::INFINITY;
        tuning.projectile_prealloc = 0;
        tuning.projectile_capacity = 0;
        let mut state = GameState::new(5, tuning, Viewport::default());

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.projectiles.active_len(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = quiet_state();
        settle_player(&mut state);

        let tuning = state.tuning.clone();
        let pos = glam::Vec2::new(700.0, 300.0);
        state.hostiles.spawn(|h| h.activate(pos, &tuning)).unwrap();

        // A pathological 10-second frame moves the hostile one clamped step,
        // not 10 seconds' worth
        tick(&mut state, &TickInput::default(), 10.0);
        let h = &state.hostiles.active()[0];
        let expected = 700.0 - tuning.hostile_speed * consts::MAX_TICK_DT;
        assert!((h.body.pos.x - expected).abs() < 1e-3);
    }
}
