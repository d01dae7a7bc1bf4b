//! Game state and orchestration context
//!
//! One owned value aggregates the player, the pools, the grid, counters,
//! and timers; the external driver passes it to [`super::tick`] each frame.
//! Nothing else mutates it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Viewport;
use crate::consts;
use crate::surface::Surface;
use crate::tuning::Tuning;

use super::collision::GridHandle;
use super::entity::{Hostile, Pickup, Player, Projectile};
use super::grid::SpatialGrid;
use super::pool::ObjectPool;

/// Current phase of gameplay
///
/// `GameOver` is terminal; it is only left through an explicit restart,
/// which rebuilds the player and clears the pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// A transient UI notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    /// Expiry stamp against [`GameState::time`]
    pub expires_at: f64,
}

/// Push onto a bounded notification list, dropping the oldest on overflow
pub(crate) fn push_notification(list: &mut Vec<Notification>, now: f64, text: String) {
    if list.len() >= consts::MAX_NOTIFICATIONS {
        list.remove(0);
    }
    list.push(Notification {
        text,
        expires_at: now + consts::NOTIFICATION_SECS,
    });
}

/// A scrolling background layer
///
/// The core owns only the horizontal offset; what the layer looks like is
/// the renderer's business.
#[derive(Debug, Clone, Copy)]
pub struct ParallaxLayer {
    pub speed: f32,
    pub offset: f32,
}

impl ParallaxLayer {
    pub fn new(speed: f32) -> Self {
        Self { speed, offset: 0.0 }
    }

    /// Advance the scroll and wrap at the viewport width
    pub fn update(&mut self, dt: f32, view: Viewport) {
        self.offset -= self.speed * dt * 20.0;
        if self.offset <= -view.width {
            self.offset = 0.0;
        }
    }
}

/// Scroll speeds for the three background layers, slowest first
const PARALLAX_SPEEDS: [f32; 3] = [0.2, 0.5, 0.8];

/// Complete game state, owned by the frame-loop thread of control
pub struct GameState {
    pub tuning: Tuning,
    pub view: Viewport,
    pub phase: GamePhase,

    pub player: Player,
    pub projectiles: ObjectPool<Projectile>,
    pub hostiles: ObjectPool<Hostile>,
    pub pickups: ObjectPool<Pickup>,
    /// Broad-phase index, rebuilt from scratch every collision phase
    pub grid: SpatialGrid<GridHandle>,

    pub score: u32,
    pub kills: u32,
    /// Hostiles that leaked off the left edge
    pub passed: u32,
    pub notifications: Vec<Notification>,
    pub parallax: [ParallaxLayer; 3],

    /// Accumulated simulation time in seconds
    pub time: f64,
    /// Run seed, for reproducing a session
    pub seed: u64,

    pub(crate) hostile_spawn_timer: f32,
    pub(crate) pickup_spawn_timer: f32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, view: Viewport) -> Self {
        let player = Player::spawn(Self::player_start(view), &tuning);
        let state = Self {
            player,
            projectiles: ObjectPool::new(tuning.projectile_prealloc, tuning.projectile_capacity),
            hostiles: ObjectPool::new(tuning.hostile_prealloc, tuning.hostile_capacity),
            pickups: ObjectPool::new(tuning.pickup_prealloc, tuning.pickup_capacity),
            grid: SpatialGrid::new(tuning.grid_cell_size),
            score: 0,
            kills: 0,
            passed: 0,
            notifications: Vec::new(),
            parallax: PARALLAX_SPEEDS.map(ParallaxLayer::new),
            time: 0.0,
            seed,
            hostile_spawn_timer: 0.0,
            pickup_spawn_timer: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            view,
            tuning,
        };
        log::info!("New game with seed {seed}");
        state
    }

    fn player_start(view: Viewport) -> Vec2 {
        Vec2::new(
            consts::PLAYER_START_X,
            view.ground_y() - consts::PLAYER_SIZE.y,
        )
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Restart after game over
    ///
    /// The player is replaced, not mutated; pools and grid persist with
    /// their allocated storage but every live entity is reclaimed.
    pub fn restart(&mut self) {
        self.player = Player::spawn(Self::player_start(self.view), &self.tuning);
        self.projectiles.clear();
        self.hostiles.clear();
        self.pickups.clear();
        self.grid.clear();
        self.score = 0;
        self.kills = 0;
        self.passed = 0;
        self.notifications.clear();
        self.hostile_spawn_timer = 0.0;
        self.pickup_spawn_timer = 0.0;
        self.phase = GamePhase::Playing;
        log::info!("Game restarted");
    }

    /// Post a transient notification
    pub fn notify(&mut self, text: impl Into<String>) {
        push_notification(&mut self.notifications, self.time, text.into());
    }

    /// Draw the world back-to-front through the abstract surface
    ///
    /// Background layers and HUD are external; they read `parallax`,
    /// `score`, and friends directly.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.pickups.draw(surface, self.view);
        self.projectiles.draw(surface, self.view);
        self.hostiles.draw(surface, self.view);
        self.player.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, Tuning::default(), Viewport::default())
    }

    #[test]
    fn test_new_game_starts_playing() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.player.health, s.player.max_health);
        assert_eq!(s.hostiles.active_len(), 0);
        assert_eq!(s.hostiles.free_len(), s.tuning.hostile_prealloc);
    }

    #[test]
    fn test_restart_replaces_player_and_keeps_storage() {
        let mut s = state();
        let tuning = s.tuning.clone();
        s.hostiles
            .spawn(|h| h.activate(Vec2::new(700.0, 300.0), &tuning))
            .unwrap();
        s.player.take_damage(s.player.max_health);
        s.score = 500;
        s.phase = GamePhase::GameOver;
        let total = s.hostiles.total_len();

        s.restart();

        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.player.health, s.player.max_health);
        assert_eq!(s.score, 0);
        assert_eq!(s.hostiles.active_len(), 0);
        // Reclaimed, not dropped
        assert_eq!(s.hostiles.total_len(), total);
    }

    #[test]
    fn test_notifications_are_bounded() {
        let mut s = state();
        for i in 0..20 {
            s.notify(format!("note {i}"));
        }
        assert_eq!(s.notifications.len(), crate::consts::MAX_NOTIFICATIONS);
        // Oldest dropped first
        assert_eq!(s.notifications[0].text, "note 12");
    }

    #[test]
    fn test_parallax_wraps() {
        let view = Viewport::default();
        let mut layer = ParallaxLayer::new(0.8);
        for _ in 0..10_000 {
            layer.update(1.0 / 60.0, view);
            assert!(layer.offset > -view.width - 1.0 && layer.offset <= 0.0);
        }
    }
}
