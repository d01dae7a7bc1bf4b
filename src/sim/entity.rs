//! Entity variants and their per-tick behavior
//!
//! A closed set of variants (Player | Projectile | Hostile | Pickup) shares
//! the positional [`Body`] record; pooled variants implement [`Pooled`] for
//! polymorphic update/draw instead of an inheritance chain. An inactive
//! entity is never consulted by collision or drawing.

use glam::Vec2;

use crate::Viewport;
use crate::consts;
use crate::surface::{Color, Surface};
use crate::tuning::Tuning;

use super::bounds::Aabb;
use super::pool::{ObjectPool, Pooled};

/// Common positional record shared by every variant
#[derive(Debug, Clone)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// False marks the entity for pool reclamation
    pub active: bool,
    bounds: Aabb,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "degenerate entity size");
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            active: true,
            bounds: Aabb::new(pos, size),
        }
    }

    /// Inactive body for pool pre-allocation
    pub fn dormant(size: Vec2) -> Self {
        let mut body = Self::new(Vec2::ZERO, size);
        body.active = false;
        body
    }

    /// Reactivate at a position with zeroed velocity
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.active = true;
        self.sync_bounds();
    }

    /// Integrate velocity and refresh the cached bounds
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.sync_bounds();
    }

    /// Recompute the cached bounds after a direct position change
    pub fn sync_bounds(&mut self) {
        self.bounds = Aabb::new(self.pos, self.size);
    }

    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Culling test against the viewport plus a margin
    pub fn is_on_screen(&self, margin: f32, view: Viewport) -> bool {
        self.pos.x + self.size.x >= -margin
            && self.pos.x <= view.width + margin
            && self.pos.y + self.size.y >= -margin
            && self.pos.y <= view.height + margin
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The player singleton: an archer on the ground plane
///
/// Not pooled; created at game start and replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
    /// Seconds between shots, lowered by reload pickups
    pub fire_interval: f32,
    pub damage_mult: f32,
    pub multi_shot: u32,
    pub facing_right: bool,
    pub on_ground: bool,
    move_speed: f32,
    jump_impulse: f32,
    gravity: f32,
}

impl Player {
    pub fn spawn(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(pos, consts::PLAYER_SIZE),
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            cooldown: 0.0,
            fire_interval: tuning.fire_interval,
            damage_mult: 1.0,
            multi_shot: 1,
            facing_right: true,
            on_ground: false,
            move_speed: tuning.player_move_speed,
            jump_impulse: tuning.player_jump_impulse,
            gravity: tuning.player_gravity,
        }
    }

    /// Movement, gravity, ground landing, cooldown decay
    ///
    /// `move_x` is -1/0/1 from the input snapshot; `jump` only latches while
    /// standing on the ground band.
    pub fn update(&mut self, dt: f32, move_x: f32, jump: bool, view: Viewport) {
        self.body.vel.x = move_x * self.move_speed;
        if move_x < 0.0 {
            self.facing_right = false;
        } else if move_x > 0.0 {
            self.facing_right = true;
        }

        if jump && self.on_ground {
            self.body.vel.y = -self.jump_impulse;
            self.on_ground = false;
        }
        self.body.vel.y += self.gravity * dt;

        self.body.integrate(dt);

        let ground_y = view.ground_y() - self.body.size.y;
        if self.body.pos.y >= ground_y {
            self.body.pos.y = ground_y;
            self.body.vel.y = 0.0;
            self.on_ground = true;
        }
        self.body.pos.x = self.body.pos.x.clamp(0.0, view.width - self.body.size.x);
        self.body.sync_bounds();

        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Unit aim vector from the body center toward a target point
    pub fn aim(&self, target: Vec2) -> Vec2 {
        (target - self.body.center())
            .try_normalize()
            .unwrap_or(Vec2::X)
    }

    /// Fire toward `target`, spawning a multi-shot fan through the pool
    ///
    /// Returns the number of projectiles actually spawned; pool exhaustion
    /// shrinks the volley silently.
    pub fn fire(
        &mut self,
        target: Vec2,
        projectiles: &mut ObjectPool<Projectile>,
        tuning: &Tuning,
    ) -> usize {
        if !self.can_fire() {
            return 0;
        }
        self.cooldown = self.fire_interval;

        let origin = self.body.center();
        let dir = self.aim(target);
        let damage = tuning.projectile_damage * self.damage_mult;
        let speed = tuning.projectile_speed;
        let boosted = self.damage_mult > 1.0;
        let mut spawned = 0;

        if self.multi_shot <= 1 {
            if projectiles
                .spawn(|p| {
                    p.activate(origin, dir, damage, ProjectileOwner::Player, speed);
                    p.boosted = boosted;
                })
                .is_some()
            {
                spawned += 1;
            }
        } else {
            let base = dir.y.atan2(dir.x);
            let step = consts::MULTI_SHOT_SPREAD / self.multi_shot as f32;
            for i in 0..self.multi_shot {
                let offset = (i as f32 - (self.multi_shot - 1) as f32 / 2.0) * step;
                let angle = base + offset;
                let d = Vec2::new(angle.cos(), angle.sin());
                if projectiles
                    .spawn(|p| {
                        p.activate(origin, d, damage, ProjectileOwner::Player, speed);
                        p.boosted = boosted;
                    })
                    .is_some()
                {
                    spawned += 1;
                }
            }
        }
        spawned
    }

    /// Lower health, flooring at zero
    ///
    /// Game-over is decided by the state-update phase, not here.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let p = self.body.pos;

        // Torso and head
        surface.fill_rect(p + Vec2::new(10.0, 20.0), Vec2::new(20.0, 30.0), Color::rgb(0x8b, 0x45, 0x13));
        surface.fill_circle(p + Vec2::new(20.0, 15.0), 12.0, Color::rgb(0xd2, 0xa6, 0x79));

        // Bow on the facing side
        let bow_x = if self.facing_right { 35.0 } else { 5.0 };
        surface.fill_arc(
            p + Vec2::new(bow_x, 25.0),
            15.0,
            -std::f32::consts::FRAC_PI_2,
            std::f32::consts::FRAC_PI_2,
            Color::rgb(0x65, 0x43, 0x21),
        );

        self.draw_health_bar(surface);
    }

    fn draw_health_bar(&self, surface: &mut dyn Surface) {
        let bar_pos = self.body.pos + Vec2::new(0.0, -10.0);
        let bar_size = Vec2::new(self.body.size.x, 5.0);
        surface.fill_rect(bar_pos, bar_size, Color::rgb(0xff, 0, 0));
        let fill = self.health as f32 / self.max_health as f32;
        surface.fill_rect(
            bar_pos,
            Vec2::new(bar_size.x * fill, bar_size.y),
            Color::rgb(0, 0xff, 0),
        );
    }
}

// ---------------------------------------------------------------------------
// Projectile
// ---------------------------------------------------------------------------

/// Who launched a projectile
///
/// Hostile-owned shots never damage hostiles; no current spawn path creates
/// them, but the resolver honors the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Hostile,
}

/// An arrow in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    /// Unit flight direction
    pub dir: Vec2,
    pub damage: f32,
    pub owner: ProjectileOwner,
    /// Fired under a damage boost; tints the shaft
    pub boosted: bool,
}

impl Projectile {
    pub fn activate(
        &mut self,
        origin: Vec2,
        dir: Vec2,
        damage: f32,
        owner: ProjectileOwner,
        speed: f32,
    ) {
        self.body.reset(origin);
        self.body.vel = dir * speed;
        self.dir = dir;
        self.damage = damage;
        self.owner = owner;
        self.boosted = false;
    }

    pub fn deactivate(&mut self) {
        self.body.active = false;
    }
}

impl Pooled for Projectile {
    fn dormant() -> Self {
        Self {
            body: Body::dormant(consts::PROJECTILE_SIZE),
            dir: Vec2::X,
            damage: 0.0,
            owner: ProjectileOwner::Player,
            boosted: false,
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, dt: f32, view: Viewport) {
        self.body.integrate(dt);

        let m = consts::PROJECTILE_MARGIN;
        if self.body.pos.x < -m
            || self.body.pos.x > view.width + m
            || self.body.pos.y < -m
            || self.body.pos.y > view.height + m
        {
            self.body.active = false;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let shaft = if self.boosted {
            Color::rgb(0xff, 0x44, 0x44)
        } else {
            Color::rgb(0x65, 0x43, 0x21)
        };
        surface.fill_rect(self.body.pos, self.body.size, shaft);
        surface.fill_circle(
            self.body.center() + self.dir * 8.0,
            2.5,
            Color::rgb(0x88, 0x88, 0x88),
        );
    }

    /// Query-only: projectiles probe the grid but are never indexed
    fn collidable(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Hostile
// ---------------------------------------------------------------------------

/// An attacker marching toward the left edge
#[derive(Debug, Clone)]
pub struct Hostile {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub contact_damage: i32,
    passed: bool,
}

impl Hostile {
    pub fn activate(&mut self, pos: Vec2, tuning: &Tuning) {
        self.body.reset(pos);
        self.body.vel.x = -tuning.hostile_speed;
        self.health = tuning.hostile_health;
        self.max_health = tuning.hostile_health;
        self.contact_damage = tuning.hostile_contact_damage;
        self.passed = false;
    }

    /// Apply damage; returns true only when this hit crosses the death
    /// threshold, so simultaneous hits cannot double-award a kill
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.health > 0;
        self.health -= amount.round() as i32;
        if self.health <= 0 {
            self.body.active = false;
        }
        was_alive && self.health <= 0
    }

    pub fn deactivate(&mut self) {
        self.body.active = false;
    }

    /// Consume the leaked-off-the-left-edge flag
    pub fn take_passed(&mut self) -> bool {
        std::mem::take(&mut self.passed)
    }
}

impl Pooled for Hostile {
    fn dormant() -> Self {
        Self {
            body: Body::dormant(consts::HOSTILE_SIZE),
            health: 0,
            max_health: 1,
            contact_damage: 0,
            passed: false,
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, dt: f32, _view: Viewport) {
        self.body.integrate(dt);

        if self.body.pos.x < -self.body.size.x {
            self.body.active = false;
            self.passed = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let p = self.body.pos;
        surface.fill_rect(p + Vec2::new(5.0, 15.0), Vec2::new(25.0, 20.0), Color::rgb(0x4a, 0x0e, 0x0e));
        surface.fill_circle(p + Vec2::new(17.0, 12.0), 10.0, Color::rgb(0x6a, 0x1e, 0x1e));
        surface.fill_circle(p + Vec2::new(14.0, 10.0), 2.0, Color::rgb(0xff, 0xff, 0));
        surface.fill_circle(p + Vec2::new(20.0, 10.0), 2.0, Color::rgb(0xff, 0xff, 0));

        let bar_pos = p + Vec2::new(0.0, -8.0);
        let bar_size = Vec2::new(self.body.size.x, 4.0);
        surface.fill_rect(bar_pos, bar_size, Color::rgb(0xff, 0, 0));
        let fill = (self.health.max(0)) as f32 / self.max_health as f32;
        surface.fill_rect(
            bar_pos,
            Vec2::new(bar_size.x * fill, bar_size.y),
            Color::rgb(0, 0xff, 0),
        );
    }
}

// ---------------------------------------------------------------------------
// Pickup
// ---------------------------------------------------------------------------

/// The effect a pickup grants on collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupEffect {
    Heal,
    DamageBoost,
    ReloadBoost,
    MultiShot,
}

impl PickupEffect {
    pub const ALL: [PickupEffect; 4] = [
        PickupEffect::Heal,
        PickupEffect::DamageBoost,
        PickupEffect::ReloadBoost,
        PickupEffect::MultiShot,
    ];

    fn glyph(self) -> &'static str {
        match self {
            PickupEffect::Heal => "+",
            PickupEffect::DamageBoost => "*",
            PickupEffect::ReloadBoost => ">>",
            PickupEffect::MultiShot => "x3",
        }
    }

    fn color(self) -> Color {
        match self {
            PickupEffect::Heal => Color::rgb(0, 0xff, 0),
            PickupEffect::DamageBoost => Color::rgb(0xff, 0x44, 0x44),
            PickupEffect::ReloadBoost => Color::rgb(0x44, 0x44, 0xff),
            PickupEffect::MultiShot => Color::rgb(0xff, 0, 0xff),
        }
    }
}

/// A falling upgrade orb
#[derive(Debug, Clone)]
pub struct Pickup {
    pub body: Body,
    pub effect: PickupEffect,
}

impl Pickup {
    pub fn activate(&mut self, pos: Vec2, effect: PickupEffect, tuning: &Tuning) {
        self.body.reset(pos);
        self.body.vel.y = tuning.pickup_fall_speed;
        self.effect = effect;
    }

    pub fn deactivate(&mut self) {
        self.body.active = false;
    }

    /// Apply the effect to the player; returns the notification text
    pub fn apply(&self, player: &mut Player, tuning: &Tuning) -> String {
        match self.effect {
            PickupEffect::Heal => {
                player.heal(tuning.heal_amount);
                format!("+{} HP", tuning.heal_amount)
            }
            PickupEffect::DamageBoost => {
                player.damage_mult =
                    (player.damage_mult + tuning.damage_boost_step).min(tuning.damage_mult_cap);
                format!("Damage x{:.1}", player.damage_mult)
            }
            PickupEffect::ReloadBoost => {
                player.fire_interval =
                    (player.fire_interval - tuning.reload_boost_step).max(tuning.fire_interval_floor);
                "Faster reload".to_string()
            }
            PickupEffect::MultiShot => {
                player.multi_shot = (player.multi_shot + 1).min(tuning.multi_shot_cap);
                format!("{} arrows", player.multi_shot)
            }
        }
    }
}

impl Pooled for Pickup {
    fn dormant() -> Self {
        Self {
            body: Body::dormant(consts::PICKUP_SIZE),
            effect: PickupEffect::Heal,
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, dt: f32, view: Viewport) {
        self.body.integrate(dt);

        if self.body.pos.y > view.height {
            self.body.active = false;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let center = self.body.center();
        let radius = self.body.size.x / 2.0;
        surface.fill_circle(center, radius, self.effect.color());
        surface.draw_text(center, self.effect.glyph(), 16.0, Color::WHITE);
    }
}
