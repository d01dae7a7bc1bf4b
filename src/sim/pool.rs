//! Object pooling for short-lived entities
//!
//! Projectiles, hostiles, and pickups churn far too fast to allocate per
//! spawn. A pool owns two disjoint sequences, `free` and `active`; spawning
//! resets a free instance in place, recycling moves deactivated instances
//! back. The union is bounded by the configured capacity, so worst-case
//! entity count is deterministic.

use crate::Viewport;
use crate::consts;
use crate::surface::Surface;

use super::entity::Body;

/// Capability interface for pooled entity variants
///
/// Replaces the inheritance the pool would otherwise lean on: each variant
/// knows how to lie dormant, advance itself, and draw itself.
pub trait Pooled {
    /// Construct a dormant instance for pre-allocation
    fn dormant() -> Self;

    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Per-tick self update: integration, timers, self-deactivation
    fn advance(&mut self, dt: f32, view: Viewport);

    /// Draw against the abstract surface
    fn draw(&self, surface: &mut dyn Surface);

    /// Whether instances are indexed by the broad-phase grid
    fn collidable(&self) -> bool {
        true
    }
}

/// A bounded pool of one entity variant
#[derive(Debug)]
pub struct ObjectPool<T> {
    free: Vec<T>,
    active: Vec<T>,
    capacity: usize,
}

impl<T: Pooled> ObjectPool<T> {
    /// Pre-allocates `prealloc` dormant instances; `capacity` bounds the
    /// total instance count
    pub fn new(prealloc: usize, capacity: usize) -> Self {
        debug_assert!(prealloc <= capacity);
        let free = (0..prealloc).map(|_| T::dormant()).collect();
        Self {
            free,
            active: Vec::with_capacity(prealloc),
            capacity,
        }
    }

    /// Hand out an instance, reset in place by `init`
    ///
    /// Reuses a free instance when one exists, constructs a new one while
    /// under capacity, and otherwise returns `None`. Exhaustion is not an
    /// error: the caller treats it as a spawn that silently did not happen.
    pub fn spawn(&mut self, init: impl FnOnce(&mut T)) -> Option<&mut T> {
        let mut item = match self.free.pop() {
            Some(item) => item,
            None if self.active.len() < self.capacity => T::dormant(),
            None => return None,
        };
        init(&mut item);
        self.active.push(item);
        self.active.last_mut()
    }

    /// Advance every active instance
    pub fn update(&mut self, dt: f32, view: Viewport) {
        for item in &mut self.active {
            item.advance(dt, view);
        }
    }

    /// Return every deactivated instance to the free list
    ///
    /// Runs after collision resolution and entity updates so this frame's
    /// deactivations are reclaimed before the next frame spawns. Scans in
    /// reverse so removal never skips an entry; calling it again without
    /// intervening deactivations is a no-op.
    pub fn recycle(&mut self) {
        let mut i = self.active.len();
        while i > 0 {
            i -= 1;
            if !self.active[i].body().active {
                let item = self.active.swap_remove(i);
                self.free.push(item);
            }
        }
    }

    /// Draw active instances within the on-screen margin
    pub fn draw(&self, surface: &mut dyn Surface, view: Viewport) {
        for item in &self.active {
            if item.body().active && item.body().is_on_screen(consts::CULL_MARGIN, view) {
                item.draw(surface);
            }
        }
    }

    /// Move every active instance back to the free list (restart)
    pub fn clear(&mut self) {
        while let Some(mut item) = self.active.pop() {
            item.body_mut().active = false;
            self.free.push(item);
        }
    }

    pub fn active(&self) -> &[T] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [T] {
        &mut self.active
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total instances currently constructed (active + free)
    pub fn total_len(&self) -> usize {
        self.active.len() + self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
