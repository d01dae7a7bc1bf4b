//! Uniform-cell spatial hash
//!
//! The broad-phase index: a transient map from integer cells to the handles
//! of entities overlapping them, rebuilt from scratch every frame. The grid
//! looks entities up by handle and never owns them.
//!
//! Naive collision is O(n^2) in entity count; hashing reduces the broad
//! phase to O(n*k) where k is average bucket occupancy.

use std::collections::HashMap;

use super::bounds::Aabb;

/// Spatial hash over copyable handles
#[derive(Debug)]
pub struct SpatialGrid<K> {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<K>>,
}

impl<K: Copy + PartialEq> SpatialGrid<K> {
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "grid cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Map a coordinate to its discrete cell
    #[inline]
    pub fn cell_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Inclusive cell range covered by a bounding box
    fn cell_span(&self, bounds: &Aabb) -> ((i32, i32), (i32, i32)) {
        (
            self.cell_key(bounds.left, bounds.top),
            self.cell_key(bounds.right, bounds.bottom),
        )
    }

    /// Insert a handle into every cell its bounds overlap
    ///
    /// Entities larger than one cell land in every cell they touch.
    pub fn insert(&mut self, key: K, bounds: &Aabb) {
        let ((min_x, min_y), (max_x, max_y)) = self.cell_span(bounds);
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                self.cells.entry((cx, cy)).or_default().push(key);
            }
        }
    }

    /// Union of all handles in the cells the query bounds overlap
    ///
    /// Deduplicated: a handle spanning several of the queried cells is
    /// returned once. Order within the result is arbitrary.
    pub fn query_nearby(&self, bounds: &Aabb) -> Vec<K> {
        let ((min_x, min_y), (max_x, max_y)) = self.cell_span(bounds);
        let mut found = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                let Some(bucket) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &key in bucket {
                    if !found.contains(&key) {
                        found.push(key);
                    }
                }
            }
        }
        found
    }

    /// Drop all buckets; called once per frame before reinsertion
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
