/*
 * Spatial Grid Module
 *
 * Bucket index over agent positions used by the visual-radius neighbor
 * policy. The world is cut into square cells at least as large as the
 * largest visual radius, so every agent within sight of a position lives in
 * that position's cell or one of the eight cells around it.
 *
 * The index is rebuilt from the pre-tick snapshot, never mid-tick.
 */

use nannou::prelude::*;

use crate::world::Bounds;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, bounds: Bounds) -> Self {
        // A zero visual radius still needs a usable cell size
        let cell_size = cell_size.max(1.0);
        let columns = ((bounds.width as f32 / cell_size).ceil() as usize).max(1);
        let rows = ((bounds.height as f32 / cell_size).ceil() as usize).max(1);

        Self {
            cell_size,
            columns,
            rows,
            grid: vec![Vec::new(); columns * rows],
        }
    }

    #[inline]
    fn cell_coords(&self, position: Vec2) -> (usize, usize) {
        let x = (position.x / self.cell_size).clamp(0.0, self.columns as f32 - 1.0) as usize;
        let y = (position.y / self.cell_size).clamp(0.0, self.rows as f32 - 1.0) as usize;
        (x, y)
    }

    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    /// Clear the grid and insert every position, indexed by slice position.
    pub fn rebuild(&mut self, positions: impl Iterator<Item = Vec2>) {
        self.clear();
        for (index, position) in positions.enumerate() {
            self.insert(index, position);
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: Vec2) {
        let (x, y) = self.cell_coords(position);
        self.grid[y * self.columns + x].push(index);
    }

    /// Indices stored in the cell containing `position` and its neighbors,
    /// sorted ascending.
    pub fn nearby_indices(&self, position: Vec2) -> Vec<usize> {
        let (cell_x, cell_y) = self.cell_coords(position);
        let mut result = Vec::new();

        for y in cell_y.saturating_sub(1)..=(cell_y + 1).min(self.rows - 1) {
            let row_start = y * self.columns;
            for x in cell_x.saturating_sub(1)..=(cell_x + 1).min(self.columns - 1) {
                result.extend_from_slice(&self.grid[row_start + x]);
            }
        }

        // Callers rely on flock order
        result.sort_unstable();
        result
    }
}
