/*
 * Debug Information Module
 *
 * Frame and tick metrics shown by the windowed frontend's debug overlay.
 */

use std::time::Duration;

use crate::world::Grid;

#[derive(Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_this_frame: usize,
    pub total_ticks: u64,
    pub occupied_cells: usize,
    pub seed: Option<u64>,
}

impl DebugInfo {
    /// Refresh the grid-derived metrics after the grid snapshot changed.
    pub fn record_grid(&mut self, grid: &Grid) {
        self.occupied_cells = grid.occupied().count();
    }
}
