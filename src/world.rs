/*
 * World Module
 *
 * The world is a fixed `width x height` rectangle. `Bounds` handles the
 * teleport wrap at its edges; `Grid` is the occupancy projection a frontend
 * draws after each tick. The grid is derived from agent positions and is
 * never read back by the simulation.
 */

use nannou::prelude::*;

use crate::agent::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Teleport a position that left the world to the opposite edge.
    ///
    /// Each axis is handled on its own: below zero jumps to `dim - 1`, above
    /// `dim - 1` jumps to zero. Anything in between is left alone, so the
    /// result always lies in `[0, dim - 1]`.
    pub fn wrap(&self, position: &mut Vec2) {
        position.x = wrap_axis(position.x, self.width);
        position.y = wrap_axis(position.y, self.height);
    }

    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.x < self.width as f32
            && position.y >= 0.0
            && position.y < self.height as f32
    }
}

#[inline]
fn wrap_axis(value: f32, dimension: u32) -> f32 {
    let last = dimension as f32 - 1.0;
    if value < 0.0 {
        last
    } else if value > last {
        0.0
    } else {
        value
    }
}

/// Row-major occupancy grid, `height` rows of `width` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Grid {
    pub fn empty(bounds: Bounds) -> Self {
        let width = bounds.width as usize;
        let height = bounds.height as usize;
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Project agents onto the grid. Each agent lands in exactly one cell,
    /// found by truncating its position.
    pub fn project(bounds: Bounds, agents: &[Agent]) -> Self {
        let mut grid = Self::empty(bounds);
        for agent in agents {
            let (col, row) = grid.cell_of(agent.position);
            grid.cells[row * grid.width + col] += 1;
        }
        grid
    }

    // Positions are kept in bounds by the flock; the clamp only guards the index
    fn cell_of(&self, position: Vec2) -> (usize, usize) {
        let col = (position.x.max(0.0) as usize).min(self.width - 1);
        let row = (position.y.max(0.0) as usize).min(self.height - 1);
        (col, row)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of agents in the cell at column `col`, row `row`.
    pub fn count(&self, col: usize, row: usize) -> u32 {
        self.cells[row * self.width + col]
    }

    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.count(col, row) > 0
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.width)
    }

    /// `(col, row)` of every occupied cell, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(move |(i, _)| (i % self.width, i / self.width))
    }

    pub fn total(&self) -> u32 {
        self.cells.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_teleports_past_far_edge() {
        let bounds = Bounds::new(20, 10);
        let mut p = vec2(20.4, 5.0);
        bounds.wrap(&mut p);
        assert_eq!(p, vec2(0.0, 5.0));

        // Between dim - 1 and dim is also past the last cell
        let mut p = vec2(19.5, 9.2);
        bounds.wrap(&mut p);
        assert_eq!(p, vec2(0.0, 0.0));
    }

    #[test]
    fn test_wrap_teleports_below_zero() {
        let bounds = Bounds::new(20, 10);
        let mut p = vec2(-0.7, -3.0);
        bounds.wrap(&mut p);
        assert_eq!(p, vec2(19.0, 9.0));
    }

    #[test]
    fn test_wrap_leaves_inside_positions() {
        let bounds = Bounds::new(20, 10);
        let mut p = vec2(0.0, 9.0);
        bounds.wrap(&mut p);
        assert_eq!(p, vec2(0.0, 9.0));
        assert!(bounds.contains(p));
    }

    #[test]
    fn test_project_one_cell_per_agent() {
        let bounds = Bounds::new(4, 3);
        let agents = vec![
            Agent::new(vec2(0.2, 0.9), Vec2::ZERO),
            Agent::new(vec2(3.99, 2.5), Vec2::ZERO),
            Agent::new(vec2(3.0, 2.0), Vec2::ZERO),
            Agent::new(vec2(1.5, 1.0), Vec2::ZERO),
        ];
        let grid = Grid::project(bounds, &agents);

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.total(), 4);
        assert_eq!(grid.count(0, 0), 1);
        assert_eq!(grid.count(3, 2), 2);
        assert!(grid.is_occupied(1, 1));
        assert!(!grid.is_occupied(2, 1));
        assert_eq!(grid.occupied().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (3, 2)]);
        assert_eq!(grid.rows().count(), 3);
    }
}
