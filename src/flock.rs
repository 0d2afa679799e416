/*
 * Flock Module
 *
 * The flock owns every agent and advances them together, one tick at a time.
 * A tick runs in two phases:
 *
 * 1. Read: compute every agent's steering correction from the state at the
 *    start of the tick into a side buffer.
 * 2. Write: clamp each velocity to [-1, 1] per axis, move, wrap.
 *
 * No agent ever sees a neighbor that was already moved this tick, so the
 * result does not depend on iteration order.
 */

use nannou::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::agent::Agent;
use crate::config::{FlockConfig, NeighborPolicy};
use crate::error::ConfigError;
use crate::spatial_grid::SpatialGrid;
use crate::steering::Steering;
use crate::world::{Bounds, Grid};

const MAX_SPEED: f32 = 1.0;

pub struct Flock {
    agents: Vec<Agent>,
    bounds: Bounds,
    steering: Steering,
    policy: NeighborPolicy,
    // Only maintained for the visual-radius policy
    spatial_grid: Option<SpatialGrid>,
    ticks: u64,
}

impl Flock {
    /// Populate a flock with uniformly random agents drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(config: &FlockConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let width = config.world.width as f32;
        let height = config.world.height as f32;
        let agents = (0..config.flock.num_agents)
            .map(|_| {
                let position = vec2(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
                let velocity = vec2(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
                Agent::new(position, velocity).with_visual_radius(config.flock.visual_radius)
            })
            .collect();

        Self::from_agents(config, agents)
    }

    /// Build a flock seeded from `config.flock.seed`, or from OS entropy when
    /// no seed is given. The seed in use is logged so the run can be replayed.
    pub fn from_config(config: &FlockConfig) -> Result<Self, ConfigError> {
        let seed = config.flock.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!(
            seed,
            agents = config.flock.num_agents,
            width = config.world.width,
            height = config.world.height,
            "initializing flock"
        );
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    /// Build a flock around explicit agents, keeping their order.
    pub fn from_agents(config: &FlockConfig, agents: Vec<Agent>) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(agent) = agents
            .iter()
            .find(|agent| !agent.visual_radius().is_finite() || agent.visual_radius() < 0.0)
        {
            return Err(ConfigError::InvalidVisualRadius(agent.visual_radius()));
        }

        let bounds = Bounds::new(config.world.width, config.world.height);
        let mut flock = Self {
            agents,
            bounds,
            steering: config.steering,
            policy: config.flock.neighbor_policy,
            spatial_grid: None,
            ticks: 0,
        };
        flock.rebuild_index();
        Ok(flock)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn steering(&self) -> Steering {
        self.steering
    }

    pub fn neighbor_policy(&self) -> NeighborPolicy {
        self.policy
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Swap the tuning scalars between ticks.
    pub fn set_steering(&mut self, steering: Steering) -> Result<(), ConfigError> {
        steering.validate()?;
        self.steering = steering;
        Ok(())
    }

    /// Every other agent the one at `index` reacts to, in flock order.
    ///
    /// Exclusion is by index, so two agents sharing a position are still
    /// neighbors of each other. Panics if `index` is out of range.
    pub fn neighbors_of(&self, index: usize) -> Vec<&Agent> {
        match (self.policy, &self.spatial_grid) {
            (NeighborPolicy::VisualRadius, Some(grid)) => {
                let me = &self.agents[index];
                let radius = me.visual_radius();
                grid.nearby_indices(me.position)
                    .into_iter()
                    .filter(|&other| other != index)
                    .map(|other| &self.agents[other])
                    .filter(|other| me.position.distance(other.position) <= radius)
                    .collect()
            }
            _ => self
                .agents
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != index)
                .map(|(_, agent)| agent)
                .collect(),
        }
    }

    /// Combined separation, alignment and cohesion correction for the agent
    /// at `index`, computed against the current state of the flock.
    pub fn steer(&self, index: usize) -> Vec2 {
        let neighbors = self.neighbors_of(index);
        self.steering.combined(&self.agents[index], &neighbors)
    }

    /// Advance every agent by one step.
    pub fn tick(&mut self) {
        let corrections: Vec<Vec2> = (0..self.agents.len()).map(|i| self.steer(i)).collect();

        let bounds = self.bounds;
        for (agent, correction) in self.agents.iter_mut().zip(corrections) {
            integrate(agent, correction, bounds);
        }

        self.rebuild_index();
        self.ticks += 1;
        debug!(tick = self.ticks, agents = self.agents.len(), "tick complete");
    }

    /// Occupancy projection of the current positions.
    pub fn grid(&self) -> Grid {
        Grid::project(self.bounds, &self.agents)
    }

    fn rebuild_index(&mut self) {
        if self.policy != NeighborPolicy::VisualRadius {
            self.spatial_grid = None;
            return;
        }

        let max_radius = self
            .agents
            .iter()
            .map(Agent::visual_radius)
            .fold(0.0_f32, f32::max);

        // Recreate the grid if the agents see further than a cell
        let grid = match self.spatial_grid.take() {
            Some(grid) if grid.cell_size >= max_radius => grid,
            _ => SpatialGrid::new(max_radius, self.bounds),
        };
        let grid = self.spatial_grid.insert(grid);
        grid.rebuild(self.agents.iter().map(|agent| agent.position));
    }
}

/// Apply a steering correction: clamp velocity per axis, move, wrap.
pub fn integrate(agent: &mut Agent, correction: Vec2, bounds: Bounds) {
    agent.velocity = (agent.velocity + correction)
        .clamp(Vec2::splat(-MAX_SPEED), Vec2::splat(MAX_SPEED));
    agent.position += agent.velocity;
    bounds.wrap(&mut agent.position);
}
