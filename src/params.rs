/*
 * Simulation Parameters Module
 *
 * Live, UI-editable copy of the flock configuration for the windowed
 * frontend, plus change detection between frames. Steering changes are
 * pushed into the running flock; anything that affects initialization
 * (agent count, neighbor policy, seed) rebuilds it.
 */

use std::ops::RangeInclusive;

use crate::config::{FlockConfig, NeighborPolicy};
use crate::steering::Steering;

pub struct SimulationParams {
    pub config: FlockConfig,
    pub use_fixed_seed: bool,
    pub seed: u64,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    num_agents: usize,
    neighbor_policy: NeighborPolicy,
    seed: Option<u64>,
    steering: Steering,
    tick_interval_ms: u64,
}

/// What changed since the last snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParamChanges {
    pub rebuild_flock: bool,
    pub steering_changed: bool,
    pub interval_changed: bool,
}

impl SimulationParams {
    pub fn new(config: FlockConfig) -> Self {
        Self {
            use_fixed_seed: config.flock.seed.is_some(),
            seed: config.flock.seed.unwrap_or_default(),
            config,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }

    /// The configuration as currently edited, with the seed toggle applied.
    pub fn flock_config(&self) -> FlockConfig {
        let mut config = self.config.clone();
        config.flock.seed = self.use_fixed_seed.then_some(self.seed);
        config
    }

    pub fn steering(&self) -> Steering {
        self.config.steering
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_agents: self.config.flock.num_agents,
            neighbor_policy: self.config.flock.neighbor_policy,
            seed: self.use_fixed_seed.then_some(self.seed),
            steering: self.config.steering,
            tick_interval_ms: self.config.tick_interval_ms,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Check if any parameters have changed since the last snapshot
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };
        let current = self.snapshot();

        ParamChanges {
            rebuild_flock: current.num_agents != prev.num_agents
                || current.neighbor_policy != prev.neighbor_policy
                || current.seed != prev.seed,
            steering_changed: current.steering != prev.steering,
            interval_changed: current.tick_interval_ms != prev.tick_interval_ms,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_agents_range() -> RangeInclusive<usize> {
        0..=2000
    }

    pub fn get_separation_radius_range() -> RangeInclusive<f32> {
        0.1..=20.0
    }

    pub fn get_factor_range() -> RangeInclusive<f32> {
        1.0..=500.0
    }

    pub fn get_tick_interval_range() -> RangeInclusive<u64> {
        10..=2000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_snapshot_means_no_changes() {
        let params = SimulationParams::new(FlockConfig::default());
        assert_eq!(params.detect_changes(), ParamChanges::default());
    }

    #[test]
    fn test_steering_change_does_not_rebuild() {
        let mut params = SimulationParams::new(FlockConfig::default());
        params.take_snapshot();
        params.config.steering.coherence_factor = 20.0;

        let changes = params.detect_changes();
        assert!(changes.steering_changed);
        assert!(!changes.rebuild_flock);
        assert!(!changes.interval_changed);
    }

    #[test]
    fn test_agent_count_and_seed_rebuild() {
        let mut params = SimulationParams::new(FlockConfig::default());
        params.take_snapshot();
        params.config.flock.num_agents = 50;
        assert!(params.detect_changes().rebuild_flock);

        params.take_snapshot();
        params.use_fixed_seed = true;
        params.seed = 9;
        assert!(params.detect_changes().rebuild_flock);
        assert_eq!(params.flock_config().flock.seed, Some(9));
    }

    #[test]
    fn test_pause_is_ui_only() {
        let mut params = SimulationParams::new(FlockConfig::default());
        params.take_snapshot();
        params.pause_simulation = true;
        params.show_debug = true;
        assert_eq!(params.detect_changes(), ParamChanges::default());
    }

    #[test]
    fn test_interval_change_is_reported_alone() {
        let mut params = SimulationParams::new(FlockConfig::default());
        params.take_snapshot();
        params.config.tick_interval_ms = 250;

        let changes = params.detect_changes();
        assert!(changes.interval_changed);
        assert!(!changes.rebuild_flock && !changes.steering_changed);
    }
}
