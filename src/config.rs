/*
 * Configuration Module
 *
 * Startup configuration for the flock, loaded from a TOML file:
 *
 *   tick_interval_ms = 100
 *
 *   [world]
 *   width = 80
 *   height = 24
 *
 *   [flock]
 *   num_agents = 20
 *   visual_radius = 3.0
 *   neighbor_policy = "all"      # or "visual-radius"
 *   seed = 42                    # optional
 *
 *   [steering]
 *   separation_radius = 5.0
 *   alignment_factor = 100.0
 *   coherence_factor = 8.0
 *
 * Every table and field is optional and falls back to its default.
 */

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::agent::DEFAULT_VISUAL_RADIUS;
use crate::error::ConfigError;
use crate::steering::Steering;

pub const DEFAULT_CONFIG_PATH: &str = "boids.toml";

/// Largest world accepted, in cells. Positions are `f32`, which counts whole
/// numbers exactly only up to 2^24, so no side may be longer than that.
pub const MAX_WORLD_CELLS: u64 = 1 << 24;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { width: 80, height: 24 }
    }
}

/// Which agents count as neighbors when the steering rules run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborPolicy {
    /// Every other agent in the flock, regardless of distance.
    #[default]
    All,
    /// Only agents within the querying agent's visual radius.
    VisualRadius,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub num_agents: usize,
    pub visual_radius: f32,
    pub neighbor_policy: NeighborPolicy,
    pub seed: Option<u64>,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            num_agents: 20,
            visual_radius: DEFAULT_VISUAL_RADIUS,
            neighbor_policy: NeighborPolicy::All,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FlockConfig {
    pub tick_interval_ms: u64,
    pub world: WorldConfig,
    pub flock: FlockSettings,
    pub steering: Steering,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            world: WorldConfig::default(),
            flock: FlockSettings::default(),
            steering: Steering::default(),
        }
    }
}

impl FlockConfig {
    /// Read and parse a config file. Missing files are an error here.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`FlockConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.as_ref().display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::EmptyWorld {
                width: self.world.width,
                height: self.world.height,
            });
        }
        if u64::from(self.world.width) * u64::from(self.world.height) > MAX_WORLD_CELLS {
            return Err(ConfigError::WorldTooLarge {
                width: self.world.width,
                height: self.world.height,
                max_cells: MAX_WORLD_CELLS,
            });
        }
        let radius = self.flock.visual_radius;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::InvalidVisualRadius(radius));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        self.steering.validate()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FlockConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FlockConfig = toml::from_str(
            r#"
            [world]
            width = 40

            [flock]
            neighbor_policy = "visual-radius"
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.world.width, 40);
        assert_eq!(config.world.height, 24);
        assert_eq!(config.flock.neighbor_policy, NeighborPolicy::VisualRadius);
        assert_eq!(config.flock.seed, Some(7));
        assert_eq!(config.steering, Steering::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_negative_agent_count_fails_to_parse() {
        let parsed: Result<FlockConfig, _> = toml::from_str("[flock]\nnum_agents = -3\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_world() {
        let mut config = FlockConfig::default();
        config.world.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyWorld { width: 80, height: 0 })
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_world() {
        let mut config = FlockConfig::default();
        config.world.width = (1 << 25) + 1;
        config.world.height = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WorldTooLarge { height: 1, .. })
        ));

        // Each side fits on its own but the grid would not
        config.world.width = 1 << 20;
        config.world.height = 1 << 20;
        assert!(matches!(config.validate(), Err(ConfigError::WorldTooLarge { .. })));

        config.world.width = 1 << 24;
        config.world.height = 1;
        assert!(config.validate().is_ok());
        config.world.width = 4096;
        config.world.height = 4096;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_factors() {
        let mut config = FlockConfig::default();
        config.steering.coherence_factor = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveFactor { name: "coherence_factor", .. })
        ));

        let mut config = FlockConfig::default();
        config.flock.visual_radius = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidVisualRadius(_))));

        let mut config = FlockConfig::default();
        config.tick_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTickInterval)));
    }

    #[test]
    fn test_load_or_default_handles_missing_file() {
        let path = std::env::temp_dir().join("flockgrid-definitely-missing.toml");
        let config = FlockConfig::load_or_default(&path).unwrap();
        assert_eq!(config, FlockConfig::default());
        assert!(matches!(FlockConfig::load(&path), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("flockgrid-bad-{}.toml", std::process::id()));
        fs::write(&path, "[world\nwidth = ").unwrap();
        let result = FlockConfig::load_or_default(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
