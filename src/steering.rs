/*
 * Steering Module
 *
 * The three flocking rules. Each rule reads the agent and its neighborhood
 * and returns a velocity correction; none of them mutates anything.
 *
 * 1. Separation: push away from neighbors closer than `separation_radius`
 * 2. Alignment: pull towards the mean neighbor position
 * 3. Cohesion: pull the velocity towards the mean neighbor velocity
 *
 * `alignment_factor` and `coherence_factor` are divisors, so larger values
 * mean weaker, slower convergence.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::error::ConfigError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Steering {
    pub separation_radius: f32,
    pub alignment_factor: f32,
    pub coherence_factor: f32,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            separation_radius: 5.0,
            alignment_factor: 100.0,
            coherence_factor: 8.0,
        }
    }
}

impl Steering {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_factor("separation_radius", self.separation_radius)?;
        ConfigError::check_factor("alignment_factor", self.alignment_factor)?;
        ConfigError::check_factor("coherence_factor", self.coherence_factor)
    }

    /// Raw (not averaged) sum of offsets away from every neighbor strictly
    /// inside the separation radius.
    pub fn separation(&self, agent: &Agent, neighbors: &[&Agent]) -> Vec2 {
        neighbors
            .iter()
            .filter(|other| agent.position.distance(other.position) < self.separation_radius)
            .fold(Vec2::ZERO, |acc, other| acc + (agent.position - other.position))
    }

    pub fn alignment(&self, agent: &Agent, neighbors: &[&Agent]) -> Vec2 {
        match mean(neighbors.iter().map(|other| other.position)) {
            Some(center) => (center - agent.position) / self.alignment_factor,
            None => Vec2::ZERO,
        }
    }

    pub fn cohesion(&self, agent: &Agent, neighbors: &[&Agent]) -> Vec2 {
        match mean(neighbors.iter().map(|other| other.velocity)) {
            Some(heading) => (heading - agent.velocity) / self.coherence_factor,
            None => Vec2::ZERO,
        }
    }

    /// Sum of all three corrections.
    pub fn combined(&self, agent: &Agent, neighbors: &[&Agent]) -> Vec2 {
        self.separation(agent, neighbors)
            + self.alignment(agent, neighbors)
            + self.cohesion(agent, neighbors)
    }
}

// Mean of the vectors, or None when there are none
fn mean(vectors: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    let (sum, count) = vectors.fold((Vec2::ZERO, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(x: f32, y: f32, vx: f32, vy: f32) -> Agent {
        Agent::new(vec2(x, y), vec2(vx, vy))
    }

    #[test]
    fn test_empty_neighborhood_contributes_nothing() {
        let steering = Steering::default();
        let me = agent(3.0, 3.0, 0.2, -0.4);
        assert_eq!(steering.separation(&me, &[]), Vec2::ZERO);
        assert_eq!(steering.alignment(&me, &[]), Vec2::ZERO);
        assert_eq!(steering.cohesion(&me, &[]), Vec2::ZERO);
        assert_eq!(steering.combined(&me, &[]), Vec2::ZERO);
    }

    #[test]
    fn test_separation_is_raw_sum() {
        let steering = Steering {
            separation_radius: 5.0,
            ..Steering::default()
        };
        let me = agent(10.0, 10.0, 0.0, 0.0);
        let a = agent(11.0, 10.0, 0.0, 0.0);
        let b = agent(10.0, 12.0, 0.0, 0.0);
        let far = agent(30.0, 30.0, 0.0, 0.0);

        let push = steering.separation(&me, &[&a, &b, &far]);
        assert_eq!(push, vec2(-1.0, -2.0));
    }

    #[test]
    fn test_separation_radius_is_exclusive() {
        let steering = Steering {
            separation_radius: 5.0,
            ..Steering::default()
        };
        let me = agent(10.0, 10.0, 0.0, 0.0);
        // 3-4-5 triangle: exactly on the radius
        let on_edge = agent(13.0, 14.0, 0.0, 0.0);
        assert_eq!(steering.separation(&me, &[&on_edge]), Vec2::ZERO);

        let inside = agent(13.0, 13.99, 0.0, 0.0);
        let push = steering.separation(&me, &[&inside]);
        assert_ne!(push, Vec2::ZERO);
        // Points away from the neighbor
        assert!(push.dot(inside.position - me.position) < 0.0);
    }

    #[test]
    fn test_alignment_pulls_towards_mean_position() {
        let steering = Steering {
            alignment_factor: 2.0,
            ..Steering::default()
        };
        let me = agent(0.0, 0.0, 0.0, 0.0);
        let a = agent(4.0, 0.0, 0.0, 0.0);
        let b = agent(0.0, 8.0, 0.0, 0.0);
        assert_eq!(steering.alignment(&me, &[&a, &b]), vec2(1.0, 2.0));
    }

    #[test]
    fn test_cohesion_pulls_towards_mean_velocity() {
        let steering = Steering {
            coherence_factor: 4.0,
            ..Steering::default()
        };
        let me = agent(0.0, 0.0, 1.0, 0.0);
        let a = agent(5.0, 5.0, -1.0, 1.0);
        let b = agent(6.0, 6.0, 1.0, 1.0);
        assert_eq!(steering.cohesion(&me, &[&a, &b]), vec2(-0.25, 0.25));
    }

    #[test]
    fn test_validate() {
        assert!(Steering::default().validate().is_ok());
        let bad = Steering {
            separation_radius: -1.0,
            ..Steering::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::NonPositiveFactor { name: "separation_radius", .. })
        ));
    }
}
