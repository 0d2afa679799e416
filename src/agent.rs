/*
 * Agent Module
 *
 * A single flocking agent. It only carries state: every mutation is done by
 * the flock during a tick.
 */

use nannou::prelude::*;

pub const DEFAULT_VISUAL_RADIUS: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    visual_radius: f32,
}

impl Agent {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            visual_radius: DEFAULT_VISUAL_RADIUS,
        }
    }

    pub fn with_visual_radius(mut self, visual_radius: f32) -> Self {
        self.visual_radius = visual_radius;
        self
    }

    /// How far the agent can see. Only consulted by the visual-radius
    /// neighbor policy.
    pub fn visual_radius(&self) -> f32 {
        self.visual_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_agent_uses_default_radius() {
        let agent = Agent::new(vec2(1.0, 2.0), vec2(0.5, -0.5));
        assert_eq!(agent.visual_radius(), DEFAULT_VISUAL_RADIUS);
        assert_eq!(agent.position, vec2(1.0, 2.0));
        assert_eq!(agent.velocity, vec2(0.5, -0.5));
    }

    #[test]
    fn test_with_visual_radius() {
        let agent = Agent::new(Vec2::ZERO, Vec2::ZERO).with_visual_radius(7.5);
        assert_eq!(agent.visual_radius(), 7.5);
    }
}
