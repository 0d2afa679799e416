/*
 * Boid Flocking Simulation - Module Definitions
 *
 * Headless core: agents, steering rules, the flock and its world grid.
 * The driver runs the core against a frontend; two frontends ship with the
 * crate, a terminal one and a nannou window with live controls.
 */

// Re-export key components for easier access
pub use agent::Agent;
pub use config::{FlockConfig, NeighborPolicy};
pub use driver::{Control, Frontend};
pub use error::{ConfigError, SimulationError};
pub use flock::Flock;
pub use steering::Steering;
pub use world::{Bounds, Grid};

// Simulation core
pub mod agent;
pub mod config;
pub mod error;
pub mod flock;
pub mod spatial_grid;
pub mod steering;
pub mod world;

// Running and presenting
pub mod driver;
pub mod logging;
pub mod terminal;

// Windowed frontend
pub mod app;
pub mod debug;
pub mod input;
pub mod params;
pub mod renderer;
pub mod ui;
