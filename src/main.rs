/*
 * Boid Flocking Simulation
 *
 * Windowed frontend. Agents move on a fixed grid world following three
 * rules (separation, alignment, cohesion); sliders adjust the tuning live.
 *
 * The configuration is read from `boids.toml` in the working directory, or
 * from the path in `FLOCKGRID_CONFIG`. An invalid configuration stops the
 * program before a window is opened.
 */

use anyhow::{Context, Result};

use flockgrid::app;
use flockgrid::config::{FlockConfig, DEFAULT_CONFIG_PATH};
use flockgrid::logging;

fn main() -> Result<()> {
    logging::init_logging("info");

    let path = std::env::var("FLOCKGRID_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = FlockConfig::load_or_default(&path)?;
    config.validate().context("invalid flock configuration")?;
    app::set_startup_config(config);

    nannou::app(app::model).update(app::update).run();
    Ok(())
}
