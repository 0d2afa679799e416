/*
 * Boid Flocking Simulation - Terminal
 *
 * Runs the flock in the terminal, one frame per tick, until `q`, `Esc` or
 * Ctrl-C is pressed. Configuration is read like the windowed binary:
 * `boids.toml`, or the path in `FLOCKGRID_CONFIG`.
 */

use anyhow::{Context, Result};

use flockgrid::config::{FlockConfig, DEFAULT_CONFIG_PATH};
use flockgrid::terminal::TerminalFrontend;
use flockgrid::{driver, logging, Flock};

fn main() -> Result<()> {
    // Keep the screen clean unless RUST_LOG asks for more
    logging::init_logging("warn");

    let path = std::env::var("FLOCKGRID_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = FlockConfig::load_or_default(&path)?;
    let mut flock = Flock::from_config(&config).context("invalid flock configuration")?;

    let mut frontend = TerminalFrontend::stdout().context("failed to set up terminal")?;
    let result = driver::run(&mut flock, &mut frontend, config.tick_interval());
    let restored = frontend.restore();

    // A failed run is the more useful error to report
    let ticks = result?;
    restored.context("failed to restore terminal")?;
    println!("Stopped after {ticks} ticks.");
    Ok(())
}
