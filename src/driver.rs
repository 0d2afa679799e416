/*
 * Driver Module
 *
 * Fixed-interval simulation loop: tick, present the grid, wait. The flock
 * knows nothing about time or output; a `Frontend` supplies both. Stop
 * requests are only honoured between ticks, so a tick is never cut short.
 */

use std::io;
use std::time::Duration;

use tracing::info;

use crate::error::Result;
use crate::flock::Flock;
use crate::world::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

pub trait Frontend {
    /// Draw the grid produced by tick number `tick`.
    fn present(&mut self, grid: &Grid, tick: u64) -> io::Result<()>;

    /// Block for up to `interval` and report whether the loop should go on.
    fn wait(&mut self, interval: Duration) -> io::Result<Control>;
}

/// Run until the frontend asks to stop. Returns the number of ticks run.
pub fn run<F: Frontend>(flock: &mut Flock, frontend: &mut F, interval: Duration) -> Result<u64> {
    let start = flock.tick_count();
    info!(interval_ms = interval.as_millis() as u64, agents = flock.len(), "simulation started");

    loop {
        flock.tick();
        frontend.present(&flock.grid(), flock.tick_count())?;

        if frontend.wait(interval)? == Control::Stop {
            break;
        }
    }

    let ticks = flock.tick_count() - start;
    info!(ticks, "simulation stopped");
    Ok(ticks)
}
