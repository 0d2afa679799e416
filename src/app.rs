/*
 * Application Module
 *
 * Windowed frontend: the nannou model, its fixed-interval tick loop and the
 * glue between the egui controls and the running flock.
 *
 * Ticks are driven from a time accumulator. Every full tick interval that
 * has elapsed since the last frame runs one complete `Flock::tick`, and the
 * grid snapshot is only refreshed once those ticks are done.
 */

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::config::FlockConfig;
use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::input::{key_pressed, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::ui;
use crate::world::Grid;

// Upper bound on catch-up ticks after a long frame
const MAX_TICKS_PER_FRAME: usize = 8;

static STARTUP_CONFIG: OnceLock<FlockConfig> = OnceLock::new();

/// Hand the validated startup configuration to the nannou model function,
/// which cannot capture state. Only the first call has any effect.
pub fn set_startup_config(config: FlockConfig) {
    if STARTUP_CONFIG.set(config).is_err() {
        warn!("startup config already set, ignoring");
    }
}

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub grid: Grid,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub tick_accumulator: Duration,
    pub last_update_time: Instant,
    pub pending_steps: usize,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = STARTUP_CONFIG.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title("Boid Simulation")
        .size(1024, 480)
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build window");
    let window = app.window(window_id).expect("window closed during setup");
    let egui = Egui::from_window(&window);

    let params = SimulationParams::new(config);
    // main validated this config already
    let flock = Flock::from_config(&params.flock_config()).expect("startup config is valid");
    let grid = flock.grid();

    Model {
        debug_info: DebugInfo {
            seed: params.flock_config().flock.seed,
            occupied_cells: grid.occupied().count(),
            ..DebugInfo::default()
        },
        flock,
        grid,
        params,
        egui,
        tick_accumulator: Duration::ZERO,
        last_update_time: Instant::now(),
        pending_steps: 0,
    }
}

/// Rebuild the flock from the current parameters.
pub fn reset_flock(model: &mut Model) {
    let config = model.params.flock_config();
    match Flock::from_config(&config) {
        Ok(flock) => {
            info!(agents = flock.len(), "flock reset");
            model.grid = flock.grid();
            model.flock = flock;
            model.tick_accumulator = Duration::ZERO;
            model.debug_info.record_grid(&model.grid);
            model.debug_info.seed = config.flock.seed;
            model.debug_info.total_ticks = 0;
        }
        Err(err) => warn!(%err, "flock reset rejected"),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let (actions, changes) = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if changes.steering_changed {
        if let Err(err) = model.flock.set_steering(model.params.steering()) {
            warn!(%err, "steering change rejected");
            model.params.config.steering = model.flock.steering();
        }
    }
    if changes.interval_changed {
        info!(interval_ms = model.params.config.tick_interval_ms, "tick interval changed");
        model.tick_accumulator = Duration::ZERO;
    }
    if actions.reset || changes.rebuild_flock {
        reset_flock(model);
    }
    if actions.step {
        model.pending_steps += 1;
    }

    let now = Instant::now();
    let frame_time = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    let mut ticks = 0;
    if model.params.pause_simulation {
        model.tick_accumulator = Duration::ZERO;
        for _ in 0..std::mem::take(&mut model.pending_steps) {
            model.flock.tick();
            ticks += 1;
        }
    } else {
        model.pending_steps = 0;
        let interval = model.params.config.tick_interval();
        ticks = ticks_due(&mut model.tick_accumulator, frame_time, interval);
        for _ in 0..ticks {
            model.flock.tick();
        }
    }

    if ticks > 0 {
        model.grid = model.flock.grid();
        model.debug_info.record_grid(&model.grid);
    }
    model.debug_info.ticks_this_frame = ticks;
    model.debug_info.total_ticks = model.flock.tick_count();
}

/// Add `frame_time` to the accumulator and take out every whole `interval`
/// it holds, up to `MAX_TICKS_PER_FRAME`. Returns the number of ticks to run.
fn ticks_due(accumulator: &mut Duration, frame_time: Duration, interval: Duration) -> usize {
    *accumulator += frame_time;

    let mut ticks = 0;
    while *accumulator >= interval && ticks < MAX_TICKS_PER_FRAME {
        *accumulator -= interval;
        ticks += 1;
    }
    // Drop whatever is left after a stall instead of spiralling
    if ticks == MAX_TICKS_PER_FRAME {
        *accumulator = Duration::ZERO;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_due_keeps_remainder() {
        let interval = Duration::from_millis(100);
        let mut accumulator = Duration::ZERO;

        assert_eq!(ticks_due(&mut accumulator, Duration::from_millis(60), interval), 0);
        assert_eq!(ticks_due(&mut accumulator, Duration::from_millis(60), interval), 1);
        assert_eq!(accumulator, Duration::from_millis(20));
        assert_eq!(ticks_due(&mut accumulator, Duration::from_millis(380), interval), 4);
        assert_eq!(accumulator, Duration::ZERO);
    }

    #[test]
    fn test_ticks_due_caps_catch_up() {
        let interval = Duration::from_millis(10);
        let mut accumulator = Duration::ZERO;

        let ticks = ticks_due(&mut accumulator, Duration::from_secs(5), interval);
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);
        assert_eq!(accumulator, Duration::ZERO);
    }
}
