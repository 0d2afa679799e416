/*
 * Input Module
 *
 * Keyboard shortcuts and raw event forwarding for the windowed frontend.
 *
 * - Space: pause / resume
 * - S: single tick while paused
 * - R: reset the flock
 * - D: toggle the debug overlay
 */

use nannou::prelude::*;

use crate::app::{reset_flock, Model};

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    // Keys typed into egui widgets belong to the UI
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::S if model.params.pause_simulation => model.pending_steps += 1,
        Key::R => reset_flock(model),
        Key::D => model.params.show_debug = !model.params.show_debug,
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
