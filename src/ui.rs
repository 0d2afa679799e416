/*
 * UI Module
 *
 * egui controls for the windowed frontend and the debug text overlay.
 * Parameter change detection lives in SimulationParams.
 */

use nannou_egui::{egui, Egui};

use crate::config::NeighborPolicy;
use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

/// Buttons pressed this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct UiActions {
    pub reset: bool,
    pub step: bool,
}

// Update the UI and report what changed
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (UiActions, ParamChanges) {
    let mut actions = UiActions::default();

    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.config.flock.num_agents, SimulationParams::get_num_agents_range())
                        .text("Number of Agents"),
                );

                let mut radius_policy = params.config.flock.neighbor_policy == NeighborPolicy::VisualRadius;
                if ui.checkbox(&mut radius_policy, "Limit neighbors to visual radius").changed() {
                    params.config.flock.neighbor_policy = if radius_policy {
                        NeighborPolicy::VisualRadius
                    } else {
                        NeighborPolicy::All
                    };
                }

                ui.horizontal(|ui| {
                    ui.checkbox(&mut params.use_fixed_seed, "Fixed seed");
                    ui.add_enabled(params.use_fixed_seed, egui::DragValue::new(&mut params.seed));
                });

                if ui.button("Reset Flock").clicked() {
                    actions.reset = true;
                }
            });

            ui.collapsing("Steering", |ui| {
                let steering = &mut params.config.steering;
                ui.add(
                    egui::Slider::new(&mut steering.separation_radius, SimulationParams::get_separation_radius_range())
                        .text("Separation Radius"),
                );
                ui.add(
                    egui::Slider::new(&mut steering.alignment_factor, SimulationParams::get_factor_range())
                        .logarithmic(true)
                        .text("Alignment Factor"),
                );
                ui.add(
                    egui::Slider::new(&mut steering.coherence_factor, SimulationParams::get_factor_range())
                        .logarithmic(true)
                        .text("Coherence Factor"),
                );
            });

            ui.collapsing("Timing", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.config.tick_interval_ms, SimulationParams::get_tick_interval_range())
                        .text("Tick Interval (ms)"),
                );
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Ticks: {}", debug_info.total_ticks));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.horizontal(|ui| {
                ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
                if ui
                    .add_enabled(params.pause_simulation, egui::Button::new("Step"))
                    .clicked()
                {
                    actions.step = true;
                }
            });
        });

    (actions, params.detect_changes())
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    agents: usize,
    world: (u32, u32),
) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;

    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let seed = debug_info
        .seed
        .map_or_else(|| "entropy".to_string(), |seed| seed.to_string());
    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Ticks: {} (+{})", debug_info.total_ticks, debug_info.ticks_this_frame),
        format!("Agents: {}", agents),
        format!("Occupied cells: {}", debug_info.occupied_cells),
        format!("World: {}x{}  seed: {}", world.0, world.1, seed),
    ];

    let text_x = window_rect.right() - panel_width / 2.0;
    let text_y = window_rect.top() - margin;
    for (i, text) in debug_texts.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
