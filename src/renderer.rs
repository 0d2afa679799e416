/*
 * Renderer Module
 *
 * Draws the occupancy grid produced by the last tick, scaled to fit the
 * window. Row 0 of the grid is drawn at the top, like the terminal view.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::ui;

const MARGIN: f32 = 20.0;

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let grid = &model.grid;
    let columns = grid.width() as f32;
    let rows = grid.height() as f32;

    // Square cells, as large as the window allows
    let cell = ((window_rect.w() - 2.0 * MARGIN) / columns)
        .min((window_rect.h() - 2.0 * MARGIN) / rows)
        .max(1.0);
    let world_w = cell * columns;
    let world_h = cell * rows;
    let left = -world_w / 2.0;
    let top = world_h / 2.0;

    draw.rect()
        .x_y(0.0, 0.0)
        .w_h(world_w, world_h)
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    for (col, row) in grid.occupied() {
        // Stacked agents get a brighter cell
        let count = grid.count(col, row) as f32;
        let shade = (0.55 + 0.15 * count).min(1.0);
        draw.rect()
            .x_y(left + (col as f32 + 0.5) * cell, top - (row as f32 + 0.5) * cell)
            .w_h(cell * 0.9, cell * 0.9)
            .color(rgb(shade, shade, shade));
    }

    if model.params.show_debug {
        if let Some(first) = model.flock.agents().first() {
            let origin = pt2(left + first.position.x * cell, top - first.position.y * cell);

            // Visual radius of the first agent
            draw.ellipse()
                .xy(origin)
                .radius(first.visual_radius() * cell)
                .no_fill()
                .stroke(GREEN)
                .stroke_weight(1.0);

            // Separation radius
            draw.ellipse()
                .xy(origin)
                .radius(model.flock.steering().separation_radius * cell)
                .no_fill()
                .stroke(RED)
                .stroke_weight(1.0);

            // Velocity vector (y flipped to screen space)
            draw.arrow()
                .start(origin)
                .end(origin + vec2(first.velocity.x, -first.velocity.y) * cell * 2.0)
                .color(YELLOW)
                .stroke_weight(2.0);
        }

        let bounds = model.flock.bounds();
        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            window_rect,
            model.flock.len(),
            (bounds.width, bounds.height),
        );
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::error!(?err, "failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::error!(?err, "failed to draw ui");
    }
}
