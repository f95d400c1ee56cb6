//! Screen-space overlay drawing for the Macroquad rendering backend.
//!
//! Text measurement and placement live here so the draw loop only deals with
//! scene layers.

use glam::Vec2;
use macroquad::{
    shapes::{draw_line, draw_rectangle},
    text::{draw_text, measure_text},
};
use platformer_rendering::{GridOverlay, HudText, ScenePanel};

use crate::to_macroquad_color;

/// Draws every HUD text anchored against the current screen size.
pub(crate) fn draw_hud(texts: &[HudText], screen: Vec2) {
    for text in texts {
        let font_size = font_size(text.size);
        let width = measure_text(&text.text, None, font_size, 1.0).width;
        let origin = text.origin(screen, width);
        draw_text(
            &text.text,
            origin.x,
            origin.y,
            f32::from(font_size),
            to_macroquad_color(text.color),
        );
    }
}

/// Draws filled panels in order.
pub(crate) fn draw_panels(panels: &[ScenePanel]) {
    for panel in panels {
        draw_rectangle(
            panel.position.x,
            panel.position.y,
            panel.size.x,
            panel.size.y,
            to_macroquad_color(panel.color),
        );
    }
}

/// Draws the editor's cell grid anchored at the screen origin.
pub(crate) fn draw_grid(grid: &GridOverlay) {
    let color = to_macroquad_color(grid.color);
    for (start, end) in grid_lines(grid) {
        draw_line(start.x, start.y, end.x, end.y, 1.0, color);
    }
}

/// Line segments of the grid: verticals first, then horizontals.
pub(crate) fn grid_lines(grid: &GridOverlay) -> Vec<(Vec2, Vec2)> {
    let width = grid.columns as f32 * grid.cell_size;
    let height = grid.rows as f32 * grid.cell_size;
    let verticals = (0..=grid.columns).map(|column| {
        let x = column as f32 * grid.cell_size;
        (Vec2::new(x, 0.0), Vec2::new(x, height))
    });
    let horizontals = (0..=grid.rows).map(|row| {
        let y = row as f32 * grid.cell_size;
        (Vec2::new(0.0, y), Vec2::new(width, y))
    });
    verticals.chain(horizontals).collect()
}

fn font_size(size: f32) -> u16 {
    if size.is_finite() {
        size.clamp(1.0, f32::from(u16::MAX)) as u16
    } else {
        1
    }
}
