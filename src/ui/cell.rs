// Cell painting - Shapes for each beat label
// Cymbal spins, snare is a hollow square, kick a solid one, silence a growing slash

use crate::config::DisplaySettings;
use crate::sequencer::DominantEvent;
use crate::ui::layout::CellView;
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use std::f64::consts::TAU;

/// Exponential ease-out; reaches 1 exactly at `x == 1`
pub fn ease_out_expo(x: f64) -> f64 {
    if x >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-15.0 * x)
    }
}

/// Colors and sizes needed to paint a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub cell_size: f32,
    pub cell_padding: f32,
    pub shape_inset: f32,
    pub foreground: Color32,
    pub background: Color32,
}

impl CellStyle {
    pub fn from_settings(display: &DisplaySettings) -> Self {
        let [r, g, b] = display.foreground;
        let [br, bg, bb] = display.background;

        Self {
            cell_size: display.cell_size,
            cell_padding: display.cell_padding,
            shape_inset: display.shape_inset,
            foreground: Color32::from_rgb(r, g, b),
            background: Color32::from_rgb(br, bg, bb),
        }
    }

    /// Side of the shape at the given animation progress
    pub fn shape_size(&self, ease: f64) -> f32 {
        (self.cell_size - self.shape_inset).max(0.0) * ease_out_expo(ease) as f32
    }
}

/// One full turn over the beat
pub fn rotation(ease: f64) -> f32 {
    (ease * TAU) as f32
}

/// Corners of a square of side `size` centered on `center`, rotated by `angle` radians
pub fn rotated_square(center: Pos2, size: f32, angle: f32) -> Vec<Pos2> {
    let half = size / 2.0;
    let (sin, cos) = angle.sin_cos();

    [(-half, -half), (half, -half), (half, half), (-half, half)]
        .into_iter()
        .map(|(x, y)| center + Vec2::new(x * cos - y * sin, x * sin + y * cos))
        .collect()
}

/// End points of the silence slash: from the cell's top-right corner toward bottom-left
pub fn silence_stroke(center: Pos2, style: &CellStyle, size: f32) -> [Pos2; 2] {
    let top_right = Pos2::new(
        center.x + style.cell_size / 2.0 - style.cell_padding,
        center.y - style.cell_size / 2.0 + style.cell_padding,
    );
    let reach = size - style.cell_padding / 2.0;

    [top_right, top_right + Vec2::new(-reach, reach)]
}

/// Paint one visible cell
pub fn paint_cell(painter: &Painter, center: Pos2, cell: &CellView, style: &CellStyle) {
    let size = style.shape_size(cell.ease);
    let square = Rect::from_center_size(center, Vec2::splat(size));

    match cell.label {
        Some(DominantEvent::Cymbal) => {
            let corners = rotated_square(center, size, rotation(cell.ease));
            painter.add(Shape::convex_polygon(corners, style.foreground, Stroke::NONE));
        }
        Some(DominantEvent::Snare) => {
            painter.rect_filled(square, 0.0, style.foreground);
            painter.rect_filled(
                Rect::from_center_size(center, Vec2::splat(size / 1.3)),
                0.0,
                style.background,
            );
        }
        Some(DominantEvent::Kick) => {
            painter.rect_filled(square, 0.0, style.foreground);
        }
        None => {
            painter.line_segment(
                silence_stroke(center, style, size),
                Stroke::new(1.0, style.foreground),
            );
        }
    }
}
