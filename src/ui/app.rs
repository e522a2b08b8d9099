// Main UI App
// Drives the beat player once per frame and paints the cell grid

use crate::config::DisplaySettings;
use crate::sequencer::{BeatPlayer, FrameSnapshot};
use crate::ui::cell::{CellStyle, paint_cell};
use crate::ui::layout::{GridGeometry, visible_cells};
use egui::{Align2, Color32, FontId, Pos2, Stroke, Vec2};
use std::time::Instant;

const STATUS_FONT_SIZE: f32 = 10.0;

pub struct MetronomeApp {
    player: BeatPlayer,
    geometry: GridGeometry,
    style: CellStyle,
    frame_color: Color32,
    // Clock origin for the transport timestamps
    started: Instant,
}

impl MetronomeApp {
    pub fn new(player: BeatPlayer, display: &DisplaySettings) -> Self {
        let geometry = GridGeometry::new(
            player.meter().beats_per_measure(),
            display.rows,
            display.cell_size,
            display.cell_padding,
        );
        let [r, g, b] = display.frame_color;

        Self {
            player,
            geometry,
            style: CellStyle::from_settings(display),
            frame_color: Color32::from_rgb(r, g, b),
            started: Instant::now(),
        }
    }

    /// Milliseconds since the app was created
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Empty outlines for every cell
    fn draw_frames(&self, painter: &egui::Painter, origin: Pos2) {
        for row in 1..=self.geometry.rows {
            for column in 1..=self.geometry.columns {
                painter.rect_stroke(
                    self.geometry.cell_rect(origin, row, column),
                    0.0,
                    Stroke::new(1.0, self.frame_color),
                );
            }
        }
    }

    fn status_color(&self) -> Color32 {
        self.style.foreground
    }

    fn draw_status(&self, painter: &egui::Painter, origin: Pos2, frame: &FrameSnapshot) {
        painter.text(
            origin - Vec2::new(0.0, 10.0),
            Align2::LEFT_BOTTOM,
            status_line(&self.player, frame),
            FontId::proportional(STATUS_FONT_SIZE),
            self.status_color(),
        );
    }

    fn draw_beats(&self, painter: &egui::Painter, origin: Pos2, frame: &FrameSnapshot) {
        for cell in visible_cells(frame, self.player.grid(), &self.geometry) {
            let center = self.geometry.cell_center(origin, cell.row, cell.column);
            paint_cell(painter, center, &cell, &self.style);
        }
    }
}

/// Text shown above the grid
pub fn status_line(player: &BeatPlayer, frame: &FrameSnapshot) -> String {
    format!(
        "BPM: {},  measure: {},  beat: {}/{}",
        player.meter().tempo().bpm(),
        frame.measure,
        frame.beat,
        player.meter().beats_per_measure()
    )
}

impl eframe::App for MetronomeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Animation runs continuously
        ctx.request_repaint();

        let now_ms = self.now_ms();
        let frame = self.player.on_frame(now_ms);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.style.background))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let origin = self.geometry.origin(response.rect);

                self.draw_frames(&painter, origin);
                self.draw_status(&painter, origin, &frame);
                self.draw_beats(&painter, origin, &frame);
            });
    }
}
