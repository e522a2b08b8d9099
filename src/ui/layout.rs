// Grid layout - Which cells are visible, what they show and where they sit
// Kept free of painting so it can be tested without a window

use crate::sequencer::{BeatGrid, DominantEvent, FrameSnapshot};
use egui::{Pos2, Rect, Vec2};

/// Cell grid dimensions: one column per beat, one row per visible measure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub columns: u8,
    pub rows: u32,
    pub cell_size: f32,
    pub cell_padding: f32,
}

impl GridGeometry {
    pub fn new(columns: u8, rows: u32, cell_size: f32, cell_padding: f32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            cell_padding,
        }
    }

    /// Size of the whole grid, padding included
    pub fn size(&self) -> Vec2 {
        let extent = |count: f32| count * self.cell_size + (count - 1.0).max(0.0) * self.cell_padding;
        Vec2::new(extent(self.columns as f32), extent(self.rows as f32))
    }

    /// Top-left corner of the grid when centered in `area`
    pub fn origin(&self, area: Rect) -> Pos2 {
        area.center() - self.size() / 2.0
    }

    /// Center of the cell at 1-based (row, column)
    pub fn cell_center(&self, origin: Pos2, row: u32, column: u8) -> Pos2 {
        let step = self.cell_size + self.cell_padding;
        Pos2::new(
            origin.x + (column as f32 - 1.0) * step + self.cell_size / 2.0,
            origin.y + (row as f32 - 1.0) * step + self.cell_size / 2.0,
        )
    }

    pub fn cell_rect(&self, origin: Pos2, row: u32, column: u8) -> Rect {
        Rect::from_center_size(
            self.cell_center(origin, row, column),
            Vec2::splat(self.cell_size),
        )
    }
}

/// One cell to paint this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub row: u32,
    pub column: u8,
    pub measure: u32,
    pub label: Option<DominantEvent>,
    /// Animation progress: the frame's progress for the current cell, 1 for settled cells
    pub ease: f64,
}

/// Cells already reached in the visible block of measures
///
/// The current measure sits on row `((measure - 1) % rows) + 1`, earlier rows
/// show the measures just before it. Cells after the current beat stay empty,
/// and nothing is visible before the first beat.
pub fn visible_cells(frame: &FrameSnapshot, grid: &BeatGrid, geometry: &GridGeometry) -> Vec<CellView> {
    if !frame.is_started() || frame.measure == 0 || geometry.rows == 0 {
        return Vec::new();
    }

    let current_row = (frame.measure - 1) % geometry.rows + 1;
    let first_measure = frame.measure - (current_row - 1);
    let mut cells = Vec::new();

    for row in 1..=current_row {
        let measure = first_measure + (row - 1);

        for column in 1..=geometry.columns {
            let is_current_row = row == current_row;
            if is_current_row && column > frame.beat {
                break;
            }

            let ease = if is_current_row && column == frame.beat {
                frame.progress
            } else {
                1.0
            };

            cells.push(CellView {
                row,
                column,
                measure,
                label: grid.get(measure, column),
                ease,
            });
        }
    }

    cells
}
