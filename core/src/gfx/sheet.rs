//! Sprite sheets: an atlas surface plus a list of cell rectangles.
//!
//! Cells are either generated on a fixed grid over the atlas or supplied as
//! a binary table of little-endian 32-bit `(x, y, width, height)` records.
//! The sheet shares the atlas (`Rc`) so the borrow rules guarantee the
//! atlas outlives every sheet cut from it; the atlas is never copied.

use std::rc::Rc;

use log::debug;
use thiserror::Error;

use crate::gfx::{Context, Point, Rectangle, Size, Surface};

/// Size in bytes of one cell record in a binary cell table.
const CELL_RECORD_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cell size {width}x{height} is degenerate")]
    DegenerateCell { width: u32, height: u32 },

    #[error("cell table length {length} is not a multiple of {CELL_RECORD_SIZE}")]
    MalformedTable { length: usize },

    #[error("cell #{index} ({cell:?}) exceeds the {width}x{height} atlas")]
    CellOutOfBounds {
        index: usize,
        cell: Rectangle,
        width: usize,
        height: usize,
    },
}

pub struct Sheet {
    atlas: Rc<Surface>,
    cells: Vec<Rectangle>,
}

impl Sheet {
    /// Cut the atlas into a row-major grid of `cell_width`×`cell_height`
    /// cells; partial cells at the right/bottom edges are dropped.
    pub fn from_grid(
        atlas: Rc<Surface>,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, SheetError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(SheetError::DegenerateCell {
                width: cell_width,
                height: cell_height,
            });
        }

        let columns = atlas.width() / cell_width as usize;
        let rows = atlas.height() / cell_height as usize;

        let mut cells = Vec::with_capacity(columns * rows);
        for i in 0..rows {
            for j in 0..columns {
                cells.push(Rectangle {
                    x: (j * cell_width as usize) as i32,
                    y: (i * cell_height as usize) as i32,
                    width: cell_width,
                    height: cell_height,
                });
            }
        }

        debug!("sheet created ({columns}x{rows} grid)");
        Ok(Self { atlas, cells })
    }

    /// Build a sheet from a binary cell table: consecutive records of four
    /// little-endian `i32`s `(x, y, width, height)`.
    pub fn from_table(atlas: Rc<Surface>, records: &[u8]) -> Result<Self, SheetError> {
        if !records.len().is_multiple_of(CELL_RECORD_SIZE) {
            return Err(SheetError::MalformedTable {
                length: records.len(),
            });
        }

        let cells = records
            .chunks_exact(CELL_RECORD_SIZE)
            .map(|record| {
                let field =
                    |i: usize| i32::from_le_bytes(record[i * 4..i * 4 + 4].try_into().unwrap());
                Rectangle {
                    x: field(0),
                    y: field(1),
                    width: field(2).max(0) as u32,
                    height: field(3).max(0) as u32,
                }
            })
            .collect();

        Self::with_cells(atlas, cells)
    }

    /// Build a sheet from pre-computed cells, validating them against the
    /// atlas bounds.
    pub fn with_cells(atlas: Rc<Surface>, cells: Vec<Rectangle>) -> Result<Self, SheetError> {
        for (index, cell) in cells.iter().enumerate() {
            let inside = cell.x >= 0
                && cell.y >= 0
                && cell.x as usize + cell.width as usize <= atlas.width()
                && cell.y as usize + cell.height as usize <= atlas.height();
            if !inside {
                return Err(SheetError::CellOutOfBounds {
                    index,
                    cell: *cell,
                    width: atlas.width(),
                    height: atlas.height(),
                });
            }
        }

        debug!("sheet created ({} cells)", cells.len());
        Ok(Self { atlas, cells })
    }

    pub fn atlas(&self) -> &Surface {
        &self.atlas
    }

    pub fn cells(&self) -> &[Rectangle] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// On-screen extent of a cell under the given scale factors (truncated,
    /// matching the scaled blit's sampling).
    pub fn size(&self, cell_id: usize, scale_x: f32, scale_y: f32) -> Size {
        let cell = &self.cells[cell_id];
        Size {
            width: (cell.width as f32 * scale_x.abs()) as u32,
            height: (cell.height as f32 * scale_y.abs()) as u32,
        }
    }

    pub fn blit(&self, context: &mut Context, position: Point, cell_id: usize) {
        context.blit(&self.atlas, self.cells[cell_id], position);
    }

    pub fn blit_scaled(
        &self,
        context: &mut Context,
        position: Point,
        cell_id: usize,
        scale_x: f32,
        scale_y: f32,
    ) {
        context.blit_scaled(&self.atlas, self.cells[cell_id], position, scale_x, scale_y);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn blit_rotated(
        &self,
        context: &mut Context,
        position: Point,
        cell_id: usize,
        scale_x: f32,
        scale_y: f32,
        rotation: i32,
        anchor_x: f32,
        anchor_y: f32,
    ) {
        context.blit_rotated(
            &self.atlas,
            self.cells[cell_id],
            position,
            scale_x,
            scale_y,
            rotation,
            anchor_x,
            anchor_y,
        );
    }
}
