//! Palette-indexed software graphics core.
//!
//! Drawing happens in *pixel-index* space: a [`Surface`] is a grid of 8-bit
//! indices into a 256-entry [`Palette`], and every draw operation routes
//! through a [`Context`] that applies the index remap ("shifting") table,
//! per-index transparency flags and the clipping rectangle. Colour only
//! appears at the very end of the frame, when the [`Processor`] converts the
//! indexed canvas to RGBA — optionally steered, scanline by scanline, by a
//! [`Program`] in the manner of the Amiga Copper.

pub mod blit;
pub mod context;
pub mod palette;
pub mod primitives;
pub mod processor;
pub mod program;
pub mod queue;
pub mod sheet;
pub mod sincos;
pub mod surface;
pub mod xform;

pub use context::{Context, DrawState};
pub use palette::{Color, PALETTE_SIZE, Palette};
pub use processor::Processor;
pub use program::{Program, ProgramEntry};
pub use queue::{QueueSprite, SpriteQueue};
pub use sheet::{Sheet, SheetError};
pub use sincos::{SINCOS_PERIOD, sincos};
pub use surface::Surface;
pub use xform::{Wrap, XForm, XFormRegister, XFormTableEntry};

/// An index into the palette; the only value a [`Surface`] stores.
pub type Pixel = u8;

/// Signed integer 2-vector, used for screen and texture positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Position plus extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A quad with CLOSED bounds: both `(x0, y0)` and `(x1, y1)` are part of the
/// region. An empty quad has `x1 < x0` or `y1 < y0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quad {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Quad {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }
}
