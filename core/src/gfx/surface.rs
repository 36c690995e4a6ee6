//! A width×height buffer of pixel indices.
//!
//! Surfaces know nothing about colour: they store palette indices, row-major
//! and without stride padding. Conversion to RGBA is the display processor's
//! job.

use log::{debug, error};

use crate::gfx::{Pixel, Point};

pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
    is_power_of_two: bool,
}

impl Surface {
    /// Allocate a zero-filled surface. Returns `None` (and logs) for
    /// degenerate dimensions.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            error!("can't create degenerate ({width}x{height}) surface");
            return None;
        }
        debug!("surface created ({width}x{height})");
        Some(Self {
            width,
            height,
            data: vec![0; width * height],
            is_power_of_two: width.is_power_of_two() && height.is_power_of_two(),
        })
    }

    /// Allocate a blank surface and hand it, together with the undecoded
    /// pixel payload, to a caller-supplied population callback. This is the
    /// seam the host's image decoders plug into: the engine allocates, the
    /// decoder writes indices.
    pub fn decode<P: ?Sized>(
        width: usize,
        height: usize,
        pixels: &P,
        callback: impl FnOnce(&mut Surface, &P),
    ) -> Option<Self> {
        let mut surface = Self::new(width, height)?;
        callback(&mut surface, pixels);
        debug!("surface decoded ({width}x{height})");
        Some(surface)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True iff both dimensions are powers of two; enables mask-based
    /// wrapping in the affine transform path.
    pub fn is_power_of_two(&self) -> bool {
        self.is_power_of_two
    }

    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Fill the whole surface with `index`, ignoring any drawing state.
    pub fn clear(&mut self, index: Pixel) {
        self.data.fill(index);
    }

    /// Read the pixel at `position`, which must be inside the surface.
    pub fn peek(&self, position: Point) -> Pixel {
        debug_assert!(self.contains(position));
        self.data[position.y as usize * self.width + position.x as usize]
    }

    /// Write the pixel at `position`, which must be inside the surface.
    pub fn poke(&mut self, position: Point, index: Pixel) {
        debug_assert!(self.contains(position));
        self.data[position.y as usize * self.width + position.x as usize] = index;
    }

    fn contains(&self, position: Point) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width
            && (position.y as usize) < self.height
    }
}
