//! Per-surface drawing state: clipping rectangle, pixel remap ("shifting")
//! table, per-index transparency flags, and a push/pop state stack.
//!
//! Every draw operation remaps its colour index through `shifting` first and
//! bails out if the result is flagged transparent; pixels are only ever
//! written inside the clipping quad. The quad is CLOSED on both ends and is
//! always the intersection of the requested region with the surface bounds.

use log::warn;

use crate::gfx::palette::PALETTE_SIZE;
use crate::gfx::{Pixel, Quad, Rectangle, Surface};

#[derive(Clone)]
pub struct DrawState {
    pub(crate) clipping: Quad,
    pub(crate) shifting: [Pixel; PALETTE_SIZE],
    pub(crate) transparent: [bool; PALETTE_SIZE],
}

impl DrawState {
    fn new(width: usize, height: usize) -> Self {
        let mut shifting = [0; PALETTE_SIZE];
        for (i, entry) in shifting.iter_mut().enumerate() {
            *entry = i as Pixel;
        }
        let mut transparent = [false; PALETTE_SIZE];
        transparent[0] = true;

        Self {
            clipping: Quad::new(0, 0, width as i32 - 1, height as i32 - 1),
            shifting,
            transparent,
        }
    }

    pub fn clipping(&self) -> Quad {
        self.clipping
    }

    pub fn shifting(&self) -> &[Pixel; PALETTE_SIZE] {
        &self.shifting
    }

    pub fn transparent(&self) -> &[bool; PALETTE_SIZE] {
        &self.transparent
    }
}

/// A surface plus its drawing state. The context owns the surface it draws
/// onto; sources (atlases, transform textures) are borrowed per call.
pub struct Context {
    pub(crate) surface: Surface,
    pub(crate) state: DrawState,
    stack: Vec<DrawState>,
}

impl Context {
    pub fn new(surface: Surface) -> Self {
        let state = DrawState::new(surface.width(), surface.height());
        Self {
            surface,
            state,
            stack: Vec::new(),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Restore the default state: full-surface clip, identity shifting,
    /// only index 0 transparent. The stack is not touched.
    pub fn reset(&mut self) {
        self.state = DrawState::new(self.surface.width(), self.surface.height());
    }

    /// Save a copy of the current state.
    pub fn push(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Restore `levels` previously pushed states (the deepest one wins).
    /// Popping more than were pushed saturates with a warning.
    pub fn pop(&mut self, levels: usize) {
        if self.stack.is_empty() {
            warn!("no states to pop from context");
            return;
        }
        for _ in 0..levels.min(self.stack.len()) {
            if let Some(state) = self.stack.pop() {
                self.state = state;
            }
        }
    }

    /// Clamp the clipping quad to `region` intersected with the surface
    /// bounds; `None` restores the full surface.
    pub fn set_clipping(&mut self, region: Option<Rectangle>) {
        let width = self.surface.width() as i32;
        let height = self.surface.height() as i32;
        self.state.clipping = match region {
            None => Quad::new(0, 0, width - 1, height - 1),
            Some(region) => Quad::new(
                region.x.max(0),
                region.y.max(0),
                (region.x + region.width as i32).min(width) - 1,
                (region.y + region.height as i32).min(height) - 1,
            ),
        };
    }

    /// Remap `from` to `to` for every supplied pair.
    pub fn set_shifting(&mut self, pairs: &[(Pixel, Pixel)]) {
        for &(from, to) in pairs {
            self.state.shifting[from as usize] = to;
        }
    }

    /// Restore the identity remap.
    pub fn reset_shifting(&mut self) {
        for (i, entry) in self.state.shifting.iter_mut().enumerate() {
            *entry = i as Pixel;
        }
    }

    /// Flag (or unflag) indices as transparent.
    pub fn set_transparent(&mut self, pairs: &[(Pixel, bool)]) {
        for &(index, transparent) in pairs {
            self.state.transparent[index as usize] = transparent;
        }
    }

    /// Restore the default transparency: only index 0 is transparent.
    pub fn reset_transparent(&mut self) {
        self.state.transparent = [false; PALETTE_SIZE];
        self.state.transparent[0] = true;
    }

    /// Fill the clipping region with `index` after remapping it through the
    /// shifting table. With `respect_transparency` the fill is skipped
    /// entirely when the remapped index is flagged transparent.
    pub fn clear(&mut self, index: Pixel, respect_transparency: bool) {
        let clip = self.state.clipping;
        let width = clip.x1 - clip.x0 + 1;
        let height = clip.y1 - clip.y0 + 1;
        if width <= 0 || height <= 0 {
            return;
        }

        let index = self.state.shifting[index as usize];
        if respect_transparency && self.state.transparent[index as usize] {
            return;
        }

        let dwidth = self.surface.width();
        let data = self.surface.data_mut();
        for y in clip.y0..=clip.y1 {
            let row = y as usize * dwidth;
            data[row + clip.x0 as usize..=row + clip.x1 as usize].fill(index);
        }
    }
}
