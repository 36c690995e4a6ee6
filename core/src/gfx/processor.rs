//! The display processor: indexed canvas to RGBA conversion.
//!
//! This is the only hot path in the graphics core. Without a program the
//! conversion is a straight double table lookup per pixel. With a program
//! installed the processor interprets it against LOCAL copies of the palette
//! and shifting tables — the stored "base" state survives the frame — while
//! tracking a wait position, a per-row source modulo and a wrapping
//! horizontal output offset.

use log::debug;

use crate::gfx::palette::PALETTE_SIZE;
use crate::gfx::program::SENTINEL;
use crate::gfx::{Color, Palette, Pixel, Program, ProgramEntry, Surface};

/// Bytes per RGBA output pixel.
pub const BYTES_PER_PIXEL: usize = 4;

pub struct Processor {
    palette: Palette,
    shifting: [Pixel; PALETTE_SIZE],
    program: Option<Program>,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// A processor with a full greyscale palette, identity shifting and no
    /// program.
    pub fn new() -> Self {
        debug!("processor defaults to a {PALETTE_SIZE} colour greyscale palette");
        Self {
            palette: Palette::greyscale(PALETTE_SIZE),
            shifting: identity(),
            program: None,
        }
    }

    /// Restore identity shifting and detach the program. The palette is not
    /// part of the reset.
    pub fn reset(&mut self) {
        self.shifting = identity();
        self.program = None;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: &Palette) {
        self.palette.copy_from(palette);
    }

    /// Remap `from` to `to` in the base shifting table for every pair.
    pub fn set_shifting(&mut self, pairs: &[(Pixel, Pixel)]) {
        for &(from, to) in pairs {
            self.shifting[from as usize] = to;
        }
    }

    pub fn reset_shifting(&mut self) {
        self.shifting = identity();
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Install a clone of `program` (or detach with `None`).
    pub fn set_program(&mut self, program: Option<&Program>) {
        self.program = program.cloned();
    }

    /// Convert `surface` to RGBA into `output`, which must hold exactly
    /// `width * height * 4` bytes.
    pub fn convert(&self, surface: &Surface, output: &mut [u8]) {
        assert_eq!(
            output.len(),
            surface.width() * surface.height() * BYTES_PER_PIXEL,
            "output buffer does not match the surface extent"
        );
        match &self.program {
            None => self.convert_plain(surface, output),
            Some(program) => self.convert_programmed(program, surface, output),
        }
    }

    fn convert_plain(&self, surface: &Surface, output: &mut [u8]) {
        let colors = self.palette.colors();
        for (src, dst) in surface
            .data()
            .iter()
            .zip(output.chunks_exact_mut(BYTES_PER_PIXEL))
        {
            let color = colors[self.shifting[*src as usize] as usize];
            dst.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    fn convert_programmed(&self, program: &Program, surface: &Surface, output: &mut [u8]) {
        // Local copies: the program mutates palette and shifting for the
        // remainder of the frame only.
        let mut palette: [Color; PALETTE_SIZE] = *self.palette.colors();
        let mut shifting = self.shifting;

        let entries = program.entries();
        let mut cursor = 0;

        let width = surface.width();
        let height = surface.height();
        let sdata = surface.data();

        let mut wait: usize = 0;
        let mut modulo: i32 = 0;
        let mut offset: usize = 0; // Always in `[0, width)`.

        let mut src: usize = 0;
        let mut i: usize = 0; // Linear scan position, `y * width + x`.

        for y in 0..height {
            let row = y * width;

            for x in 0..width {
                // Interpretation is bounded by the sentinel: the final
                // `Wait{MAX, MAX}` pushes `wait` beyond any scan position,
                // so `cursor` can never run off the entry list.
                while i >= wait && cursor < entries.len() {
                    match entries[cursor] {
                        ProgramEntry::Nop => {}
                        ProgramEntry::Wait { x, y } => {
                            wait = y.saturating_mul(width).saturating_add(x);
                        }
                        ProgramEntry::Skip { dx, dy } => {
                            let delta = dy as isize * width as isize + dx as isize;
                            wait = wait.saturating_add_signed(delta);
                        }
                        ProgramEntry::Modulo { amount } => {
                            modulo = amount;
                        }
                        ProgramEntry::Offset { amount } => {
                            offset = amount.rem_euclid(width as i32) as usize;
                        }
                        ProgramEntry::Color { index, color } => {
                            palette[index as usize] = color;
                        }
                        ProgramEntry::Shift { from, to } => {
                            shifting[from as usize] = to;
                        }
                    }
                    cursor += 1;
                }

                // Out-of-range source positions (a runaway modulo) read as
                // index 0 instead of tearing the conversion down.
                let pixel = sdata.get(src).copied().unwrap_or(0);
                let color = palette[shifting[pixel as usize] as usize];

                // The write pointer rides `offset` ahead of the scan and
                // wraps back to the start of the row at end-of-data.
                let mut column = x + offset;
                if column >= width {
                    column -= width;
                }
                let dst = (row + column) * BYTES_PER_PIXEL;
                output[dst..dst + BYTES_PER_PIXEL]
                    .copy_from_slice(&[color.r, color.g, color.b, color.a]);

                src += 1;
                i += 1;
            }

            src = src.saturating_add_signed(modulo as isize);
        }

        debug_assert_eq!(entries.last(), Some(&SENTINEL));
    }
}

fn identity() -> [Pixel; PALETTE_SIZE] {
    let mut table = [0; PALETTE_SIZE];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = i as Pixel;
    }
    table
}
