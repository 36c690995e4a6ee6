//! Colour table addressed by pixel index.
//!
//! A palette always holds [`PALETTE_SIZE`] addressable entries; generators
//! that produce fewer logical colours fill the tail with opaque black. The
//! nearest-colour scan uses the "redmean" weighted distance
//! (<https://www.compuphase.com/cmetric.htm>), which tracks perceived colour
//! difference far better than a plain Euclidean RGB distance at this bit
//! depth.

use log::warn;

use crate::gfx::Pixel;

/// Number of addressable palette entries.
pub const PALETTE_SIZE: usize = 256;

/// An RGBA colour, 8 bits per channel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Linear interpolation between two colours; the result is always opaque.
/// `ratio` is expected in `[0, 1]` and is the caller's to clamp.
pub fn mix(from: Color, to: Color, ratio: f32) -> Color {
    let lerp = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * ratio) as u8 };
    Color {
        r: lerp(from.r, to.r),
        g: lerp(from.g, to.g),
        b: lerp(from.b, to.b),
        a: 255,
    }
}

/// When promoting an `n`-bit colour component to 8 bits the lower bits can't
/// be left as zeroes or the brightest value would fall short of 255; they
/// are padded by spreading the component over the range of available values:
///
/// ```text
/// pad(i) = (i * (values - 1)) / (count - 1)
/// ```
///
/// where `count` is the number of representable component values and
/// `values` the number of padding values.
#[inline]
fn quantize(value: usize, values: usize, count: usize) -> u8 {
    if count < 2 {
        return 0;
    }
    ((value * (values - 1)) / (count - 1)) as u8
}

/// A 256-entry colour table.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Color; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::greyscale(PALETTE_SIZE)
    }
}

impl Palette {
    /// An all-black (opaque) palette.
    pub fn new() -> Self {
        Self {
            colors: [Color::BLACK; PALETTE_SIZE],
        }
    }

    /// A palette whose first `size` entries ramp linearly from black to
    /// white; remaining entries are opaque black.
    pub fn greyscale(size: usize) -> Self {
        let mut palette = Self::new();
        palette.set_greyscale(size);
        palette
    }

    /// A palette enumerating every colour of the given per-channel bit
    /// depth; remaining entries are opaque black.
    pub fn quantized(red_bits: u32, green_bits: u32, blue_bits: u32) -> Self {
        let mut palette = Self::new();
        palette.set_quantized(red_bits, green_bits, blue_bits);
        palette
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }

    pub fn get(&self, index: Pixel) -> Color {
        self.colors[index as usize]
    }

    pub fn set(&mut self, index: Pixel, color: Color) {
        self.colors[index as usize] = color;
    }

    pub fn copy_from(&mut self, other: &Palette) {
        self.colors = other.colors;
    }

    /// Write a linear greyscale ramp over the first `size` entries and fill
    /// the rest with opaque black. `size` must be at least 2 (a ramp needs
    /// two endpoints); smaller values are promoted.
    pub fn set_greyscale(&mut self, size: usize) {
        let size = size.clamp(2, PALETTE_SIZE);
        for (i, color) in self.colors.iter_mut().take(size).enumerate() {
            let y = quantize(i, 256, size);
            *color = Color::rgb(y, y, y);
        }
        for color in self.colors.iter_mut().skip(size) {
            *color = Color::BLACK;
        }
    }

    /// Enumerate all `2^(rb+gb+bb)` colours of the given bit depth, red
    /// outermost and blue innermost. The bit budget must not exceed 8.
    pub fn set_quantized(&mut self, red_bits: u32, green_bits: u32, blue_bits: u32) {
        debug_assert!(red_bits + green_bits + blue_bits <= 8);

        let red_values = 1usize << red_bits;
        let green_values = 1usize << green_bits;
        let blue_values = 1usize << blue_bits;

        let red_lower = 1usize << (8 - red_bits);
        let green_lower = 1usize << (8 - green_bits);
        let blue_lower = 1usize << (8 - blue_bits);

        let mut size = 0;
        for r in 0..red_values {
            let r8 = ((r << (8 - red_bits)) as u8) | quantize(r, red_lower, red_values);
            for g in 0..green_values {
                let g8 = ((g << (8 - green_bits)) as u8) | quantize(g, green_lower, green_values);
                for b in 0..blue_values {
                    let b8 = ((b << (8 - blue_bits)) as u8) | quantize(b, blue_lower, blue_values);
                    self.colors[size] = Color::rgb(r8, g8, b8);
                    size += 1;
                }
            }
        }

        for color in self.colors.iter_mut().skip(size) {
            *color = Color::BLACK;
        }
    }

    /// Index of the entry closest to `color` under the redmean metric.
    /// Scans every addressable entry; on ties the first encountered wins.
    pub fn find_nearest(&self, color: Color) -> Pixel {
        let mut index = 0;
        let mut minimum = f32::MAX;
        for (i, current) in self.colors.iter().enumerate() {
            let r_mean = (color.r as f32 + current.r as f32) * 0.5;

            let delta_r = color.r as f32 - current.r as f32;
            let delta_g = color.g as f32 - current.g as f32;
            let delta_b = color.b as f32 - current.b as f32;

            let distance = (delta_r * delta_r) * (2.0 + r_mean / 255.0)
                + (delta_g * delta_g) * 4.0
                + (delta_b * delta_b) * (2.0 + (255.0 - r_mean) / 255.0);

            if minimum > distance {
                minimum = distance;
                index = i;
            }
        }
        index as Pixel
    }

    /// Append up to `count` entries of `other` (starting at `from`) at
    /// position `to`, optionally skipping colours already present anywhere
    /// in this palette. Returns the position one past the last entry
    /// written; stops (with a warning) when the palette is full.
    pub fn merge(
        &mut self,
        to: usize,
        other: &[Color],
        from: usize,
        count: usize,
        remove_duplicates: bool,
    ) -> usize {
        let mut to_i = to;
        for i in 0..count {
            if to_i == PALETTE_SIZE {
                warn!("maximum palette size reached while merging");
                break;
            }
            let color = other[from + i];
            if remove_duplicates && self.colors.contains(&color) {
                continue;
            }
            self.colors[to_i] = color;
            to_i += 1;
        }
        to_i
    }

    /// Move every entry towards `color` by `ratio`.
    pub fn lerp(&mut self, color: Color, ratio: f32) {
        for entry in self.colors.iter_mut() {
            *entry = mix(*entry, color, ratio);
        }
    }
}
