//! Surface-to-surface copies: plain, scaled (with flips) and
//! rotated/scaled.
//!
//! All variants clip against the context's clipping quad, remap every
//! fetched index through the shifting table and skip transparent pixels.
//! The scaled path walks the destination and derives the source pixel with
//! a DDA accumulator (so no destination pixel is ever left empty); the
//! rotated path applies the inverse transform per destination pixel, culled
//! by the target disc that bounds the rotated sprite.

use crate::gfx::sincos::sincos;
use crate::gfx::{Context, Point, Rectangle, Surface};

/// Intersect `area` with the source bounds so every sample is in range.
pub(crate) fn clamp_area(source: &Surface, area: Rectangle) -> Rectangle {
    let x0 = area.x.max(0);
    let y0 = area.y.max(0);
    let x1 = (area.x + area.width as i32).min(source.width() as i32);
    let y1 = (area.y + area.height as i32).min(source.height() as i32);
    Rectangle {
        x: x0,
        y: y0,
        width: (x1 - x0).max(0) as u32,
        height: (y1 - y0).max(0) as u32,
    }
}

impl Context {
    /// Copy `area` of `source` with its top-left corner at `position`.
    pub fn blit(&mut self, source: &Surface, area: Rectangle, position: Point) {
        let area = clamp_area(source, area);
        let clip = self.state.clipping;

        let mut skip_x = 0; // Offset into the source area, updated during clipping.
        let mut skip_y = 0;

        let mut x0 = position.x;
        let mut y0 = position.y;
        let mut x1 = position.x + area.width as i32 - 1;
        let mut y1 = position.y + area.height as i32 - 1;

        if x0 < clip.x0 {
            skip_x = clip.x0 - x0;
            x0 = clip.x0;
        }
        if y0 < clip.y0 {
            skip_y = clip.y0 - y0;
            y0 = clip.y0;
        }
        x1 = x1.min(clip.x1);
        y1 = y1.min(clip.y1);

        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        if width <= 0 || height <= 0 {
            return;
        }

        let swidth = source.width();
        let dwidth = self.surface.width();
        let sdata = source.data();
        let shifting = &self.state.shifting;
        let transparent = &self.state.transparent;
        let ddata = self.surface.data_mut();

        for i in 0..height {
            let srow = (area.y + skip_y + i) as usize * swidth + (area.x + skip_x) as usize;
            let drow = (y0 + i) as usize * dwidth + x0 as usize;
            for j in 0..width as usize {
                let index = shifting[sdata[srow + j] as usize];
                if !transparent[index as usize] {
                    ddata[drow + j] = index;
                }
            }
        }
    }

    /// Copy `area` of `source` scaled by `(scale_x, scale_y)`; a negative
    /// factor flips the corresponding axis. Nearest-neighbour sampling at
    /// pixel centres.
    //
    // The sampling formula is
    //
    //   x_s = round((x_d + 0.5) / S_x - 0.5) = floor((x_d + 0.5) / S_x)
    //
    // evaluated incrementally by accumulating `1 / S_x` per destination
    // pixel, starting from the centre of the first (possibly clipped) one.
    // http://tech-algorithm.com/articles/nearest-neighbor-image-scaling/
    pub fn blit_scaled(
        &mut self,
        source: &Surface,
        area: Rectangle,
        position: Point,
        scale_x: f32,
        scale_y: f32,
    ) {
        let area = clamp_area(source, area);
        let clip = self.state.clipping;

        let flip_x = scale_x < 0.0;
        let flip_y = scale_y < 0.0;

        // Round: no ceil, no floor, or scaled sprites drift by a pixel.
        let drawing_width = (area.width as f32 * scale_x.abs()).round() as i32;
        let drawing_height = (area.height as f32 * scale_y.abs()).round() as i32;

        let mut skip_x = 0;
        let mut skip_y = 0;

        let mut x0 = position.x;
        let mut y0 = position.y;
        let mut x1 = position.x + drawing_width - 1;
        let mut y1 = position.y + drawing_height - 1;

        if x0 < clip.x0 {
            skip_x = clip.x0 - x0;
            x0 = clip.x0;
        }
        if y0 < clip.y0 {
            skip_y = clip.y0 - y0;
            y0 = clip.y0;
        }
        x1 = x1.min(clip.x1);
        y1 = y1.min(clip.y1);

        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        if width <= 0 || height <= 0 {
            return;
        }

        let ou = (skip_x as f32 + 0.5) / scale_x.abs();
        let ov = (skip_y as f32 + 0.5) / scale_y.abs();

        let du = 1.0 / scale_x.abs();
        let dv = 1.0 / scale_y.abs();

        let sw = area.width as i32;
        let sh = area.height as i32;

        let swidth = source.width();
        let dwidth = self.surface.width();
        let sdata = source.data();
        let shifting = &self.state.shifting;
        let transparent = &self.state.transparent;
        let ddata = self.surface.data_mut();

        let mut v = ov;
        for i in 0..height {
            let vi = (v as i32).min(sh - 1);
            let y = area.y + if flip_y { sh - 1 - vi } else { vi };
            let srow = y as usize * swidth;
            let drow = (y0 + i) as usize * dwidth + x0 as usize;

            let mut u = ou;
            for j in 0..width as usize {
                let ui = (u as i32).min(sw - 1);
                let x = area.x + if flip_x { sw - 1 - ui } else { ui };
                let index = shifting[sdata[srow + x as usize] as usize];
                if !transparent[index as usize] {
                    ddata[drow + j] = index;
                }
                u += du;
            }
            v += dv;
        }
    }

    /// Copy `area` of `source` scaled by `(scale_x, scale_y)` and rotated
    /// around the anchor `(anchor_x, anchor_y)` (each in `[0, 1]` over the
    /// cell), with the anchor placed at `position`. `rotation` is in sincos
    /// table units.
    pub fn blit_rotated(
        &mut self,
        source: &Surface,
        area: Rectangle,
        position: Point,
        scale_x: f32,
        scale_y: f32,
        rotation: i32,
        anchor_x: f32,
        anchor_y: f32,
    ) {
        let area = clamp_area(source, area);
        let clip = self.state.clipping;

        let sw = area.width as f32;
        let sh = area.height as f32;
        let dw = sw * scale_x.abs();
        let dh = sh * scale_y.abs();
        if dw < 0.5 || dh < 0.5 {
            return; // Degenerate scale, nothing would be sampled.
        }

        // Anchor points, relative to the source and destination areas.
        let sax = (sw - 1.0) * anchor_x;
        let say = (sh - 1.0) * anchor_y;
        let dax = (dw - 1.0) * anchor_x;
        let day = (dh - 1.0) * anchor_y;

        let sx = area.x as f32 + sax; // Total source translation: area origin and anchor.
        let sy = area.y as f32 + say;
        let dx = position.x as f32;
        let dy = position.y as f32;

        let (s, c) = sincos(rotation);

        // The "target disc" is where pixels of the rotated sprite can land,
        // relative to `position`: its radius is the distance from the anchor
        // to the farthest cell corner, measured between pixel centres.
        let delta_x = dax.max(dw - dax) - 0.5;
        let delta_y = day.max(dh - day) - 0.5;
        let radius_squared = delta_x * delta_x + delta_y * delta_y;
        let radius = radius_squared.sqrt().ceil(); // Room for every pixel.

        let mut skip_x = -radius; // Offset into the disc, updated during clipping.
        let mut skip_y = -radius;

        let mut x0 = (-radius + dx).ceil() as i32; // Include every fractionally occupied pixel.
        let mut y0 = (-radius + dy).ceil() as i32;
        let mut x1 = (radius + dx).ceil() as i32;
        let mut y1 = (radius + dy).ceil() as i32;

        if x0 < clip.x0 {
            skip_x += (clip.x0 - x0) as f32;
            x0 = clip.x0;
        }
        if y0 < clip.y0 {
            skip_y += (clip.y0 - y0) as f32;
            y0 = clip.y0;
        }
        x1 = x1.min(clip.x1);
        y1 = y1.min(clip.y1);

        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        if width <= 0 || height <= 0 {
            return;
        }

        let sminx = area.x;
        let sminy = area.y;
        let smaxx = area.x + area.width as i32 - 1;
        let smaxy = area.y + area.height as i32 - 1;

        // Inverse transform: rotate, then scale; the flip sign rides along
        // in the (signed) scale factor.
        //
        //   | 1/sx    0 | |  c s |
        //   |           | |      |
        //   |    0 1/sy | | -s c |
        let m11 = c / scale_x;
        let m12 = s / scale_x;
        let m21 = -s / scale_y;
        let m22 = c / scale_y;

        let swidth = source.width();
        let dwidth = self.surface.width();
        let sdata = source.data();
        let shifting = &self.state.shifting;
        let transparent = &self.state.transparent;
        let ddata = self.surface.data_mut();

        for i in 0..height {
            let ov = skip_y + i as f32;
            let ov_squared = ov * ov;
            let drow = (y0 + i) as usize * dwidth + x0 as usize;

            for j in 0..width as usize {
                let ou = skip_x + j as f32;
                if ou * ou + ov_squared > radius_squared {
                    continue;
                }

                // Half-pixel offset to sample the source at pixel centres.
                let u = (ou * m11 + ov * m12) + sx + 0.5;
                let v = (ou * m21 + ov * m22) + sy + 0.5;

                // Floor, not truncate: negative coordinates must stay
                // negative or the sprite edge would mirror.
                let x = u.floor() as i32;
                let y = v.floor() as i32;

                if x >= sminx && x <= smaxx && y >= sminy && y <= smaxy {
                    let index = shifting[sdata[y as usize * swidth + x as usize] as usize];
                    if !transparent[index as usize] {
                        ddata[drow + j] = index;
                    }
                }
            }
        }
    }
}
