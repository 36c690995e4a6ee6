//! Clipped drawing primitives.
//!
//! Every primitive remaps its colour index through the context's shifting
//! table and returns untouched if the result is transparent. Lines clip with
//! integer Cohen–Sutherland and rasterise with a DDA walk along the longer
//! delta; triangles use incrementally-stepped Pineda edge functions with a
//! top-left fill rule; circles use the midpoint iteration.

use crate::gfx::{Context, Pixel, Point, Quad, Rectangle, Surface};

const REGION_INSIDE: u8 = 0;
const REGION_LEFT: u8 = 1;
const REGION_ABOVE: u8 = 2;
const REGION_RIGHT: u8 = 4;
const REGION_BELOW: u8 = 8;

fn point(surface: &mut Surface, clipping: &Quad, x: i32, y: i32, index: Pixel) {
    if x < clipping.x0 || x > clipping.x1 || y < clipping.y0 || y > clipping.y1 {
        return;
    }
    let width = surface.width();
    surface.data_mut()[y as usize * width + x as usize] = index;
}

// https://sighack.com/post/cohen-sutherland-line-clipping-algorithm
#[inline]
fn compute_code(clipping: &Quad, x: i32, y: i32) -> u8 {
    let mut code = REGION_INSIDE;
    if x < clipping.x0 {
        code |= REGION_LEFT;
    } else if x > clipping.x1 {
        code |= REGION_RIGHT;
    }
    if y < clipping.y0 {
        code |= REGION_ABOVE;
    } else if y > clipping.y1 {
        code |= REGION_BELOW;
    }
    code
}

// DDA rasteriser, no branches in the inner loop; both endpoints inclusive.
fn line(
    surface: &mut Surface,
    clipping: &Quad,
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    index: Pixel,
) {
    let mut code0 = compute_code(clipping, x0, y0);
    let mut code1 = compute_code(clipping, x1, y1);

    loop {
        if code0 | code1 == 0 {
            // Both endpoints inside the window; accept.
            break;
        } else if code0 & code1 != 0 {
            // Both endpoints share an outside zone; the segment can't cross
            // the window at all.
            return;
        } else {
            // At least one endpoint is outside; move it to the boundary.
            // The outcode bit being tested guarantees a non-zero
            // denominator, so plain integer division is safe.
            let code = if code0 != 0 { code0 } else { code1 };

            let (x, y) = if code & REGION_ABOVE != 0 {
                let y = clipping.y0;
                (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
            } else if code & REGION_BELOW != 0 {
                let y = clipping.y1;
                (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
            } else if code & REGION_LEFT != 0 {
                let x = clipping.x0;
                (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
            } else {
                let x = clipping.x1;
                (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
            };

            if code == code0 {
                code0 = compute_code(clipping, x, y);
                x0 = x;
                y0 = y;
            } else {
                code1 = compute_code(clipping, x, y);
                x1 = x;
                y1 = y;
            }
        }
    }

    let dwidth = surface.width();
    let data = surface.data_mut();

    let dx = x1 - x0;
    let dy = y1 - y0;

    let delta = dx.abs().max(dy.abs()); // Move along the longest delta.
    if delta == 0 {
        data[y0 as usize * dwidth + x0 as usize] = index;
        return;
    }

    let xin = dx as f32 / delta as f32;
    let yin = dy as f32 / delta as f32;

    let mut x = x0 as f32 + 0.5;
    let mut y = y0 as f32 + 0.5;
    for _ in 0..=delta {
        // One more step, to reach the ending pixel.
        data[y as usize * dwidth + x as usize] = index;
        x += xin;
        y += yin;
    }
}

fn hline(surface: &mut Surface, clipping: &Quad, x: i32, y: i32, length: u32, index: Pixel) {
    if y < clipping.y0 || y > clipping.y1 {
        return;
    }
    let x0 = x.max(clipping.x0);
    let x1 = (x + length as i32 - 1).min(clipping.x1);
    if x1 < x0 {
        return;
    }

    let row = y as usize * surface.width();
    surface.data_mut()[row + x0 as usize..=row + x1 as usize].fill(index);
}

fn vline(surface: &mut Surface, clipping: &Quad, x: i32, y: i32, length: u32, index: Pixel) {
    if x < clipping.x0 || x > clipping.x1 {
        return;
    }
    let y0 = y.max(clipping.y0);
    let y1 = (y + length as i32 - 1).min(clipping.y1);
    if y1 < y0 {
        return;
    }

    let dwidth = surface.width();
    let data = surface.data_mut();
    for row in y0..=y1 {
        data[row as usize * dwidth + x as usize] = index;
    }
}

/// An edge is "top-left" when pixels exactly on it belong to the triangle;
/// the other edges get a -1 bias so that shared edges rasterise once.
#[inline]
fn edge_bias(from: Point, to: Point) -> i32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dy > 0 || (dy == 0 && dx < 0) { 0 } else { -1 }
}

impl Context {
    /// Write a single pixel, if inside the clipping region.
    pub fn point(&mut self, position: Point, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }
        point(
            &mut self.surface,
            &self.state.clipping,
            position.x,
            position.y,
            index,
        );
    }

    /// Draw a straight segment between two points, endpoints inclusive.
    pub fn line(&mut self, from: Point, to: Point, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }
        line(
            &mut self.surface,
            &self.state.clipping,
            from.x,
            from.y,
            to.x,
            to.y,
            index,
        );
    }

    /// Draw consecutive segments through `vertices`; fewer than two vertices
    /// is a no-op.
    pub fn polyline(&mut self, vertices: &[Point], index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }
        for pair in vertices.windows(2) {
            line(
                &mut self.surface,
                &self.state.clipping,
                pair[0].x,
                pair[0].y,
                pair[1].x,
                pair[1].y,
                index,
            );
        }
    }

    /// Horizontal run of `length` pixels starting at `origin`.
    pub fn hline(&mut self, origin: Point, length: u32, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }
        hline(
            &mut self.surface,
            &self.state.clipping,
            origin.x,
            origin.y,
            length,
            index,
        );
    }

    /// Vertical run of `length` pixels starting at `origin`.
    pub fn vline(&mut self, origin: Point, length: u32, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }
        vline(
            &mut self.surface,
            &self.state.clipping,
            origin.x,
            origin.y,
            length,
            index,
        );
    }

    /// Fill an axis-aligned rectangle.
    pub fn filled_rectangle(&mut self, rectangle: Rectangle, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }

        let clip = &self.state.clipping;
        let x0 = rectangle.x.max(clip.x0);
        let y0 = rectangle.y.max(clip.y0);
        let x1 = (rectangle.x + rectangle.width as i32 - 1).min(clip.x1);
        let y1 = (rectangle.y + rectangle.height as i32 - 1).min(clip.y1);
        if x1 < x0 || y1 < y0 {
            return;
        }

        let dwidth = self.surface.width();
        let data = self.surface.data_mut();
        for y in y0..=y1 {
            let row = y as usize * dwidth;
            data[row + x0 as usize..=row + x1 as usize].fill(index);
        }
    }

    /// Fill a triangle with incrementally-stepped edge functions.
    ///
    /// Vertices may be supplied in either winding; they are reordered
    /// internally. Pixels exactly on a top or left edge belong to the
    /// triangle, pixels on a right or bottom edge don't, so triangles that
    /// share an edge cover each pixel exactly once.
    //
    // https://fgiesen.wordpress.com/2013/02/08/triangle-rasterization-in-practice/
    // https://fgiesen.wordpress.com/2013/02/10/optimizing-the-basic-rasterizer/
    pub fn filled_triangle(&mut self, v0: Point, mut v1: Point, mut v2: Point, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }

        let clip = &self.state.clipping;
        let x0 = v0.x.min(v1.x).min(v2.x).max(clip.x0);
        let y0 = v0.y.min(v1.y).min(v2.y).max(clip.y0);
        let x1 = v0.x.max(v1.x).max(v2.x).min(clip.x1);
        let y1 = v0.y.max(v1.y).max(v2.y).min(clip.y1);
        if x1 < x0 || y1 < y0 {
            return;
        }

        // Reorder to a fixed winding so the edge functions agree on "inside".
        if (v1.x - v0.x) * (v2.y - v0.y) > (v2.x - v0.x) * (v1.y - v0.y) {
            std::mem::swap(&mut v1, &mut v2);
        }

        // Edge-function steps; edge k lies opposite vertex k.
        let dw0x = v2.y - v1.y;
        let dw0y = v1.x - v2.x;
        let dw1x = v0.y - v2.y;
        let dw1y = v2.x - v0.x;
        let dw2x = v1.y - v0.y;
        let dw2y = v0.x - v1.x;

        let bias0 = edge_bias(v1, v2);
        let bias1 = edge_bias(v2, v0);
        let bias2 = edge_bias(v0, v1);

        // Seed the row accumulators at the top-left of the bounding box.
        let mut w0_row = dw0y * (y0 - v1.y) + dw0x * (x0 - v1.x) + bias0;
        let mut w1_row = dw1y * (y0 - v2.y) + dw1x * (x0 - v2.x) + bias1;
        let mut w2_row = dw2y * (y0 - v0.y) + dw2x * (x0 - v0.x) + bias2;

        let dwidth = self.surface.width();
        let data = self.surface.data_mut();

        for y in y0..=y1 {
            let mut w0 = w0_row;
            let mut w1 = w1_row;
            let mut w2 = w2_row;

            let row = y as usize * dwidth;
            for x in x0..=x1 {
                if (w0 | w1 | w2) >= 0 {
                    // Check the sign bit only.
                    data[row + x as usize] = index;
                }
                w0 += dw0x;
                w1 += dw1x;
                w2 += dw2x;
            }

            w0_row += dw0y;
            w1_row += dw1y;
            w2_row += dw2y;
        }
    }

    /// Fill a circle by emitting horizontal spans from the midpoint
    /// iteration.
    pub fn filled_circle(&mut self, center: Point, radius: u32, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }

        let cx = center.x;
        let cy = center.y;

        let mut x: i32 = 0;
        let mut y: i32 = radius as i32;
        let mut d: i32 = 3 - 2 * radius as i32;

        while x <= y {
            let length_x = (2 * x + 1) as u32;
            let length_y = (2 * y + 1) as u32;
            hline(&mut self.surface, &self.state.clipping, cx - x, cy - y, length_x, index);
            hline(&mut self.surface, &self.state.clipping, cx - y, cy - x, length_y, index);
            hline(&mut self.surface, &self.state.clipping, cx - y, cy + x, length_y, index);
            hline(&mut self.surface, &self.state.clipping, cx - x, cy + y, length_x, index);

            if d < 0 {
                d += 4 * x + 6;
            } else {
                d += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Trace a one-pixel circle outline with the midpoint iteration.
    pub fn circle(&mut self, center: Point, radius: u32, index: Pixel) {
        let index = self.state.shifting[index as usize];
        if self.state.transparent[index as usize] {
            return;
        }

        let cx = center.x;
        let cy = center.y;

        let mut x: i32 = 0;
        let mut y: i32 = radius as i32;
        let mut d: i32 = 3 - 2 * radius as i32;

        while x <= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
            ] {
                point(&mut self.surface, &self.state.clipping, px, py, index);
            }

            if d < 0 {
                d += 4 * x + 6;
            } else {
                d += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }
}
