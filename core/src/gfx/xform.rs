//! Per-scanline affine texture mapping, SNES "Mode 7" style.
//!
//! Eight scalar registers drive the transform. `A..D` form the matrix,
//! `X`/`Y` the rotation origin, `H`/`V` the displacement applied after the
//! projection:
//!
//! ```text
//! X' = A*(SX - X) + B*(SY - Y) + X + H
//! Y' = C*(SX - X) + D*(SY - Y) + Y + V
//! ```
//!
//! The projected point is recomputed per scanline and stepped along the
//! first matrix column per column, so the inner loop is two additions. An
//! optional table re-programs registers when the scan reaches a given line,
//! in the manner of HDMA.
//
// http://www.coranac.com/tonc/text/mode7.htm
// https://wiki.superfamicom.org/registers

use crate::gfx::{Context, Pixel, Point, Rectangle, Surface};

/// Policy for source coordinates that fall outside the source rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrap {
    #[default]
    Repeat,
    ClampToEdge,
    ClampToBorder,
    MirroredRepeat,
    MirrorClampToEdge,
    MirrorClampToBorder,
}

/// The transform's register file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XFormRegister {
    H,
    V,
    A,
    B,
    C,
    D,
    X,
    Y,
}

const REGISTER_COUNT: usize = 8;

/// Register overrides applied when the scan reaches `scan_line` (relative
/// to the top of the drawn region).
#[derive(Clone, Debug)]
pub struct XFormTableEntry {
    pub scan_line: i32,
    pub operations: Vec<(XFormRegister, f32)>,
}

/// A stateful affine transform: register file, wrap mode and optional
/// per-scanline override table.
#[derive(Clone)]
pub struct XForm {
    registers: [f32; REGISTER_COUNT],
    wrap: Wrap,
    table: Option<Vec<XFormTableEntry>>,
}

impl Default for XForm {
    fn default() -> Self {
        Self::new(Wrap::Repeat)
    }
}

impl XForm {
    /// Identity transform with the given wrap mode.
    pub fn new(wrap: Wrap) -> Self {
        let mut registers = [0.0; REGISTER_COUNT];
        registers[XFormRegister::A as usize] = 1.0;
        registers[XFormRegister::D as usize] = 1.0;
        Self {
            registers,
            wrap,
            table: None,
        }
    }

    pub fn register(&self, id: XFormRegister) -> f32 {
        self.registers[id as usize]
    }

    pub fn set_register(&mut self, id: XFormRegister, value: f32) {
        self.registers[id as usize] = value;
    }

    pub fn set_registers(&mut self, operations: &[(XFormRegister, f32)]) {
        for &(id, value) in operations {
            self.registers[id as usize] = value;
        }
    }

    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: Wrap) {
        self.wrap = wrap;
    }

    /// Install the per-scanline override table; entries must be sorted by
    /// ascending `scan_line`, one entry per line at most.
    pub fn set_table(&mut self, entries: Vec<XFormTableEntry>) {
        self.table = Some(entries);
    }

    pub fn clear_table(&mut self) {
        self.table = None;
    }
}

/// Mirror `v` into `[0, n)` with period `2n`.
#[inline]
fn mirror(v: i32, n: i32) -> i32 {
    let m = v.rem_euclid(2 * n);
    if m < n { m } else { 2 * n - 1 - m }
}

/// Reflect `v` once about zero (`-1` maps to `0`).
#[inline]
fn reflect(v: i32) -> i32 {
    if v < 0 { -1 - v } else { v }
}

impl Context {
    /// Draw `area` of `source` at `position`, transformed by `xform`. The
    /// drawn region spans the clipping quad; every destination pixel is
    /// inverse-mapped into the source rectangle subject to the wrap mode.
    /// Transparency does not apply in this path (the transform is meant for
    /// full-screen planes), but shifting does.
    pub fn xform(&mut self, source: &Surface, area: Rectangle, position: Point, xform: &XForm) {
        let area = crate::gfx::blit::clamp_area(source, area);
        let clip = self.state.clipping;

        // Scan the whole clip-sized destination region.
        let mut x0 = position.x;
        let mut y0 = position.y;
        let mut x1 = position.x + (clip.x1 - clip.x0);
        let mut y1 = position.y + (clip.y1 - clip.y0);

        x0 = x0.max(clip.x0);
        y0 = y0.max(clip.y0);
        x1 = x1.min(clip.x1);
        y1 = y1.min(clip.y1);

        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        if width <= 0 || height <= 0 {
            return;
        }

        let sw = area.width as i32;
        let sh = area.height as i32;
        if sw <= 0 || sh <= 0 {
            return;
        }
        let sw_pot = area.width.is_power_of_two();
        let sh_pot = area.height.is_power_of_two();

        let mut h = xform.registers[XFormRegister::H as usize];
        let mut v = xform.registers[XFormRegister::V as usize];
        let mut a = xform.registers[XFormRegister::A as usize];
        let mut b = xform.registers[XFormRegister::B as usize];
        let mut c = xform.registers[XFormRegister::C as usize];
        let mut d = xform.registers[XFormRegister::D as usize];
        let mut ox = xform.registers[XFormRegister::X as usize];
        let mut oy = xform.registers[XFormRegister::Y as usize];

        let table = xform.table.as_deref();
        let mut cursor = 0;

        let swidth = source.width();
        let dwidth = self.surface.width();
        let sdata = source.data();
        let shifting = &self.state.shifting;
        let ddata = self.surface.data_mut();

        for i in 0..height {
            if let Some(entries) = table
                && cursor < entries.len()
                && entries[cursor].scan_line == i
            {
                for &(id, value) in &entries[cursor].operations {
                    match id {
                        XFormRegister::H => h = value,
                        XFormRegister::V => v = value,
                        XFormRegister::A => a = value,
                        XFormRegister::B => b = value,
                        XFormRegister::C => c = value,
                        XFormRegister::D => d = value,
                        XFormRegister::X => ox = value,
                        XFormRegister::Y => oy = value,
                    }
                }
                cursor += 1;
            }

            let xi = 0.0 - ox;
            let yi = i as f32 - oy;

            let mut xp = (a * xi + b * yi) + ox + h;
            let mut yp = (c * xi + d * yi) + oy + v;

            let drow = (y0 + i) as usize * dwidth + x0 as usize;

            for j in 0..width as usize {
                let mut sx = xp.floor() as i32;
                let mut sy = yp.floor() as i32;

                let copy = match xform.wrap {
                    Wrap::Repeat => {
                        sx = if sw_pot { sx & (sw - 1) } else { sx.rem_euclid(sw) };
                        sy = if sh_pot { sy & (sh - 1) } else { sy.rem_euclid(sh) };
                        true
                    }
                    Wrap::ClampToEdge => {
                        sx = sx.clamp(0, sw - 1);
                        sy = sy.clamp(0, sh - 1);
                        true
                    }
                    Wrap::ClampToBorder => {
                        sx >= 0 && sx < sw && sy >= 0 && sy < sh
                    }
                    Wrap::MirroredRepeat => {
                        sx = mirror(sx, sw);
                        sy = mirror(sy, sh);
                        true
                    }
                    Wrap::MirrorClampToEdge => {
                        sx = reflect(sx).clamp(0, sw - 1);
                        sy = reflect(sy).clamp(0, sh - 1);
                        true
                    }
                    Wrap::MirrorClampToBorder => {
                        sx = reflect(sx);
                        sy = reflect(sy);
                        sx < sw && sy < sh
                    }
                };

                if copy {
                    let px = (area.x + sx) as usize;
                    let py = (area.y + sy) as usize;
                    let index: Pixel = shifting[sdata[py * swidth + px] as usize];
                    ddata[drow + j] = index;
                }

                xp += a;
                yp += c;
            }
        }
    }
}
