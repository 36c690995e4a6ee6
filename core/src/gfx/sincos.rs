//! Table-driven sine/cosine for rotations.
//!
//! Rotations throughout the graphics core are integers in table units:
//! [`SINCOS_PERIOD`] steps per full turn. The period is a power of two so
//! that reducing a rotation modulo the period is a mask, which also handles
//! negative rotations for free on two's-complement integers.

use std::f32::consts::TAU;
use std::sync::OnceLock;

/// Number of table entries per full turn.
pub const SINCOS_PERIOD: i32 = 1024;

const MASK: i32 = SINCOS_PERIOD - 1;

fn table() -> &'static [(f32, f32); SINCOS_PERIOD as usize] {
    static TABLE: OnceLock<[(f32, f32); SINCOS_PERIOD as usize]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut entries = [(0.0, 0.0); SINCOS_PERIOD as usize];
        for (i, entry) in entries.iter_mut().enumerate() {
            let angle = i as f32 / SINCOS_PERIOD as f32 * TAU;
            *entry = (angle.sin(), angle.cos());
        }
        entries
    })
}

/// `(sin, cos)` for a rotation in table units.
pub fn sincos(rotation: i32) -> (f32, f32) {
    table()[(rotation & MASK) as usize]
}

/// Convert radians to table units, rounding to the nearest step.
pub fn rotation_from_radians(angle: f32) -> i32 {
    (angle / TAU * SINCOS_PERIOD as f32).round() as i32
}
