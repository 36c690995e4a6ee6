//! Primitive torture test: every drawing call, a copper-driven sky
//! gradient, and a clip/shift showcase.

use shadowmask_core::gfx::sincos::{SINCOS_PERIOD, sincos};
use shadowmask_core::gfx::{Color, Palette, Pixel, Point, Program, Rectangle};
use shadowmask_runtime::{Engine, Game};

/// Palette index for an (r, g, b) triple in the 3-3-2 quantised palette.
const fn idx(r: u8, g: u8, b: u8) -> Pixel {
    (r << 5) | (g << 2) | b
}

const SKY: Pixel = idx(0, 0, 1);
const SUN: Pixel = idx(7, 6, 0);
const HILLS: Pixel = idx(0, 4, 1);
const WIRE: Pixel = idx(7, 7, 3);
const ACCENT: Pixel = idx(7, 2, 0);

pub struct Primitives {
    time: f32,
}

impl Primitives {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }
}

impl Game for Primitives {
    fn setup(&mut self, engine: &mut Engine) {
        let processor = engine.display.processor_mut();
        processor.set_palette(&Palette::quantized(3, 3, 2));

        // Re-program the sky colour per 8-line band: a vertical gradient
        // from one palette entry, copper style.
        let mut program = Program::new();
        let bands = (engine.display.height() / 8) as u8;
        for band in 0..bands {
            program.wait(-1, 0, band as usize * 8);
            let fade = band.saturating_mul(255 / bands);
            program.color(-1, SKY, Color::rgb(fade / 4, fade / 3, 64 + fade / 2));
        }
        engine.display.processor_mut().set_program(Some(&program));
    }

    fn update(&mut self, _engine: &mut Engine, delta: f32) {
        self.time += delta;
    }

    fn render(&mut self, engine: &mut Engine) {
        let width = engine.display.width() as i32;
        let height = engine.display.height() as i32;
        let canvas = engine.display.canvas();
        let rotation = (self.time * 90.0) as i32;

        canvas.clear(SKY, false);

        // Rolling hills out of filled triangles.
        for hill in 0..4 {
            let base = hill * 90 - 20;
            canvas.filled_triangle(
                Point::new(base, height),
                Point::new(base + 120, height),
                Point::new(base + 60, height - 70 - hill * 8),
                HILLS,
            );
        }

        // The sun, with an orbiting satellite.
        let sun = Point::new(width - 60, 50);
        canvas.filled_circle(sun, 22, SUN);
        canvas.circle(sun, 28, WIRE);
        let (s, c) = sincos(rotation);
        canvas.filled_circle(
            Point::new(sun.x + (c * 40.0) as i32, sun.y + (s * 40.0) as i32),
            4,
            ACCENT,
        );

        // A spinning wireframe star.
        let center = Point::new(80, 90);
        let mut outline = Vec::with_capacity(9);
        for spoke in 0..9 {
            let (s, c) = sincos(rotation + spoke * SINCOS_PERIOD / 9);
            let radius = if spoke % 2 == 0 { 40.0 } else { 18.0 };
            outline.push(Point::new(
                center.x + (c * radius) as i32,
                center.y + (s * radius) as i32,
            ));
        }
        canvas.polyline(&outline, WIRE);
        canvas.line(outline[0], outline[4], ACCENT);

        // Clip-and-shift showcase: inside a sliding window the hills render
        // in the accent colour via a shifting override.
        let slide = ((sincos(rotation / 2).0 + 1.0) * 0.5 * (width - 90) as f32) as i32;
        canvas.push();
        canvas.set_clipping(Some(Rectangle::new(slide, height - 90, 90, 90)));
        canvas.set_shifting(&[(HILLS, ACCENT)]);
        for hill in 0..4 {
            let base = hill * 90 - 20;
            canvas.filled_triangle(
                Point::new(base, height),
                Point::new(base + 120, height),
                Point::new(base + 60, height - 70 - hill * 8),
                HILLS,
            );
        }
        canvas.hline(Point::new(slide, height - 90), 90, WIRE);
        canvas.vline(Point::new(slide, height - 90), 90, WIRE);
        canvas.pop(1);

        // A scattering of points along a sine ribbon.
        for x in (0..width).step_by(4) {
            let (s, _) = sincos(rotation * 2 + x * 3);
            canvas.point(Point::new(x, 130 + (s * 10.0) as i32), WIRE);
        }

        canvas.filled_rectangle(Rectangle::new(8, 8, 40, 12), idx(2, 2, 2));
    }
}
