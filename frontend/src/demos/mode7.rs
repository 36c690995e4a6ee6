//! Mode-7 floor with a per-scanline register table, plus rotating sprites
//! batched through a queue.

use std::path::PathBuf;
use std::rc::Rc;

use log::warn;
use shadowmask_core::gfx::sincos::sincos;
use shadowmask_core::gfx::{
    Palette, Pixel, Point, QueueSprite, Rectangle, Sheet, SpriteQueue, Surface, Wrap, XForm,
    XFormRegister, XFormTableEntry,
};
use shadowmask_runtime::{Engine, Game};

use crate::assets;

/// Palette index for an (r, g, b) triple in the 3-3-2 quantised palette.
const fn idx(r: u8, g: u8, b: u8) -> Pixel {
    (r << 5) | (g << 2) | b
}

const ATLAS_SIZE: usize = 64;
const CELL: u32 = 16;
const HORIZON: i32 = 100;

pub struct Mode7 {
    atlas_path: Option<PathBuf>,
    queue: Option<SpriteQueue>,
    floor: Option<Rc<Surface>>,
    xform: XForm,
    time: f32,
}

impl Mode7 {
    pub fn new(atlas_path: Option<PathBuf>) -> Self {
        Self {
            atlas_path,
            queue: None,
            floor: None,
            xform: XForm::new(Wrap::Repeat),
            time: 0.0,
        }
    }
}

/// A power-of-two checkerboard with a distinct accent cell, used when no
/// atlas is supplied on the command line.
fn builtin_atlas() -> Rc<Surface> {
    let mut atlas = Surface::new(ATLAS_SIZE, ATLAS_SIZE).unwrap();
    let data = atlas.data_mut();
    for y in 0..ATLAS_SIZE {
        for x in 0..ATLAS_SIZE {
            let checker = (x / CELL as usize + y / CELL as usize) % 2 == 0;
            data[y * ATLAS_SIZE + x] = if checker { idx(5, 1, 1) } else { idx(6, 6, 2) };
        }
    }

    // One cell gets a disc so rotation is visible on the sprites.
    for y in 0..CELL as usize {
        for x in 0..CELL as usize {
            let dx = x as i32 - 8;
            let dy = y as i32 - 8;
            if dx * dx + dy * dy <= 36 {
                data[y * ATLAS_SIZE + x] = idx(1, 3, 7);
            }
        }
    }

    Rc::new(atlas)
}

impl Game for Mode7 {
    fn setup(&mut self, engine: &mut Engine) {
        engine
            .display
            .processor_mut()
            .set_palette(&Palette::quantized(3, 3, 2));

        let atlas = match &self.atlas_path {
            Some(path) => match assets::load_indexed(path, engine.display.processor().palette()) {
                Ok(surface) => Rc::new(surface),
                Err(e) => {
                    warn!("falling back to the built-in atlas: {e}");
                    builtin_atlas()
                }
            },
            None => builtin_atlas(),
        };

        self.floor = Some(Rc::clone(&atlas));
        let sheet = Rc::new(Sheet::from_grid(atlas, CELL, CELL).unwrap());
        self.queue = Some(SpriteQueue::new(sheet, 16));
    }

    fn update(&mut self, engine: &mut Engine, delta: f32) {
        self.time += delta;

        let height = engine.display.height() as i32;
        let rotation = (self.time * 40.0) as i32;
        let (s, c) = sincos(rotation);

        // Camera track: a slow figure-of-eight over the plane.
        let cam_x = s * 96.0;
        let cam_y = sincos(rotation * 2).0 * 96.0;

        self.xform.set_registers(&[
            (XFormRegister::X, 32.0),
            (XFormRegister::Y, 32.0),
            (XFormRegister::H, cam_x),
            (XFormRegister::V, cam_y),
        ]);

        // Fake perspective: shrink the sampling step as scanlines approach
        // the bottom of the screen, re-programming the matrix per line.
        let mut table = Vec::with_capacity((height - HORIZON) as usize);
        for line in HORIZON..height {
            let depth = (line - HORIZON + 1) as f32 / (height - HORIZON) as f32;
            let zoom = 0.2 + 2.3 * (1.0 - depth);
            table.push(XFormTableEntry {
                scan_line: line - HORIZON,
                operations: vec![
                    (XFormRegister::A, c * zoom),
                    (XFormRegister::B, -s * zoom),
                    (XFormRegister::C, s * zoom),
                    (XFormRegister::D, c * zoom),
                ],
            });
        }
        self.xform.set_table(table);
    }

    fn render(&mut self, engine: &mut Engine) {
        let width = engine.display.width() as i32;
        let height = engine.display.height() as i32;
        let rotation = (self.time * 40.0) as i32;

        let canvas = engine.display.canvas();
        canvas.clear(idx(0, 1, 3), false);

        // The transformed floor fills everything below the horizon.
        let floor = self.floor.as_ref().unwrap();
        canvas.push();
        canvas.set_clipping(Some(Rectangle::new(
            0,
            HORIZON,
            width as u32,
            (height - HORIZON) as u32,
        )));
        canvas.xform(
            floor,
            Rectangle::new(0, 0, ATLAS_SIZE as u32, ATLAS_SIZE as u32),
            Point::new(0, HORIZON),
            &self.xform,
        );
        canvas.pop(1);

        // A ring of rotating sprites above the horizon, drawn back to
        // front purely by insertion order.
        let queue = self.queue.as_mut().unwrap();
        queue.clear();
        for orbit in 0..6 {
            let phase = rotation * 3 + orbit * 170;
            let (s, c) = sincos(phase);
            queue.add(QueueSprite {
                cell_id: 0,
                position: Point::new(
                    width / 2 + (c * 100.0) as i32,
                    HORIZON / 2 + (s * 28.0) as i32,
                ),
                scale_x: 1.0 + s * 0.4,
                scale_y: 1.0 + s * 0.4,
                rotation: phase * 2,
                anchor_x: 0.5,
                anchor_y: 0.5,
            });
        }
        queue.blit_rotated(canvas);
    }
}
