//! The single canvas/processor pair.
//!
//! Exactly one display exists per engine: an indexed canvas the game draws
//! onto and the processor that converts it to RGBA at the end of the frame.
//! The back buffer belongs to the game thread; the host presents it after
//! `compose`.

use log::debug;
use shadowmask_core::gfx::processor::BYTES_PER_PIXEL;
use shadowmask_core::gfx::{Context, Processor, Surface};

pub struct Display {
    canvas: Context,
    processor: Processor,
    pixels: Vec<u8>,
}

impl Display {
    pub fn new(width: usize, height: usize) -> Option<Self> {
        let surface = Surface::new(width, height)?;
        debug!("display created ({width}x{height})");
        Some(Self {
            canvas: Context::new(surface),
            processor: Processor::new(),
            pixels: vec![0; width * height * BYTES_PER_PIXEL],
        })
    }

    pub fn width(&self) -> usize {
        self.canvas.surface().width()
    }

    pub fn height(&self) -> usize {
        self.canvas.surface().height()
    }

    /// The canvas every draw call targets.
    pub fn canvas(&mut self) -> &mut Context {
        &mut self.canvas
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut Processor {
        &mut self.processor
    }

    /// Convert the canvas to RGBA and hand the back buffer out for
    /// presentation.
    pub fn compose(&mut self) -> &[u8] {
        self.processor.convert(self.canvas.surface(), &mut self.pixels);
        &self.pixels
    }
}
