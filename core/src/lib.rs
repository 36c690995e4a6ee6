pub mod audio;
pub mod gfx;
pub mod timer;

pub mod prelude {
    pub use crate::audio::{
        Decoder, DecoderSpec, MemoryDecoder, Mix, Mixer, SampleFormat, Source, SourceState,
    };
    pub use crate::gfx::{
        Color, Context, Palette, Pixel, Point, Processor, Program, ProgramEntry, Rectangle, Sheet,
        Size, SpriteQueue, Surface, XForm,
    };
    pub use crate::timer::{TimerPool, TimerState};
}
