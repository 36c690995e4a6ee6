//! The engine facade and the trait a "game" implements.
//!
//! A game is what the user script would be in a full build: it receives the
//! engine every callback and drives drawing, audio and timers through it.
//! The host owns the frame loop and calls `update` then `render` once per
//! frame.

use crate::audio::Audio;
use crate::display::Display;
use crate::timers::Timers;

/// Default timer-pool capacity handed to new engines.
const TIMERS_INITIAL_CAPACITY: usize = 8;

/// One display, one audio service, one timer pool — the whole scriptable
/// surface of the engine.
pub struct Engine {
    pub display: Display,
    pub audio: Audio,
    pub timers: Timers,
}

impl Engine {
    pub fn new(width: usize, height: usize) -> Option<Self> {
        Some(Self {
            display: Display::new(width, height)?,
            audio: Audio::new(),
            timers: Timers::new(TIMERS_INITIAL_CAPACITY),
        })
    }

    /// Per-frame engine service: timers tick, released timers get
    /// collected, audio rings top up and drained one-shot sources are
    /// swept out of the mixer. Call before the game's own `update`.
    pub fn update(&mut self, delta: f32) {
        self.timers.update(delta);
        self.timers.gc();
        self.audio.update(delta);
    }
}

/// Interface between the host's frame loop and a game.
pub trait Game {
    /// One-time initialisation: load assets, build palettes, start sounds.
    fn setup(&mut self, engine: &mut Engine);

    /// Advance the game state by `delta` seconds.
    fn update(&mut self, engine: &mut Engine, delta: f32);

    /// Draw the current state onto the engine's canvas.
    fn render(&mut self, engine: &mut Engine);
}
