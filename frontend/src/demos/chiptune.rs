//! Procedural chiptune: square-wave and noise sources routed to separate
//! group buses, sequenced by pool timers, with a bar display on the canvas.
//!
//! The bass is one looped source tracked for the whole run; lead notes and
//! hats are fire-and-forget one-shots spawned by the sequencer timers and
//! swept out of the mixer by the engine once they drain.

use shadowmask_core::audio::{MemoryDecoder, Source};
use shadowmask_core::gfx::{Color, Palette, Pixel, Point, Program, Rectangle};
use shadowmask_runtime::{Audio, Engine, Game};

/// Palette index for an (r, g, b) triple in the 3-3-2 quantised palette.
const fn idx(r: u8, g: u8, b: u8) -> Pixel {
    (r << 5) | (g << 2) | b
}

const BASS_GROUP: usize = 1;
const LEAD_GROUP: usize = 2;
const NOISE_GROUP: usize = 3;

const SOURCE_RATE: u32 = 24_000;

/// A minor-ish arpeggio as speed ratios against the base note.
const STEPS: [f32; 8] = [1.0, 1.189, 1.498, 2.0, 1.498, 1.189, 1.0, 0.749];

fn square_wave(frequency: f32, seconds: f32, amplitude: f32) -> Vec<f32> {
    let frames = (SOURCE_RATE as f32 * seconds) as usize;
    (0..frames)
        .map(|i| {
            let phase = i as f32 * frequency / SOURCE_RATE as f32;
            if phase.fract() < 0.5 { amplitude } else { -amplitude }
        })
        .collect()
}

fn noise_burst(seconds: f32, amplitude: f32) -> Vec<f32> {
    let frames = (SOURCE_RATE as f32 * seconds) as usize;
    let mut state: u32 = 0x2F6E_2B1D;
    (0..frames)
        .map(|i| {
            // Xorshift white noise with a linear decay envelope.
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let sample = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let envelope = 1.0 - i as f32 / frames as f32;
            sample * amplitude * envelope
        })
        .collect()
}

/// Start a one-shot playing and hand it to the mixer; the engine sweep
/// reclaims the slot once the note has drained.
fn spawn(audio: &Audio, samples: &[f32], group: usize, gain: f32, speed: f32) {
    let decoder = MemoryDecoder::new(samples.to_vec(), SOURCE_RATE, 1);
    let Ok(mut source) = Source::new(Box::new(decoder)) else {
        return;
    };
    source.set_group(group);
    source.set_gain(gain);
    source.set_speed(speed);
    source.play();
    audio.lock().track(source);
}

pub struct Chiptune {
    time: f32,
    step: usize,
}

impl Chiptune {
    pub fn new() -> Self {
        Self { time: 0.0, step: 0 }
    }
}

impl Game for Chiptune {
    fn setup(&mut self, engine: &mut Engine) {
        engine
            .display
            .processor_mut()
            .set_palette(&Palette::quantized(3, 3, 2));

        // A pulsing backdrop via the display program.
        let mut program = Program::new();
        for band in 0..30u8 {
            program.wait(-1, 0, band as usize * 8);
            program.color(-1, idx(0, 0, 1), Color::rgb(8, band, 40 + band * 2));
        }
        engine.display.processor_mut().set_program(Some(&program));

        // The bass drone persists: looped, tracked once, never swept.
        let decoder = MemoryDecoder::new(square_wave(55.0, 1.0, 0.5), SOURCE_RATE, 1);
        let mut bass = Source::new(Box::new(decoder)).unwrap();
        bass.set_group(BASS_GROUP);
        bass.set_looped(true);
        bass.set_gain(0.6);
        bass.stop();
        bass.rewind(); // Re-fill the ring now that looping is on.
        bass.play();

        {
            let mut mixer = engine.audio.lock();
            mixer.track(bass);
            mixer.set_group_gain(BASS_GROUP, 0.8);
            mixer.set_group_pan(NOISE_GROUP, 0.3);
        }

        // Lead sequencer: every quarter note spawn the next arpeggio step,
        // tuned by playback speed.
        let audio = engine.audio.clone();
        let lead_samples = square_wave(220.0, 0.22, 0.4);
        let mut step = 0usize;
        engine.timers.every(0.25, -1, move || {
            spawn(&audio, &lead_samples, LEAD_GROUP, 0.5, STEPS[step]);
            step = (step + 1) % STEPS.len();
        });

        // Hat on the off-beat, twice as fast.
        let audio = engine.audio.clone();
        let hat_samples = noise_burst(0.08, 0.5);
        engine.timers.every(0.125, -1, move || {
            spawn(&audio, &hat_samples, NOISE_GROUP, 0.35, 1.0);
        });
    }

    fn update(&mut self, engine: &mut Engine, delta: f32) {
        self.time += delta;
        self.step = (self.time * 4.0) as usize % STEPS.len();

        // Sweep the lead bus across the stereo field.
        let pan = (self.time * 0.7).sin();
        engine.audio.lock().set_group_pan(LEAD_GROUP, pan);
    }

    fn render(&mut self, engine: &mut Engine) {
        let width = engine.display.width() as i32;
        let height = engine.display.height() as i32;
        let canvas = engine.display.canvas();

        canvas.clear(idx(0, 0, 1), false);

        // One bar per arpeggio step, the active one lit.
        let bar_width = width / STEPS.len() as i32 - 8;
        for (i, ratio) in STEPS.iter().enumerate() {
            let x = 8 + i as i32 * (bar_width + 8);
            let bar_height = (ratio * 60.0) as i32;
            let color = if i == self.step {
                idx(7, 6, 0)
            } else {
                idx(2, 3, 5)
            };
            canvas.filled_rectangle(
                Rectangle::new(
                    x,
                    height - 30 - bar_height,
                    bar_width as u32,
                    bar_height as u32,
                ),
                color,
            );
        }

        // A beat-driven pulse.
        let beat = (self.time * 4.0).fract();
        canvas.filled_circle(
            Point::new(width / 2, 70),
            (28.0 * (1.0 - beat * 0.6)) as u32,
            idx(6, 2, 1),
        );
        canvas.circle(Point::new(width / 2, 70), 30, idx(7, 7, 3));
    }
}
