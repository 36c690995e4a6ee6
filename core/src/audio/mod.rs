//! Pull-based audio core.
//!
//! The host's audio backend drives the [`Mixer`] from its own thread: each
//! pull zeroes the output, walks every tracked [`Source`] and lets it
//! additively mix converted frames, then applies the master gain. The game
//! thread owns the source set and tops up each source's ring buffer once
//! per frame; the two sides share the mixer through one lock, acquired
//! briefly on the game thread and for the duration of a pull on the audio
//! thread — never nested.

pub mod converter;
pub mod mixer;
pub mod ring;
pub mod source;

pub use converter::Converter;
pub use mixer::{Mixer, SourceId};
pub use source::{Decoder, DecoderSpec, MemoryDecoder, Source, SourceError, SourceState};

/// Output sample rate the mixer produces, in Hz.
pub const DEVICE_RATE: u32 = 48_000;

/// The mixer output is interleaved stereo.
pub const DEVICE_CHANNELS: usize = 2;

/// Fixed number of group buses; sources route to exactly one.
pub const GROUP_COUNT: usize = 8;

/// Bus newly-created sources route to.
pub const DEFAULT_GROUP: usize = 0;

/// Dynamic resampling bounds the playback speed from below by the ratio of
/// the minimum to the maximum supported device rates.
pub const MIN_SPEED: f32 = 8_000.0 / 384_000.0;

/// A stereo gain pair, applied per frame during the additive mix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mix {
    pub left: f32,
    pub right: f32,
}

impl Mix {
    /// Constant-power sine/cosine panning law: `pan` in `[-1, 1]` maps to
    /// `[0, pi/2]`, left rides the cosine and right the sine, both scaled
    /// by `gain`.
    pub fn precompute(pan: f32, gain: f32) -> Self {
        let theta = (pan + 1.0) * 0.5 * std::f32::consts::FRAC_PI_2;
        Self {
            left: theta.cos() * gain,
            right: theta.sin() * gain,
        }
    }
}

impl Default for Mix {
    fn default() -> Self {
        Self::precompute(0.0, 1.0)
    }
}

/// Sample formats decoders can declare; everything is widened to `f32` on
/// its way into the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    U8,
    S16,
    F32,
}

impl SampleFormat {
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::S16 => 2,
            Self::F32 => 4,
        }
    }

    /// Widen raw little-endian samples to `f32` in `[-1, 1]`.
    pub fn to_f32(self, raw: &[u8], out: &mut Vec<f32>) {
        match self {
            Self::U8 => {
                out.extend(raw.iter().map(|&s| (s as f32 - 128.0) / 128.0));
            }
            Self::S16 => {
                out.extend(
                    raw.chunks_exact(2)
                        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0),
                );
            }
            Self::F32 => {
                out.extend(
                    raw.chunks_exact(4)
                        .map(|quad| f32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]])),
                );
            }
        }
    }
}
