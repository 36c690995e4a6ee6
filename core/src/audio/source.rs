//! Mixable audio sources.
//!
//! A source wraps a decoder behind the [`Decoder`] seam, buffers about one
//! second of undecoded-rate frames in a ring, and serves the audio thread
//! through a data converter. The game thread calls [`Source::update`] to
//! top the ring up; the audio thread calls [`Source::mix`] (via the mixer)
//! to drain it. End-of-data either loops the decoder or parks the source in
//! `Completed`, which the game thread observes as a queryable state.

use log::{debug, warn};
use thiserror::Error;

use crate::audio::converter::Converter;
use crate::audio::ring::RingBuffer;
use crate::audio::{
    DEFAULT_GROUP, DEVICE_CHANNELS, DEVICE_RATE, GROUP_COUNT, MIN_SPEED, Mix, SampleFormat,
};

/// Frames shuttled per iteration of the produce/consume loops.
const CHUNK_FRAMES: usize = 512;

/// The declared layout of a decoder's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderSpec {
    pub format: SampleFormat,
    pub rate: u32,
    pub channels: usize,
}

/// The seam the host's format decoders plug into. `read` fills `dst` with
/// up to `frames` interleaved native-layout frames (samples already widened
/// to `f32`) and returns how many frames it actually produced; fewer than
/// requested means end-of-data. `seek` repositions to an absolute frame.
pub trait Decoder: Send {
    fn spec(&self) -> DecoderSpec;
    fn read(&mut self, dst: &mut [f32], frames: usize) -> usize;
    fn seek(&mut self, frame: usize);
}

/// A one-shot PCM sample held in memory; the in-core decoder used for
/// procedural sound effects and tests.
pub struct MemoryDecoder {
    samples: Vec<f32>,
    rate: u32,
    channels: usize,
    position: usize, // In frames.
}

impl MemoryDecoder {
    pub fn new(samples: Vec<f32>, rate: u32, channels: usize) -> Self {
        Self {
            samples,
            rate,
            channels,
            position: 0,
        }
    }

    /// Decode raw little-endian PCM of the given format.
    pub fn from_raw(raw: &[u8], format: SampleFormat, rate: u32, channels: usize) -> Self {
        let mut samples = Vec::with_capacity(raw.len() / format.bytes_per_sample());
        format.to_f32(raw, &mut samples);
        Self::new(samples, rate, channels)
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1)
    }
}

impl Decoder for MemoryDecoder {
    fn spec(&self) -> DecoderSpec {
        DecoderSpec {
            format: SampleFormat::F32,
            rate: self.rate,
            channels: self.channels,
        }
    }

    fn read(&mut self, dst: &mut [f32], frames: usize) -> usize {
        let available = self.frames().saturating_sub(self.position);
        let count = frames.min(available);
        let base = self.position * self.channels;
        let samples = count * self.channels;
        dst[..samples].copy_from_slice(&self.samples[base..base + samples]);
        self.position += count;
        count
    }

    fn seek(&mut self, frame: usize) {
        self.position = frame.min(self.frames());
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unsupported channel count {0} (must be 1 or 2)")]
    UnsupportedChannels(usize),

    #[error("unsupported sample rate {0}")]
    UnsupportedRate(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceState {
    Stopped,
    Playing,
    /// Draining buffered frames after the decoder hit end-of-data. The
    /// current state machine jumps straight to `Completed` and drains from
    /// there; the state exists for hosts that want an explicit tail phase.
    Finishing,
    Completed,
}

pub struct Source {
    decoder: Box<dyn Decoder>,
    ring: RingBuffer,
    converter: Converter,
    scratch: Vec<f32>,
    /// Frames popped from the ring but not yet consumed by the converter.
    carry: Vec<f32>,
    converted: Vec<f32>,

    group: usize,
    looped: bool,
    gain: f32,
    pan: f32,
    speed: f32,
    rate: u32,
    channels: usize,

    state: SourceState,
    mix: Mix, // Precomputed from gain and pan.
}

impl Source {
    /// Wrap a decoder in a mixable source. Buffers one second of
    /// native-rate frames and pre-fills the ring so playback can start
    /// within the first pull.
    pub fn new(decoder: Box<dyn Decoder>) -> Result<Self, SourceError> {
        let spec = decoder.spec();
        if spec.channels == 0 || spec.channels > DEVICE_CHANNELS {
            return Err(SourceError::UnsupportedChannels(spec.channels));
        }
        if spec.rate == 0 || spec.rate > 384_000 {
            return Err(SourceError::UnsupportedRate(spec.rate));
        }

        let mut source = Self {
            ring: RingBuffer::with_capacity(spec.rate as usize * spec.channels),
            converter: Converter::new(spec.rate, spec.channels),
            scratch: vec![0.0; CHUNK_FRAMES * spec.channels],
            carry: Vec::with_capacity(CHUNK_FRAMES * spec.channels),
            converted: vec![0.0; CHUNK_FRAMES * DEVICE_CHANNELS],
            decoder,
            group: DEFAULT_GROUP,
            looped: false,
            gain: 1.0,
            pan: 0.0,
            speed: 1.0,
            rate: spec.rate,
            channels: spec.channels,
            state: SourceState::Stopped,
            mix: Mix::precompute(0.0, 1.0),
        };
        source.produce(true);
        debug!(
            "source created ({} Hz, {} channel(s))",
            spec.rate, spec.channels
        );
        Ok(source)
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SourceState::Playing
    }

    /// True once every buffered frame has been handed to the mixer. A
    /// `Completed` source keeps draining its ring tail; it is only safe to
    /// discard when this reports true.
    pub fn is_drained(&self) -> bool {
        self.ring.is_empty() && self.carry.is_empty()
    }

    pub fn group(&self) -> usize {
        self.group
    }

    /// Route the source to a group bus.
    pub fn set_group(&mut self, group: usize) {
        if group >= GROUP_COUNT {
            warn!("group #{group} is out of range, ignored");
            return;
        }
        self.group = group;
    }

    pub fn looped(&self) -> bool {
        self.looped
    }

    pub fn set_looped(&mut self, looped: bool) {
        self.looped = looped;
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.max(0.0);
        self.mix = Mix::precompute(self.pan, self.gain);
    }

    pub fn pan(&self) -> f32 {
        self.pan
    }

    pub fn set_pan(&mut self, pan: f32) {
        self.pan = pan.clamp(-1.0, 1.0);
        self.mix = Mix::precompute(self.pan, self.gain);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Playback speed through dynamic resampling; clamped below at
    /// [`MIN_SPEED`].
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(MIN_SPEED);
        self.converter
            .set_ratio(self.speed as f64 * self.rate as f64 / DEVICE_RATE as f64);
    }

    pub fn play(&mut self) {
        self.state = SourceState::Playing;
    }

    pub fn stop(&mut self) {
        self.state = SourceState::Stopped;
    }

    /// Seek back to the first frame and re-fill the ring. Only legal while
    /// stopped; anything else logs and no-ops.
    pub fn rewind(&mut self) {
        if self.state != SourceState::Stopped {
            warn!("can't rewind while playing");
            return;
        }
        self.decoder.seek(0);
        self.converter.reset();
        self.carry.clear();
        self.produce(true);
    }

    /// Game-thread top-up: refill the ring from the decoder. Call once per
    /// frame; the ring holds a second of data, so any halfway-sane frame
    /// rate keeps the audio thread fed.
    pub fn update(&mut self, _delta: f32) {
        if self.state != SourceState::Playing {
            return;
        }
        self.produce(false);
    }

    fn produce(&mut self, reset: bool) {
        if reset {
            self.ring.reset();
        }

        let mut stalled = false;
        loop {
            let writable = self.ring.available_write() / self.channels;
            if writable == 0 {
                break;
            }

            let frames = writable.min(CHUNK_FRAMES);
            let samples = frames * self.channels;
            let written = self.decoder.read(&mut self.scratch[..samples], frames);
            self.ring.push(&self.scratch[..written * self.channels]);

            if written < frames {
                if !self.looped {
                    self.state = SourceState::Completed;
                    break;
                }
                // A decoder that can't produce a single frame even after a
                // rewind would spin this loop forever.
                if written == 0 && stalled {
                    warn!("looped source stalled at frame 0");
                    break;
                }
                stalled = written == 0;
                self.decoder.seek(0);
            } else {
                stalled = false;
            }
        }
    }

    /// Audio-thread drain: convert buffered frames and additively mix them
    /// into `output` (interleaved stereo, `frames` frames), scaled by the
    /// source mix times the routed group's mix.
    pub fn mix(&mut self, output: &mut [f32], frames: usize, groups: &[Mix; GROUP_COUNT]) {
        if self.state == SourceState::Stopped {
            return;
        }

        let left = self.mix.left * groups[self.group].left;
        let right = self.mix.right * groups[self.group].right;

        let mut cursor = 0; // Output frame position.
        while cursor < frames {
            if self.carry.is_empty() {
                let samples = self.ring.available_read().min(CHUNK_FRAMES * self.channels);
                let samples = samples - samples % self.channels;
                self.carry.resize(samples, 0.0);
                self.ring.pop(&mut self.carry);
            }

            let out_samples = ((frames - cursor) * DEVICE_CHANNELS).min(self.converted.len());
            let (consumed, produced) = self
                .converter
                .process(&self.carry, &mut self.converted[..out_samples]);
            self.carry.drain(..consumed * self.channels);

            if produced == 0 {
                if self.carry.is_empty() && self.ring.is_empty() {
                    if self.state == SourceState::Playing {
                        warn!("buffer underrun, {} frame(s) missing", frames - cursor);
                    }
                    break;
                }
                continue;
            }

            for (i, frame) in self.converted[..produced * DEVICE_CHANNELS]
                .chunks_exact(DEVICE_CHANNELS)
                .enumerate()
            {
                let base = (cursor + i) * DEVICE_CHANNELS;
                output[base] += frame[0] * left;
                output[base + 1] += frame[1] * right;
            }
            cursor += produced;
        }
    }
}
