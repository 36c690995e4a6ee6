use std::sync::{Arc, Mutex};

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use shadowmask_core::audio::{DEVICE_CHANNELS, DEVICE_RATE, Mixer};

/// The host pull callback: locks the mixer for the duration of the pull and
/// lets it fill the interleaved stereo buffer.
pub struct MixerCallback {
    mixer: Arc<Mutex<Mixer>>,
}

impl AudioCallback for MixerCallback {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        let frames = out.len() / DEVICE_CHANNELS;
        self.mixer.lock().unwrap().generate(out, frames);
    }
}

/// Open the playback device against the engine mixer. The returned device
/// must be kept alive for as long as audio should play.
pub fn init(
    sdl_audio: &sdl2::AudioSubsystem,
    mixer: Arc<Mutex<Mixer>>,
) -> AudioDevice<MixerCallback> {
    let desired_spec = AudioSpecDesired {
        freq: Some(DEVICE_RATE as i32),
        channels: Some(DEVICE_CHANNELS as u8),
        samples: Some(512), // ~10.7 ms at 48 kHz.
    };

    let device = sdl_audio
        .open_playback(None, &desired_spec, |_spec| MixerCallback { mixer })
        .expect("Failed to open SDL audio device");

    device.resume();
    device
}
