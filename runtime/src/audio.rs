//! The audio service: the mixer and the lock it is shared under.
//!
//! The game thread goes through [`Audio::lock`] for every mutation — track,
//! untrack, reconfigure, ring top-up — holding the guard only briefly. The
//! host's audio backend clones the handle once and acquires the same lock
//! for the duration of each pull. Nothing else crosses the thread boundary.
//!
//! The per-frame [`Audio::update`] also sweeps the source set: one-shot
//! sources that have completed and drained their buffered tail are
//! untracked and dropped, so fire-and-forget playback never leaks slots.

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use shadowmask_core::audio::Mixer;

#[derive(Clone)]
pub struct Audio {
    mixer: Arc<Mutex<Mixer>>,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio {
    pub fn new() -> Self {
        debug!("audio service created");
        Self {
            mixer: Arc::new(Mutex::new(Mixer::new())),
        }
    }

    /// The shared handle the host's audio callback holds onto.
    pub fn mixer(&self) -> Arc<Mutex<Mixer>> {
        Arc::clone(&self.mixer)
    }

    /// Acquire the mixer for a short game-thread critical section.
    pub fn lock(&self) -> MutexGuard<'_, Mixer> {
        self.mixer.lock().unwrap()
    }

    /// Per-frame game-thread service: top up every source's ring buffer,
    /// then untrack the sources that have completed and fully drained.
    pub fn update(&self, delta: f32) {
        let mut mixer = self.lock();
        mixer.update(delta);
        mixer.sweep(|id, _| debug!("source {id:?} completed, untracked"));
    }
}
