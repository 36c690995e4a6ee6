//! The mixer: live source set, group buses, master gain.
//!
//! The mixer is the single object the two audio-side threads share. The
//! game thread tracks/untracks sources, reconfigures them and tops up their
//! rings; the audio thread services the host's pull callback through
//! [`Mixer::generate`]. The host wraps the mixer in its lock; the mixer
//! itself never blocks.

use log::{debug, warn};

use crate::audio::source::{Source, SourceState};
use crate::audio::{DEVICE_CHANNELS, GROUP_COUNT, Mix};

/// Handle to a tracked source; indices are recycled after `untrack`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceId(usize);

struct Group {
    gain: f32,
    pan: f32,
    mix: Mix,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            gain: 1.0,
            pan: 0.0,
            mix: Mix::default(),
        }
    }
}

pub struct Mixer {
    sources: Vec<Option<Source>>,
    groups: [Group; GROUP_COUNT],
    master_gain: f32,
    mixes: [Mix; GROUP_COUNT], // Group mixes, flat for the pull loop.
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer {
    pub fn new() -> Self {
        let groups: [Group; GROUP_COUNT] = Default::default();
        let mixes = [Mix::default(); GROUP_COUNT];
        Self {
            sources: Vec::new(),
            groups,
            master_gain: 1.0,
            mixes,
        }
    }

    /// Number of tracked sources.
    pub fn len(&self) -> usize {
        self.sources.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.iter().all(|slot| slot.is_none())
    }

    /// Add a source to the live set.
    pub fn track(&mut self, source: Source) -> SourceId {
        let slot = match self.sources.iter().position(|slot| slot.is_none()) {
            Some(slot) => slot,
            None => {
                self.sources.push(None);
                self.sources.len() - 1
            }
        };
        self.sources[slot] = Some(source);
        debug!("source #{slot} tracked");
        SourceId(slot)
    }

    /// Remove a source from the live set, getting it back.
    pub fn untrack(&mut self, id: SourceId) -> Option<Source> {
        let source = self.sources.get_mut(id.0)?.take();
        if source.is_some() {
            debug!("source #{} untracked", id.0);
        }
        source
    }

    pub fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.0)?.as_ref()
    }

    pub fn source_mut(&mut self, id: SourceId) -> Option<&mut Source> {
        self.sources.get_mut(id.0)?.as_mut()
    }

    /// Untrack every `Completed` source whose buffered tail has fully
    /// drained, handing them back through `on_completed`. Sources still
    /// holding undelivered frames stay tracked so their tail plays out.
    pub fn sweep(&mut self, mut on_completed: impl FnMut(SourceId, Source)) {
        for slot in 0..self.sources.len() {
            let done = matches!(
                &self.sources[slot],
                Some(source) if source.state() == SourceState::Completed && source.is_drained()
            );
            if done {
                let source = self.sources[slot].take().unwrap();
                on_completed(SourceId(slot), source);
            }
        }
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn set_master_gain(&mut self, gain: f32) {
        self.master_gain = gain.max(0.0);
    }

    pub fn group_gain(&self, group: usize) -> f32 {
        self.groups[group].gain
    }

    pub fn group_pan(&self, group: usize) -> f32 {
        self.groups[group].pan
    }

    pub fn set_group_gain(&mut self, group: usize, gain: f32) {
        if group >= GROUP_COUNT {
            warn!("group #{group} is out of range, ignored");
            return;
        }
        self.groups[group].gain = gain.max(0.0);
        self.recompute_group(group);
    }

    pub fn set_group_pan(&mut self, group: usize, pan: f32) {
        if group >= GROUP_COUNT {
            warn!("group #{group} is out of range, ignored");
            return;
        }
        self.groups[group].pan = pan.clamp(-1.0, 1.0);
        self.recompute_group(group);
    }

    fn recompute_group(&mut self, group: usize) {
        let entry = &self.groups[group];
        self.mixes[group] = Mix::precompute(entry.pan, entry.gain);
    }

    /// Game-thread service: top up every source's ring buffer.
    pub fn update(&mut self, delta: f32) {
        for source in self.sources.iter_mut().flatten() {
            source.update(delta);
        }
    }

    /// Audio-thread pull: zero `output` (interleaved stereo, `frames`
    /// frames), let every live source mix itself in additively, then apply
    /// the master gain.
    pub fn generate(&mut self, output: &mut [f32], frames: usize) {
        let samples = frames * DEVICE_CHANNELS;
        output[..samples].fill(0.0);

        for source in self.sources.iter_mut().flatten() {
            source.mix(output, frames, &self.mixes);
        }

        if self.master_gain != 1.0 {
            for sample in output[..samples].iter_mut() {
                *sample *= self.master_gain;
            }
        }
    }
}
