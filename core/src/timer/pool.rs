//! Slot pool of periodic timers.
//!
//! Timers live in a contiguous array of slots so a script-side handle is
//! just an index. The pool grows by doubling when an allocation finds no
//! free slot and shrinks by halving during `gc` when the highest live slot
//! has dropped below half the capacity (never below the initial capacity).
//!
//! Finalisation is two-phase to play nice with a garbage-collected script
//! host: `release` only marks the slot `Finalized`; the slot survives until
//! the next `gc`, which hands the callback payload back to the caller and
//! frees the slot. A `Finalized` slot never fires.

use log::debug;

/// Observable state of a pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Free,
    Running,
    Frozen,
    Finalized,
}

/// A live timer. `R` is the callback payload — typically an opaque
/// script-reference handle — which the pool never inspects.
pub struct Timer<R> {
    period: f32,
    repeats: i32, // -1 = fire forever.
    callback: R,
    age: f32,
    loops: i32,
    state: TimerState, // Running, Frozen or Finalized; Free slots hold no timer.
}

impl<R> Timer<R> {
    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn repeats(&self) -> i32 {
        self.repeats
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    /// Remaining fire count; negative while repeating forever.
    pub fn loops(&self) -> i32 {
        self.loops
    }

    pub fn callback(&self) -> &R {
        &self.callback
    }
}

pub struct TimerPool<R> {
    timers: Vec<Option<Timer<R>>>,
    initial_capacity: usize,
}

impl<R> TimerPool<R> {
    pub fn new(initial_capacity: usize) -> Self {
        let initial_capacity = initial_capacity.max(1);
        let mut timers = Vec::new();
        timers.resize_with(initial_capacity, || None);
        Self {
            timers,
            initial_capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.timers.len()
    }

    /// Number of non-free slots.
    pub fn len(&self) -> usize {
        self.timers.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.iter().all(|slot| slot.is_none())
    }

    pub fn state(&self, slot: usize) -> TimerState {
        match self.timers.get(slot) {
            Some(Some(timer)) => timer.state,
            _ => TimerState::Free,
        }
    }

    pub fn timer(&self, slot: usize) -> Option<&Timer<R>> {
        self.timers.get(slot)?.as_ref()
    }

    /// Claim the first free slot for a timer firing every `period` seconds,
    /// `repeats` times (−1 = forever). Doubles the pool when full.
    pub fn allocate(&mut self, period: f32, repeats: i32, callback: R) -> usize {
        let slot = match self.timers.iter().position(|slot| slot.is_none()) {
            Some(slot) => slot,
            None => {
                let slot = self.timers.len();
                self.timers.resize_with(slot * 2, || None);
                debug!("timer pool extended to {} slots", self.timers.len());
                slot
            }
        };

        self.timers[slot] = Some(Timer {
            period: period.max(0.0),
            repeats,
            callback,
            age: 0.0,
            loops: repeats,
            state: TimerState::Running,
        });
        slot
    }

    /// Advance every running timer by `delta` seconds, invoking `on_fire`
    /// with the slot index and the callback payload once per elapsed
    /// period. A timer that exhausts its repeat budget freezes.
    ///
    /// `on_fire` cannot reach back into the pool; callbacks that want to
    /// cancel or reset timers record the slot and act after `update`
    /// returns.
    pub fn update(&mut self, delta: f32, mut on_fire: impl FnMut(usize, &mut R)) {
        for (slot, entry) in self.timers.iter_mut().enumerate() {
            let Some(timer) = entry else {
                continue;
            };
            if timer.state != TimerState::Running {
                continue;
            }

            timer.age += delta;

            if timer.period <= 0.0 {
                // Degenerate period: once per update, not once per epsilon.
                timer.age = 0.0;
                on_fire(slot, &mut timer.callback);
                if timer.loops > 0 {
                    timer.loops -= 1;
                    if timer.loops == 0 {
                        timer.state = TimerState::Frozen;
                    }
                }
                continue;
            }

            while timer.age >= timer.period && timer.state == TimerState::Running {
                timer.age -= timer.period;
                on_fire(slot, &mut timer.callback);
                if timer.loops > 0 {
                    timer.loops -= 1;
                    if timer.loops == 0 {
                        timer.state = TimerState::Frozen;
                    }
                }
            }
        }
    }

    /// Mark a slot for collection. The slot stays occupied (and inert)
    /// until the next `gc`; releasing a free slot is a no-op.
    pub fn release(&mut self, slot: usize) {
        if let Some(Some(timer)) = self.timers.get_mut(slot) {
            timer.state = TimerState::Finalized;
            debug!("timer #{slot} finalized, ready for collection");
        }
    }

    /// Free every finalized slot, handing the callback payload to
    /// `on_release`, then shrink the pool if the live tail allows it.
    pub fn gc(&mut self, mut on_release: impl FnMut(usize, R)) {
        let mut last_live: Option<usize> = None;

        for slot in 0..self.timers.len() {
            if matches!(&self.timers[slot], Some(timer) if timer.state == TimerState::Finalized) {
                let timer = self.timers[slot].take().unwrap();
                on_release(slot, timer.callback);
                debug!("timer #{slot} collected, slot freed");
            }
            if self.timers[slot].is_some() {
                last_live = Some(slot);
            }
        }

        let half = self.timers.len() / 2;
        if half >= self.initial_capacity
            && self.timers.len() > self.initial_capacity
            && last_live.is_none_or(|slot| slot < half)
        {
            self.timers.truncate(half);
            debug!("timer pool shrunk to {half} slots");
        }
    }

    /// Rewind a timer to a pristine running state. Finalized slots are
    /// beyond saving and stay finalized.
    pub fn reset(&mut self, slot: usize) {
        if let Some(Some(timer)) = self.timers.get_mut(slot)
            && timer.state != TimerState::Finalized
        {
            timer.age = 0.0;
            timer.loops = timer.repeats;
            timer.state = TimerState::Running;
        }
    }

    /// Freeze a running timer; any other state is left alone.
    pub fn cancel(&mut self, slot: usize) {
        if let Some(Some(timer)) = self.timers.get_mut(slot)
            && timer.state == TimerState::Running
        {
            timer.state = TimerState::Frozen;
        }
    }

    /// Tear the pool down, handing every live payload to `on_release`.
    pub fn terminate(mut self, mut on_release: impl FnMut(usize, R)) {
        for (slot, entry) in self.timers.iter_mut().enumerate() {
            if let Some(timer) = entry.take() {
                on_release(slot, timer.callback);
                debug!("timer #{slot} released");
            }
        }
    }
}
