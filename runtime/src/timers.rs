//! Script timers.
//!
//! The core pool keeps callback payloads opaque; here they are boxed
//! closures, the Rust stand-in for the script-reference handles an embedded
//! interpreter would store. Two-phase finalisation is preserved: `release`
//! parks a timer for the next `gc`, which is where the closure is dropped.

use log::debug;
use shadowmask_core::timer::{TimerPool, TimerState};

pub type TimerCallback = Box<dyn FnMut()>;

pub struct Timers {
    pool: TimerPool<TimerCallback>,
}

impl Timers {
    pub fn new(initial_capacity: usize) -> Self {
        debug!("timer service created ({initial_capacity} slots)");
        Self {
            pool: TimerPool::new(initial_capacity),
        }
    }

    /// Schedule `callback` every `period` seconds, `repeats` times
    /// (−1 = forever). Returns the slot handle.
    pub fn every(
        &mut self,
        period: f32,
        repeats: i32,
        callback: impl FnMut() + 'static,
    ) -> usize {
        self.pool.allocate(period, repeats, Box::new(callback))
    }

    /// Schedule `callback` once, `period` seconds from now.
    pub fn after(&mut self, period: f32, callback: impl FnMut() + 'static) -> usize {
        self.every(period, 1, callback)
    }

    pub fn state(&self, slot: usize) -> TimerState {
        self.pool.state(slot)
    }

    pub fn cancel(&mut self, slot: usize) {
        self.pool.cancel(slot);
    }

    pub fn reset(&mut self, slot: usize) {
        self.pool.reset(slot);
    }

    pub fn release(&mut self, slot: usize) {
        self.pool.release(slot);
    }

    /// Advance all running timers, dispatching their callbacks.
    pub fn update(&mut self, delta: f32) {
        self.pool.update(delta, |_, callback| callback());
    }

    /// Collect released timers, dropping their callbacks.
    pub fn gc(&mut self) {
        self.pool.gc(|_, _| {});
    }
}
