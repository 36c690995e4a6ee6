//! Script-facing engine objects.
//!
//! The embedded interpreter itself is a host concern; this crate is the
//! object model it would bind: a [`Display`] (canvas, display processor and
//! RGBA back buffer), an [`Audio`] service (the mixer behind the lock the
//! host's pull callback shares), a [`Timers`] pool dispatching boxed
//! callbacks, and the [`Game`] trait a "user script" implements to be
//! driven by the host's frame loop.

pub mod audio;
pub mod display;
pub mod game;
pub mod timers;

pub use audio::Audio;
pub use display::Display;
pub use game::{Engine, Game};
pub use timers::{TimerCallback, Timers};
