pub mod pool;

pub use pool::{Timer, TimerPool, TimerState};
