//! Runtime support shared by every run: pacing and randomness.

pub mod clock;
pub mod rng;

pub use clock::{NoDelay, Pacer, Pause, Sleeper, SpeedLevel, ThreadSleeper, Timing};
pub use rng::VizRng;
