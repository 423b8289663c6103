//! Animation pacing.
//!
//! Algorithms never sleep. They emit [`Pause`] markers into their trace and
//! the [`Pacer`] turns each marker into a wall-clock delay at the moment the
//! playback reaches it. A speed change therefore only affects the next pause;
//! a delay that is already being waited out is never rescaled.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-step delays in milliseconds, slowest level first.
pub const DEFAULT_DELAYS_MS: [u64; 5] = [800, 500, 300, 100, 20];

/// Discrete speed setting, 1 (slowest) to 5 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    /// Slowest level.
    pub const MIN: Self = Self(1);
    /// Fastest level.
    pub const MAX: Self = Self(5);

    /// Create a level, clamping into `1..=5`.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// One level faster (saturating).
    #[must_use]
    pub fn faster(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One level slower (saturating).
    #[must_use]
    pub fn slower(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    const fn slot(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(3)
    }
}

/// Kind of suspension requested by an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pause {
    /// One visualized step at the current speed.
    Step,
    /// Short fixed delay for the finishing color sweep.
    Ripple,
    /// Long fixed delay between the binary-search pre-sort and the search.
    Settle,
}

/// Delay table and fixed delays used by the [`Pacer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    /// Per-level step delays, slowest first.
    pub delays_ms: [u64; 5],
    /// Delay for [`Pause::Ripple`].
    pub ripple_ms: u64,
    /// Delay for [`Pause::Settle`].
    pub settle_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            delays_ms: DEFAULT_DELAYS_MS,
            ripple_ms: 10,
            settle_ms: 1000,
        }
    }
}

/// Resolves pauses to durations according to the current speed.
#[derive(Debug, Clone)]
pub struct Pacer {
    speed: SpeedLevel,
    timing: Timing,
}

impl Pacer {
    /// Create a pacer.
    #[must_use]
    pub const fn new(speed: SpeedLevel, timing: Timing) -> Self {
        Self { speed, timing }
    }

    /// Current speed level.
    #[must_use]
    pub const fn speed(&self) -> SpeedLevel {
        self.speed
    }

    /// Change the speed. Applies from the next resolved pause on.
    pub fn set_speed(&mut self, speed: SpeedLevel) {
        self.speed = speed;
    }

    /// Current per-step delay.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.timing.delays_ms[self.speed.slot()])
    }

    /// Resolve a pause against the current speed.
    #[must_use]
    pub const fn delay_for(&self, pause: Pause) -> Duration {
        match pause {
            Pause::Step => self.step_delay(),
            Pause::Ripple => Duration::from_millis(self.timing.ripple_ms),
            Pause::Settle => Duration::from_millis(self.timing.settle_ms),
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(SpeedLevel::default(), Timing::default())
    }
}

/// Something that can wait out a delay.
pub trait Sleeper {
    /// Suspend the caller for `delay`.
    fn sleep(&mut self, delay: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Collapses every delay to zero, recording the total that would have elapsed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay {
    /// Sum of all skipped delays.
    pub skipped: Duration,
    /// Number of pauses seen.
    pub pauses: u64,
}

impl Sleeper for NoDelay {
    fn sleep(&mut self, delay: Duration) {
        self.skipped += delay;
        self.pauses += 1;
    }
}
