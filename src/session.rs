//! Run controller.
//!
//! A [`Session`] owns everything a run touches: the array model, the pacer,
//! the random generator and the Idle/Running state. There is exactly one
//! active playback at a time, and the array can only be regenerated while
//! Idle.
//!
//! Front-ends drive a run in one of two ways:
//!
//! - incrementally, calling [`Session::advance`] whenever the previous pause
//!   has elapsed (the TUI and the web binding);
//! - in one blocking call through [`Session::run`] with a [`Sleeper`]
//!   (the CLI and tests).
//!
//! ```rust
//! use sortviz::prelude::*;
//!
//! let mut session = Session::with_values(VizConfig::default(), &[5, 3, 4, 1, 2]);
//! let report = session.run("Bubble", &mut NoDelay::default(), |_| {}).unwrap();
//! assert_eq!(session.model().values(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(report.outcome, Outcome::Sorted);
//! assert!(session.is_idle());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithms::{Algorithm, Announcement, Outcome, RunStats, SearchTarget, StepEvent, Trace};
use crate::config::VizConfig;
use crate::engine::{Pacer, Sleeper, SpeedLevel, VizRng};
use crate::error::{VizError, VizResult};
use crate::model::ArrayModel;

/// Result of one [`Session::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing is running.
    Idle,
    /// Wait this long before advancing again.
    Pause(Duration),
    /// Show this message; advance again once it has been acknowledged.
    Announce(Announcement),
    /// The run completed; the session is Idle again.
    Finished(RunReport),
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// How it ended.
    pub outcome: Outcome,
    /// Operation counts.
    pub stats: RunStats,
    /// Values after the run.
    pub final_values: Vec<u32>,
}

/// Replays a trace against the array model.
#[derive(Debug, Clone)]
pub struct Playback {
    trace: Trace,
    cursor: usize,
}

impl Playback {
    /// Start replaying `trace` from its first event.
    #[must_use]
    pub const fn new(trace: Trace) -> Self {
        Self { trace, cursor: 0 }
    }

    /// Algorithm being replayed.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.trace.algorithm
    }

    /// The full trace.
    #[must_use]
    pub const fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Fraction of events already applied, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.trace.events.is_empty() {
            1.0
        } else {
            self.cursor as f64 / self.trace.events.len() as f64
        }
    }

    /// Apply events until the next suspension point or the end of the trace.
    pub fn advance(&mut self, model: &mut ArrayModel, pacer: &Pacer) -> Step {
        while let Some(event) = self.trace.events.get(self.cursor) {
            self.cursor += 1;
            match event {
                StepEvent::Mark { index, color } => model.set_color(*index, *color),
                StepEvent::Fade { index, opacity } => model.set_opacity(*index, *opacity),
                StepEvent::Swap { i, j } => model.swap(*i, *j),
                StepEvent::Write { index, value } => model.write(*index, *value),
                StepEvent::ResetColors => model.reset_colors(),
                StepEvent::Wait { pause } => return Step::Pause(pacer.delay_for(*pause)),
                StepEvent::Announce { announcement } => {
                    return Step::Announce(announcement.clone());
                }
                StepEvent::Done { .. } => break,
            }
        }
        self.cursor = self.trace.events.len();
        Step::Finished(RunReport {
            algorithm: self.trace.algorithm,
            outcome: self.trace.outcome,
            stats: self.trace.stats,
            final_values: model.values(),
        })
    }
}

/// Idle/Running state machine.
#[derive(Debug, Clone, Default)]
pub enum RunState {
    /// Controls enabled; a run or regeneration may start.
    #[default]
    Idle,
    /// An algorithm owns the array.
    Running(Box<Playback>),
}

/// Explicit context for one visualizer instance.
#[derive(Debug, Clone)]
pub struct Session {
    config: VizConfig,
    model: ArrayModel,
    pacer: Pacer,
    rng: VizRng,
    state: RunState,
    last_report: Option<RunReport>,
}

impl Session {
    /// Create a session and generate its first array from the config.
    #[must_use]
    pub fn new(config: VizConfig) -> Self {
        let rng = config.seed.map_or_else(VizRng::from_entropy, VizRng::new);
        let mut session = Self::empty(config, rng);
        let size = session.config.clamp_size(session.config.array.size);
        session.regenerate(size);
        session
    }

    /// Create a session around explicit values instead of random ones.
    #[must_use]
    pub fn with_values(config: VizConfig, values: &[u32]) -> Self {
        let rng = VizRng::new(config.seed.unwrap_or_default());
        let layout = config.layout_for(values.len());
        let mut session = Self::empty(config, rng);
        session.model = ArrayModel::from_values(values, layout);
        session
    }

    fn empty(config: VizConfig, rng: VizRng) -> Self {
        let pacer = Pacer::new(config.speed_level(), config.timing());
        Self {
            config,
            model: ArrayModel::new(),
            pacer,
            rng,
            state: RunState::Idle,
            last_report: None,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &VizConfig {
        &self.config
    }

    /// The bars.
    #[must_use]
    pub const fn model(&self) -> &ArrayModel {
        &self.model
    }

    /// Seed of the session's generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Whether no run is active.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, RunState::Idle)
    }

    /// Whether a run is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        !self.is_idle()
    }

    /// Whether size and trigger controls should accept input.
    #[must_use]
    pub const fn controls_enabled(&self) -> bool {
        self.is_idle()
    }

    /// The active playback, if any.
    #[must_use]
    pub fn playback(&self) -> Option<&Playback> {
        match &self.state {
            RunState::Running(playback) => Some(&**playback),
            RunState::Idle => None,
        }
    }

    /// Algorithm currently running.
    #[must_use]
    pub fn running_algorithm(&self) -> Option<Algorithm> {
        self.playback().map(Playback::algorithm)
    }

    /// Report of the most recent completed run.
    #[must_use]
    pub const fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// Current speed.
    #[must_use]
    pub const fn speed(&self) -> SpeedLevel {
        self.pacer.speed()
    }

    /// Current per-step delay.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        self.pacer.step_delay()
    }

    /// Change the speed. Allowed while running; affects the next pause only.
    pub fn set_speed(&mut self, speed: SpeedLevel) {
        self.pacer.set_speed(speed);
    }

    /// Replace the bars with `size` fresh random ones (clamped to bounds).
    ///
    /// # Errors
    ///
    /// Returns [`VizError::AlreadyRunning`] while a run is active; the
    /// current bars are left untouched.
    pub fn generate(&mut self, size: usize) -> VizResult<()> {
        if self.is_running() {
            tracing::debug!(size, "regeneration rejected: run in progress");
            return Err(VizError::AlreadyRunning);
        }
        self.regenerate(self.config.clamp_size(size));
        Ok(())
    }

    /// Regenerate with the current size.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::AlreadyRunning`] while a run is active.
    pub fn shuffle(&mut self) -> VizResult<()> {
        self.generate(self.model.len())
    }

    /// Use a different display width and refit the current bars to it.
    ///
    /// Only the geometry changes: values, handles, colors and the generation
    /// stay as they are, so this is allowed while running.
    pub fn resize_display(&mut self, width: u32) {
        if width == 0 || width == self.config.layout.width {
            return;
        }
        self.config.layout.width = width;
        let layout = self.config.layout_for(self.model.len());
        self.model.set_layout(layout);
        tracing::debug!(width, bar_width = layout.bar_width, gap = layout.gap, "display resized");
    }

    fn regenerate(&mut self, size: usize) {
        let layout = self.config.layout_for(size);
        self.model.generate(size, layout, &mut self.rng);
        self.last_report = None;
        tracing::debug!(
            size,
            bar_width = layout.bar_width,
            labels = layout.show_labels,
            "array generated"
        );
    }

    /// Start the algorithm named `name` with a random search target.
    ///
    /// # Errors
    ///
    /// [`VizError::UnknownAlgorithm`] for an unrecognized name (the session
    /// stays Idle), [`VizError::AlreadyRunning`] if a run is active (the
    /// active run and the bars are untouched).
    pub fn start(&mut self, name: &str) -> VizResult<()> {
        let algorithm = match name.parse::<Algorithm>() {
            Ok(algorithm) => algorithm,
            Err(err) => {
                tracing::warn!(name, "unknown algorithm requested");
                return Err(err);
            }
        };
        self.start_with(algorithm, SearchTarget::Random)
    }

    /// Start `algorithm` with an explicit search target policy.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::AlreadyRunning`] if a run is active.
    pub fn start_with(&mut self, algorithm: Algorithm, target: SearchTarget) -> VizResult<()> {
        if let Some(active) = self.running_algorithm() {
            tracing::debug!(%algorithm, %active, "start rejected: run in progress");
            return Err(VizError::AlreadyRunning);
        }
        self.model.reset_visuals();
        let trace = algorithm.trace(&self.model.values(), target, &mut self.rng);
        tracing::info!(
            %algorithm,
            size = self.model.len(),
            events = trace.events.len(),
            "run started"
        );
        self.state = RunState::Running(Box::new(Playback::new(trace)));
        Ok(())
    }

    /// Compute the trace `algorithm` would produce on the current values
    /// without starting a run.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::AlreadyRunning`] if a run is active.
    pub fn preview(&mut self, algorithm: Algorithm, target: SearchTarget) -> VizResult<Trace> {
        if self.is_running() {
            return Err(VizError::AlreadyRunning);
        }
        Ok(algorithm.trace(&self.model.values(), target, &mut self.rng))
    }

    /// Apply the next batch of events of the active run.
    pub fn advance(&mut self) -> Step {
        let RunState::Running(playback) = &mut self.state else {
            return Step::Idle;
        };
        let step = playback.advance(&mut self.model, &self.pacer);
        if let Step::Finished(report) = &step {
            tracing::info!(
                algorithm = %report.algorithm,
                outcome = ?report.outcome,
                comparisons = report.stats.comparisons,
                swaps = report.stats.swaps,
                writes = report.stats.writes,
                "run finished"
            );
            self.last_report = Some(report.clone());
            self.state = RunState::Idle;
        }
        step
    }

    /// Start `name` and drive it to completion, sleeping through every pause.
    ///
    /// `observer` sees each [`Step`] before the session acts on it, including
    /// the final [`Step::Finished`].
    ///
    /// # Errors
    ///
    /// Same as [`Session::start`]. The session is Idle whenever this returns.
    pub fn run<S, F>(&mut self, name: &str, sleeper: &mut S, observer: F) -> VizResult<RunReport>
    where
        S: Sleeper + ?Sized,
        F: FnMut(&Step),
    {
        let algorithm = name.parse::<Algorithm>()?;
        self.run_with(algorithm, SearchTarget::Random, sleeper, observer)
    }

    /// Like [`Session::run`] with an explicit algorithm and target.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::AlreadyRunning`] if a run is active.
    pub fn run_with<S, F>(
        &mut self,
        algorithm: Algorithm,
        target: SearchTarget,
        sleeper: &mut S,
        mut observer: F,
    ) -> VizResult<RunReport>
    where
        S: Sleeper + ?Sized,
        F: FnMut(&Step),
    {
        self.start_with(algorithm, target)?;
        loop {
            let step = self.advance();
            observer(&step);
            match step {
                Step::Pause(delay) => sleeper.sleep(delay),
                Step::Announce(_) => {}
                Step::Finished(report) => return Ok(report),
                Step::Idle => {
                    return Err(VizError::NotRunning);
                }
            }
        }
    }
}
