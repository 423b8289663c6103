//! Render frames: everything a front-end needs to draw one moment of a run.
//!
//! A frame is a snapshot decoupled from any drawing library. The TUI turns it
//! into a ratatui `BarChart`, the web binding ships it to JavaScript as JSON
//! and the CLI prints it as a text row.

use serde::Serialize;

use crate::algorithms::{Algorithm, RunStats};
use crate::model::{Bar, BarColor, BarLayout};
use crate::session::Session;

/// Display data for one bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    /// Position in the array.
    pub index: usize,
    /// Stable visual handle.
    pub id: u64,
    /// Current value.
    pub value: u32,
    /// Height in display units (`value * height_scale`).
    pub height: f64,
    /// Text drawn on the bar, when the bar is wide enough.
    pub label: Option<String>,
    /// Color state.
    pub color: BarColor,
    /// Color as `#rrggbb`.
    pub hex: String,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl BarView {
    /// Derive the view of `bar` at `index`.
    #[must_use]
    pub fn of(index: usize, bar: &Bar, layout: BarLayout, height_scale: f64) -> Self {
        Self {
            index,
            id: bar.id.raw(),
            value: bar.value,
            height: f64::from(bar.value) * height_scale,
            label: layout.show_labels.then(|| bar.value.to_string()),
            color: bar.style.color,
            hex: bar.style.color.hex(),
            alpha: bar.style.opacity.alpha(),
        }
    }

    /// Whether the bar is drawn faded.
    #[must_use]
    pub fn is_dimmed(&self) -> bool {
        self.alpha < 1.0
    }
}

/// Snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Bars in order.
    pub bars: Vec<BarView>,
    /// Geometry computed at generation time.
    pub layout: BarLayout,
    /// Generation counter of the array.
    pub generation: u64,
    /// Speed level 1..=5.
    pub speed: u8,
    /// Current per-step delay in milliseconds.
    pub step_delay_ms: u64,
    /// Algorithm currently running.
    pub running: Option<Algorithm>,
    /// Fraction of the active trace already replayed.
    pub progress: f64,
    /// Whether size and trigger controls accept input.
    pub controls_enabled: bool,
    /// Counts from the active run, or the last completed one.
    pub stats: Option<RunStats>,
    /// Seed of the session generator.
    pub seed: u64,
}

impl RenderFrame {
    /// Capture the current state of `session`.
    #[must_use]
    pub fn capture(session: &Session) -> Self {
        let model = session.model();
        let layout = model.layout();
        let height_scale = session.config().layout.height_scale;
        let bars = model
            .bars()
            .iter()
            .enumerate()
            .map(|(index, bar)| BarView::of(index, bar, layout, height_scale))
            .collect();

        let playback = session.playback();
        let stats = playback
            .map(|p| p.trace().stats)
            .or_else(|| session.last_report().map(|r| r.stats));

        Self {
            bars,
            layout,
            generation: model.generation(),
            speed: session.speed().get(),
            step_delay_ms: u64::try_from(session.step_delay().as_millis()).unwrap_or(u64::MAX),
            running: session.running_algorithm(),
            progress: playback.map_or(0.0, |p| p.progress()),
            controls_enabled: session.controls_enabled(),
            stats,
            seed: session.seed(),
        }
    }

    /// Values in order.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.bars.iter().map(|b| b.value).collect()
    }

    /// Number of bars currently shown in `color`.
    #[must_use]
    pub fn count(&self, color: BarColor) -> usize {
        self.bars.iter().filter(|b| b.color == color).count()
    }

    /// Serialize for the web binding.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the frame cannot be encoded.
    pub fn to_json(&self) -> crate::error::VizResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
