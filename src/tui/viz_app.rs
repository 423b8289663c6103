//! Sorting visualizer TUI application state and logic.
//!
//! Terminal I/O is handled by the `sortviz-tui` binary. Everything that can
//! be tested without a terminal lives here: key handling, run pacing and the
//! announcement modal.
//!
//! Pacing is deadline based. When the session reports a pause, the app
//! records `now + delay` and does nothing until [`VizApp::update`] is called
//! with a later instant. The delay is resolved when the pause is reached, so
//! a speed change never stretches or shrinks a pause that is already running.

use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::algorithms::{Algorithm, Announcement, Outcome, SearchTarget};
use crate::config::VizConfig;
use crate::error::VizResult;
use crate::session::{RunReport, Session, Step};

/// Bars added or removed per `+`/`-` press.
pub const SIZE_STEP: usize = 5;

/// Application state for the visualizer TUI.
#[derive(Debug)]
pub struct VizApp {
    /// The session being visualized.
    pub session: Session,
    /// Blocking message waiting to be dismissed.
    pub announcement: Option<Announcement>,
    /// One-line status shown under the chart.
    pub status: String,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Frames drawn so far.
    pub frame_count: u64,
    next_step_at: Option<Instant>,
}

impl VizApp {
    /// Create the app around a fresh session.
    #[must_use]
    pub fn new(config: VizConfig) -> Self {
        Self {
            session: Session::new(config),
            announcement: None,
            status: String::from("Press 1-7 to start an algorithm"),
            should_quit: false,
            frame_count: 0,
            next_step_at: None,
        }
    }

    /// Create the app from a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or fails validation.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let config = VizConfig::load(path)?;
        Ok(Self::new(config))
    }

    /// Whether size and trigger keys are accepted.
    #[must_use]
    pub const fn controls_enabled(&self) -> bool {
        self.session.controls_enabled()
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') => self.dismiss(),
            KeyCode::Char('<' | ',') | KeyCode::Left => {
                self.session.set_speed(self.session.speed().slower());
            }
            KeyCode::Char('>' | '.') | KeyCode::Right => {
                self.session.set_speed(self.session.speed().faster());
            }
            _ if !self.controls_enabled() => {}
            KeyCode::Char(c @ '1'..='7') => {
                let slot = c as usize - '1' as usize;
                self.trigger(Algorithm::ALL[slot]);
            }
            KeyCode::Char('r') => self.regenerate(self.session.model().len()),
            KeyCode::Char('+' | '=') => {
                self.regenerate(self.session.model().len() + SIZE_STEP);
            }
            KeyCode::Char('-') => {
                self.regenerate(self.session.model().len().saturating_sub(SIZE_STEP));
            }
            _ => {}
        }
    }

    /// Start `algorithm`; the first step is applied on the next update.
    pub fn trigger(&mut self, algorithm: Algorithm) {
        match self.session.start_with(algorithm, SearchTarget::Random) {
            Ok(()) => {
                self.next_step_at = None;
                self.announcement = None;
                self.status = format!("Running {}...", algorithm.title());
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn regenerate(&mut self, size: usize) {
        match self.session.generate(size) {
            Ok(()) => self.status = format!("Generated {} bars", self.session.model().len()),
            Err(err) => self.status = err.to_string(),
        }
    }

    /// Dismiss the pending announcement; the run resumes on the next update.
    pub fn dismiss(&mut self) {
        if self.announcement.take().is_some() {
            self.next_step_at = None;
        }
    }

    /// Follow a terminal resize.
    pub fn resize(&mut self, width: u16) {
        self.session.resize_display(u32::from(width));
    }

    /// Advance the run if its current pause has elapsed at `now`.
    pub fn update(&mut self, now: Instant) {
        self.frame_count += 1;
        if self.announcement.is_some() || !self.session.is_running() {
            return;
        }
        if self.next_step_at.is_some_and(|due| now < due) {
            return;
        }
        match self.session.advance() {
            Step::Pause(delay) => self.next_step_at = Some(now + delay),
            Step::Announce(announcement) => {
                self.status = announcement.to_string();
                self.announcement = Some(announcement);
                self.next_step_at = None;
            }
            Step::Finished(report) => {
                self.status = summary(&report);
                self.next_step_at = None;
            }
            Step::Idle => self.next_step_at = None,
        }
    }

    /// How long the event loop may block before the next update is due.
    #[must_use]
    pub fn time_until_next(&self, now: Instant, idle_tick: Duration) -> Duration {
        if self.announcement.is_some() || !self.session.is_running() {
            return idle_tick;
        }
        self.next_step_at
            .map_or(Duration::ZERO, |due| due.saturating_duration_since(now))
            .min(idle_tick)
    }
}

fn summary(report: &RunReport) -> String {
    let stats = report.stats;
    let result = match report.outcome {
        Outcome::Sorted => String::from("sorted"),
        Outcome::Found { target, index } => format!("found {target} at {index}"),
        Outcome::NotFound { target } => format!("{target} not found"),
        Outcome::Empty => String::from("nothing to search"),
    };
    format!(
        "{}: {result} ({} comparisons, {} swaps, {} writes)",
        report.algorithm.title(),
        stats.comparisons,
        stats.swaps,
        stats.writes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpeedLevel;
    use crate::model::BarColor;

    fn app() -> VizApp {
        VizApp::new(VizConfig::builder().preset(VizConfig::terminal()).seed(42).build())
    }

    /// Drive the app until idle, dismissing announcements as they appear.
    fn finish(app: &mut VizApp) -> Vec<Announcement> {
        let mut seen = Vec::new();
        let mut now = Instant::now();
        for _ in 0..100_000 {
            if let Some(a) = app.announcement.clone() {
                seen.push(a);
                app.handle_key(KeyCode::Enter);
            }
            if !app.session.is_running() {
                break;
            }
            app.update(now);
            now += Duration::from_secs(2);
        }
        seen
    }

    #[test]
    fn test_new_app() {
        let app = app();
        assert!(!app.should_quit());
        assert!(app.controls_enabled());
        assert_eq!(app.session.model().len(), 20);
        assert!(app.announcement.is_none());
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_handle_key_esc() {
        let mut app = app();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_number_keys_trigger_algorithms() {
        for (slot, algorithm) in Algorithm::ALL.into_iter().enumerate() {
            let mut app = app();
            let key = char::from(b'1' + u8::try_from(slot).unwrap());
            app.handle_key(KeyCode::Char(key));
            assert_eq!(app.session.running_algorithm(), Some(algorithm));
        }
    }

    #[test]
    fn test_size_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.session.model().len(), 25);
        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.session.model().len(), 15);
    }

    #[test]
    fn test_size_floor() {
        let mut app = app();
        for _ in 0..10 {
            app.handle_key(KeyCode::Char('-'));
        }
        assert_eq!(app.session.model().len(), 5);
    }

    #[test]
    fn test_regenerate_key() {
        let mut app = app();
        let generation = app.session.model().generation();
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.session.model().generation(), generation + 1);
        assert_eq!(app.session.model().len(), 20);
    }

    #[test]
    fn test_controls_ignored_while_running() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1'));
        let generation = app.session.model().generation();

        app.handle_key(KeyCode::Char('r'));
        app.handle_key(KeyCode::Char('+'));
        app.handle_key(KeyCode::Char('4'));

        assert_eq!(app.session.model().generation(), generation);
        assert_eq!(app.session.running_algorithm(), Some(Algorithm::Bubble));
    }

    #[test]
    fn test_speed_keys_work_while_running() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1'));
        app.handle_key(KeyCode::Right);
        assert_eq!(app.session.speed(), SpeedLevel::new(4));
        app.handle_key(KeyCode::Char('<'));
        app.handle_key(KeyCode::Left);
        assert_eq!(app.session.speed(), SpeedLevel::new(2));
    }

    #[test]
    fn test_update_waits_for_deadline() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1'));
        let t0 = Instant::now();
        app.update(t0);
        assert_eq!(app.session.model().bars()[0].style.color, BarColor::Comparing);
        let progress = app.session.playback().map(|p| p.progress());

        app.update(t0 + Duration::from_millis(100));
        assert_eq!(app.session.playback().map(|p| p.progress()), progress);

        app.update(t0 + Duration::from_millis(300));
        assert!(app.session.playback().map(|p| p.progress()) > progress);
    }

    #[test]
    fn test_speed_change_does_not_rescale_current_pause() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1'));
        let t0 = Instant::now();
        app.update(t0);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        // The pause already in progress still lasts 300ms.
        assert_eq!(
            app.time_until_next(t0, Duration::from_secs(1)),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_run_completes_and_reenables_controls() {
        let mut app = app();
        app.handle_key(KeyCode::Char('5'));
        finish(&mut app);
        assert!(app.controls_enabled());
        assert!(app.session.model().is_sorted());
        assert!(app.status.starts_with("Merge Sort: sorted"));
    }

    #[test]
    fn test_announcement_blocks_until_dismissed() {
        let mut app = app();
        app.handle_key(KeyCode::Char('6'));
        let t0 = Instant::now();
        app.update(t0);
        assert!(matches!(
            app.announcement,
            Some(Announcement::SearchTarget { .. })
        ));
        let progress = app.session.playback().map(|p| p.progress());

        app.update(t0 + Duration::from_secs(10));
        assert_eq!(app.session.playback().map(|p| p.progress()), progress);

        app.handle_key(KeyCode::Char(' '));
        assert!(app.announcement.is_none());
        app.update(t0 + Duration::from_secs(10));
        assert!(app.session.playback().map(|p| p.progress()) > progress);
    }

    #[test]
    fn test_binary_search_announcements() {
        let mut app = app();
        app.handle_key(KeyCode::Char('7'));
        let seen = finish(&mut app);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], Announcement::SortingFirst);
        assert!(matches!(seen[2], Announcement::Found { .. }));
        assert!(app.controls_enabled());
    }

    #[test]
    fn test_idle_tick_when_not_running() {
        let app = app();
        let tick = Duration::from_millis(250);
        assert_eq!(app.time_until_next(Instant::now(), tick), tick);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut app = app();
        let values = app.session.model().values();
        app.handle_key(KeyCode::Char('x'));
        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.session.model().values(), values);
        assert!(app.session.is_idle());
        assert!(!app.should_quit());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn key_strategy() -> impl Strategy<Value = KeyCode> {
        prop_oneof![
            prop::sample::select(vec!['1', '2', '3', '4', '5', '6', '7', 'r', '+', '-', '<', '>', ' '])
                .prop_map(KeyCode::Char),
            Just(KeyCode::Enter),
            Just(KeyCode::Left),
            Just(KeyCode::Right),
        ]
    }

    proptest! {
        /// Property: array size stays within the configured bounds for any key sequence.
        #[test]
        fn prop_size_bounded(seed in 0u64..1000, keys in prop::collection::vec(key_strategy(), 0..60)) {
            let mut app = VizApp::new(VizConfig::builder().seed(seed).build());
            let mut now = Instant::now();
            for key in keys {
                app.handle_key(key);
                app.update(now);
                now += Duration::from_millis(900);
                let len = app.session.model().len();
                prop_assert!((5..=100).contains(&len), "size {}", len);
            }
        }

        /// Property: controls are enabled exactly when no run is active.
        #[test]
        fn prop_controls_track_run_state(seed in 0u64..1000, keys in prop::collection::vec(key_strategy(), 0..40)) {
            let mut app = VizApp::new(VizConfig::builder().seed(seed).build());
            let mut now = Instant::now();
            for key in keys {
                app.handle_key(key);
                app.update(now);
                now += Duration::from_millis(900);
                prop_assert_eq!(app.controls_enabled(), app.session.is_idle());
            }
        }
    }
}
