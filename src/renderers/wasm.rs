//! Browser front-end.
//!
//! wasm-bindgen cannot export the session directly, so [`WebRunner`] wraps it
//! behind a JavaScript-friendly surface: integers instead of enums, JSON
//! strings instead of structs. The page owns the timer; it calls `advance`,
//! waits the returned number of milliseconds and calls again.
//!
//! `advance` return codes:
//!
//! | value | meaning                                              |
//! |-------|------------------------------------------------------|
//! | `>= 0`| delay in ms before the next call                     |
//! | `-1`  | run finished (or nothing running)                    |
//! | `-2`  | announcement pending; show it, then call `advance`   |

use super::frame::RenderFrame;
use crate::algorithms::Announcement;
use crate::config::VizConfig;
use crate::error::{VizError, VizResult};
use crate::engine::SpeedLevel;
use crate::session::{Session, Step};

/// Returned by [`WebRunner::advance`] when the run is over.
pub const FINISHED: i32 = -1;
/// Returned by [`WebRunner::advance`] when an announcement is waiting.
pub const ANNOUNCEMENT: i32 = -2;

/// Session wrapper with a JS-shaped API.
#[derive(Debug)]
pub struct WebRunner {
    session: Session,
    announcement: Option<Announcement>,
}

impl WebRunner {
    /// Web preset seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let config = VizConfig::builder().preset(VizConfig::web()).seed(seed).build();
        Self {
            session: Session::new(config),
            announcement: None,
        }
    }

    /// The wrapped session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Regenerate `size` bars laid out in `width` pixels.
    ///
    /// # Errors
    ///
    /// `AlreadyRunning` while a run is active.
    pub fn generate(&mut self, size: usize, width: u32) -> VizResult<()> {
        if self.session.is_running() {
            return Err(VizError::AlreadyRunning);
        }
        self.session.resize_display(width);
        self.session.generate(size)
    }

    /// Change the speed level (clamped to 1..=5).
    pub fn set_speed(&mut self, level: u8) {
        self.session.set_speed(SpeedLevel::new(level));
    }

    /// Start the named algorithm.
    ///
    /// # Errors
    ///
    /// `UnknownAlgorithm` or `AlreadyRunning`.
    pub fn start(&mut self, name: &str) -> VizResult<()> {
        self.session.start(name)?;
        self.announcement = None;
        Ok(())
    }

    /// Advance the run; see the module docs for the return codes.
    pub fn advance(&mut self) -> i32 {
        self.announcement = None;
        match self.session.advance() {
            Step::Pause(delay) => i32::try_from(delay.as_millis()).unwrap_or(i32::MAX),
            Step::Announce(announcement) => {
                self.announcement = Some(announcement);
                ANNOUNCEMENT
            }
            Step::Finished(_) | Step::Idle => FINISHED,
        }
    }

    /// Text of the pending announcement, if any.
    #[must_use]
    pub fn announcement(&self) -> Option<String> {
        self.announcement.as_ref().map(ToString::to_string)
    }

    /// Current frame as JSON.
    #[must_use]
    pub fn frame_json(&self) -> String {
        RenderFrame::capture(&self.session)
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Whether size and trigger controls accept input.
    #[must_use]
    pub const fn controls_enabled(&self) -> bool {
        self.session.controls_enabled()
    }
}

#[cfg(feature = "wasm")]
mod bindings {
    use super::WebRunner;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WebVisualizer {
        inner: WebRunner,
    }

    #[wasm_bindgen]
    impl WebVisualizer {
        #[wasm_bindgen(constructor)]
        pub fn new(seed: u64) -> Self {
            Self {
                inner: WebRunner::new(seed),
            }
        }

        pub fn generate(&mut self, size: usize, width: u32) -> Result<(), JsError> {
            self.inner.generate(size, width).map_err(|e| JsError::new(&e.to_string()))
        }

        pub fn set_speed(&mut self, level: u8) {
            self.inner.set_speed(level);
        }

        pub fn start(&mut self, name: &str) -> Result<(), JsError> {
            self.inner.start(name).map_err(|e| JsError::new(&e.to_string()))
        }

        pub fn advance(&mut self) -> i32 {
            self.inner.advance()
        }

        pub fn announcement(&self) -> Option<String> {
            self.inner.announcement()
        }

        pub fn frame_json(&self) -> String {
            self.inner.frame_json()
        }

        #[wasm_bindgen(getter)]
        pub fn controls_enabled(&self) -> bool {
            self.inner.controls_enabled()
        }
    }
}

#[cfg(feature = "wasm")]
pub use bindings::WebVisualizer;
