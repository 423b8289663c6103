//! # sortviz
//!
//! Step-by-step bar-chart visualization of classic sorting and searching
//! algorithms.
//!
//! Algorithms run against a working copy of the values and record a trace of
//! color changes, swaps, writes and pauses. A [`Session`](session::Session)
//! replays that trace against the bars, one pause at a time, while front-ends
//! (terminal, browser, command line) draw each [`RenderFrame`](renderers::RenderFrame).
//!
//! ## Example
//!
//! ```rust
//! use sortviz::prelude::*;
//!
//! let config = VizConfig::builder().seed(42).size(10).build();
//! let mut session = Session::new(config);
//!
//! session.start("Quick").unwrap();
//! while !matches!(session.advance(), Step::Finished(_)) {}
//!
//! assert!(session.model().is_sorted());
//! assert!(session.controls_enabled());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod renderers;
pub mod session;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algorithms::{Algorithm, Announcement, Outcome, SearchTarget, StepEvent, Trace};
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::engine::{NoDelay, Pacer, Pause, Sleeper, SpeedLevel, ThreadSleeper, VizRng};
    pub use crate::error::{VizError, VizResult};
    pub use crate::model::{ArrayModel, Bar, BarColor, BarLayout, Opacity};
    pub use crate::renderers::{BarView, RenderFrame};
    pub use crate::session::{RunReport, Session, Step};
}
