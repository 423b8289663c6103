//! TUI application state.
//!
//! The terminal I/O lives in `src/bin/sortviz_tui.rs`; the state and key
//! handling live here so they can be tested without a terminal.

#[cfg(feature = "tui")]
pub mod viz_app;

#[cfg(feature = "tui")]
pub use viz_app::VizApp;
