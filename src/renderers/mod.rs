//! Renderers.
//!
//! Every front-end draws from the same [`RenderFrame`], captured from a
//! [`Session`](crate::session::Session):
//!
//! ```text
//!            Session
//!               ↓
//!        RenderFrame::capture
//!        ↓       ↓        ↓
//!     ratatui   text    JSON (wasm)
//! ```

pub mod frame;
pub mod text;
pub mod wasm;

pub use frame::{BarView, RenderFrame};
pub use wasm::WebRunner;
#[cfg(feature = "wasm")]
pub use wasm::WebVisualizer;
