//! Plain-text bar rows for line-oriented output.

use super::frame::RenderFrame;
use crate::model::{BarColor, MAX_VALUE};

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per bar, scaled so `MAX_VALUE` is a full block.
#[must_use]
pub fn bar_row(frame: &RenderFrame) -> String {
    frame
        .bars
        .iter()
        .map(|bar| {
            let slot = (bar.value.clamp(1, MAX_VALUE) - 1) * LEVELS.len() as u32 / MAX_VALUE;
            LEVELS[slot as usize]
        })
        .collect()
}

/// One marker character per bar showing its color state.
#[must_use]
pub fn marker_row(frame: &RenderFrame) -> String {
    frame
        .bars
        .iter()
        .map(|bar| match bar.color {
            BarColor::Default if bar.is_dimmed() => '.',
            BarColor::Default => ' ',
            BarColor::Comparing => '^',
            BarColor::Swapping => '*',
            BarColor::Sorted => '=',
            BarColor::Found => '!',
        })
        .collect()
}

/// Bar row and marker row, newline separated.
#[must_use]
pub fn render(frame: &RenderFrame) -> String {
    format!("{}\n{}", bar_row(frame), marker_row(frame).trim_end())
}
