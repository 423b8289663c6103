//! CLI module for sortviz.
//!
//! All CLI logic lives here so it can be tested; `main.rs` only parses the
//! arguments and calls [`run_cli`].

mod args;
mod commands;
pub mod logging;
mod output;

pub use args::{Args, Command, RunArgs};
pub use commands::{
    resolve_algorithm, resolve_config, run_cli, run_command, run_instant, run_paced, trace_command,
};
pub use output::{describe_outcome, format_values, print_algorithms, print_report, TraceHeader};

#[cfg(test)]
mod tests;
