//! sortviz CLI
//!
//! Command-line interface for running a single visualization headlessly.

use std::process::ExitCode;

use clap::Parser;
use sortviz::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
