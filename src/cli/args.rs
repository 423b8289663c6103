//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Step-by-step visualization of sorting and searching algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "sortviz", version, about, long_about = None)]
pub struct Args {
    /// Log run boundaries and rejected actions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run an algorithm once and print the result
    Run(RunArgs),
    /// Print the step-event trace of an algorithm as JSON Lines
    Trace(RunArgs),
    /// List the available algorithms
    List,
}

/// Options shared by `run` and `trace`.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct RunArgs {
    /// Algorithm name (Bubble, Selection, Insertion, Quick, Merge, Linear, Binary).
    pub algorithm: String,

    /// Number of bars (clamped to the configured bounds).
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Speed level, 1 (slowest) to 5 (fastest).
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub speed: Option<u8>,

    /// Seed for the array generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search for this value instead of sampling one from the array.
    #[arg(short, long)]
    pub target: Option<u32>,

    /// Sleep through the real delays and draw a bar row per step.
    #[arg(long)]
    pub paced: bool,

    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
