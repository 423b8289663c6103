//! CLI output formatting.
//!
//! Every function writes to a caller-supplied writer so the output can be
//! checked in tests.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::algorithms::{Algorithm, AlgorithmKind, Announcement, Outcome, StepEvent, Trace};
use crate::session::{RunReport, Session};

/// First record of a JSON Lines trace: what is needed to replay the events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Algorithm that produced the events.
    pub algorithm: Algorithm,
    /// Seed of the generator the values came from.
    pub seed: u64,
    /// Values before the first event.
    pub initial_values: Vec<u32>,
    /// Number of event lines that follow.
    pub events: usize,
}

impl TraceHeader {
    /// Header for `trace`, generated from `seed`.
    #[must_use]
    pub fn of(trace: &Trace, seed: u64) -> Self {
        Self {
            algorithm: trace.algorithm,
            seed,
            initial_values: trace.initial_values.clone(),
            events: trace.events.len(),
        }
    }
}

/// Format values as `[a, b, c]`.
#[must_use]
pub fn format_values(values: &[u32]) -> String {
    let body: Vec<String> = values.iter().map(u32::to_string).collect();
    format!("[{}]", body.join(", "))
}

/// Header printed before a run.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn print_header<W: Write>(out: &mut W, algorithm: Algorithm, session: &Session) -> io::Result<()> {
    writeln!(
        out,
        "{} {}  bars={} speed={} seed={}",
        algorithm.title(),
        algorithm.complexity(),
        session.model().len(),
        session.speed().get(),
        session.seed()
    )?;
    writeln!(out, "initial: {}", format_values(&session.model().values()))
}

/// One announcement line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn print_announcement<W: Write>(out: &mut W, announcement: &Announcement) -> io::Result<()> {
    writeln!(out, "> {announcement}")
}

/// Human-readable outcome.
#[must_use]
pub fn describe_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Sorted => String::from("sorted"),
        Outcome::Found { target, index } => format!("found {target} at index {index}"),
        Outcome::NotFound { target } => format!("{target} not found"),
        Outcome::Empty => String::from("empty array"),
    }
}

/// Final values, outcome and statistics.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn print_report<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    let stats = report.stats;
    writeln!(out, "final:   {}", format_values(&report.final_values))?;
    writeln!(out, "result:  {}", describe_outcome(report.outcome))?;
    writeln!(
        out,
        "stats:   comparisons={} swaps={} writes={} steps={}",
        stats.comparisons, stats.swaps, stats.writes, stats.steps
    )
}

/// The trace header as a JSON line.
///
/// # Errors
///
/// Returns an error if the header cannot be encoded or written.
pub fn print_trace_header<W: Write>(out: &mut W, header: &TraceHeader) -> crate::error::VizResult<()> {
    serde_json::to_writer(&mut *out, header)?;
    writeln!(out)?;
    Ok(())
}

/// One trace event as a JSON line.
///
/// # Errors
///
/// Returns an error if the event cannot be encoded or written.
pub fn print_event<W: Write>(out: &mut W, event: &StepEvent) -> crate::error::VizResult<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)?;
    Ok(())
}

/// Table of algorithms with their trigger keys.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn print_algorithms<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{:<4}{:<11}{:<16}{:<8}COMPLEXITY", "KEY", "NAME", "TITLE", "KIND")?;
    for (slot, algorithm) in Algorithm::ALL.into_iter().enumerate() {
        let kind = match algorithm.kind() {
            AlgorithmKind::Sort => "sort",
            AlgorithmKind::Search => "search",
        };
        writeln!(
            out,
            "{:<4}{:<11}{:<16}{:<8}{}",
            slot + 1,
            algorithm.name(),
            algorithm.title(),
            kind,
            algorithm.complexity()
        )?;
    }
    Ok(())
}
