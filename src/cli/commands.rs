//! CLI command handlers.

use std::io::{self, Write};
use std::process::ExitCode;

use crate::algorithms::{Algorithm, AlgorithmKind, SearchTarget};
use crate::config::VizConfig;
use crate::engine::{NoDelay, Sleeper, ThreadSleeper};
use crate::error::{VizError, VizResult};
use crate::renderers::{text, RenderFrame};
use crate::session::{RunReport, Session, Step};

use super::logging;
use super::output::{
    print_algorithms, print_announcement, print_event, print_header, print_report, print_trace_header,
    TraceHeader,
};
use super::{Args, Command, RunArgs};

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    logging::init(args.verbose);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match args.command {
        Command::Run(run) => run_command(&run, &mut out),
        Command::Trace(run) => trace_command(&run, &mut out),
        Command::List => print_algorithms(&mut out).map_err(VizError::from),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the configuration: file (or terminal preset), then flag overrides.
///
/// # Errors
///
/// Returns error if the configuration file cannot be loaded.
pub fn resolve_config(args: &RunArgs) -> VizResult<VizConfig> {
    let base = match &args.config {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::terminal(),
    };
    let mut builder = VizConfig::builder().preset(base);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(size) = args.size {
        builder = builder.size(size);
    }
    if let Some(speed) = args.speed {
        builder = builder.speed(speed);
    }
    Ok(builder.build())
}

/// Parse the algorithm and the search target.
///
/// # Errors
///
/// Returns `UnknownAlgorithm` for an unrecognized name.
pub fn resolve_algorithm(args: &RunArgs) -> VizResult<(Algorithm, SearchTarget)> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let target = match (args.target, algorithm.kind()) {
        (Some(value), AlgorithmKind::Search) => SearchTarget::Value(value),
        (Some(value), AlgorithmKind::Sort) => {
            tracing::warn!(%algorithm, value, "--target ignored for a sort");
            SearchTarget::Random
        }
        (None, _) => SearchTarget::Random,
    };
    Ok((algorithm, target))
}

/// `sortviz run`.
///
/// # Errors
///
/// Returns error on bad arguments, configuration or output failure.
pub fn run_command<W: Write>(args: &RunArgs, out: &mut W) -> VizResult<()> {
    let (algorithm, target) = resolve_algorithm(args)?;
    let mut session = Session::new(resolve_config(args)?);
    print_header(out, algorithm, &session)?;

    let report = if args.paced {
        run_paced(&mut session, algorithm, target, &mut ThreadSleeper, out)?
    } else {
        run_instant(&mut session, algorithm, target, out)?
    };
    print_report(out, &report)?;
    Ok(())
}

/// Run with every delay collapsed, printing announcements as they appear.
///
/// # Errors
///
/// Returns error if the run cannot start or output fails.
pub fn run_instant<W: Write>(
    session: &mut Session,
    algorithm: Algorithm,
    target: SearchTarget,
    out: &mut W,
) -> VizResult<RunReport> {
    let mut write_error = None;
    let report = session.run_with(algorithm, target, &mut NoDelay::default(), |step| {
        if let Step::Announce(announcement) = step {
            if let Err(e) = print_announcement(out, announcement) {
                write_error = Some(e);
            }
        }
    })?;
    match write_error {
        Some(e) => Err(e.into()),
        None => Ok(report),
    }
}

/// Run through `sleeper`, drawing a text frame at every pause.
///
/// # Errors
///
/// Returns error if the run cannot start or output fails.
pub fn run_paced<S: Sleeper, W: Write>(
    session: &mut Session,
    algorithm: Algorithm,
    target: SearchTarget,
    sleeper: &mut S,
    out: &mut W,
) -> VizResult<RunReport> {
    session.start_with(algorithm, target)?;
    loop {
        match session.advance() {
            Step::Pause(delay) => {
                writeln!(out, "{}", text::render(&RenderFrame::capture(session)))?;
                sleeper.sleep(delay);
            }
            Step::Announce(announcement) => print_announcement(out, &announcement)?,
            Step::Finished(report) => return Ok(report),
            Step::Idle => return Err(VizError::NotRunning),
        }
    }
}

/// `sortviz trace`: a [`TraceHeader`] line, then one JSON event per line.
///
/// # Errors
///
/// Returns error on bad arguments, configuration or output failure.
pub fn trace_command<W: Write>(args: &RunArgs, out: &mut W) -> VizResult<()> {
    let (algorithm, target) = resolve_algorithm(args)?;
    let mut session = Session::new(resolve_config(args)?);
    let trace = session.preview(algorithm, target)?;
    tracing::debug!(%algorithm, events = trace.events.len(), "trace computed");
    print_trace_header(out, &TraceHeader::of(&trace, session.seed()))?;
    for event in &trace.events {
        print_event(out, event)?;
    }
    Ok(())
}
