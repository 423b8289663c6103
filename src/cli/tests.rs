//! CLI module tests.

use std::io::Write as _;

use clap::Parser;

use super::args::{Args, Command, RunArgs};
use super::commands::{resolve_algorithm, resolve_config, run_command, run_paced, trace_command};
use super::output::{describe_outcome, format_values, print_algorithms, TraceHeader};
use crate::algorithms::{Algorithm, Outcome, SearchTarget, StepEvent};
use crate::config::VizConfig;
use crate::engine::NoDelay;
use crate::error::VizError;
use crate::session::Session;

fn run_args(algorithm: &str) -> RunArgs {
    RunArgs {
        algorithm: algorithm.to_string(),
        size: None,
        speed: None,
        seed: Some(42),
        target: None,
        paced: false,
        config: None,
    }
}

fn output_of(f: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut buf = Vec::new();
    f(&mut buf);
    String::from_utf8(buf).unwrap()
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_run_minimal() {
    let args = Args::parse_from(["sortviz", "run", "Bubble"]);
    assert!(!args.verbose);
    let Command::Run(run) = args.command else {
        panic!("expected run");
    };
    assert_eq!(run.algorithm, "Bubble");
    assert_eq!(run.size, None);
    assert!(!run.paced);
}

#[test]
fn test_parse_run_all_options() {
    let args = Args::parse_from([
        "sortviz", "run", "Binary", "--size", "40", "--speed", "5", "--seed", "7", "--target",
        "13", "--paced", "--config", "viz.yaml", "-v",
    ]);
    assert!(args.verbose);
    let Command::Run(run) = args.command else {
        panic!("expected run");
    };
    assert_eq!(run.size, Some(40));
    assert_eq!(run.speed, Some(5));
    assert_eq!(run.seed, Some(7));
    assert_eq!(run.target, Some(13));
    assert!(run.paced);
    assert_eq!(run.config.as_deref(), Some(std::path::Path::new("viz.yaml")));
}

#[test]
fn test_parse_trace_and_list() {
    let args = Args::parse_from(["sortviz", "trace", "quick", "-n", "8"]);
    assert!(matches!(args.command, Command::Trace(ref r) if r.size == Some(8)));
    let args = Args::parse_from(["sortviz", "list"]);
    assert_eq!(args.command, Command::List);
}

#[test]
fn test_parse_speed_out_of_range() {
    assert!(Args::try_parse_from(["sortviz", "run", "Bubble", "--speed", "9"]).is_err());
    assert!(Args::try_parse_from(["sortviz", "run", "Bubble", "--speed", "0"]).is_err());
}

#[test]
fn test_parse_missing_algorithm() {
    assert!(Args::try_parse_from(["sortviz", "run"]).is_err());
    assert!(Args::try_parse_from(["sortviz"]).is_err());
}

// ============================================================================
// Resolution tests
// ============================================================================

#[test]
fn test_resolve_config_overrides() {
    let mut args = run_args("Bubble");
    args.size = Some(500);
    args.speed = Some(1);
    let config = resolve_config(&args).unwrap();
    assert_eq!(config.array.size, 100);
    assert_eq!(config.speed.level, 1);
    assert_eq!(config.seed, Some(42));
    // Terminal preset without a file.
    assert_eq!(config.layout.width, 80);
}

#[test]
fn test_resolve_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "array:\n  size: 12\nspeed:\n  level: 2").unwrap();
    let mut args = run_args("Merge");
    args.config = Some(file.path().to_path_buf());
    let config = resolve_config(&args).unwrap();
    assert_eq!(config.array.size, 12);
    assert_eq!(config.speed.level, 2);
}

#[test]
fn test_resolve_config_missing_file() {
    let mut args = run_args("Merge");
    args.config = Some("/nonexistent/sortviz.yaml".into());
    assert!(matches!(resolve_config(&args), Err(VizError::Io(_))));
}

#[test]
fn test_resolve_target_only_for_searches() {
    let mut args = run_args("Linear");
    args.target = Some(5);
    assert_eq!(
        resolve_algorithm(&args).unwrap(),
        (Algorithm::Linear, SearchTarget::Value(5))
    );
    args.algorithm = "Quick".into();
    assert_eq!(
        resolve_algorithm(&args).unwrap(),
        (Algorithm::Quick, SearchTarget::Random)
    );
}

#[test]
fn test_resolve_unknown_algorithm() {
    let err = resolve_algorithm(&run_args("Bogo")).unwrap_err();
    assert!(err.to_string().contains("Bogo"));
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_run_command_sorts() {
    let text = output_of(|out| run_command(&run_args("Insertion"), out).unwrap());
    assert!(text.starts_with("Insertion Sort O(n^2)  bars=20 speed=3 seed=42"));
    assert!(text.contains("result:  sorted"));
    let final_line = text.lines().find(|l| l.starts_with("final:")).unwrap();
    let values: Vec<u32> = final_line
        .trim_start_matches("final:")
        .trim()
        .trim_matches(['[', ']'])
        .split(", ")
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(values.len(), 20);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_run_command_prints_announcements() {
    let text = output_of(|out| run_command(&run_args("Binary"), out).unwrap());
    assert!(text.contains("> Binary Search requires a sorted array. Sorting first..."));
    assert!(text.contains("> Searching for target: "));
    assert!(text.contains("result:  found "));
}

#[test]
fn test_run_command_explicit_missing_target() {
    let mut args = run_args("Linear");
    args.target = Some(1000);
    let text = output_of(|out| run_command(&args, out).unwrap());
    assert!(text.contains("> 1000 is not in the array."));
    assert!(text.contains("result:  1000 not found"));
}

#[test]
fn test_run_paced_draws_frames() {
    let mut session = Session::with_values(VizConfig::terminal(), &[3, 1, 2]);
    let mut sleeper = NoDelay::default();
    let text = output_of(|out| {
        run_paced(&mut session, Algorithm::Bubble, SearchTarget::Random, &mut sleeper, out).unwrap();
    });
    let frames = text.lines().filter(|l| l.starts_with('▁')).count();
    assert_eq!(frames as u64, sleeper.pauses);
    assert!(sleeper.skipped.as_millis() > 0);
    assert!(session.is_idle());
}

#[test]
fn test_trace_command_json_lines() {
    let text = output_of(|out| trace_command(&run_args("Selection"), out).unwrap());
    let events: Vec<StepEvent> = text
        .lines()
        .skip(1)
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        events.last(),
        Some(&StepEvent::Done {
            outcome: Outcome::Sorted
        })
    );
    assert!(events.iter().any(|e| matches!(e, StepEvent::Swap { .. })));
}

#[test]
fn test_trace_header_allows_replay() {
    let args = run_args("Merge");
    let text = output_of(|out| trace_command(&args, out).unwrap());
    let mut lines = text.lines();
    let header: TraceHeader = serde_json::from_str(lines.next().unwrap()).unwrap();
    let events: Vec<StepEvent> = lines.map(|l| serde_json::from_str(l).unwrap()).collect();

    assert_eq!(header.algorithm, Algorithm::Merge);
    assert_eq!(header.seed, 42);
    assert_eq!(header.events, events.len());
    let session = Session::new(resolve_config(&args).unwrap());
    assert_eq!(header.initial_values, session.model().values());

    let mut values = header.initial_values.clone();
    for event in &events {
        match *event {
            StepEvent::Swap { i, j } => values.swap(i, j),
            StepEvent::Write { index, value } => values[index] = value,
            _ => {}
        }
    }
    let mut sorted = header.initial_values;
    sorted.sort_unstable();
    assert_eq!(values, sorted);
}

#[test]
fn test_trace_is_reproducible() {
    let a = output_of(|out| trace_command(&run_args("Quick"), out).unwrap());
    let b = output_of(|out| trace_command(&run_args("Quick"), out).unwrap());
    assert_eq!(a, b);
}

#[test]
fn test_list_algorithms() {
    let text = output_of(|out| print_algorithms(out).unwrap());
    assert_eq!(text.lines().count(), 8);
    assert!(text.contains("Bubble"));
    assert!(text.lines().last().unwrap().starts_with("7   Binary"));
}

#[test]
fn test_format_helpers() {
    assert_eq!(format_values(&[1, 2, 3]), "[1, 2, 3]");
    assert_eq!(format_values(&[]), "[]");
    assert_eq!(
        describe_outcome(Outcome::Found {
            target: 4,
            index: 2
        }),
        "found 4 at index 2"
    );
}
