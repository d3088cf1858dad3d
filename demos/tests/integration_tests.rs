//! Integration tests for the demo suite.
//!
//! Each demo circuit is run on the local simulator with a fixed seed and
//! checked against its documented outcome.

use qsim_adapter_sim::SimulatorBackend;
use qsim_demos::{all_demos, histogram_lines, superposition, toffoli};
use qsim_hal::{Backend, Counts, RunOptions};

fn options() -> RunOptions {
    RunOptions::shots(2000).unwrap().with_seed(8)
}

/// Every demo circuit is measured and runnable.
#[test]
fn test_all_demos_run() {
    let backend = SimulatorBackend::new();
    for demo in all_demos().unwrap() {
        assert!(demo.circuit.has_measurement(), "{} unmeasured", demo.name);
        let result = backend.run(&demo.circuit, &options()).unwrap();
        assert_eq!(result.counts().total_shots(), 2000, "{}", demo.name);
    }
}

/// Toffoli demo always reads all ones.
#[test]
fn test_toffoli_demo() {
    let result = SimulatorBackend::new()
        .run(&toffoli().unwrap(), &options())
        .unwrap();
    assert_eq!(result.counts().get("111"), 2000);
}

/// Superposition demo splits between "00" and "10".
#[test]
fn test_superposition_demo() {
    let result = SimulatorBackend::new()
        .run(&superposition().unwrap(), &options())
        .unwrap();
    let counts = result.counts();
    assert_eq!(counts.get("00") + counts.get("10"), 2000);
    assert!((result.frequency("10") - 0.5).abs() < 0.05);
}

/// Histogram lines are ordered by count.
#[test]
fn test_histogram_lines() {
    let counts: Counts = [("01".to_string(), 1), ("11".to_string(), 3)]
        .into_iter()
        .collect();
    let lines = histogram_lines(&counts, 4);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("11 ███ 3"));
    assert!(lines[1].starts_with("01 █ 1"));
}
