//! State-vector Simulator Demo
//!
//! Runs each demo circuit on the local simulator and prints its histogram.
//!
//! Environment:
//! - `QSIM_CONFIG`: optional JSON config file; otherwise `QSIM_*` variables
//! - `QSIM_SHOTS`: shots per circuit (default 1000)
//! - `QSIM_SEED`: fixed sampling seed
//! - `RUST_LOG`: log filter (default `info`)

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qsim_adapter_sim::{SimulatorBackend, SimulatorConfig};
use qsim_demos::{all_demos, print_counts, print_header, print_result, print_section};
use qsim_hal::{Backend, RunOptions};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::var("QSIM_CONFIG") {
        Ok(path) => SimulatorConfig::from_file(&path)
            .with_context(|| format!("loading simulator config from {path}"))?,
        Err(_) => SimulatorConfig::from_env(),
    };
    let backend = SimulatorBackend::with_config(config).context("invalid simulator config")?;

    let shots: i64 = match std::env::var("QSIM_SHOTS") {
        Ok(raw) => raw.parse().context("QSIM_SHOTS must be an integer")?,
        Err(_) => 1000,
    };
    let mut options = RunOptions::shots(shots)?;
    if let Ok(raw) = std::env::var("QSIM_SEED") {
        options = options.with_seed(raw.parse().context("QSIM_SEED must be a u64")?);
    }

    print_header("qsim State-vector Simulator");
    let caps = backend.capabilities();
    print_result("Backend", backend.name());
    print_result("Max qubits", caps.num_qubits);
    print_result("Max shots", caps.max_shots);

    for demo in all_demos()? {
        print_section(demo.name);
        info!(circuit = demo.circuit.name(), "Running demo circuit");

        let result = backend.run(&demo.circuit, &options)?;
        print_result("Qubits", demo.circuit.num_qubits());
        print_result("Gates", demo.circuit.num_gates());
        print_result("Expected", demo.expectation);
        if let Some(ms) = result.execution_time_ms() {
            print_result("Time", format!("{ms} ms"));
        }
        if let Some(seed) = result.metadata().and_then(|m| m.get("seed")) {
            print_result("Seed", seed);
        }
        print_counts(result.counts());
    }

    println!();
    Ok(())
}
