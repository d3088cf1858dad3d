//! qsim Demo Suite
//!
//! Small circuits with well-known measurement statistics, plus the terminal
//! helpers the demo binary prints them with:
//!
//! - **Superposition**: H on qubit 0 of a two-qubit register
//! - **Bell / GHZ**: entangled registers reading all-zeros or all-ones
//! - **Toffoli**: X, X, CCX reading `"111"` on every shot

use console::style;

use qsim_hal::Counts;
use qsim_ir::{Circuit, IrResult, QubitId};

/// A named demo circuit and what it should read.
pub struct Demo {
    /// Display name.
    pub name: &'static str,
    /// Expected outcome, for the printed summary.
    pub expectation: &'static str,
    /// The circuit to run.
    pub circuit: Circuit,
}

/// H on qubit 0 of two qubits: `"00"` and `"10"` each half the time.
pub fn superposition() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("superposition", 2);
    circuit.h(QubitId(0))?.measure_all()?;
    Ok(circuit)
}

/// X on both controls, then Toffoli: always `"111"`.
pub fn toffoli() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("toffoli", 3);
    circuit
        .x(QubitId(0))?
        .x(QubitId(1))?
        .ccx(QubitId(0), QubitId(1), QubitId(2))?
        .measure_all()?;
    Ok(circuit)
}

/// Every demo, in the order the binary runs them.
pub fn all_demos() -> IrResult<Vec<Demo>> {
    Ok(vec![
        Demo {
            name: "Superposition",
            expectation: "\"00\" and \"10\" at ~50% each",
            circuit: superposition()?,
        },
        Demo {
            name: "Bell state",
            expectation: "\"00\" and \"11\" at ~50% each",
            circuit: Circuit::bell()?,
        },
        Demo {
            name: "GHZ (5 qubits)",
            expectation: "\"00000\" and \"11111\" at ~50% each",
            circuit: Circuit::ghz(5)?,
        },
        Demo {
            name: "Toffoli",
            expectation: "\"111\" on every shot",
            circuit: toffoli()?,
        },
    ])
}

/// Render a histogram as text bars, most frequent first.
pub fn histogram_lines(counts: &Counts, width: usize) -> Vec<String> {
    let total = counts.total_shots().max(1);
    counts
        .sorted()
        .into_iter()
        .map(|(bitstring, &count)| {
            let fraction = count as f64 / total as f64;
            let bar = "█".repeat((fraction * width as f64).round() as usize);
            format!("{bitstring} {bar} {count} ({:.1}%)", fraction * 100.0)
        })
        .collect()
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a histogram.
pub fn print_counts(counts: &Counts) {
    for line in histogram_lines(counts, 30) {
        println!("    {line}");
    }
}
