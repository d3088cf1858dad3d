//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors raised while constructing gates and circuits.
///
/// Every variant is raised before the offending gate or instruction becomes
/// observable, so a `Gate` or `Circuit` value is always well formed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate arity outside `1..=MAX_GATE_QUBITS`.
    #[error("Gate '{gate_name}' has unsupported arity {num_qubits}")]
    InvalidArity {
        /// Name of the gate.
        gate_name: String,
        /// Declared arity.
        num_qubits: u32,
    },

    /// Matrix length does not match `(2^k)^2` for the declared arity.
    #[error(
        "Gate '{gate_name}' declares {num_qubits} qubits and needs {expected} matrix entries, got {got}"
    )]
    MatrixDimension {
        /// Name of the gate.
        gate_name: String,
        /// Declared arity.
        num_qubits: u32,
        /// Expected number of entries (row-major).
        expected: usize,
        /// Actual number of entries supplied.
        got: usize,
    },

    /// Qubit index is outside the register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Register width.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Measurement instruction lists no qubits.
    #[error("Measurement must name at least one qubit")]
    EmptyMeasurement,

    /// Matrix failed an explicit unitarity check.
    #[error("Gate '{gate_name}' is not unitary (max deviation from identity {deviation:e})")]
    NotUnitary {
        /// Name of the gate.
        gate_name: String,
        /// Largest entry-wise deviation of `U†U` from `I`.
        deviation: f64,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
