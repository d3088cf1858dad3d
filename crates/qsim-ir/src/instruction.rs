//! Circuit instructions combining gates with operands.

use serde::Serialize;

use crate::gate::Gate;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InstructionKind {
    /// A unitary gate applied to ordered targets.
    Gate(Gate),
    /// Measurement request over a set of qubits.
    Measure,
}

/// A complete instruction with operands.
///
/// For gates, `qubits` is the ordered target list matching the gate's
/// local basis ordering. For measurements it is the set of measured qubits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit measurement instruction.
    pub fn measure(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
        }
    }

    /// Create a multi-qubit measurement instruction.
    pub fn measure_many(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
        }
    }

    /// Check if this is a gate.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// The gate, if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Measure => None,
        }
    }
}
