//! High-level circuit builder API.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;
use crate::standard;

/// A quantum circuit over a fixed-size register.
///
/// Operations are appended in program order through the chainable builder
/// methods. Each append is validated first; an invalid instruction is
/// rejected with an [`IrError`] and the circuit is left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Register width.
    num_qubits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit with `num_qubits` qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
                Some(gate.name())
            }
            InstructionKind::Measure => {
                if instruction.qubits.is_empty() {
                    return Err(IrError::EmptyMeasurement);
                }
                None
            }
        };

        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name.map(str::to_string),
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.map(str::to_string),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::S, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::T, [qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::rx(theta), [qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::ry(theta), [qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::rz(theta), [qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::CZ, [control, target])
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::CH, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::SWAP, [q1, q2])
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::ISWAP, [q1, q2])
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(standard::CCX, [c1, c2, target])
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate to ordered targets.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Measure a single qubit.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit))
    }

    /// Measure a set of qubits with one instruction.
    pub fn measure_qubits(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::measure_many(qubits))
    }

    /// Measure every qubit, one instruction per qubit in ascending order.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for q in 0..self.num_qubits {
            self.measure(QubitId(q))?;
        }
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Total number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Number of gate instructions.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Gates in program order with their targets.
    pub fn gates(&self) -> impl Iterator<Item = (&Gate, &[QubitId])> {
        self.instructions
            .iter()
            .filter_map(|i| i.as_gate().map(|g| (g, i.qubits.as_slice())))
    }

    /// Check whether any qubit is measured.
    pub fn has_measurement(&self) -> bool {
        self.instructions
            .iter()
            .any(|i| i.is_measure() && !i.qubits.is_empty())
    }

    /// Union of all measured qubits, ascending and deduplicated.
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<_> = self
            .instructions
            .iter()
            .filter(|i| i.is_measure())
            .flat_map(|i| i.qubits.iter().copied())
            .collect();
        qubits.sort_unstable();
        qubits.dedup();
        qubits
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a measured Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2);
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure_all()?;
        Ok(circuit)
    }

    /// Create a measured GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_ops(), 0);
        assert!(!circuit.has_measurement());
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0))
            .unwrap()
            .measure(QubitId(1))
            .unwrap();

        assert_eq!(circuit.num_ops(), 4);
        assert_eq!(circuit.num_gates(), 2);
        assert!(circuit.has_measurement());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.x(QubitId(2)).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitOutOfRange {
                qubit: QubitId(2),
                num_qubits: 2,
                ..
            }
        ));
        assert_eq!(circuit.num_ops(), 0);

        assert!(circuit.measure(QubitId(5)).is_err());
    }

    #[test]
    fn test_duplicate_targets_rejected() {
        let mut circuit = Circuit::with_size("test", 3);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(1), .. }));

        let err = circuit
            .ccx(QubitId(0), QubitId(2), QubitId(0))
            .unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(0), .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let mut circuit = Circuit::with_size("test", 3);
        let err = circuit
            .gate(standard::CX, [QubitId(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_measure_all_ascending() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.measure_all().unwrap();

        let measured: Vec<_> = circuit
            .instructions()
            .iter()
            .map(|i| i.qubits.clone())
            .collect();
        assert_eq!(
            measured,
            vec![vec![QubitId(0)], vec![QubitId(1)], vec![QubitId(2)]]
        );
    }

    #[test]
    fn test_measured_qubits_union() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit
            .measure(QubitId(3))
            .unwrap()
            .measure_qubits([QubitId(1), QubitId(3)])
            .unwrap();
        assert_eq!(circuit.measured_qubits(), vec![QubitId(1), QubitId(3)]);
    }

    #[test]
    fn test_empty_measurement_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();

        let err = circuit.measure_qubits(Vec::<QubitId>::new()).unwrap_err();
        assert!(matches!(err, IrError::EmptyMeasurement));
        assert_eq!(circuit.num_ops(), 1);
        assert!(!circuit.has_measurement());
    }

    #[test]
    fn test_parameterized_gate() {
        let mut circuit = Circuit::with_size("test", 1);
        circuit.rx(PI / 2.0, QubitId(0)).unwrap();

        let (gate, targets) = circuit.gates().next().unwrap();
        assert_eq!(gate.name(), "rx");
        assert_eq!(gate.params(), &[PI / 2.0]);
        assert_eq!(targets, &[QubitId(0)]);
    }

    #[test]
    fn test_bell_and_ghz() {
        let bell = Circuit::bell().unwrap();
        assert_eq!(bell.num_qubits(), 2);
        assert_eq!(bell.num_gates(), 2);
        assert_eq!(bell.measured_qubits().len(), 2);

        let ghz = Circuit::ghz(5).unwrap();
        assert_eq!(ghz.num_gates(), 5);
        assert_eq!(ghz.measured_qubits().len(), 5);

        assert_eq!(Circuit::ghz(0).unwrap().num_ops(), 0);
    }
}
