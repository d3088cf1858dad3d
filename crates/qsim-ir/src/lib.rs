//! qsim Circuit Model
//!
//! This crate provides the data types consumed by the qsim state-vector
//! simulator: complex amplitudes, gates as plain unitary matrices, the
//! standard gate library and the circuit builder.
//!
//! # Core Components
//!
//! - **Complex scalars**: [`Complex64`] plus helpers in [`complex`]
//! - **Gates**: [`Gate`], a uniform `{name, arity, matrix}` record for every
//!   arity, and the [`standard`] library
//! - **Instructions**: [`Instruction`] combining a gate or a measurement with
//!   its qubits
//! - **Circuit**: [`Circuit`], the chainable builder
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsim_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_gates(), 2);
//! ```
//!
//! # Example: Custom Gate
//!
//! ```rust
//! use qsim_ir::{Circuit, Gate, QubitId};
//! use qsim_ir::complex::{ONE, ZERO};
//!
//! // A matrix must have exactly 4^k entries for a k-qubit gate.
//! let flip = Gate::new("flip", 1, vec![ZERO, ONE, ONE, ZERO]).unwrap();
//! assert!(Gate::new("broken", 2, vec![ONE; 4]).is_err());
//!
//! let mut circuit = Circuit::with_size("custom", 1);
//! circuit.gate(flip, [QubitId(0)]).unwrap();
//! ```

pub mod circuit;
pub mod complex;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod standard;

pub use circuit::Circuit;
pub use complex::Complex64;
pub use error::{IrError, IrResult};
pub use gate::{Gate, MAX_GATE_QUBITS};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
