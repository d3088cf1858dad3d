//! Backend trait and capabilities.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (&ref)            (circuit)      (circuit, options)
//! ```
//!
//! Execution is synchronous: a run performs no I/O and either returns a
//! complete [`ExecutionResult`] or fails without producing one.

use serde::{Deserialize, Serialize};

use qsim_ir::Circuit;

use crate::error::HalResult;
use crate::options::RunOptions;
use crate::result::ExecutionResult;

/// Static description of what a backend can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Largest register the backend accepts.
    pub num_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Capability flags, e.g. `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a state-vector simulator.
    pub fn simulator(num_qubits: u32, max_shots: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            max_shots,
            is_simulator: true,
            features: vec!["statevector".into()],
        }
    }

    /// Check for a capability flag.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Result of checking a circuit against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be run as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Why the circuit was rejected.
        reason: String,
    },
}

impl ValidationResult {
    /// Check if the circuit is runnable.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for circuit execution backends.
///
/// # Contract
///
/// - `capabilities()` is infallible and cached at construction time.
/// - `validate()` reports constraint violations without running anything.
/// - `run()` executes the whole circuit; the returned histogram sums to
///   exactly `options.num_shots()`.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Execute a circuit and sample its measurement statistics.
    fn run(&self, circuit: &Circuit, options: &RunOptions) -> HalResult<ExecutionResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20, 100_000);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.has_feature("statevector"));
        assert!(!caps.has_feature("mid_circuit_measurement"));
    }

    #[test]
    fn test_validation_result() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(
            !ValidationResult::Invalid {
                reason: "too wide".into()
            }
            .is_valid()
        );
    }
}
