//! Simulator backend implementation.

use serde_json::json;
use std::time::Instant;
use tracing::{debug, instrument};

use qsim_hal::{
    Backend, Capabilities, ExecutionResult, HalError, HalResult, RunOptions, ValidationResult,
};
use qsim_ir::Circuit;

use crate::config::SimulatorConfig;
use crate::sampler::ShotSampler;
use crate::statevector::{MAX_STATEVECTOR_QUBITS, Statevector};

/// Local simulator backend.
///
/// Runs every gate once on a dense statevector, then samples the requested
/// number of shots from the final distribution. Memory grows as 16 bytes ·
/// 2^n, so the register width is capped by [`SimulatorConfig::max_qubits`].
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    config: SimulatorConfig,
    capabilities: Capabilities,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(SimulatorConfig::default())
    }

    /// Create a simulator with custom max qubits.
    ///
    /// The width is clamped to `1..=MAX_STATEVECTOR_QUBITS`.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(SimulatorConfig {
            max_qubits: max_qubits.clamp(1, MAX_STATEVECTOR_QUBITS),
            ..SimulatorConfig::default()
        })
    }

    /// Create a simulator from a validated configuration.
    pub fn with_config(config: SimulatorConfig) -> HalResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulatorConfig) -> Self {
        let capabilities = Capabilities::simulator(config.max_qubits, config.max_shots);
        Self {
            config,
            capabilities,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Check a circuit against this backend's limits.
    fn check_circuit(&self, circuit: &Circuit) -> HalResult<()> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.config.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator supports max {}",
                num_qubits, self.config.max_qubits
            )));
        }
        if circuit.measured_qubits().is_empty() {
            return Err(HalError::InvalidCircuit(format!(
                "Circuit '{}' has no measurement",
                circuit.name()
            )));
        }
        Ok(())
    }

    fn check_shots(&self, shots: u32) -> HalResult<()> {
        if shots > self.config.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{} shots requested but simulator supports max {}",
                shots, self.config.max_shots
            )));
        }
        Ok(())
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        match self.check_circuit(circuit) {
            Ok(()) => Ok(ValidationResult::Valid),
            Err(HalError::CircuitTooLarge(reason) | HalError::InvalidCircuit(reason)) => {
                Ok(ValidationResult::Invalid { reason })
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(
        skip(self, circuit, options),
        fields(circuit = circuit.name(), num_qubits = circuit.num_qubits(), shots = options.num_shots())
    )]
    fn run(&self, circuit: &Circuit, options: &RunOptions) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        let shots = options.num_shots();

        self.check_shots(shots)?;
        self.check_circuit(circuit)?;

        let num_qubits = circuit.num_qubits();
        debug!(
            "Starting simulation: {} qubits, {} gates, {} shots",
            num_qubits,
            circuit.num_gates(),
            shots
        );

        let mut state = Statevector::new(num_qubits)?
            .with_parallel_threshold(self.config.parallel_threshold as usize);
        for instruction in circuit.instructions() {
            options.check_cancelled()?;
            state.apply(instruction)?;
        }

        let measured: Vec<usize> = circuit
            .measured_qubits()
            .into_iter()
            .map(|q| q.index())
            .collect();
        let sampler = ShotSampler::new(
            &state.probabilities(),
            measured.clone(),
            self.config.norm_tolerance,
        )?;

        let seed = options.seed().unwrap_or_else(rand::random);
        let counts = sampler.sample_counts(shots, seed, self.config.parallel_shots, options)?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            "Simulation complete in {}ms: {} distinct outcomes",
            elapsed,
            counts.len()
        );

        let metadata = json!({
            "seed": seed,
            "measured_qubits": measured,
            "norm_drift": sampler.norm_drift(),
            "renormalized": sampler.renormalized(),
        });

        let mut result = ExecutionResult::new(counts, shots)?
            .with_execution_time(elapsed)
            .with_metadata(metadata);
        if options.include_statevector() {
            result = result.with_statevector(state.into_amplitudes());
        }
        Ok(result)
    }
}
