//! Simulator configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (JSON)
//! 2. Environment variables (with QSIM_ prefix)
//!
//! Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

use qsim_hal::{HalError, HalResult};

use crate::statevector::MAX_STATEVECTOR_QUBITS;

/// Tunables for [`SimulatorBackend`](crate::SimulatorBackend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Largest register accepted (memory is 16 bytes · 2^n)
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Largest shot count accepted per run
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,

    /// Register width from which gate kernels split work across threads
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: u32,

    /// Sample shot batches on the rayon pool
    #[serde(default = "default_true")]
    pub parallel_shots: bool,

    /// Allowed |Σp − 1| before the distribution is renormalised
    #[serde(default = "default_norm_tolerance")]
    pub norm_tolerance: f64,
}

// Default value functions
fn default_max_qubits() -> u32 {
    24
}

fn default_max_shots() -> u32 {
    1_000_000
}

fn default_parallel_threshold() -> u32 {
    14
}

fn default_true() -> bool {
    true
}

fn default_norm_tolerance() -> f64 {
    1e-9
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            max_shots: default_max_shots(),
            parallel_threshold: default_parallel_threshold(),
            parallel_shots: default_true(),
            norm_tolerance: default_norm_tolerance(),
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HalResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON document.
    pub fn from_json(contents: &str) -> HalResult<Self> {
        let config: SimulatorConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their default value.
    pub fn from_env() -> Self {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup.
    fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("QSIM_MAX_QUBITS").and_then(|v| v.parse().ok()) {
            self.max_qubits = val;
        }
        if let Some(val) = lookup("QSIM_MAX_SHOTS").and_then(|v| v.parse().ok()) {
            self.max_shots = val;
        }
        if let Some(val) = lookup("QSIM_PARALLEL_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.parallel_threshold = val;
        }
        if let Some(val) = lookup("QSIM_PARALLEL_SHOTS").and_then(|v| v.parse().ok()) {
            self.parallel_shots = val;
        }
        if let Some(val) = lookup("QSIM_NORM_TOLERANCE").and_then(|v| v.parse().ok()) {
            self.norm_tolerance = val;
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> HalResult<()> {
        if self.max_qubits == 0 {
            return Err(HalError::Configuration(
                "max_qubits must be at least 1".into(),
            ));
        }
        if self.max_qubits > MAX_STATEVECTOR_QUBITS {
            return Err(HalError::Configuration(format!(
                "max_qubits {} exceeds the dense state-vector limit of {}",
                self.max_qubits, MAX_STATEVECTOR_QUBITS
            )));
        }
        if self.max_shots == 0 {
            return Err(HalError::Configuration(
                "max_shots must be at least 1".into(),
            ));
        }
        if !self.norm_tolerance.is_finite() || self.norm_tolerance <= 0.0 {
            return Err(HalError::Configuration(format!(
                "norm_tolerance must be a positive finite number, got {}",
                self.norm_tolerance
            )));
        }
        Ok(())
    }
}
