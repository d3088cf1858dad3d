//! qsim Local Statevector Simulator
//!
//! This crate provides the engine behind qsim: a dense statevector with a
//! single coset kernel for gates of any arity, and a seeded batch sampler
//! that turns the final state into a measurement histogram.
//!
//! # Features
//!
//! - **Exact Simulation**: every gate is applied once to the full statevector
//! - **Any Gate Arity**: custom k-qubit unitaries run through the same kernel
//!   as the standard library
//! - **Reproducible Sampling**: a fixed seed gives the same histogram whether
//!   shot batches run sequentially or on the rayon pool
//! - **Configurable**: limits and thresholds from JSON or `QSIM_*` variables
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//! | 30+ | ~16 GB+ | Not recommended |
//!
//! # Example
//!
//! ```rust
//! use qsim_adapter_sim::SimulatorBackend;
//! use qsim_hal::{Backend, RunOptions};
//! use qsim_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("toffoli", 3);
//! circuit
//!     .x(QubitId(0)).unwrap()
//!     .x(QubitId(1)).unwrap()
//!     .ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap()
//!     .measure_all().unwrap();
//!
//! let backend = SimulatorBackend::new();
//! let result = backend
//!     .run(&circuit, &RunOptions::shots(1000).unwrap().with_seed(42))
//!     .unwrap();
//!
//! assert_eq!(result.counts().get("111"), 1000);
//! ```

pub mod config;
pub mod sampler;
mod simulator;
pub mod statevector;

pub use config::SimulatorConfig;
pub use sampler::{SHOT_BATCH, ShotSampler};
pub use simulator::SimulatorBackend;
pub use statevector::{MAX_STATEVECTOR_QUBITS, Statevector};
