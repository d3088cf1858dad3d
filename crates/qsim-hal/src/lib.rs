//! qsim Backend Abstraction
//!
//! This crate defines the surface between circuits and the engines that run
//! them:
//! - A common [`Backend`] trait with [`Capabilities`] and circuit validation
//! - [`RunOptions`] carrying the shot count, seed and [`CancelToken`]
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qsim_adapter_sim::SimulatorBackend;
//! use qsim_hal::{Backend, RunOptions};
//! use qsim_ir::Circuit;
//!
//! let circuit = Circuit::bell()?;
//! let backend = SimulatorBackend::new();
//!
//! let result = backend.run(&circuit, &RunOptions::shots(1000)?.with_seed(7))?;
//! if let Some((bitstring, count)) = result.counts().most_frequent() {
//!     println!("Most frequent: {} ({} times)", bitstring, count);
//! }
//! ```

pub mod backend;
pub mod error;
pub mod options;
pub mod result;

pub use backend::{Backend, Capabilities, ValidationResult};
pub use error::{HalError, HalResult};
pub use options::{CancelToken, RunOptions};
pub use result::{Counts, ExecutionResult};
