//! Per-run execution options.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{HalError, HalResult};

/// Caller-driven cancellation flag.
///
/// Clones share one flag. Backends poll it between whole gate applications
/// and between shot batches.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Options for one run of a circuit.
#[derive(Debug, Clone)]
pub struct RunOptions {
    shots: u32,
    seed: Option<u64>,
    include_statevector: bool,
    cancel: Option<CancelToken>,
}

impl RunOptions {
    /// Create options for `shots` measurement shots.
    ///
    /// Fails with [`HalError::InvalidShots`] if `shots` is zero, negative or
    /// larger than `u32::MAX`.
    pub fn shots(shots: i64) -> HalResult<Self> {
        if shots <= 0 {
            return Err(HalError::InvalidShots(format!(
                "shots must be > 0, got {shots}"
            )));
        }
        let shots = u32::try_from(shots).map_err(|_| {
            HalError::InvalidShots(format!("shots must be at most {}, got {shots}", u32::MAX))
        })?;
        Ok(Self {
            shots,
            seed: None,
            include_statevector: false,
            cancel: None,
        })
    }

    /// Fix the sampling seed for reproducible histograms.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Return the final amplitudes alongside the histogram.
    #[must_use]
    pub fn with_statevector(mut self, include: bool) -> Self {
        self.include_statevector = include;
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Number of shots.
    pub fn num_shots(&self) -> u32 {
        self.shots
    }

    /// Sampling seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether the final amplitudes are returned.
    pub fn include_statevector(&self) -> bool {
        self.include_statevector
    }

    /// Check the cancellation token, failing with [`HalError::Cancelled`].
    pub fn check_cancelled(&self) -> HalResult<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(HalError::Cancelled),
            _ => Ok(()),
        }
    }
}
