//! Shot sampling from a final probability distribution.
//!
//! The distribution is turned into a cumulative table once; every shot is a
//! uniform draw inverted by binary search. Shots are cut into fixed batches,
//! each with its own seeded RNG stream, so the histogram for a given seed does
//! not depend on how batches are scheduled.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use qsim_hal::{Counts, HalError, HalResult, RunOptions};

/// Number of shots drawn from one RNG stream.
pub const SHOT_BATCH: u32 = 1024;

/// Sampler over the basis states of one final statevector.
#[derive(Debug, Clone)]
pub struct ShotSampler {
    /// Cumulative probabilities, last entry ≈ 1.0.
    cdf: Vec<f64>,
    /// Highest basis index with nonzero probability.
    last_support: usize,
    /// Measured qubits, ascending.
    measured: Vec<usize>,
    /// Σp − 1 before any correction.
    norm_drift: f64,
    renormalized: bool,
}

impl ShotSampler {
    /// Build a sampler from basis-state probabilities.
    ///
    /// If the total deviates from 1 by more than `norm_tolerance` the
    /// distribution is rescaled and the drift is logged. A distribution with
    /// no weight fails with [`HalError::Numerical`].
    pub fn new(
        probabilities: &[f64],
        measured: Vec<usize>,
        norm_tolerance: f64,
    ) -> HalResult<Self> {
        let total: f64 = probabilities.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(HalError::Numerical(format!(
                "state has total probability {total}"
            )));
        }

        let norm_drift = total - 1.0;
        let renormalized = norm_drift.abs() > norm_tolerance;
        let scale = if renormalized {
            warn!(
                drift = norm_drift,
                tolerance = norm_tolerance,
                "State norm drifted, renormalising before sampling"
            );
            1.0 / total
        } else {
            1.0
        };

        let mut cdf = Vec::with_capacity(probabilities.len());
        let mut acc = 0.0;
        let mut last_support = 0;
        for (i, &p) in probabilities.iter().enumerate() {
            if p > 0.0 {
                last_support = i;
            }
            acc += p * scale;
            cdf.push(acc);
        }

        Ok(Self {
            cdf,
            last_support,
            measured,
            norm_drift,
            renormalized,
        })
    }

    /// Σp − 1 of the input distribution.
    pub fn norm_drift(&self) -> f64 {
        self.norm_drift
    }

    /// Whether the input distribution was rescaled.
    pub fn renormalized(&self) -> bool {
        self.renormalized
    }

    /// Measured qubits, ascending.
    pub fn measured(&self) -> &[usize] {
        &self.measured
    }

    /// Basis index selected by a uniform draw `u ∈ [0, 1)`.
    ///
    /// Returns the smallest index whose cumulative probability exceeds `u`.
    /// Draws past the last entry (rounding) map to the last index with
    /// nonzero probability.
    #[inline]
    pub fn sample_index(&self, u: f64) -> usize {
        let idx = self.cdf.partition_point(|&c| c <= u);
        idx.min(self.last_support)
    }

    /// Project a basis index onto the measured qubits, lowest qubit first.
    pub fn bitstring(&self, index: usize) -> String {
        self.measured
            .iter()
            .map(|&q| if (index >> q) & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// Draw `shots` samples from one seeded stream.
    pub fn sample_batch(&self, shots: u32, rng: &mut impl Rng) -> FxHashMap<usize, u64> {
        let mut hist = FxHashMap::default();
        for _ in 0..shots {
            let u: f64 = rng.r#gen();
            *hist.entry(self.sample_index(u)).or_insert(0) += 1;
        }
        hist
    }

    /// Draw `shots` samples and aggregate them into bitstring counts.
    ///
    /// Batch `b` draws from `StdRng` seeded with `batch_seed(seed, b)`;
    /// batches run on the rayon pool when `parallel` is set. The cancellation
    /// token in `options` is checked before each batch.
    pub fn sample_counts(
        &self,
        shots: u32,
        seed: u64,
        parallel: bool,
        options: &RunOptions,
    ) -> HalResult<Counts> {
        let num_batches = shots.div_ceil(SHOT_BATCH);
        debug!(shots, num_batches, parallel, "Sampling shots");

        let run_batch = |b: u32| -> HalResult<FxHashMap<usize, u64>> {
            options.check_cancelled()?;
            let size = SHOT_BATCH.min(shots - b * SHOT_BATCH);
            let mut rng = StdRng::seed_from_u64(batch_seed(seed, b));
            Ok(self.sample_batch(size, &mut rng))
        };

        let partials: Vec<FxHashMap<usize, u64>> = if parallel && num_batches > 1 {
            (0..num_batches)
                .into_par_iter()
                .map(run_batch)
                .collect::<HalResult<_>>()?
        } else {
            (0..num_batches).map(run_batch).collect::<HalResult<_>>()?
        };

        let mut merged: FxHashMap<usize, u64> = FxHashMap::default();
        for partial in partials {
            for (index, count) in partial {
                *merged.entry(index).or_insert(0) += count;
            }
        }

        // Distinct basis states can share a bitstring when some qubits are
        // unmeasured; Counts::insert adds.
        let mut counts = Counts::new();
        for (index, count) in merged {
            counts.insert(self.bitstring(index), count);
        }
        Ok(counts)
    }
}

/// Seed for batch `batch` of a run seeded with `seed` (splitmix64 finaliser).
pub fn batch_seed(seed: u64, batch: u32) -> u64 {
    let offset = u64::from(batch)
        .wrapping_add(1)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut z = seed.wrapping_add(offset);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_hal::CancelToken;

    fn options() -> RunOptions {
        RunOptions::shots(1).unwrap()
    }

    #[test]
    fn test_sample_index_inverts_cdf() {
        let sampler = ShotSampler::new(&[0.25, 0.0, 0.5, 0.25], vec![0, 1], 1e-9).unwrap();
        assert_eq!(sampler.sample_index(0.0), 0);
        assert_eq!(sampler.sample_index(0.2499), 0);
        assert_eq!(sampler.sample_index(0.25), 2);
        assert_eq!(sampler.sample_index(0.74), 2);
        assert_eq!(sampler.sample_index(0.75), 3);
        assert_eq!(sampler.sample_index(0.999_999), 3);
    }

    #[test]
    fn test_rounding_overshoot_maps_to_support() {
        // Last entries carry no weight; a draw at the top must not land there.
        let sampler = ShotSampler::new(&[0.5, 0.5 - 1e-12, 0.0, 0.0], vec![0, 1], 1e-9).unwrap();
        assert_eq!(sampler.sample_index(0.999_999_999_999_9), 1);
        assert_eq!(sampler.sample_index(1.0), 1);
    }

    #[test]
    fn test_bitstring_lowest_qubit_first() {
        let sampler = ShotSampler::new(&[0.0, 1.0, 0.0, 0.0], vec![0, 1], 1e-9).unwrap();
        assert_eq!(sampler.bitstring(0b01), "10");
        assert_eq!(sampler.bitstring(0b10), "01");

        let partial = ShotSampler::new(&[0.125; 8], vec![0, 2], 1e-9).unwrap();
        assert_eq!(partial.bitstring(0b110), "01");
        assert_eq!(partial.bitstring(0b011), "10");
    }

    #[test]
    fn test_zero_norm_rejected() {
        assert!(matches!(
            ShotSampler::new(&[0.0, 0.0], vec![0], 1e-9),
            Err(HalError::Numerical(_))
        ));
        assert!(ShotSampler::new(&[f64::NAN, 1.0], vec![0], 1e-9).is_err());
    }

    #[test]
    fn test_drift_renormalised() {
        let sampler = ShotSampler::new(&[0.6, 0.6], vec![0], 1e-9).unwrap();
        assert!(sampler.renormalized());
        assert!((sampler.norm_drift() - 0.2).abs() < 1e-12);
        assert_eq!(sampler.sample_index(0.49), 0);
        assert_eq!(sampler.sample_index(0.51), 1);

        let exact = ShotSampler::new(&[0.5, 0.5], vec![0], 1e-9).unwrap();
        assert!(!exact.renormalized());
    }

    #[test]
    fn test_counts_sum_to_shots() {
        let sampler = ShotSampler::new(&[0.25; 4], vec![0, 1], 1e-9).unwrap();
        for shots in [1, 7, SHOT_BATCH, SHOT_BATCH + 1, 5000] {
            let counts = sampler.sample_counts(shots, 3, true, &options()).unwrap();
            assert_eq!(counts.total_shots(), u64::from(shots));
        }
    }

    #[test]
    fn test_unmeasured_qubits_merge() {
        // Only qubit 1 is measured; indices 0 and 1 both read "0".
        let sampler = ShotSampler::new(&[0.5, 0.5, 0.0, 0.0], vec![1], 1e-9).unwrap();
        let counts = sampler.sample_counts(100, 1, false, &options()).unwrap();
        assert_eq!(counts.get("0"), 100);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sampler = ShotSampler::new(&[0.1, 0.2, 0.3, 0.4], vec![0, 1], 1e-9).unwrap();
        let seq = sampler.sample_counts(10_000, 99, false, &options()).unwrap();
        let par = sampler.sample_counts(10_000, 99, true, &options()).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_batch_seeds_distinct() {
        let seeds: Vec<u64> = (0..64).map(|b| batch_seed(7, b)).collect();
        let mut unique = seeds.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seeds.len());
        assert_ne!(batch_seed(7, 0), batch_seed(8, 0));
    }

    #[test]
    fn test_cancelled_before_sampling() {
        let token = CancelToken::new();
        token.cancel();
        let options = RunOptions::shots(10).unwrap().with_cancel_token(token);
        let sampler = ShotSampler::new(&[1.0, 0.0], vec![0], 1e-9).unwrap();
        assert!(matches!(
            sampler.sample_counts(10, 0, false, &options),
            Err(HalError::Cancelled)
        ));
    }
}
