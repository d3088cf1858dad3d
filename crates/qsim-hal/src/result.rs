//! Measurement histograms and execution results.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{HalError, HalResult};

/// Histogram of observed bitstrings.
///
/// Bitstrings list the measured qubits in ascending index order, lowest
/// qubit first: for a register where qubit 0 reads 1 and qubit 1 reads 0 the
/// key is `"10"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring` (0 if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bitstrings observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Pairs sorted by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequently observed bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Empirical frequency of `bitstring` (0.0 for an empty histogram).
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }

    /// Add every count of `other` into this histogram.
    pub fn merge(&mut self, other: Counts) {
        for (bitstring, count) in other.counts {
            self.insert(bitstring, count);
        }
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// Outcome of a completed run.
///
/// Read-only once built: the histogram always sums to `shots`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    counts: Counts,
    shots: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    execution_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statevector: Option<Vec<Complex64>>,
}

impl ExecutionResult {
    /// Wrap a histogram, checking that it accounts for every shot.
    pub fn new(counts: Counts, shots: u32) -> HalResult<Self> {
        let got = counts.total_shots();
        if got != u64::from(shots) {
            return Err(HalError::CountsMismatch {
                expected: u64::from(shots),
                got,
            });
        }
        Ok(Self {
            counts,
            shots,
            execution_time_ms: None,
            metadata: None,
            statevector: None,
        })
    }

    /// Attach the wall-clock execution time.
    #[must_use]
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }

    /// Attach backend-specific metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attach the final amplitudes for diagnostics.
    #[must_use]
    pub fn with_statevector(mut self, amplitudes: Vec<Complex64>) -> Self {
        self.statevector = Some(amplitudes);
        self
    }

    /// The measurement histogram.
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// Number of shots taken.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Empirical frequency of `bitstring`.
    pub fn frequency(&self, bitstring: &str) -> f64 {
        self.counts.probability(bitstring)
    }

    /// Wall-clock execution time, if recorded.
    pub fn execution_time_ms(&self) -> Option<u64> {
        self.execution_time_ms
    }

    /// Backend metadata, if any.
    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    /// Final amplitudes, if requested.
    pub fn statevector(&self) -> Option<&[Complex64]> {
        self.statevector.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("00", 3);
        counts.insert("11", 5);
        counts.insert("00", 2);

        assert_eq!(counts.get("00"), 5);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 10);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.probability("11"), 0.5);
    }

    #[test]
    fn test_sorted_and_most_frequent() {
        let counts: Counts = [("01".to_string(), 4), ("10".to_string(), 4), ("11".to_string(), 9)]
            .into_iter()
            .collect();

        let sorted: Vec<_> = counts.sorted().into_iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(sorted, vec![("11", 9), ("01", 4), ("10", 4)]);
        assert_eq!(counts.most_frequent().map(|(k, _)| k.as_str()), Some("11"));
        assert!(Counts::new().most_frequent().is_none());
    }

    #[test]
    fn test_merge() {
        let mut a: Counts = [("0".to_string(), 1)].into_iter().collect();
        let b: Counts = [("0".to_string(), 2), ("1".to_string(), 7)].into_iter().collect();
        a.merge(b);
        assert_eq!(a.get("0"), 3);
        assert_eq!(a.get("1"), 7);
    }

    #[test]
    fn test_result_requires_exact_total() {
        let counts: Counts = [("0".to_string(), 99)].into_iter().collect();
        let err = ExecutionResult::new(counts, 100).unwrap_err();
        assert!(matches!(
            err,
            HalError::CountsMismatch {
                expected: 100,
                got: 99
            }
        ));
    }

    #[test]
    fn test_result_accessors() {
        let counts: Counts = [("1".to_string(), 10)].into_iter().collect();
        let result = ExecutionResult::new(counts, 10)
            .unwrap()
            .with_execution_time(3)
            .with_metadata(serde_json::json!({"seed": 7}));

        assert_eq!(result.shots(), 10);
        assert_eq!(result.frequency("1"), 1.0);
        assert_eq!(result.execution_time_ms(), Some(3));
        assert_eq!(result.metadata().unwrap()["seed"], 7);
        assert!(result.statevector().is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["counts"]["1"], 10);
        assert_eq!(json["shots"], 10);
    }
}
