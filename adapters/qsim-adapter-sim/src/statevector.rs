//! Statevector simulation engine.
//!
//! Every gate, whatever its arity, goes through one coset kernel: the 2^n
//! amplitudes split into 2^(n−k) groups that differ only in the target bits,
//! and each group is a 2^k vector multiplied by the gate matrix.

use num_complex::Complex64;
use rayon::prelude::*;

use qsim_hal::{HalError, HalResult};
use qsim_ir::complex::{ONE, ZERO};
use qsim_ir::{Gate, Instruction, InstructionKind};

/// Widest register a dense statevector is built for.
pub const MAX_STATEVECTOR_QUBITS: u32 = 40;

/// A statevector representing a quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
    /// Register width from which gates run on the rayon pool.
    parallel_threshold: Option<usize>,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Fails with [`HalError::CircuitTooLarge`] above
    /// [`MAX_STATEVECTOR_QUBITS`] or if the 2^n amplitudes cannot be
    /// allocated.
    pub fn new(num_qubits: usize) -> HalResult<Self> {
        if num_qubits > MAX_STATEVECTOR_QUBITS as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "{num_qubits} qubits exceeds the statevector limit of {MAX_STATEVECTOR_QUBITS}"
            )));
        }
        let size = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| {
            HalError::CircuitTooLarge(format!(
                "2^{num_qubits} amplitudes overflow the address space"
            ))
        })?;

        let mut amplitudes = Vec::new();
        amplitudes.try_reserve_exact(size).map_err(|e| {
            HalError::CircuitTooLarge(format!(
                "cannot allocate {size} amplitudes for {num_qubits} qubits: {e}"
            ))
        })?;
        amplitudes.resize(size, ZERO);
        amplitudes[0] = ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
            parallel_threshold: None,
        })
    }

    /// Wrap existing amplitudes. The length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> HalResult<Self> {
        if amplitudes.is_empty() || !amplitudes.len().is_power_of_two() {
            return Err(HalError::Numerical(format!(
                "amplitude count {} is not a power of two",
                amplitudes.len()
            )));
        }
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        Ok(Self {
            amplitudes,
            num_qubits,
            parallel_threshold: None,
        })
    }

    /// Split gate kernels across threads once the register has at least
    /// `threshold` qubits.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector, returning its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Squared norm, Σ|a_i|².
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Measurement probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements leave the vector untouched; they only select which
    /// qubits appear in sampled bitstrings.
    pub fn apply(&mut self, instruction: &Instruction) -> HalResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let targets: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_gate(gate, &targets)
            }
            InstructionKind::Measure => Ok(()),
        }
    }

    /// Apply a gate to ordered targets. `targets[0]` is the least significant
    /// bit of the gate's local basis index.
    pub fn apply_gate(&mut self, gate: &Gate, targets: &[usize]) -> HalResult<()> {
        self.check_targets(gate, targets)?;
        let kernel = CosetKernel::new(gate, targets);

        let highest = kernel.sorted_targets.last().copied().unwrap_or(0);
        let block_len = 1usize << (highest + 1);
        let parallel = self
            .parallel_threshold
            .is_some_and(|threshold| self.num_qubits >= threshold)
            && highest + 1 < self.num_qubits;

        if parallel {
            // Each block holds whole cosets, so blocks never share an amplitude.
            self.amplitudes.par_chunks_mut(block_len).for_each_init(
                || kernel.scratch(),
                |scratch, block| kernel.apply_block(block, scratch),
            );
        } else {
            let mut scratch = kernel.scratch();
            kernel.apply_block(&mut self.amplitudes, &mut scratch);
        }
        Ok(())
    }

    fn check_targets(&self, gate: &Gate, targets: &[usize]) -> HalResult<()> {
        if targets.len() != gate.num_qubits() as usize {
            return Err(HalError::InvalidCircuit(format!(
                "gate '{}' acts on {} qubits but got {} targets",
                gate.name(),
                gate.num_qubits(),
                targets.len()
            )));
        }
        for (i, &target) in targets.iter().enumerate() {
            if target >= self.num_qubits {
                return Err(HalError::InvalidCircuit(format!(
                    "gate '{}' targets qubit {} in a {}-qubit register",
                    gate.name(),
                    target,
                    self.num_qubits
                )));
            }
            if targets[..i].contains(&target) {
                return Err(HalError::InvalidCircuit(format!(
                    "gate '{}' targets qubit {} twice",
                    gate.name(),
                    target
                )));
            }
        }
        Ok(())
    }
}

/// Precomputed addressing for one gate application.
struct CosetKernel<'a> {
    matrix: &'a [Complex64],
    /// `offsets[j]`: local index j with bit b moved to position `targets[b]`.
    offsets: Vec<usize>,
    /// Target positions in ascending order.
    sorted_targets: Vec<usize>,
}

/// Per-thread gather and product buffers.
struct Scratch {
    gathered: Vec<Complex64>,
    product: Vec<Complex64>,
}

impl<'a> CosetKernel<'a> {
    fn new(gate: &'a Gate, targets: &[usize]) -> Self {
        let dim = gate.dim();
        let offsets = (0..dim)
            .map(|j| {
                targets
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| (j >> bit) & 1 == 1)
                    .fold(0usize, |acc, (_, &pos)| acc | (1 << pos))
            })
            .collect();

        let mut sorted_targets = targets.to_vec();
        sorted_targets.sort_unstable();

        Self {
            matrix: gate.matrix(),
            offsets,
            sorted_targets,
        }
    }

    fn dim(&self) -> usize {
        self.offsets.len()
    }

    fn scratch(&self) -> Scratch {
        Scratch {
            gathered: vec![ZERO; self.dim()],
            product: vec![ZERO; self.dim()],
        }
    }

    /// Basis index of the r-th coset: r with a zero bit inserted at every
    /// target position.
    #[inline]
    fn representative(&self, r: usize) -> usize {
        self.sorted_targets.iter().fold(r, |base, &pos| {
            let low = base & ((1 << pos) - 1);
            ((base >> pos) << (pos + 1)) | low
        })
    }

    /// Apply the gate to every coset inside `block`.
    ///
    /// `block` must be aligned to a multiple of `2^(highest target + 1)`.
    fn apply_block(&self, block: &mut [Complex64], scratch: &mut Scratch) {
        let dim = self.dim();
        let cosets = block.len() / dim;

        for r in 0..cosets {
            let base = self.representative(r);

            for (slot, &offset) in scratch.gathered.iter_mut().zip(&self.offsets) {
                *slot = block[base | offset];
            }

            for (row, out) in scratch.product.iter_mut().enumerate() {
                let coefficients = &self.matrix[row * dim..(row + 1) * dim];
                *out = coefficients
                    .iter()
                    .zip(&scratch.gathered)
                    .fold(ZERO, |acc, (m, a)| acc + m * a);
            }

            for (&value, &offset) in scratch.product.iter().zip(&self.offsets) {
                block[base | offset] = value;
            }
        }
    }
}
