//! Quantum gate values.
//!
//! A [`Gate`] is pure data: a name, an arity `k` and a `2^k × 2^k` unitary
//! stored row-major. Gates of every arity share this one representation;
//! how a matrix acts on a register is decided by the simulator, not here.
//!
//! # Local basis ordering
//!
//! For a gate applied to targets `[t0, t1, …, t(k-1)]`, the matrix row/column
//! index `j` has bit `b` equal to the state of qubit `tb`. The first listed
//! target is the least-significant bit. Controlled gates list their controls
//! first, so for `cx` on `[control, target]` the local index is
//! `control + 2·target`.

use std::borrow::Cow;

use num_complex::Complex64;
use serde::Serialize;

use crate::error::{IrError, IrResult};

/// Largest arity accepted by [`Gate::new`].
pub const MAX_GATE_QUBITS: u32 = 12;

/// An immutable k-qubit unitary operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gate {
    name: Cow<'static, str>,
    num_qubits: u32,
    matrix: Cow<'static, [Complex64]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    params: Vec<f64>,
    /// `params` are rotation angles with `U(θ)† = U(−θ)`.
    #[serde(skip)]
    angles: bool,
}

impl Gate {
    /// Create a gate from a row-major matrix.
    ///
    /// Fails if the arity is zero (or unreasonably large) or if the matrix
    /// does not have exactly `4^k` entries. Unitarity is *not* checked here;
    /// call [`Gate::validate_unitary`] for that.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        num_qubits: u32,
        matrix: Vec<Complex64>,
    ) -> IrResult<Self> {
        let name = name.into();
        check_dimension(&name, num_qubits, matrix.len())?;
        Ok(Self {
            name,
            num_qubits,
            matrix: Cow::Owned(matrix),
            params: vec![],
            angles: false,
        })
    }

    /// Create a gate backed by a static table.
    ///
    /// Only used for the built-in library, whose dimensions are covered by
    /// tests.
    pub(crate) const fn fixed(
        name: &'static str,
        num_qubits: u32,
        matrix: &'static [Complex64],
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            num_qubits,
            matrix: Cow::Borrowed(matrix),
            params: Vec::new(),
            angles: false,
        }
    }

    /// Create a gate from a computed matrix of known-good size.
    pub(crate) fn owned(name: &'static str, num_qubits: u32, matrix: Vec<Complex64>) -> Self {
        debug_assert_eq!(matrix.len(), 1 << (2 * num_qubits));
        Self {
            name: Cow::Borrowed(name),
            num_qubits,
            matrix: Cow::Owned(matrix),
            params: vec![],
            angles: false,
        }
    }

    /// Attach the parameters a matrix was computed from.
    ///
    /// Parameters are kept for introspection only; the matrix is never
    /// recomputed from them. They carry no meaning for the inverse, so
    /// [`Gate::dagger`] drops them.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self.angles = false;
        self
    }

    /// Attach rotation angles, for gates where negating every angle yields
    /// the inverse. [`Gate::dagger`] keeps them, negated.
    #[must_use]
    pub fn with_angles(mut self, angles: Vec<f64>) -> Self {
        self.params = angles;
        self.angles = true;
        self
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits this gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Matrix dimension `2^k`.
    #[inline]
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Row-major matrix entries.
    #[inline]
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Matrix entry at `(row, col)`.
    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dim() + col]
    }

    /// Parameters the matrix was built from.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Conjugate transpose `U†` as a new gate.
    ///
    /// Angles attached with [`Gate::with_angles`] are negated; other
    /// parameters are dropped.
    #[must_use]
    pub fn dagger(&self) -> Self {
        let dim = self.dim();
        let mut matrix = Vec::with_capacity(dim * dim);
        for row in 0..dim {
            for col in 0..dim {
                matrix.push(self.entry(col, row).conj());
            }
        }
        Self {
            name: Cow::Owned(format!("{}_dg", self.name)),
            num_qubits: self.num_qubits,
            matrix: Cow::Owned(matrix),
            params: if self.angles {
                self.params.iter().map(|p| -p).collect()
            } else {
                Vec::new()
            },
            angles: self.angles,
        }
    }

    /// Largest entry-wise deviation of `U†U` from the identity.
    pub fn unitarity_deviation(&self) -> f64 {
        let dim = self.dim();
        let mut worst = 0.0_f64;
        for i in 0..dim {
            for j in 0..dim {
                let mut acc = Complex64::new(0.0, 0.0);
                for k in 0..dim {
                    acc += self.entry(k, i).conj() * self.entry(k, j);
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                worst = worst.max((acc - Complex64::new(expected, 0.0)).norm());
            }
        }
        worst
    }

    /// Check `U†U = I` within `tolerance`.
    pub fn validate_unitary(&self, tolerance: f64) -> IrResult<()> {
        let deviation = self.unitarity_deviation();
        if deviation > tolerance {
            return Err(IrError::NotUnitary {
                gate_name: self.name.to_string(),
                deviation,
            });
        }
        Ok(())
    }
}

fn check_dimension(name: &str, num_qubits: u32, len: usize) -> IrResult<()> {
    if num_qubits == 0 || num_qubits > MAX_GATE_QUBITS {
        return Err(IrError::InvalidArity {
            gate_name: name.to_string(),
            num_qubits,
        });
    }
    let dim = 1usize << num_qubits;
    if len != dim * dim {
        return Err(IrError::MatrixDimension {
            gate_name: name.to_string(),
            num_qubits,
            expected: dim * dim,
            got: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::{ONE, ZERO, c, ci};

    #[test]
    fn test_gate_creation() {
        let gate = Gate::new("flip", 1, vec![ZERO, ONE, ONE, ZERO]).unwrap();
        assert_eq!(gate.name(), "flip");
        assert_eq!(gate.num_qubits(), 1);
        assert_eq!(gate.dim(), 2);
        assert_eq!(gate.entry(0, 1), ONE);
        assert!(gate.params().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Gate::new("bad", 2, vec![ONE; 4]).unwrap_err();
        assert!(matches!(
            err,
            IrError::MatrixDimension {
                num_qubits: 2,
                expected: 16,
                got: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_arity_rejected() {
        let err = Gate::new("empty", 0, vec![ONE]).unwrap_err();
        assert!(matches!(err, IrError::InvalidArity { num_qubits: 0, .. }));
    }

    #[test]
    fn test_dagger() {
        let gate = Gate::new("phase", 1, vec![ONE, ZERO, ZERO, ci(1.0)])
            .unwrap()
            .with_angles(vec![0.5]);
        let dg = gate.dagger();
        assert_eq!(dg.name(), "phase_dg");
        assert_eq!(dg.entry(1, 1), ci(-1.0));
        assert_eq!(dg.params(), &[-0.5]);
        assert_eq!(dg.dagger().params(), &[0.5]);
    }

    #[test]
    fn test_dagger_drops_opaque_params() {
        let gate = Gate::new("tagged", 1, vec![ZERO, ONE, ONE, ZERO])
            .unwrap()
            .with_params(vec![3.0, 7.0]);
        let dg = gate.dagger();
        assert!(dg.params().is_empty());
        assert_eq!(dg.entry(0, 1), ONE);
    }

    #[test]
    fn test_validate_unitary() {
        let good = Gate::new("z", 1, vec![ONE, ZERO, ZERO, c(-1.0)]).unwrap();
        assert!(good.validate_unitary(1e-12).is_ok());

        let bad = Gate::new("scale", 1, vec![c(2.0), ZERO, ZERO, ONE]).unwrap();
        assert!(matches!(
            bad.validate_unitary(1e-9),
            Err(IrError::NotUnitary { .. })
        ));
    }
}
