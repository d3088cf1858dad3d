//! Standard gate library.
//!
//! Fixed gates are `const` tables shared by every [`Gate`] that refers to
//! them. Rotation gates compute their matrix once, at construction, from the
//! closed-form `cos(θ/2)` / `sin(θ/2)` expressions and keep `θ` as a
//! parameter.
//!
//! All tables follow the ordering documented in [`crate::gate`]: the first
//! target is the least-significant bit of the local index.
//!
//! | Gate | Qubits | Targets |
//! |------|--------|---------|
//! | `x`, `y`, `z` | 1 | `[q]` |
//! | `h`, `s`, `t` | 1 | `[q]` |
//! | `rx`, `ry`, `rz` | 1 | `[q]` |
//! | `cx`, `cz`, `ch` | 2 | `[control, target]` |
//! | `swap`, `iswap` | 2 | `[q1, q2]` |
//! | `ccx` | 3 | `[control1, control2, target]` |

use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;

use crate::complex::{I, ONE, ZERO, c, ci};
use crate::gate::Gate;

const H_: Complex64 = c(FRAC_1_SQRT_2);
const NH: Complex64 = c(-FRAC_1_SQRT_2);
const NI: Complex64 = ci(-1.0);
const NO: Complex64 = c(-1.0);

// ---------------------------------------------------------------------------
// Single-qubit tables
// ---------------------------------------------------------------------------

const X_MATRIX: [Complex64; 4] = [ZERO, ONE, ONE, ZERO];

const Y_MATRIX: [Complex64; 4] = [ZERO, NI, I, ZERO];

const Z_MATRIX: [Complex64; 4] = [ONE, ZERO, ZERO, NO];

const H_MATRIX: [Complex64; 4] = [H_, H_, H_, NH];

const S_MATRIX: [Complex64; 4] = [ONE, ZERO, ZERO, I];

// e^{iπ/4} = (1 + i)/√2
const T_MATRIX: [Complex64; 4] = [
    ONE,
    ZERO,
    ZERO,
    Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
];

// ---------------------------------------------------------------------------
// Two-qubit tables, local index = q0 + 2·q1
// ---------------------------------------------------------------------------

// |c=1,t=0⟩ (1) ↔ |c=1,t=1⟩ (3)
#[rustfmt::skip]
const CX_MATRIX: [Complex64; 16] = [
    ONE,  ZERO, ZERO, ZERO,
    ZERO, ZERO, ZERO, ONE,
    ZERO, ZERO, ONE,  ZERO,
    ZERO, ONE,  ZERO, ZERO,
];

#[rustfmt::skip]
const CZ_MATRIX: [Complex64; 16] = [
    ONE,  ZERO, ZERO, ZERO,
    ZERO, ONE,  ZERO, ZERO,
    ZERO, ZERO, ONE,  ZERO,
    ZERO, ZERO, ZERO, NO,
];

#[rustfmt::skip]
const SWAP_MATRIX: [Complex64; 16] = [
    ONE,  ZERO, ZERO, ZERO,
    ZERO, ZERO, ONE,  ZERO,
    ZERO, ONE,  ZERO, ZERO,
    ZERO, ZERO, ZERO, ONE,
];

#[rustfmt::skip]
const ISWAP_MATRIX: [Complex64; 16] = [
    ONE,  ZERO, ZERO, ZERO,
    ZERO, ZERO, I,    ZERO,
    ZERO, I,    ZERO, ZERO,
    ZERO, ZERO, ZERO, ONE,
];

// H acts on the target (bit 1) of the control=1 subspace {1, 3}.
#[rustfmt::skip]
const CH_MATRIX: [Complex64; 16] = [
    ONE,  ZERO, ZERO, ZERO,
    ZERO, H_,   ZERO, H_,
    ZERO, ZERO, ONE,  ZERO,
    ZERO, H_,   ZERO, NH,
];

// ---------------------------------------------------------------------------
// Three-qubit tables, local index = c1 + 2·c2 + 4·t
// ---------------------------------------------------------------------------

// |c1=1,c2=1,t=0⟩ (3) ↔ |c1=1,c2=1,t=1⟩ (7)
#[rustfmt::skip]
const CCX_MATRIX: [Complex64; 64] = [
    ONE,  ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO,
    ZERO, ONE,  ZERO, ZERO, ZERO, ZERO, ZERO, ZERO,
    ZERO, ZERO, ONE,  ZERO, ZERO, ZERO, ZERO, ZERO,
    ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE,
    ZERO, ZERO, ZERO, ZERO, ONE,  ZERO, ZERO, ZERO,
    ZERO, ZERO, ZERO, ZERO, ZERO, ONE,  ZERO, ZERO,
    ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE,  ZERO,
    ZERO, ZERO, ZERO, ONE,  ZERO, ZERO, ZERO, ZERO,
];

/// Pauli-X gate.
pub const X: Gate = Gate::fixed("x", 1, &X_MATRIX);
/// Pauli-Y gate.
pub const Y: Gate = Gate::fixed("y", 1, &Y_MATRIX);
/// Pauli-Z gate.
pub const Z: Gate = Gate::fixed("z", 1, &Z_MATRIX);
/// Hadamard gate.
pub const H: Gate = Gate::fixed("h", 1, &H_MATRIX);
/// S gate (sqrt(Z)).
pub const S: Gate = Gate::fixed("s", 1, &S_MATRIX);
/// T gate (fourth root of Z).
pub const T: Gate = Gate::fixed("t", 1, &T_MATRIX);
/// Controlled-X (CNOT), targets `[control, target]`.
pub const CX: Gate = Gate::fixed("cx", 2, &CX_MATRIX);
/// Controlled-Z gate.
pub const CZ: Gate = Gate::fixed("cz", 2, &CZ_MATRIX);
/// SWAP gate.
pub const SWAP: Gate = Gate::fixed("swap", 2, &SWAP_MATRIX);
/// iSWAP gate.
pub const ISWAP: Gate = Gate::fixed("iswap", 2, &ISWAP_MATRIX);
/// Controlled-Hadamard, targets `[control, target]`.
pub const CH: Gate = Gate::fixed("ch", 2, &CH_MATRIX);
/// Toffoli (CCX), targets `[control1, control2, target]`.
pub const CCX: Gate = Gate::fixed("ccx", 3, &CCX_MATRIX);

/// Rotation around the X axis.
///
/// ```text
/// [ cos(θ/2)    -i sin(θ/2) ]
/// [ -i sin(θ/2)  cos(θ/2)   ]
/// ```
pub fn rx(theta: f64) -> Gate {
    let (s, c_) = (theta / 2.0).sin_cos();
    rotation("rx", theta, [c(c_), ci(-s), ci(-s), c(c_)])
}

/// Rotation around the Y axis.
///
/// ```text
/// [ cos(θ/2)  -sin(θ/2) ]
/// [ sin(θ/2)   cos(θ/2) ]
/// ```
pub fn ry(theta: f64) -> Gate {
    let (s, c_) = (theta / 2.0).sin_cos();
    rotation("ry", theta, [c(c_), c(-s), c(s), c(c_)])
}

/// Rotation around the Z axis: `diag(e^{-iθ/2}, e^{iθ/2})`.
pub fn rz(theta: f64) -> Gate {
    let (s, c_) = (theta / 2.0).sin_cos();
    rotation(
        "rz",
        theta,
        [Complex64::new(c_, -s), ZERO, ZERO, Complex64::new(c_, s)],
    )
}

fn rotation(name: &'static str, theta: f64, matrix: [Complex64; 4]) -> Gate {
    Gate::owned(name, 1, matrix.to_vec()).with_angles(vec![theta])
}

/// Every fixed gate in the library.
pub fn fixed_gates() -> [Gate; 12] {
    [X, Y, Z, H, S, T, CX, CZ, SWAP, ISWAP, CH, CCX]
}

/// Look up a fixed gate by its lower-case name.
pub fn by_name(name: &str) -> Option<Gate> {
    fixed_gates().into_iter().find(|g| g.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fixed_dimensions() {
        for gate in fixed_gates() {
            let dim = gate.dim();
            assert_eq!(gate.matrix().len(), dim * dim, "gate {}", gate.name());
        }
    }

    #[test]
    fn test_all_unitary() {
        for gate in fixed_gates() {
            assert!(
                gate.validate_unitary(1e-12).is_ok(),
                "gate {} is not unitary",
                gate.name()
            );
        }
        for theta in [0.0, 0.3, PI / 2.0, PI, 2.5 * PI, -1.1] {
            for gate in [rx(theta), ry(theta), rz(theta)] {
                assert!(gate.validate_unitary(1e-12).is_ok());
            }
        }
    }

    #[test]
    fn test_rotation_params() {
        let gate = ry(0.75);
        assert_eq!(gate.name(), "ry");
        assert_eq!(gate.params(), &[0.75]);
        assert_eq!(gate.dagger().params(), &[-0.75]);
        assert_eq!(X.params().len(), 0);
    }

    #[test]
    fn test_rx_pi_is_x_up_to_phase() {
        let gate = rx(PI);
        // rx(π) = -i·X
        assert!((gate.entry(0, 1) - ci(-1.0)).norm() < 1e-12);
        assert!(gate.entry(0, 0).norm() < 1e-12);
    }

    #[test]
    fn test_cx_orientation() {
        // Control is bit 0: |c=1,t=0⟩ = 1 maps to |c=1,t=1⟩ = 3.
        assert_eq!(CX.entry(3, 1), ONE);
        assert_eq!(CX.entry(1, 3), ONE);
        // Control 0: target untouched.
        assert_eq!(CX.entry(2, 2), ONE);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("ccx").map(|g| g.num_qubits()), Some(3));
        assert!(by_name("rx").is_none());
        assert!(by_name("nope").is_none());
    }
}
