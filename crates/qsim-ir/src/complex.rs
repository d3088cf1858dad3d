//! Complex scalar helpers.
//!
//! Amplitudes and matrix entries are [`Complex64`] values: `Copy`, immutable,
//! with `+`, `-`, `*`, [`Complex64::conj`] and [`Complex64::norm_sqr`]
//! provided by `num-complex`. This module only adds the constants and short
//! constructors the gate tables are written with.

pub use num_complex::Complex64;

/// `0 + 0i`.
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// `1 + 0i`.
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// `0 + 1i`.
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// Purely real value.
#[inline]
pub const fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

/// Purely imaginary value.
#[inline]
pub const fn ci(im: f64) -> Complex64 {
    Complex64::new(0.0, im)
}

/// Check that two values agree within `tol` (Euclidean distance).
#[inline]
pub fn approx_eq(a: Complex64, b: Complex64, tol: f64) -> bool {
    (a - b).norm() <= tol
}
