//! Dense Gauss-Jordan solver for linear systems
//!
//! This crate solves `Ax = b` for dense, real-valued, possibly rectangular
//! systems. Solvability is decided by the Rouché–Capelli criterion
//! (a solution exists iff rank(A) == rank([A|b])) before any elimination
//! takes place.
//!
//! # Features
//!
//! - **Gauss-Jordan elimination** to reduced row-echelon form, with
//!   first-non-zero or largest-magnitude pivot selection
//! - **Numerical rank** with the same zero tolerance as the solver
//! - **Underdetermined systems**: a particular solution with free variables at zero
//! - **Diagnostics**: inconsistent systems report both ranks and the augmented matrix
//! - **Generic Scalar Types**: Works with f64, f32
//! - **System files**: JSON or TOML input for the `gauss-solve` binary
//!
//! # Example
//!
//! ```
//! use math_audio_gauss::gauss_jordan_solve;
//! use ndarray::array;
//!
//! let a = array![[2.0_f64, 1.0], [1.0, 3.0]];
//! let b = array![5.0_f64, 10.0];
//!
//! let x = gauss_jordan_solve(&a, &b).unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-10);
//! assert!((x[1] - 3.0).abs() < 1e-10);
//! ```

pub mod dense;
pub mod direct;
pub mod error;
pub mod io;
pub mod traits;

// Re-export main types
pub use error::{GaussError, Result, SystemDiagnostics};
pub use traits::RealField;

// Re-export direct solvers
pub use direct::{
    Classification, GaussJordanSolution, GaussJordanSolver, PivotStrategy, SolverConfig,
    SystemKind, ZeroRowCheck, gauss_jordan_solve, matrix_rank, matrix_rank_with_tolerance,
};

pub use dense::{augment, matrix_from_rows, residual_norm};

/// Default `f64` tolerance for floating-point comparisons
/// (see [`RealField::default_tolerance`] for other scalar types).
/// Used throughout the library for:
/// - Pivot selection
/// - Zero-row detection
/// - Rank computation
pub const EPSILON: f64 = 1e-10;
