//! Error types for the Gauss-Jordan solver.
//!
//! Two kinds of failure exist: the system has no solution (a mathematical
//! property of the input, never retried), or the input itself is malformed.
//! Helper methods classify the variants into those two kinds.

use ndarray::{Array1, Array2};
use thiserror::Error;

/// Snapshot of an unsolvable system, kept so callers can explain why.
///
/// Values are widened to `f64` so the error type stays independent of the
/// solver's scalar type.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemDiagnostics {
    /// Original coefficient matrix A (n × m)
    pub matrix: Array2<f64>,
    /// Original right-hand side b (n)
    pub rhs: Array1<f64>,
    /// Augmented matrix [A|b] (n × (m + 1)) as built before elimination
    pub augmented: Array2<f64>,
}

/// Errors that can occur while solving a linear system.
#[derive(Debug, Error)]
pub enum GaussError {
    /// A row of A is all zero but its right-hand side is not.
    #[error("no solution: row {row} has only zero coefficients but right-hand side {rhs}")]
    ZeroRow {
        /// Index of the offending equation
        row: usize,
        /// Its right-hand side value
        rhs: f64,
    },

    /// rank(A) < rank([A|b]): the equations contradict each other.
    #[error(
        "no solution: system is inconsistent (rank of matrix {rank_matrix} < rank of augmented matrix {rank_augmented})"
    )]
    Inconsistent {
        /// Rank of the coefficient matrix
        rank_matrix: usize,
        /// Rank of the augmented matrix
        rank_augmented: usize,
        /// Inputs and augmented matrix at the time of failure
        diagnostics: Box<SystemDiagnostics>,
    },

    /// The system has no equations or no unknowns.
    #[error("empty system: {rows} rows, {cols} columns (both must be > 0)")]
    EmptySystem {
        /// Number of rows supplied
        rows: usize,
        /// Number of columns supplied
        cols: usize,
    },

    /// A row of the coefficient matrix has the wrong length.
    #[error("ragged matrix: row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of this row
        got: usize,
    },

    /// The right-hand side length does not match the number of rows.
    #[error("right-hand side dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Number of rows in A
        expected: usize,
        /// Length of b
        got: usize,
    },

    /// NaN or infinity in the input. `col == m` designates the right-hand side.
    #[error("non-finite value at row {row}, column {col}")]
    NonFiniteValue {
        /// Row index
        row: usize,
        /// Column index in the augmented matrix
        col: usize,
    },

    /// Tolerance must be finite and non-negative.
    #[error("invalid tolerance: {tolerance} (must be finite and >= 0)")]
    InvalidTolerance {
        /// The rejected tolerance
        tolerance: f64,
    },
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, GaussError>;

impl GaussError {
    /// Returns `true` if the system was well formed but has no solution.
    ///
    /// This includes `ZeroRow` and `Inconsistent`.
    pub fn is_no_solution(&self) -> bool {
        matches!(
            self,
            GaussError::ZeroRow { .. } | GaussError::Inconsistent { .. }
        )
    }

    /// Returns `true` if the input was rejected before any elimination.
    pub fn is_invalid_input(&self) -> bool {
        !self.is_no_solution()
    }

    /// Diagnostic snapshot, present only for `Inconsistent`.
    pub fn diagnostics(&self) -> Option<&SystemDiagnostics> {
        match self {
            GaussError::Inconsistent { diagnostics, .. } => Some(&**diagnostics),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn inconsistent() -> GaussError {
        GaussError::Inconsistent {
            rank_matrix: 1,
            rank_augmented: 2,
            diagnostics: Box::new(SystemDiagnostics {
                matrix: array![[1.0, 1.0], [2.0, 2.0]],
                rhs: array![2.0, 5.0],
                augmented: array![[1.0, 1.0, 2.0], [2.0, 2.0, 5.0]],
            }),
        }
    }

    #[test]
    fn test_error_display() {
        let err = GaussError::ZeroRow { row: 0, rhs: 5.0 };
        assert_eq!(
            err.to_string(),
            "no solution: row 0 has only zero coefficients but right-hand side 5"
        );

        let err = GaussError::RaggedRow {
            row: 2,
            expected: 3,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "ragged matrix: row 2 has 1 columns, expected 3"
        );
    }

    #[test]
    fn test_inconsistent_display_mentions_ranks() {
        let msg = inconsistent().to_string();
        assert!(msg.contains("rank of matrix 1"));
        assert!(msg.contains("rank of augmented matrix 2"));
    }

    #[test]
    fn test_is_no_solution() {
        assert!(GaussError::ZeroRow { row: 0, rhs: 1.0 }.is_no_solution());
        assert!(inconsistent().is_no_solution());

        let dim_err = GaussError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert!(!dim_err.is_no_solution());
        assert!(dim_err.is_invalid_input());
    }

    #[test]
    fn test_diagnostics_only_on_inconsistent() {
        let err = inconsistent();
        let diag = err.diagnostics().expect("inconsistent carries diagnostics");
        assert_eq!(diag.augmented.ncols(), 3);
        assert_eq!(diag.rhs[1], 5.0);

        let err = GaussError::EmptySystem { rows: 0, cols: 2 };
        assert!(err.diagnostics().is_none());
    }
}
