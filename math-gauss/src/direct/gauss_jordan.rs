//! Gauss-Jordan solver
//!
//! Solves dense systems `Ax = b` (square or rectangular) by reducing the
//! augmented matrix `[A|b]` to reduced row-echelon form. Solvability is
//! decided up front by comparing rank(A) with rank([A|b]); free variables
//! of an underdetermined system are set to zero.

use super::rank::matrix_rank_with_tolerance;
use crate::dense::{augment, residual_norm, to_f64_matrix, to_f64_vector, validate_system};
use crate::error::{GaussError, Result, SystemDiagnostics};
use crate::traits::RealField;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// How the pivot row is chosen for each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotStrategy {
    /// First unused row with a non-negligible entry
    #[default]
    FirstNonZero,
    /// Unused row with the largest magnitude entry (partial pivoting)
    LargestMagnitude,
}

/// Which right-hand sides make an all-zero coefficient row fail early.
///
/// A zero row with a non-zero right-hand side of either sign is always
/// rejected in the end; this only decides whether the early check or the
/// rank comparison reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRowCheck {
    /// Fail early only when `b[i] >= tol`
    #[default]
    PositiveRhs,
    /// Fail early when `|b[i]| >= tol`
    Symmetric,
}

/// Solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Entries with `|v| <= tolerance` are treated as zero everywhere.
    /// `None` uses [`RealField::default_tolerance`] of the scalar type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Pivot selection
    #[serde(default)]
    pub pivoting: PivotStrategy,
    /// Early zero-row rejection policy
    #[serde(default)]
    pub zero_row_check: ZeroRowCheck,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: None,
            pivoting: PivotStrategy::default(),
            zero_row_check: ZeroRowCheck::default(),
        }
    }
}

/// Solvability of a system by the Rouché–Capelli criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    /// rank(A) == rank([A|b]) == number of unknowns
    Unique,
    /// rank(A) == rank([A|b]) < number of unknowns
    Underdetermined {
        /// Number of free variables
        degrees_of_freedom: usize,
    },
    /// rank(A) < rank([A|b])
    Inconsistent,
}

/// Ranks behind a [`SystemKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Rank of the coefficient matrix
    pub rank_matrix: usize,
    /// Rank of the augmented matrix
    pub rank_augmented: usize,
    /// Number of unknowns (columns of A)
    pub unknowns: usize,
}

impl Classification {
    /// Rouché–Capelli verdict
    pub fn kind(&self) -> SystemKind {
        if self.rank_matrix < self.rank_augmented {
            SystemKind::Inconsistent
        } else if self.rank_matrix < self.unknowns {
            SystemKind::Underdetermined {
                degrees_of_freedom: self.unknowns - self.rank_matrix,
            }
        } else {
            SystemKind::Unique
        }
    }
}

/// Gauss-Jordan solver result
#[derive(Debug, Clone)]
pub struct GaussJordanSolution<T: RealField> {
    /// Solution vector (free variables are zero)
    pub x: Array1<T>,
    /// Rank of the coefficient matrix
    pub rank: usize,
    /// Column of each pivot, in elimination order
    pub pivot_columns: Vec<usize>,
    /// Columns without a pivot
    pub free_variables: Vec<usize>,
    /// Augmented matrix in reduced row-echelon form
    pub reduced: Array2<T>,
    /// `max_i |(A x)_i - b_i|`
    pub residual: T,
}

impl<T: RealField> GaussJordanSolution<T> {
    /// Whether the solution is the only one
    pub fn is_unique(&self) -> bool {
        self.free_variables.is_empty()
    }

    /// Classification of the solved system
    pub fn kind(&self) -> SystemKind {
        if self.is_unique() {
            SystemKind::Unique
        } else {
            SystemKind::Underdetermined {
                degrees_of_freedom: self.free_variables.len(),
            }
        }
    }
}

/// Dense Gauss-Jordan solver
#[derive(Debug, Clone, Default)]
pub struct GaussJordanSolver {
    config: SolverConfig,
}

impl GaussJordanSolver {
    /// Create a solver with the given configuration
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `Ax = b`, returning only the solution vector.
    pub fn solve<T: RealField>(&self, a: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>> {
        self.solve_detailed(a, b).map(|solution| solution.x)
    }

    /// Solve `Ax = b` and report rank, pivots, free variables and residual.
    ///
    /// # Errors
    /// - invalid input (empty, mismatched, non-finite, bad tolerance)
    /// - [`GaussError::ZeroRow`] when a zero coefficient row has a non-zero
    ///   right-hand side (see [`ZeroRowCheck`])
    /// - [`GaussError::Inconsistent`] when rank(A) < rank([A|b])
    pub fn solve_detailed<T: RealField>(
        &self,
        a: &Array2<T>,
        b: &Array1<T>,
    ) -> Result<GaussJordanSolution<T>> {
        let a = a.view();
        let b = b.view();
        let tol = self.tolerance::<T>()?;
        validate_system(&a, &b)?;

        self.check_zero_rows(&a, &b, tol)?;

        let mut augmented = augment(&a, &b);
        let rank_matrix = matrix_rank_with_tolerance(&a, tol);
        let rank_augmented = matrix_rank_with_tolerance(&augmented.view(), tol);
        log::debug!(
            "rank(A) = {}, rank(A|b) = {} for {}x{} system",
            rank_matrix,
            rank_augmented,
            a.nrows(),
            a.ncols()
        );
        if rank_matrix < rank_augmented {
            return Err(GaussError::Inconsistent {
                rank_matrix,
                rank_augmented,
                diagnostics: Box::new(SystemDiagnostics {
                    matrix: to_f64_matrix(&a),
                    rhs: to_f64_vector(&b),
                    augmented: to_f64_matrix(&augmented.view()),
                }),
            });
        }

        let pivot_columns = self.reduce(&mut augmented, tol);
        let x = back_substitute(&augmented, tol);

        let m = a.ncols();
        let free_variables: Vec<usize> = (0..m).filter(|c| !pivot_columns.contains(c)).collect();
        let residual = residual_norm(&a, &x.view(), &b);

        Ok(GaussJordanSolution {
            x,
            rank: rank_matrix,
            pivot_columns,
            free_variables,
            reduced: augmented,
            residual,
        })
    }

    /// Classify `Ax = b` without solving it.
    pub fn classify<T: RealField>(&self, a: &Array2<T>, b: &Array1<T>) -> Result<Classification> {
        let a = a.view();
        let b = b.view();
        let tol = self.tolerance::<T>()?;
        validate_system(&a, &b)?;

        let classification = Classification {
            rank_matrix: matrix_rank_with_tolerance(&a, tol),
            rank_augmented: matrix_rank_with_tolerance(&augment(&a, &b).view(), tol),
            unknowns: a.ncols(),
        };
        log::debug!(
            "classified {}x{} system as {:?}",
            a.nrows(),
            a.ncols(),
            classification
        );
        Ok(classification)
    }

    /// Tolerance in effect for scalar type `T`
    pub fn tolerance<T: RealField>(&self) -> Result<T> {
        let Some(tolerance) = self.config.tolerance else {
            return Ok(T::default_tolerance());
        };
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(GaussError::InvalidTolerance { tolerance });
        }
        if tolerance == 0.0 {
            log::warn!("tolerance is 0: rounding noise will be treated as significant");
        }
        Ok(T::from_f64_lossy(tolerance))
    }

    fn check_zero_rows<T: RealField>(
        &self,
        a: &ArrayView2<T>,
        b: &ArrayView1<T>,
        tol: T,
    ) -> Result<()> {
        for (row, (coefficients, &rhs)) in a.rows().into_iter().zip(b.iter()).enumerate() {
            if !coefficients.iter().all(|v| v.is_negligible(tol)) {
                continue;
            }
            let rejected = match self.config.zero_row_check {
                ZeroRowCheck::PositiveRhs => rhs >= tol,
                ZeroRowCheck::Symmetric => rhs.abs() >= tol,
            };
            if rejected {
                return Err(GaussError::ZeroRow {
                    row,
                    rhs: rhs.to_f64_lossless(),
                });
            }
        }
        Ok(())
    }

    /// Reduce `augmented` in place to reduced row-echelon form.
    ///
    /// Returns the pivot column of each pivot row in elimination order.
    fn reduce<T: RealField>(&self, augmented: &mut Array2<T>, tol: T) -> Vec<usize> {
        let (n, width) = augmented.dim();
        let m = width - 1;
        let mut used_rows = vec![false; n];
        let mut pivot_columns = Vec::with_capacity(m.min(n));

        for col in 0..m {
            let Some(pivot_row) = self.select_pivot(augmented, &used_rows, col, tol) else {
                log::trace!("column {} has no pivot, free variable", col);
                continue;
            };
            used_rows[pivot_row] = true;
            pivot_columns.push(col);
            log::trace!("column {}: pivot row {}", col, pivot_row);

            let pivot = augmented[[pivot_row, col]];
            for j in col..=m {
                augmented[[pivot_row, j]] /= pivot;
            }

            for row in 0..n {
                if row == pivot_row {
                    continue;
                }
                let factor = augmented[[row, col]];
                if factor == T::zero() {
                    continue;
                }
                for j in col..=m {
                    let update = factor * augmented[[pivot_row, j]];
                    augmented[[row, j]] -= update;
                }
            }
        }

        pivot_columns
    }

    fn select_pivot<T: RealField>(
        &self,
        augmented: &Array2<T>,
        used_rows: &[bool],
        col: usize,
        tol: T,
    ) -> Option<usize> {
        let mut candidates = (0..augmented.nrows())
            .filter(|&row| !used_rows[row] && augmented[[row, col]].is_significant(tol));

        match self.config.pivoting {
            PivotStrategy::FirstNonZero => candidates.next(),
            PivotStrategy::LargestMagnitude => candidates.fold(None, |best: Option<usize>, row| {
                match best {
                    Some(b) if augmented[[b, col]].abs() >= augmented[[row, col]].abs() => best,
                    _ => Some(row),
                }
            }),
        }
    }
}

/// Read the solution off a reduced augmented matrix, last row first.
fn back_substitute<T: RealField>(reduced: &Array2<T>, tol: T) -> Array1<T> {
    let (n, width) = reduced.dim();
    let m = width - 1;
    let mut x = Array1::from_elem(m, T::zero());

    for row in (0..n).rev() {
        let Some(col) = (0..m).find(|&j| reduced[[row, j]].is_significant(tol)) else {
            continue;
        };
        let mut value = reduced[[row, m]];
        for j in (col + 1)..m {
            value -= reduced[[row, j]] * x[j];
        }
        x[col] = value;
    }

    x
}

/// Solve `Ax = b` by Gauss-Jordan elimination with the default configuration.
///
/// This is a convenience function equivalent to
/// `GaussJordanSolver::default().solve(a, b)`.
pub fn gauss_jordan_solve<T: RealField>(a: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>> {
    GaussJordanSolver::default().solve(a, b)
}
