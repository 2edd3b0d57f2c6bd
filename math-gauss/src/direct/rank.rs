//! Numerical rank by Gaussian elimination
//!
//! Reduces a private copy of the matrix to upper-triangular form. Columns
//! with no usable pivot at or below the current row are discarded by
//! copying the last live column into their slot, so the number of pivot
//! rows produced is the rank.

use crate::traits::RealField;
use ndarray::{Array2, ArrayView2};

/// Rank of `matrix` using the scalar type's [`RealField::default_tolerance`].
pub fn matrix_rank<T: RealField>(matrix: &Array2<T>) -> usize {
    matrix_rank_with_tolerance(&matrix.view(), T::default_tolerance())
}

/// Rank of `matrix`, treating entries with `|v| <= tol` as zero.
///
/// The caller's matrix is never modified.
pub fn matrix_rank_with_tolerance<T: RealField>(matrix: &ArrayView2<T>, tol: T) -> usize {
    let mut work = matrix.to_owned();
    let rows = work.nrows();
    let mut live_cols = work.ncols();
    let mut row = 0;

    while row < rows && row < live_cols {
        if work[[row, row]].is_negligible(tol) {
            let below = ((row + 1)..rows).find(|&i| work[[i, row]].is_significant(tol));
            match below {
                Some(i) => swap_rows(&mut work, row, i),
                None => {
                    // Column exhausted: drop it and retry this row.
                    live_cols -= 1;
                    if row < live_cols {
                        for i in 0..rows {
                            work[[i, row]] = work[[i, live_cols]];
                        }
                    }
                    continue;
                }
            }
        }

        let pivot = work[[row, row]];
        for i in (row + 1)..rows {
            let factor = work[[i, row]] / pivot;
            if factor == T::zero() {
                continue;
            }
            for j in row..live_cols {
                let update = factor * work[[row, j]];
                work[[i, j]] -= update;
            }
        }
        row += 1;
    }

    log::trace!(
        "rank of {}x{} matrix: {} (tol {})",
        matrix.nrows(),
        matrix.ncols(),
        row,
        tol
    );
    row
}

fn swap_rows<T: RealField>(matrix: &mut Array2<T>, a: usize, b: usize) {
    for j in 0..matrix.ncols() {
        matrix.swap([a, j], [b, j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rank_identity() {
        for k in 1..=6 {
            let eye = Array2::<f64>::eye(k);
            assert_eq!(matrix_rank(&eye), k);
        }
    }

    #[test]
    fn test_rank_zero_matrix() {
        assert_eq!(matrix_rank(&Array2::<f64>::zeros((3, 4))), 0);
        assert_eq!(matrix_rank(&Array2::<f64>::zeros((1, 1))), 0);
        assert_eq!(matrix_rank(&Array2::<f64>::zeros((5, 2))), 0);
    }

    #[test]
    fn test_rank_deficient() {
        let a = array![[1.0_f64, 1.0], [2.0, 2.0]];
        assert_eq!(matrix_rank(&a), 1);

        let a = array![[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert_eq!(matrix_rank(&a), 2);
    }

    #[test]
    fn test_rank_augmented_inconsistent() {
        // [A|b] for x + y = 2, 2x + 2y = 5
        let aug = array![[1.0_f64, 1.0, 2.0], [2.0, 2.0, 5.0]];
        assert_eq!(matrix_rank(&aug), 2);
    }

    #[test]
    fn test_rank_wide_matrix_uses_every_column() {
        assert_eq!(matrix_rank(&array![[0.0_f64, 0.0, 1.0]]), 1);
        assert_eq!(matrix_rank(&array![[0.0_f64, 0.0, 5.0], [0.0, 0.0, 1.0]]), 1);
    }

    #[test]
    fn test_rank_tall_matrix() {
        let a = array![[1.0_f64, 0.0], [0.0, 0.0], [0.0, 0.0], [2.0, 1.0]];
        assert_eq!(matrix_rank(&a), 2);
    }

    #[test]
    fn test_rank_needs_row_swap() {
        let a = array![[0.0_f64, 1.0], [1.0, 0.0]];
        assert_eq!(matrix_rank(&a), 2);
    }

    #[test]
    fn test_rank_does_not_mutate_input() {
        let a = array![[0.0_f64, 1.0, 2.0], [3.0, 4.0, 5.0]];
        let before = a.clone();
        let _ = matrix_rank(&a);
        assert_eq!(a, before);
    }

    #[test]
    fn test_rank_tolerance() {
        let a = array![[1.0_f64, 0.0], [0.0, 1e-12]];
        assert_eq!(matrix_rank(&a), 1);
        assert_eq!(matrix_rank_with_tolerance(&a.view(), 0.0), 2);
    }

    #[test]
    fn test_rank_f32() {
        let a = array![[2.0_f32, 4.0], [1.0, 2.0]];
        assert_eq!(matrix_rank(&a), 1);
    }

    #[test]
    fn test_rank_f32_inexact_entries() {
        // 0.1 and 0.3 are not representable; the eliminated entry is rounding noise.
        let a = array![[0.1_f32, 0.2], [0.3, 0.6]];
        assert_eq!(matrix_rank(&a), 1);
        let augmented = array![[0.1_f32, 0.2, 0.3], [0.3, 0.6, 0.9]];
        assert_eq!(matrix_rank(&augmented), 1);
    }
}
