//! Dense matrix helpers
//!
//! Construction, validation and residual evaluation for the dense
//! row-major systems consumed by the direct solvers.

use crate::error::{GaussError, Result};
use crate::traits::RealField;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Build an `n × m` matrix from a slice of rows, rejecting ragged input.
///
/// An empty slice or an empty first row yields [`GaussError::EmptySystem`].
pub fn matrix_from_rows<T: RealField>(rows: &[Vec<T>]) -> Result<Array2<T>> {
    let n = rows.len();
    let m = rows.first().map_or(0, Vec::len);
    if n == 0 || m == 0 {
        return Err(GaussError::EmptySystem { rows: n, cols: m });
    }

    if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != m) {
        return Err(GaussError::RaggedRow {
            row,
            expected: m,
            got: values.len(),
        });
    }

    Ok(Array2::from_shape_fn((n, m), |(i, j)| rows[i][j]))
}

/// Check that `a` and `b` describe a well-formed system `Ax = b`.
pub fn validate_system<T: RealField>(a: &ArrayView2<T>, b: &ArrayView1<T>) -> Result<()> {
    let (n, m) = a.dim();
    if n == 0 || m == 0 {
        return Err(GaussError::EmptySystem { rows: n, cols: m });
    }
    if b.len() != n {
        return Err(GaussError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    if let Some(((row, col), _)) = a.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(GaussError::NonFiniteValue { row, col });
    }
    if let Some((row, _)) = b.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(GaussError::NonFiniteValue { row, col: m });
    }

    Ok(())
}

/// Build the augmented matrix `[A|b]` as a fresh `n × (m + 1)` copy.
pub fn augment<T: RealField>(a: &ArrayView2<T>, b: &ArrayView1<T>) -> Array2<T> {
    let (n, m) = a.dim();
    Array2::from_shape_fn((n, m + 1), |(i, j)| if j < m { a[[i, j]] } else { b[i] })
}

/// Infinity norm of the residual: `max_i |(A x)_i - b_i|`.
pub fn residual_norm<T: RealField>(a: &ArrayView2<T>, x: &ArrayView1<T>, b: &ArrayView1<T>) -> T {
    a.rows()
        .into_iter()
        .zip(b.iter())
        .map(|(row, &bi)| {
            let ax = row
                .iter()
                .zip(x.iter())
                .fold(T::zero(), |acc, (&aij, &xj)| acc + aij * xj);
            (ax - bi).abs()
        })
        .fold(T::zero(), T::max)
}

/// Widen a matrix to `f64` for diagnostics.
pub(crate) fn to_f64_matrix<T: RealField>(a: &ArrayView2<T>) -> Array2<f64> {
    a.mapv(T::to_f64_lossless)
}

/// Widen a vector to `f64` for diagnostics.
pub(crate) fn to_f64_vector<T: RealField>(b: &ArrayView1<T>) -> Array1<f64> {
    b.mapv(T::to_f64_lossless)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_matrix_from_rows() {
        let a = matrix_from_rows(&[vec![1.0_f64, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
            .expect("rectangular input");
        assert_eq!(a.dim(), (2, 3));
        assert_relative_eq!(a[[1, 2]], 6.0);
    }

    #[test]
    fn test_matrix_from_rows_ragged() {
        let err = matrix_from_rows(&[vec![1.0_f64, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            GaussError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            }
        ));

        // A longer later row is ragged too, never silently truncated.
        let err = matrix_from_rows(&[vec![1.0_f64], vec![2.0], vec![3.0, 4.0]]).unwrap_err();
        assert!(matches!(
            err,
            GaussError::RaggedRow {
                row: 2,
                expected: 1,
                got: 2
            }
        ));
    }

    #[test]
    fn test_matrix_from_rows_is_row_major() {
        let rows = vec![vec![1.0_f64, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let a = matrix_from_rows(&rows).expect("rectangular input");
        assert_eq!(a.dim(), (3, 2));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert_relative_eq!(a[[i, j]], v);
            }
        }
    }

    #[test]
    fn test_matrix_from_rows_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            matrix_from_rows(&rows),
            Err(GaussError::EmptySystem { rows: 0, cols: 0 })
        ));
        assert!(matches!(
            matrix_from_rows::<f64>(&[vec![]]),
            Err(GaussError::EmptySystem { rows: 1, cols: 0 })
        ));
    }

    #[test]
    fn test_validate_system() {
        let a = array![[1.0_f64, 2.0], [3.0, 4.0]];
        assert!(validate_system(&a.view(), &array![1.0, 2.0].view()).is_ok());

        let err = validate_system(&a.view(), &array![1.0].view()).unwrap_err();
        assert!(matches!(
            err,
            GaussError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        ));

        let bad = array![[1.0_f64, f64::NAN], [3.0, 4.0]];
        let err = validate_system(&bad.view(), &array![1.0, 2.0].view()).unwrap_err();
        assert!(matches!(err, GaussError::NonFiniteValue { row: 0, col: 1 }));

        let err = validate_system(&a.view(), &array![1.0, f64::INFINITY].view()).unwrap_err();
        assert!(matches!(err, GaussError::NonFiniteValue { row: 1, col: 2 }));
    }

    #[test]
    fn test_augment_is_a_copy() {
        let a = array![[1.0_f64, 2.0], [3.0, 4.0]];
        let b = array![5.0_f64, 6.0];
        let mut aug = augment(&a.view(), &b.view());
        assert_eq!(aug, array![[1.0, 2.0, 5.0], [3.0, 4.0, 6.0]]);

        aug[[0, 0]] = 100.0;
        assert_relative_eq!(a[[0, 0]], 1.0);
    }

    #[test]
    fn test_residual_norm() {
        let a = array![[2.0_f64, 1.0], [1.0, 3.0]];
        let b = array![5.0_f64, 10.0];
        assert_relative_eq!(
            residual_norm(&a.view(), &array![1.0, 3.0].view(), &b.view()),
            0.0
        );
        // A [0, 0] = 0, worst row is |0 - 10|.
        assert_relative_eq!(
            residual_norm(&a.view(), &array![0.0, 0.0].view(), &b.view()),
            10.0
        );
    }
}
