//! Non-mutating counterparts of the matrix arithmetic methods. Each function
//! allocates a fresh result and leaves both operands untouched.

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;

/// Matrix product `a * b` as a new `a.rows x b.cols` matrix.
pub fn dot<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let mut product = a.clone();
    product.dot(b)?;
    Ok(product)
}

/// Elementwise sum. Besides identical shapes, `b` may be a single row with
/// matching column count (added to every row of `a`) or a single column with
/// matching row count (added to every column of `a`).
pub fn add<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    broadcast_zip("add", a, b, |x, y| x + y)
}

/// Elementwise difference, with the same broadcast rules as [`add`].
pub fn sub<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    broadcast_zip("sub", a, b, |x, y| x - y)
}

/// Elementwise product of two identically shaped matrices.
pub fn hadamard<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let mut product = a.clone();
    product.hadamard(b)?;
    Ok(product)
}

fn broadcast_zip<T, F>(op: &'static str, a: &Matrix<T>, b: &Matrix<T>, f: F) -> Result<Matrix<T>>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    if a.rows == b.rows && a.cols == b.cols {
        let data = zip_rows(&a.data, &b.data, &f);
        return Ok(Matrix {
            rows: a.rows,
            cols: a.cols,
            data,
        });
    }
    // Row vector repeated over every row of `a`.
    if b.rows == 1 && b.cols == a.cols {
        let data = a
            .data
            .iter()
            .map(|row| {
                row.iter()
                    .zip(b.data[0].iter())
                    .map(|(&x, &y)| f(x, y))
                    .collect()
            })
            .collect();
        return Ok(Matrix {
            rows: a.rows,
            cols: a.cols,
            data,
        });
    }
    // Column vector repeated over every column of `a`.
    if b.cols == 1 && b.rows == a.rows {
        let data = a
            .data
            .iter()
            .zip(b.data.iter())
            .map(|(row, b_row)| row.iter().map(|&x| f(x, b_row[0])).collect())
            .collect();
        return Ok(Matrix {
            rows: a.rows,
            cols: a.cols,
            data,
        });
    }
    Err(Error::shapes(op, a.shape(), b.shape()))
}

fn zip_rows<T, F>(a: &[Vec<T>], b: &[Vec<T>], f: &F) -> Vec<Vec<T>>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    a.iter()
        .zip(b.iter())
        .map(|(ra, rb)| ra.iter().zip(rb.iter()).map(|(&x, &y)| f(x, y)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn m(rows: Vec<Vec<f64>>) -> Matrix<f64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn dot_leaves_operands_untouched() {
        let a = m(vec![vec![3.0, 2.0, 1.0], vec![1.0, 0.0, 2.0]]);
        let b = m(vec![vec![1.0, 2.0], vec![0.0, 1.0], vec![4.0, 0.0]]);
        let c = dot(&a, &b).unwrap();
        assert_eq!(c, m(vec![vec![7.0, 8.0], vec![9.0, 2.0]]));
        assert_eq!(a.shape(), (2, 3));
        assert_eq!(b.shape(), (3, 2));
    }

    #[test]
    fn add_same_shape() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![4.0, 3.0], vec![2.0, 1.0]]);
        assert_eq!(add(&a, &b).unwrap(), m(vec![vec![5.0, 5.0], vec![5.0, 5.0]]));
    }

    #[test]
    fn add_broadcasts_row_vector() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let row = m(vec![vec![10.0, 10.0]]);
        assert_eq!(
            add(&a, &row).unwrap(),
            m(vec![vec![11.0, 12.0], vec![13.0, 14.0]])
        );
    }

    #[test]
    fn add_broadcasts_column_vector() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let col = m(vec![vec![10.0], vec![20.0]]);
        assert_eq!(
            add(&a, &col).unwrap(),
            m(vec![vec![11.0, 12.0], vec![23.0, 24.0]])
        );
    }

    #[test]
    fn sub_broadcasts_like_add() {
        let a = m(vec![vec![11.0, 12.0], vec![13.0, 14.0]]);
        let row = m(vec![vec![10.0, 10.0]]);
        assert_eq!(
            sub(&a, &row).unwrap(),
            m(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        );
        let col = m(vec![vec![1.0], vec![3.0]]);
        assert_eq!(
            sub(&a, &col).unwrap(),
            m(vec![vec![10.0, 11.0], vec![10.0, 11.0]])
        );
    }

    #[test]
    fn incompatible_shapes_are_rejected() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![1.0, 2.0, 3.0]]);
        assert!(matches!(add(&a, &b), Err(Error::ShapeMismatch { .. })));
        assert!(matches!(sub(&a, &b), Err(Error::ShapeMismatch { .. })));
        assert!(matches!(hadamard(&a, &b), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn hadamard_multiplies_entries() {
        let a = m(vec![vec![1.0, 2.0]]);
        let b = m(vec![vec![3.0, 0.5]]);
        assert_eq!(hadamard(&a, &b).unwrap(), m(vec![vec![3.0, 1.0]]));
    }
}
