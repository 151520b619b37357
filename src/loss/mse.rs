use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)^2) over every entry.
    pub fn loss<T: Scalar>(predicted: &Matrix<T>, expected: &Matrix<T>) -> Result<T> {
        if predicted.shape() != expected.shape() {
            return Err(Error::shapes("loss", expected.shape(), predicted.shape()));
        }
        let mut total = T::ZERO;
        for (p_row, e_row) in predicted.data.iter().zip(expected.data.iter()) {
            for (&p, &e) in p_row.iter().zip(e_row.iter()) {
                let diff = p - e;
                total += diff * diff;
            }
        }
        let count = T::from_f64((predicted.rows() * predicted.cols()) as f64);
        Ok(total / count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_mean_of_squared_differences() {
        let predicted = Matrix::<f64>::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let expected = Matrix::from_rows(vec![vec![0.0, 2.0], vec![5.0, 4.0]]).unwrap();
        // Squared differences: 1, 0, 4, 0 -> mean 1.25.
        let loss = MseLoss::loss(&predicted, &expected).unwrap();
        assert!((loss - 1.25).abs() < 1e-12);
    }

    #[test]
    fn loss_is_zero_for_identical_matrices() {
        let m = Matrix::from_rows(vec![vec![0.5, -0.5]]).unwrap();
        assert_eq!(MseLoss::loss(&m, &m).unwrap(), 0.0);
    }

    #[test]
    fn loss_rejects_shape_mismatch() {
        let a = Matrix::<f64>::zeros(2, 2).unwrap();
        let b = Matrix::<f64>::zeros(1, 2).unwrap();
        assert!(matches!(
            MseLoss::loss(&a, &b),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
