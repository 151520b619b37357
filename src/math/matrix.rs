use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::scalar::Scalar;

/// Fill policy for freshly allocated matrices and network parameters.
///
/// `Empty` allocates without any contents guarantee; callers are expected to
/// overwrite every entry before reading it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {
    Zero,
    Ones,
    Random,
    Empty,
}

/// A dense row-major matrix. Dimensions are fixed at construction; only
/// `dot` and `transpose` replace the backing store wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<Vec<T>>,
}

impl<T: Scalar> Matrix<T> {
    /// Allocates a `rows x cols` matrix filled per `init`. Both dimensions
    /// must be non-zero.
    pub fn new(rows: usize, cols: usize, init: Init) -> Result<Matrix<T>> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension(format!(
                "rows and cols must be > 0 (got {rows}x{cols})"
            )));
        }
        let data = match init {
            Init::Zero | Init::Empty => vec![vec![T::ZERO; cols]; rows],
            Init::Ones => vec![vec![T::ONE; cols]; rows],
            Init::Random => {
                let mut rng = rand::thread_rng();
                (0..rows)
                    .map(|_| (0..cols).map(|_| T::sample_uniform(&mut rng)).collect())
                    .collect()
            }
        };
        Ok(Matrix { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix<T>> {
        Matrix::new(rows, cols, Init::Zero)
    }

    pub fn ones(rows: usize, cols: usize) -> Result<Matrix<T>> {
        Matrix::new(rows, cols, Init::Ones)
    }

    pub fn random(rows: usize, cols: usize) -> Result<Matrix<T>> {
        Matrix::new(rows, cols, Init::Random)
    }

    /// Builds a matrix from nested rows. The outer and first inner sequence
    /// must be non-empty and every row must have the same length.
    pub fn from_rows(data: Vec<Vec<T>>) -> Result<Matrix<T>> {
        if data.is_empty() || data[0].is_empty() {
            return Err(Error::InvalidDimension(
                "literal must contain at least one row and one column".to_string(),
            ));
        }
        let cols = data[0].len();
        for (row, entries) in data.iter().enumerate() {
            if entries.len() != cols {
                return Err(Error::InvalidDimension(format!(
                    "row {row} has {} columns, expected {cols}",
                    entries.len()
                )));
            }
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Bounds-checked element read.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.data[row][col])
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        self.data[row][col] = value;
        Ok(())
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Applies `f` to every entry, producing a new matrix of the same shape.
    pub fn map<F>(&self, f: F) -> Matrix<T>
    where
        F: Fn(T) -> T,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&v| f(v)).collect())
                .collect(),
        }
    }

    /// Elementwise addition, mutating `self`. Accepts an operand of identical
    /// shape, or a single row with matching column count which is added to
    /// every row (the bias-broadcast case).
    pub fn add(&mut self, other: &Matrix<T>) -> Result<&mut Self> {
        if self.rows == other.rows && self.cols == other.cols {
            for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
                for (entry, &v) in row.iter_mut().zip(other_row.iter()) {
                    *entry += v;
                }
            }
            return Ok(self);
        }
        if other.rows == 1 && other.cols == self.cols {
            for row in self.data.iter_mut() {
                for (entry, &v) in row.iter_mut().zip(other.data[0].iter()) {
                    *entry += v;
                }
            }
            return Ok(self);
        }
        Err(Error::shapes("add", self.shape(), other.shape()))
    }

    /// Elementwise subtraction, mutating `self`. Shapes must be identical.
    pub fn sub(&mut self, other: &Matrix<T>) -> Result<&mut Self> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::shapes("sub", self.shape(), other.shape()));
        }
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (entry, &v) in row.iter_mut().zip(other_row.iter()) {
                *entry -= v;
            }
        }
        Ok(self)
    }

    /// Matrix product; `self` is replaced by `self * other` and takes the
    /// shape `self.rows x other.cols`.
    pub fn dot(&mut self, other: &Matrix<T>) -> Result<&mut Self> {
        if self.cols != other.rows {
            return Err(Error::ShapeMismatch {
                op: "dot",
                expected: format!("{} inner rows", self.cols),
                actual: format!("{}x{}", other.rows, other.cols),
            });
        }
        let mut product = vec![vec![T::ZERO; other.cols]; self.rows];
        for i in 0..self.rows {
            for k in 0..other.cols {
                let mut sum = T::ZERO;
                for j in 0..self.cols {
                    sum += self.data[i][j] * other.data[j][k];
                }
                product[i][k] = sum;
            }
        }
        self.cols = other.cols;
        self.data = product;
        Ok(self)
    }

    /// Elementwise (Hadamard) product, mutating `self`. Shapes must be
    /// identical.
    pub fn hadamard(&mut self, other: &Matrix<T>) -> Result<&mut Self> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::shapes("hadamard", self.shape(), other.shape()));
        }
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (entry, &v) in row.iter_mut().zip(other_row.iter()) {
                *entry *= v;
            }
        }
        Ok(self)
    }

    /// Transposes in place; the backing store is replaced.
    pub fn transpose(&mut self) -> &mut Self {
        *self = self.transposed();
        self
    }

    /// Returns the transpose, leaving `self` untouched.
    pub fn transposed(&self) -> Matrix<T> {
        let mut data = vec![vec![T::ZERO; self.rows]; self.cols];
        for (r, row) in self.data.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                data[c][r] = v;
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Multiplies every entry by `scalar`.
    pub fn scale(&mut self, scalar: T) -> &mut Self {
        for row in self.data.iter_mut() {
            for entry in row.iter_mut() {
                *entry *= scalar;
            }
        }
        self
    }

    /// Replaces every entry below `floor` with `floor`.
    pub fn clamp_min(&mut self, floor: T) -> &mut Self {
        for row in self.data.iter_mut() {
            for entry in row.iter_mut() {
                if *entry < floor {
                    *entry = floor;
                }
            }
        }
        self
    }

    /// Reduces each row to its sum, producing a `rows x 1` column vector.
    pub fn sum_rows(&self) -> Matrix<T> {
        let data = self
            .data
            .iter()
            .map(|row| {
                let mut sum = T::ZERO;
                for &v in row {
                    sum += v;
                }
                vec![sum]
            })
            .collect();
        Matrix {
            rows: self.rows,
            cols: 1,
            data,
        }
    }

    /// Reduces each column to its sum, producing a `1 x cols` row vector.
    pub fn sum_cols(&self) -> Matrix<T> {
        let mut sums = vec![T::ZERO; self.cols];
        for row in &self.data {
            for (c, &v) in row.iter().enumerate() {
                sums[c] += v;
            }
        }
        Matrix {
            rows: 1,
            cols: self.cols,
            data: vec![sums],
        }
    }
}

impl<T: Scalar> PartialEq for Matrix<T> {
    /// Exact elementwise comparison; shape mismatch compares unequal.
    fn eq(&self, other: &Self) -> bool {
        if self.rows != other.rows || self.cols != other.cols {
            return false;
        }
        self.data == other.data
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matrix([")?;
        for (r, row) in self.data.iter().enumerate() {
            write!(f, "[")?;
            for (c, v) in row.iter().enumerate() {
                write!(f, "{v}")?;
                if c + 1 < self.cols {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if r + 1 < self.rows {
                write!(f, ",\n")?;
            }
        }
        write!(f, "])")
    }
}
