//! Raw binary model persistence.
//!
//! File layout, all counts written as `u64` in host byte order, values in
//! row-major order:
//!
//! ```text
//! num_layers
//! layer_sizes[num_layers]
//! (num_layers - 1) weight blocks:  rows, cols, rows*cols raw values
//! (num_layers - 1) bias blocks:    rows, cols, rows*cols raw values
//! ```
//!
//! There is no magic number and no version field; a file is only portable
//! between hosts with the same endianness and element type.

use std::fs;
use std::io;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;
use crate::network::network::NeuralNetwork;

impl<T: Scalar> NeuralNetwork<T> {
    /// Writes layer sizes, weights and biases to `path`.
    pub fn save(&self, path: &str) -> Result<()> {
        let mut buf = Vec::new();
        append_u64(&mut buf, self.layer_sizes.len() as u64);
        for &size in &self.layer_sizes {
            append_u64(&mut buf, size as u64);
        }
        for weight in &self.weights {
            append_matrix(&mut buf, weight);
        }
        for bias in &self.biases {
            append_matrix(&mut buf, bias);
        }
        fs::write(path, buf)?;
        Ok(())
    }

    /// Restores weights and biases previously written by [`save`] into this
    /// network. The file's layer-size table must match this network's
    /// architecture, and every stored block's dimensions must agree with
    /// that table; nothing is assigned until the whole file has parsed.
    ///
    /// [`save`]: NeuralNetwork::save
    pub fn load(&mut self, path: &str) -> Result<()> {
        let bytes = fs::read(path)?;
        let mut reader = ByteReader::new(&bytes);

        let num_layers = reader.read_u64()? as usize;
        let mut sizes = Vec::with_capacity(num_layers);
        for _ in 0..num_layers {
            sizes.push(reader.read_u64()? as usize);
        }
        if sizes != self.layer_sizes {
            return Err(Error::ShapeMismatch {
                op: "load",
                expected: format!("layers {:?}", self.layer_sizes),
                actual: format!("layers {sizes:?}"),
            });
        }

        let transitions = num_layers - 1;
        let mut weights = Vec::with_capacity(transitions);
        for i in 0..transitions {
            weights.push(read_matrix(&mut reader, (sizes[i], sizes[i + 1]))?);
        }
        let mut biases = Vec::with_capacity(transitions);
        for i in 0..transitions {
            biases.push(read_matrix(&mut reader, (1, sizes[i + 1]))?);
        }

        self.weights = weights;
        self.biases = biases;
        Ok(())
    }
}

fn append_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_ne_bytes());
}

fn append_matrix<T: Scalar>(buf: &mut Vec<u8>, matrix: &Matrix<T>) {
    append_u64(buf, matrix.rows() as u64);
    append_u64(buf, matrix.cols() as u64);
    for row in &matrix.data {
        for &value in row {
            value.append_ne_bytes(buf);
        }
    }
}

/// Reads one dimension-prefixed block and checks it against the shape the
/// layer-size table promised.
fn read_matrix<T: Scalar>(reader: &mut ByteReader<'_>, expected: (usize, usize)) -> Result<Matrix<T>> {
    let rows = reader.read_u64()? as usize;
    let cols = reader.read_u64()? as usize;
    if (rows, cols) != expected {
        return Err(Error::shapes("load", expected, (rows, cols)));
    }
    let mut data = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for _ in 0..cols {
            row.push(T::from_ne_bytes(reader.take(T::BYTE_WIDTH)?));
        }
        data.push(row);
    }
    Ok(Matrix { rows, cols, data })
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> ByteReader<'a> {
        ByteReader { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.bytes.len() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "model file truncated",
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_ne_bytes(buf))
    }
}
