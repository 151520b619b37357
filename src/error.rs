use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the kernel can report. All errors are synchronous and
/// immediate; operations shape-check before mutating, so the receiver is
/// left unchanged when an operation fails.
#[derive(Debug, Error)]
pub enum Error {
    /// Zero-sized construction, an empty or ragged literal, or structurally
    /// invalid arguments (e.g. an activation count that does not match the
    /// layer count).
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Operand shapes are incompatible for the named operation.
    #[error("{op}: shape mismatch (expected {expected}, got {actual})")]
    ShapeMismatch {
        op: &'static str,
        expected: String,
        actual: String,
    },

    /// Bounds-checked element access outside the matrix.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Model file could not be opened, read, written, or is truncated.
    #[error("model file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shape-mismatch constructor used by the matrix kernel.
    pub(crate) fn shapes(
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Error {
        Error::ShapeMismatch {
            op,
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}
