pub mod matrix;
pub mod ops;
pub mod scalar;

pub use matrix::{Init, Matrix};
pub use scalar::Scalar;
