use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

/// Element type of the matrix kernel.
///
/// Implemented for `f32` and `f64`. Everything downstream of the kernel
/// (activations, loss, training) needs `exp`/`tanh`, so integer elements are
/// not supported.
pub trait Scalar:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    const ZERO: Self;
    const ONE: Self;
    /// Size of the raw encoding produced by `append_ne_bytes`.
    const BYTE_WIDTH: usize;

    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
    fn exp(self) -> Self;
    fn tanh(self) -> Self;
    /// Uniform sample in `[0, 1)`.
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
    /// Appends the host-endianness encoding of `self` to `out`.
    fn append_ne_bytes(self, out: &mut Vec<u8>);
    /// Decodes a value from exactly `BYTE_WIDTH` host-endianness bytes.
    fn from_ne_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($t:ty, $width:expr) => {
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const BYTE_WIDTH: usize = $width;

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn exp(self) -> Self {
                <$t>::exp(self)
            }

            fn tanh(self) -> Self {
                <$t>::tanh(self)
            }

            fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
                rng.gen::<$t>()
            }

            fn append_ne_bytes(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_ne_bytes());
            }

            fn from_ne_bytes(bytes: &[u8]) -> Self {
                let mut buf = [0u8; $width];
                buf.copy_from_slice(bytes);
                <$t>::from_ne_bytes(buf)
            }
        }
    };
}

impl_scalar!(f32, 4);
impl_scalar!(f64, 8);
