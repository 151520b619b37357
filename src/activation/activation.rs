use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;

/// Per-transition activation function, resolved to its (forward, derivative)
/// pair at match sites — no stored function handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Linear,
    Relu,
    Step,
    Sigmoid,
    Tanh,
    /// Softmax normalizes each column of its input; its `derivative` is the
    /// diagonal approximation `s * (1 - s)` and ignores the cross-terms of
    /// the true Jacobian. Documented limitation, kept on purpose.
    Softmax,
}

impl Activation {
    /// Applies the activation, producing a new matrix of identical shape.
    pub fn apply<T: Scalar>(&self, x: &Matrix<T>) -> Matrix<T> {
        match self {
            Activation::Linear => x.clone(),
            Activation::Relu => {
                let mut out = x.clone();
                out.clamp_min(T::ZERO);
                out
            }
            Activation::Step => x.map(|v| if v >= T::ZERO { T::ONE } else { T::ZERO }),
            Activation::Sigmoid => x.map(sigmoid),
            Activation::Tanh => x.map(|v| v.tanh()),
            Activation::Softmax => softmax_columns(x),
        }
    }

    /// Derivative of the activation, evaluated on whichever matrix the
    /// caller has cached. The network hands in the post-activation value;
    /// the sigmoid/tanh closed forms below are applied to it as-is.
    pub fn derivative<T: Scalar>(&self, x: &Matrix<T>) -> Matrix<T> {
        match self {
            Activation::Linear => x.map(|_| T::ONE),
            Activation::Relu => x.map(|v| if v > T::ZERO { T::ONE } else { T::ZERO }),
            Activation::Step => x.map(|_| T::ZERO),
            Activation::Sigmoid => x.map(|v| {
                let s = sigmoid(v);
                s * (T::ONE - s)
            }),
            Activation::Tanh => x.map(|v| {
                let t = v.tanh();
                T::ONE - t * t
            }),
            Activation::Softmax => softmax_columns(x).map(|s| s * (T::ONE - s)),
        }
    }
}

fn sigmoid<T: Scalar>(v: T) -> T {
    T::ONE / (T::ONE + (-v).exp())
}

/// Normalized exponential over each column: `e^{x_i} / sum_j e^{x_j}`.
/// No max-shift is applied, so large inputs can overflow the exponential.
fn softmax_columns<T: Scalar>(x: &Matrix<T>) -> Matrix<T> {
    let exps = x.map(|v| v.exp());
    let col_totals = exps.sum_cols();
    let mut out = exps;
    for row in out.data.iter_mut() {
        for (c, entry) in row.iter_mut().enumerate() {
            *entry = *entry / col_totals.data[0][c];
        }
    }
    out
}
