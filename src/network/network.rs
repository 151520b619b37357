use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::{Init, Matrix};
use crate::math::ops;
use crate::math::scalar::Scalar;
use crate::train::train_config::TrainConfig;

/// A feedforward network: one weight matrix (`L_i x L_{i+1}`) and one bias
/// row vector (`1 x L_{i+1}`) per layer transition, plus an activation per
/// transition.
pub struct NeuralNetwork<T: Scalar> {
    pub(crate) layer_sizes: Vec<usize>,
    pub(crate) weights: Vec<Matrix<T>>,
    pub(crate) biases: Vec<Matrix<T>>,
    pub(crate) activations: Vec<Activation>,
    pub(crate) learning_rate: T,
    // Forward caches: post-activation values per layer (index 0 is the
    // input) and weighted sums per transition. Overwritten by every forward
    // call; backward consumes them.
    neurons: Vec<Matrix<T>>,
    pre_neurons: Vec<Matrix<T>>,
}

impl<T: Scalar> NeuralNetwork<T> {
    /// Builds a network from an ordered layer-size sequence, one activation
    /// per transition, and an init policy for weights and biases.
    pub fn new(
        layer_sizes: Vec<usize>,
        activations: Vec<Activation>,
        learning_rate: T,
        init: Init,
    ) -> Result<NeuralNetwork<T>> {
        if layer_sizes.len() < 2 {
            return Err(Error::InvalidDimension(format!(
                "a network needs an input and an output layer (got {} sizes)",
                layer_sizes.len()
            )));
        }
        if activations.len() != layer_sizes.len() - 1 {
            return Err(Error::InvalidDimension(format!(
                "expected {} activation functions for {} layers, got {}",
                layer_sizes.len() - 1,
                layer_sizes.len(),
                activations.len()
            )));
        }
        let mut weights = Vec::with_capacity(layer_sizes.len() - 1);
        let mut biases = Vec::with_capacity(layer_sizes.len() - 1);
        for pair in layer_sizes.windows(2) {
            weights.push(Matrix::new(pair[0], pair[1], init)?);
            biases.push(Matrix::new(1, pair[1], init)?);
        }
        Ok(NeuralNetwork {
            layer_sizes,
            weights,
            biases,
            activations,
            learning_rate,
            neurons: Vec::new(),
            pre_neurons: Vec::new(),
        })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn learning_rate(&self) -> T {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: T) {
        self.learning_rate = learning_rate;
    }

    fn transitions(&self) -> usize {
        self.weights.len()
    }

    /// Forward pass over the whole batch. `input` is `m x L0`; the return
    /// value is the output layer's activation, `m x Ln`. Overwrites the
    /// caches consumed by `backward`.
    pub fn forward(&mut self, input: &Matrix<T>) -> Result<Matrix<T>> {
        if input.cols() != self.layer_sizes[0] {
            return Err(Error::ShapeMismatch {
                op: "forward",
                expected: format!("input with {} columns", self.layer_sizes[0]),
                actual: format!("{}x{}", input.rows(), input.cols()),
            });
        }
        self.neurons.clear();
        self.pre_neurons.clear();
        self.neurons.push(input.clone());
        for i in 0..self.transitions() {
            let mut sum = ops::dot(&self.neurons[i], &self.weights[i])?;
            sum.add(&self.biases[i])?;
            let activated = self.activations[i].apply(&sum);
            self.pre_neurons.push(sum);
            self.neurons.push(activated);
        }
        Ok(self.neurons[self.transitions()].clone())
    }

    /// Inference entry point.
    pub fn act(&mut self, input: &Matrix<T>) -> Result<Matrix<T>> {
        self.forward(input)
    }

    /// Backward pass: propagates `expected - output` toward the input layer
    /// and applies the scaled gradient to every weight and bias. Requires
    /// the caches of an immediately preceding `forward`.
    pub fn backward(&mut self, expected: &Matrix<T>) -> Result<()> {
        let n = self.transitions();
        if self.neurons.len() != n + 1 {
            return Err(Error::InvalidDimension(
                "backward requires a preceding forward pass".to_string(),
            ));
        }
        let output = &self.neurons[n];
        if expected.shape() != output.shape() {
            return Err(Error::shapes("backward", output.shape(), expected.shape()));
        }
        let error = ops::sub(expected, output)?;
        let mut delta = ops::hadamard(&error, &self.activations[n - 1].derivative(output))?;

        for i in (0..n).rev() {
            // The delta for the layer below must see this transition's
            // weights before they are updated.
            let next_delta = if i > 0 {
                let propagated = ops::dot(&delta, &self.weights[i].transposed())?;
                Some(ops::hadamard(
                    &propagated,
                    &self.activations[i - 1].derivative(&self.neurons[i]),
                )?)
            } else {
                None
            };

            let mut weight_grad = ops::dot(&self.neurons[i].transposed(), &delta)?;
            weight_grad.scale(self.learning_rate);
            self.weights[i].add(&weight_grad)?;

            let mut bias_grad = delta.sum_cols();
            bias_grad.scale(self.learning_rate);
            self.biases[i].add(&bias_grad)?;

            if let Some(d) = next_delta {
                delta = d;
            }
        }
        Ok(())
    }

    /// Trains with repeated full-batch `{forward; backward}` cycles; see
    /// [`crate::train::train_network`].
    pub fn train(
        &mut self,
        inputs: &Matrix<T>,
        targets: &Matrix<T>,
        config: &TrainConfig<T>,
    ) -> Result<f64> {
        crate::train::trainer::train_network(self, inputs, targets, config)
    }

    /// Mean squared error of a forward-pass output against the targets.
    pub fn loss(&self, output: &Matrix<T>, expected: &Matrix<T>) -> Result<T> {
        MseLoss::loss(output, expected)
    }

    /// Runs a forward pass and reports the fraction of output entries that
    /// match `expected` — counted per scalar entry, not per sample row.
    /// With `binary`, outputs are thresholded at 0.5 before comparison;
    /// otherwise the comparison is exact.
    pub fn evaluate(
        &mut self,
        input: &Matrix<T>,
        expected: &Matrix<T>,
        binary: bool,
    ) -> Result<f64> {
        let output = self.forward(input)?;
        if output.shape() != expected.shape() {
            return Err(Error::shapes("evaluate", output.shape(), expected.shape()));
        }
        let threshold = T::from_f64(0.5);
        let mut matching = 0usize;
        for r in 0..output.rows() {
            for c in 0..output.cols() {
                let got = output.get(r, c)?;
                let want = expected.get(r, c)?;
                let hit = if binary {
                    let label = if got >= threshold { T::ONE } else { T::ZERO };
                    label == want
                } else {
                    got == want
                };
                if hit {
                    matching += 1;
                }
            }
        }
        Ok(matching as f64 / (output.rows() * output.cols()) as f64)
    }
}
