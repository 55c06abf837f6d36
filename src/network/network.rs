use rand::prelude::*;

use crate::activation::activation::Activation;
use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// A fully-connected feed-forward classifier.
///
/// `weights[i]` has shape `sizes[i+1] × sizes[i]` and `biases[i]` shape
/// `sizes[i+1] × 1`. One activation is shared by all layers. When `norm` is
/// present, inference first divides the input elementwise by it — the
/// per-feature maxima recorded by dataset normalization during training.
///
/// The weights and biases are the sole persistent state of a trained model:
/// mutated in place by every SGD step, read-only during inference, and
/// serialized wholesale by [`Network::write`].
#[derive(Debug)]
pub struct Network {
    pub(crate) sizes: Vec<usize>,
    pub(crate) weights: Vec<Matrix>,
    pub(crate) biases: Vec<Matrix>,
    pub(crate) activation: Activation,
    pub(crate) norm: Option<Matrix>,
}

impl Network {
    /// Builds a network with Gaussian(0, 0.01) weights and biases.
    ///
    /// Fails before any allocation on a degenerate architecture: fewer than
    /// two layers, or any zero layer size.
    pub fn new<R: Rng>(sizes: Vec<usize>, activation: Activation, rng: &mut R) -> Result<Network> {
        if sizes.len() < 2 {
            return Err(Error::TooFewLayers(sizes.len()));
        }
        for (index, &size) in sizes.iter().enumerate() {
            if size == 0 {
                return Err(Error::BadLayerSize { index, size });
            }
        }

        let mut weights = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::with_capacity(sizes.len() - 1);
        for i in 0..sizes.len() - 1 {
            weights.push(Matrix::random(sizes[i + 1], sizes[i], rng));
            biases.push(Matrix::random(sizes[i + 1], 1, rng));
        }

        Ok(Network { sizes, weights, biases, activation, norm: None })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn norm(&self) -> Option<&Matrix> {
        self.norm.as_ref()
    }

    /// Replaces all weights and biases at once, e.g. to start from known
    /// parameters. Every matrix must match the architecture exactly.
    pub fn set_parameters(&mut self, weights: Vec<Matrix>, biases: Vec<Matrix>) -> Result<()> {
        validate_parameter_shapes(&self.sizes, &weights, &biases).map_err(Error::ModelFormat)?;
        self.weights = weights;
        self.biases = biases;
        Ok(())
    }

    /// Records the normalization vector produced by `Dataset::normalize`.
    /// Set once, before the first epoch; inference divides by it from then on.
    pub(crate) fn record_norm(&mut self, norm: Matrix) {
        self.norm = Some(norm);
    }

    /// Forward pass: `a ← σ(W_i·a + b_i)` per layer, returning the output
    /// activation.
    ///
    /// The caller's input is never mutated — the pass works on a private
    /// copy, including the normalization step. Panics if `x` is not a
    /// `sizes[0] × 1` column vector.
    pub fn feedforward(&self, x: &Matrix) -> Matrix {
        assert!(
            x.rows == self.sizes[0] && x.cols == 1,
            "input must be {}x1, got {}x{}",
            self.sizes[0],
            x.rows,
            x.cols
        );

        let mut a = x.clone();
        if let Some(norm) = &self.norm {
            a.div_in_place(norm);
        }

        for i in 0..self.weights.len() {
            a = self.weights[i].dot(&a);
            a.add_in_place(&self.biases[i]);
            a.map_in_place(|z| self.activation.value(z));
        }

        a
    }

    /// Single-sample backpropagation: gradients of the cost with respect to
    /// every weight and bias, shaped exactly like `weights` and `biases`.
    ///
    /// Pure — network parameters are untouched. `x` must be `sizes[0] × 1`
    /// and `y` the one-hot target of the output layer's width.
    pub fn backprop(&self, x: &Matrix, y: &Matrix) -> (Vec<Matrix>, Vec<Matrix>) {
        let layers = self.weights.len();

        // Recorded forward pass: pre-activations z_i and activations a_i,
        // with a_0 = x (normalization is a training-data concern, applied
        // before samples reach this point).
        let mut activations = Vec::with_capacity(layers + 1);
        activations.push(x.clone());
        let mut zs = Vec::with_capacity(layers);

        for i in 0..layers {
            let mut z = self.weights[i].dot(&activations[i]);
            z.add_in_place(&self.biases[i]);
            let a = z.map(|v| self.activation.value(v));
            zs.push(z);
            activations.push(a);
        }

        let mut nabla_w: Vec<Matrix> =
            self.weights.iter().map(|w| Matrix::zeros(w.rows, w.cols)).collect();
        let mut nabla_b: Vec<Matrix> =
            self.biases.iter().map(|b| Matrix::zeros(b.rows, b.cols)).collect();

        // Output layer.
        let mut delta = self.activation.output_delta(&zs[layers - 1], &activations[layers], y);
        nabla_w[layers - 1] = delta.dot(&activations[layers - 1].transpose());
        nabla_b[layers - 1] = delta.clone();

        // Backward recursion: δ ← (W_nextᵗ·δ) ⊙ σ'(z).
        for i in (0..layers - 1).rev() {
            delta = self.weights[i + 1].transpose().dot(&delta);
            delta.hadamard_in_place(&zs[i].map(|v| self.activation.derivative(v)));

            nabla_w[i] = delta.dot(&activations[i].transpose());
            nabla_b[i] = delta.clone();
        }

        (nabla_w, nabla_b)
    }

    /// Runs inference and returns the predicted class index.
    ///
    /// A single-output network has no class structure to take an argmax
    /// over; that configuration is rejected rather than guessed at.
    pub fn predict(&self, x: &Matrix) -> Result<usize> {
        if self.sizes[self.sizes.len() - 1] < 2 {
            return Err(Error::ScalarOutput);
        }
        Ok(self.feedforward(x).argmax())
    }

    /// Percentage of `test` samples whose predicted class matches the raw
    /// integer target. Targets must be un-encoded 1×1 scalars.
    ///
    /// An empty test set is an explicit error, not a NaN.
    pub fn accuracy(&self, test: &Dataset) -> Result<f64> {
        if test.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut correct = 0usize;
        for sample in &test.samples {
            let predicted = self.predict(&sample.input)?;
            let label = sample.target.scalar_value();
            if (label - predicted as f64).abs() < 1e-6 {
                correct += 1;
            }
        }

        Ok(correct as f64 / test.len() as f64 * 100.0)
    }
}

/// Checks that `weights`/`biases` agree with `sizes`; returns a description
/// of the first mismatch.
pub(crate) fn validate_parameter_shapes(
    sizes: &[usize],
    weights: &[Matrix],
    biases: &[Matrix],
) -> std::result::Result<(), String> {
    let layers = sizes.len() - 1;
    if weights.len() != layers {
        return Err(format!("expected {layers} weight matrices, got {}", weights.len()));
    }
    if biases.len() != layers {
        return Err(format!("expected {layers} bias vectors, got {}", biases.len()));
    }

    for i in 0..layers {
        if weights[i].rows != sizes[i + 1] || weights[i].cols != sizes[i] {
            return Err(format!(
                "weight matrix {i} is {}x{}, expected {}x{}",
                weights[i].rows,
                weights[i].cols,
                sizes[i + 1],
                sizes[i]
            ));
        }
        if biases[i].rows != sizes[i + 1] || biases[i].cols != 1 {
            return Err(format!(
                "bias vector {i} is {}x{}, expected {}x1",
                biases[i].rows,
                biases[i].cols,
                sizes[i + 1]
            ));
        }
    }

    Ok(())
}
