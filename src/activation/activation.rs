use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// The differentiable activation shared by every layer of a network.
///
/// A closed enum rather than a trait object: each variant carries its value,
/// derivative, and output-layer error term, and the name-keyed lookup in
/// [`Activation::from_name`] exists only so persisted models can name their
/// activation as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Sigmoid,
}

impl Activation {
    /// Element-wise activation value.
    pub fn value(&self, z: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-z).exp()),
        }
    }

    /// Element-wise derivative of the activation.
    pub fn derivative(&self, z: f64) -> f64 {
        match self {
            Activation::Sigmoid => {
                let s = self.value(z);
                s * (1.0 - s)
            }
        }
    }

    /// Error term δ for the output layer, given pre-activations `z`, output
    /// activations `a`, and the one-hot target `y`.
    ///
    /// For `Sigmoid` this is `a - y` — the simplification of the
    /// cross-entropy gradient under a sigmoid output. The pairing is load
    /// bearing: swapping in a different cost without changing this term
    /// breaks the gradient.
    pub fn output_delta(&self, _z: &Matrix, a: &Matrix, y: &Matrix) -> Matrix {
        match self {
            Activation::Sigmoid => a.sub(y),
        }
    }

    /// Stable name used in the persisted model format.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "Sigmoid",
        }
    }

    /// Looks an activation up by its persisted name.
    /// An unrecognized name is a configuration error.
    pub fn from_name(name: &str) -> Result<Activation> {
        match name {
            "Sigmoid" => Ok(Activation::Sigmoid),
            other => Err(Error::UnknownActivation(other.to_string())),
        }
    }
}
