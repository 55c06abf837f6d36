use thiserror::Error;

/// Crate-wide error type.
///
/// Only failures the caller can act on are represented here: bad
/// configuration, bad data tied to a specific sample, and malformed model
/// files. Shape mismatches in matrix algebra are programmer errors and
/// panic instead (see `math::matrix`).
#[derive(Debug, Error)]
pub enum Error {
    #[error("a network needs at least two layers, got {0}")]
    TooFewLayers(usize),

    #[error("layer {index} has size {size}; every layer size must be positive")]
    BadLayerSize { index: usize, size: usize },

    #[error("unknown activation function `{0}`")]
    UnknownActivation(String),

    #[error("sample {index}: {reason}")]
    BadSample { index: usize, reason: String },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("prediction requires an output layer with at least two classes")]
    ScalarOutput,

    #[error("malformed model file: {0}")]
    ModelFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
