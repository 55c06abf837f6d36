use rand::prelude::*;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// One labeled observation: an `n × 1` feature vector and its target.
///
/// The target starts life as a raw 1×1 scalar label and is turned into a
/// one-hot column vector by [`Dataset::encode_labels`] before training.
#[derive(Debug, Clone)]
pub struct Sample {
    pub input: Matrix,
    pub target: Matrix,
}

impl Sample {
    pub fn new(input: Matrix, target: Matrix) -> Sample {
        Sample { input, target }
    }
}

/// An ordered collection of samples.
///
/// Training reorders the collection (shuffling) and runs two one-time passes
/// over it — label encoding and feature normalization — but never touches
/// sample content otherwise.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Dataset {
        Dataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Uniformly permutes sample order.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }

    /// Converts every raw scalar target into a `classes × 1` one-hot vector.
    ///
    /// The pass is idempotent: targets that are already `classes`-row vectors
    /// are left alone, so running it again (or on a pre-encoded dataset) is
    /// harmless. A target that cannot be encoded fails with the index of the
    /// offending sample; earlier samples keep their converted targets.
    pub fn encode_labels(&mut self, classes: usize) -> Result<()> {
        for (i, sample) in self.samples.iter_mut().enumerate() {
            if sample.target.rows == classes && sample.target.cols == 1 {
                continue;
            }

            let label = sample.target.scalar_value();
            sample.target = Matrix::label_to_one_hot(label, classes)
                .map_err(|e| match e {
                    Error::BadSample { reason, .. } => Error::BadSample { index: i, reason },
                    other => other,
                })?;
        }
        Ok(())
    }

    /// Scales every feature into `[-1, 1]` by its maximum absolute value over
    /// the whole dataset, and returns the vector of those maxima.
    ///
    /// A feature that is zero everywhere gets a recorded maximum of 1 so the
    /// division is a no-op rather than 0/0. The returned vector is what a
    /// network stores to apply the same scaling to fresh inputs at inference
    /// time. After this pass, each feature's maximum |value| is exactly 1.0
    /// (or 0 for an all-zero feature).
    pub fn normalize(&mut self) -> Result<Matrix> {
        if self.samples.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let features = self.samples[0].input.rows;
        let mut max_abs = vec![0.0f64; features];

        for sample in &self.samples {
            for (j, m) in max_abs.iter_mut().enumerate() {
                *m = m.max(sample.input.data[j][0].abs());
            }
        }

        for m in max_abs.iter_mut() {
            if *m == 0.0 {
                *m = 1.0;
            }
        }

        let mut norm = Matrix::zeros(features, 1);
        norm.fill_from_slice(&max_abs);

        for sample in self.samples.iter_mut() {
            sample.input.div_in_place(&norm);
        }

        Ok(norm)
    }
}
