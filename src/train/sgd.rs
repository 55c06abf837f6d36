use std::sync::atomic::Ordering;
use std::time::Instant;

use log::info;
use rand::prelude::*;

use crate::data::dataset::{Dataset, Sample};
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` in place with mini-batch SGD and L2 weight decay.
///
/// Before the first epoch, two one-time passes run over `data`:
/// - if `config.normalize` is set and the network carries no normalization
///   vector yet, features are scaled by their per-feature max-|value| and the
///   vector is recorded on the network (never repeated on later calls);
/// - raw scalar targets are one-hot encoded to the output layer's width
///   (a no-op when targets are already encoded).
///
/// Each epoch then shuffles the dataset and walks it in contiguous
/// `batch_size` slices — the final short batch included — summing per-sample
/// `backprop` gradients and applying, for dataset size `n` and batch size `m`:
///
/// ```text
/// W ← (1 − η·λ/n)·W − (η/m)·∇W_sum
/// b ← b − (η/m)·∇b_sum
/// ```
///
/// Biases are deliberately left out of the decay term.
///
/// # Early termination
/// The run ends after the current epoch if `config.stop_flag` is set or the
/// `progress_tx` receiver has been dropped.
///
/// # Panics
/// Panics if `config.batch_size == 0`.
pub fn sgd<R: Rng>(
    network: &mut Network,
    data: &mut Dataset,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<()> {
    assert!(config.batch_size > 0, "batch_size must be at least 1");
    if data.is_empty() {
        return Err(Error::EmptyDataset);
    }

    if config.normalize && network.norm().is_none() {
        let norm = data.normalize()?;
        network.record_norm(norm);
    }

    let classes = *network.sizes().last().expect("a network always has layers");
    data.encode_labels(classes)?;

    let n = data.len();

    for epoch in 1..=config.epochs {
        if let Some(flag) = &config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let t_start = Instant::now();

        data.shuffle(rng);
        for batch in data.samples.chunks(config.batch_size) {
            update_mini_batch(network, batch, config.learning_rate, config.l2, n);
        }

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        info!("epoch {epoch}/{} done in {elapsed_ms} ms", config.epochs);

        if let Some(tx) = &config.progress_tx {
            let stats = EpochStats { epoch, total_epochs: config.epochs, elapsed_ms };
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Accumulates backprop gradients over one mini-batch and applies the
/// regularized update to the network parameters.
///
/// Gradients are summed unweighted; the `η/m` scaling happens only at
/// application time, and the `(1 − η·λ/n)` decay multiplies the weights
/// before the gradient step is subtracted.
fn update_mini_batch(network: &mut Network, batch: &[Sample], eta: f64, lmd: f64, n: usize) {
    let mut nabla_w: Vec<Matrix> =
        network.weights().iter().map(|w| Matrix::zeros(w.rows, w.cols)).collect();
    let mut nabla_b: Vec<Matrix> =
        network.biases().iter().map(|b| Matrix::zeros(b.rows, b.cols)).collect();

    for sample in batch {
        let (delta_w, delta_b) = network.backprop(&sample.input, &sample.target);

        for (acc, delta) in nabla_w.iter_mut().zip(delta_w.iter()) {
            acc.add_in_place(delta);
        }
        for (acc, delta) in nabla_b.iter_mut().zip(delta_b.iter()) {
            acc.add_in_place(delta);
        }
    }

    let k = eta / batch.len() as f64;
    let wk = 1.0 - eta * lmd / n as f64;

    for j in 0..network.weights.len() {
        network.weights[j].map_in_place(|w| w * wk);
        nabla_w[j].map_in_place(|g| g * k);
        network.weights[j].sub_in_place(&nabla_w[j]);
    }

    for j in 0..network.biases.len() {
        nabla_b[j].map_in_place(|g| g * k);
        network.biases[j].sub_in_place(&nabla_b[j]);
    }
}
