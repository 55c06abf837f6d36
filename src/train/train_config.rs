use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::train::epoch_stats::EpochStats;

/// Hyperparameters and control hooks for one [`crate::train::sgd`] run.
///
/// # Fields
/// - `epochs`        — full passes over the training data
/// - `batch_size`    — samples per mini-batch; `1` gives online SGD
/// - `learning_rate` — η in the update rule
/// - `l2`            — L2 coefficient λ; `0.0` disables weight decay.
///                     Biases are never regularized.
/// - `normalize`     — scale features by their per-feature max-|value| once
///                     before the first epoch, recording the vector on the
///                     network for inference-time reuse
/// - `progress_tx`   — optional channel sender; one `EpochStats` per
///                     completed epoch. A dropped receiver ends the run
///                     cleanly after the current epoch.
/// - `stop_flag`     — optional atomic flag; setting it from another thread
///                     ends the run after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub l2: f64,
    pub normalize: bool,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a config with normalization off and no control hooks.
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64, l2: f64) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            l2,
            normalize: false,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
