//! MNIST digit classification from the Kaggle CSV export.
//!
//! Architecture: 784 → 30 → 10, sigmoid everywhere.
//! Optimizer:    mini-batch SGD, lr = 0.5, λ = 5.0, batch size 10,
//!               max-|value| feature normalization.
//!
//! Run with:
//!   cargo run --example mnist --release
//!
//! Data files are expected at data/mnist_train.csv and data/mnist_test.csv
//! (https://www.kaggle.com/datasets/oddrationale/mnist-in-csv).

use std::time::Instant;

use magnetite_nn::{data, sgd, Network, NetworkSpec, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let spec = NetworkSpec {
        name: "mnist".to_string(),
        sizes: vec![784, 30, 10],
        activation: "Sigmoid".to_string(),
        normalize: true,
    };

    let t_start = Instant::now();

    println!("Loading MNIST CSVs...");
    let mut train = data::read_csv("data/mnist_train.csv").expect("cannot read training CSV");
    let test = data::read_csv("data/mnist_test.csv").expect("cannot read test CSV");
    println!("  train: {} samples, test: {} samples", train.len(), test.len());

    let mut rng = StdRng::seed_from_u64(42);
    let mut network = spec.build(&mut rng).expect("valid spec");

    let mut config = TrainConfig::new(30, 10, 0.5, 5.0);
    config.normalize = spec.normalize;

    println!(
        "Training {}: {:?}, {} epochs, batch {}, lr {}, l2 {}...",
        spec.name, spec.sizes, config.epochs, config.batch_size, config.learning_rate, config.l2
    );
    // Set RUST_LOG=info to watch per-epoch timings.
    sgd(&mut network, &mut train, &config, &mut rng).expect("training failed");

    let accuracy = network.accuracy(&test).expect("test set must not be empty");
    println!("Test accuracy: {accuracy:.2}%");

    let model_path = format!("data/{}.model", spec.name);
    network.save(&model_path).expect("failed to save model");
    println!("Model saved to {model_path}");

    // Sanity check: the text format round-trips parameters exactly.
    let reloaded = Network::load(&model_path).expect("failed to reload model");
    let check = reloaded.accuracy(&test).expect("test set must not be empty");
    assert_eq!(accuracy, check);

    println!("Done in {:.1?}", t_start.elapsed());
}
