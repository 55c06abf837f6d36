//! XOR with a 2-4-1 sigmoid network.
//!
//! The output layer has a single unit, so this demo evaluates with raw
//! `feedforward` output — `predict` deliberately refuses scalar-output
//! networks because there is no class vector to take an argmax over.

use magnetite_nn::{sgd, Activation, Dataset, Matrix, Network, Sample, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample(features: [f64; 2], label: f64) -> Sample {
    Sample::new(
        Matrix::from_rows(vec![vec![features[0]], vec![features[1]]]),
        Matrix::from_rows(vec![vec![label]]),
    )
}

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let mut network =
        Network::new(vec![2, 4, 1], Activation::Sigmoid, &mut rng).expect("valid architecture");

    let mut data = Dataset::new(vec![
        sample([0.0, 0.0], 0.0),
        sample([0.0, 1.0], 1.0),
        sample([1.0, 0.0], 1.0),
        sample([1.0, 1.0], 0.0),
    ]);

    // Online SGD (batch of 1), no weight decay on a problem this small.
    let config = TrainConfig::new(20_000, 1, 0.5, 0.0);
    sgd(&mut network, &mut data, &config, &mut rng).expect("training failed");

    for (features, label) in [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ] {
        let input = Matrix::from_rows(vec![vec![features[0]], vec![features[1]]]);
        let output = network.feedforward(&input).scalar_value();
        println!("{features:?} -> {output:.4} (expected {label})");
    }
}
