pub mod math;
pub mod activation;
pub mod data;
pub mod network;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::Activation;
pub use data::dataset::{Dataset, Sample};
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use train::sgd::sgd;
pub use train::train_config::TrainConfig;
pub use train::epoch_stats::EpochStats;
pub use error::{Error, Result};
