pub mod sgd;
pub mod epoch_stats;
pub mod train_config;

pub use sgd::sgd;
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
