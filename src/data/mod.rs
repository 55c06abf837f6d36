pub mod dataset;
pub mod csv;

pub use dataset::{Dataset, Sample};
pub use csv::read_csv;
