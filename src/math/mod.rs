pub mod matrix;
pub mod io;

pub use matrix::Matrix;
