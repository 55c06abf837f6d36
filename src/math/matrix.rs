use rand::prelude::*;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

use crate::error::{Error, Result};

/// A dense `rows × cols` matrix of `f64`, stored row-major.
///
/// Operations come in two families with explicit ownership semantics:
/// out-of-place methods take `&self` and return a fresh matrix, in-place
/// methods take `&mut self` and end in `_in_place`. Because the in-place
/// family borrows its second operand immutably, passing the receiver as its
/// own operand does not compile — there is no aliasing hazard to document
/// away.
///
/// Every row-decomposable kernel fans out one rayon task per output row and
/// joins before returning; callers never observe a partially-written result.
/// The reduction loop inside `dot` stays sequential within a row task, so
/// results are deterministic regardless of scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    /// All-zero matrix. Panics if either dimension is zero.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive, got {rows}x{cols}");
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Matrix with entries drawn i.i.d. from N(0, 1) scaled by 0.01.
    ///
    /// Only used for weight/bias initialization. The generator is passed in
    /// so tests can seed a `StdRng` and get reproducible parameters.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for v in row.iter_mut() {
                *v = sample_standard_normal(rng) * 0.01;
            }
        }
        res
    }

    /// Builds a matrix from literal row data. Panics on empty or ragged input.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Matrix {
        assert!(!data.is_empty() && !data[0].is_empty(), "matrix dimensions must be positive");
        let cols = data[0].len();
        assert!(
            data.iter().all(|row| row.len() == cols),
            "all rows of a matrix must have the same length"
        );
        Matrix { rows: data.len(), cols, data }
    }

    /// Overwrites the matrix row-major from a flat slice.
    /// Panics if `values.len() != rows * cols`.
    pub fn fill_from_slice(&mut self, values: &[f64]) {
        assert_eq!(
            self.rows * self.cols,
            values.len(),
            "slice length {} does not fill a {}x{} matrix",
            values.len(),
            self.rows,
            self.cols
        );
        let cols = self.cols;
        self.data
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, row)| row.copy_from_slice(&values[i * cols..(i + 1) * cols]));
    }

    // ── Out-of-place algebra ────────────────────────────────────────────────

    /// Matrix product. Panics unless `self.cols == rhs.rows`.
    ///
    /// One task per output row; the Σ_k accumulation per cell is sequential.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, rhs.rows,
            "cannot multiply {}x{} by {}x{}",
            self.rows, self.cols, rhs.rows, rhs.cols
        );

        let data: Vec<Vec<f64>> = (0..self.rows)
            .into_par_iter()
            .map(|i| {
                let lhs_row = &self.data[i];
                (0..rhs.cols)
                    .map(|j| {
                        let mut sum = 0.0;
                        for k in 0..self.cols {
                            sum += lhs_row[k] * rhs.data[k][j];
                        }
                        sum
                    })
                    .collect()
            })
            .collect();

        Matrix { rows: self.rows, cols: rhs.cols, data }
    }

    /// Elementwise sum.
    pub fn add(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn sub(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Hadamard (elementwise) product.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a * b)
    }

    /// Elementwise quotient. Used by feature normalization, where dividing by
    /// the recorded per-feature maximum must yield exactly 1.0 at the maximum.
    pub fn div(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a / b)
    }

    /// Transposed copy: `T[j][i] = M[i][j]`.
    pub fn transpose(&self) -> Matrix {
        let data: Vec<Vec<f64>> = (0..self.cols)
            .into_par_iter()
            .map(|j| (0..self.rows).map(|i| self.data[i][j]).collect())
            .collect();
        Matrix { rows: self.cols, cols: self.rows, data }
    }

    /// Applies `f` to every element, returning a new matrix of the same shape.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64 + Sync,
    {
        let data: Vec<Vec<f64>> = self
            .data
            .par_iter()
            .map(|row| row.iter().map(|&x| f(x)).collect())
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    // ── In-place algebra ────────────────────────────────────────────────────

    /// `self += rhs`, elementwise.
    pub fn add_in_place(&mut self, rhs: &Matrix) {
        self.zip_with_in_place(rhs, |a, b| a + b);
    }

    /// `self -= rhs`, elementwise.
    pub fn sub_in_place(&mut self, rhs: &Matrix) {
        self.zip_with_in_place(rhs, |a, b| a - b);
    }

    /// `self ⊙= rhs` (Hadamard product).
    pub fn hadamard_in_place(&mut self, rhs: &Matrix) {
        self.zip_with_in_place(rhs, |a, b| a * b);
    }

    /// `self /= rhs`, elementwise.
    pub fn div_in_place(&mut self, rhs: &Matrix) {
        self.zip_with_in_place(rhs, |a, b| a / b);
    }

    /// Applies `f` to every element, overwriting the receiver.
    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync,
    {
        self.data.par_iter_mut().for_each(|row| {
            for v in row.iter_mut() {
                *v = f(*v);
            }
        });
    }

    // ── Encodings ───────────────────────────────────────────────────────────

    /// The single element of a 1×1 matrix. Panics on any other shape.
    pub fn scalar_value(&self) -> f64 {
        assert!(
            self.rows == 1 && self.cols == 1,
            "scalar_value needs a 1x1 matrix, got {}x{}",
            self.rows,
            self.cols
        );
        self.data[0][0]
    }

    /// Encodes a non-negative integer-valued label as an `n × 1` one-hot
    /// vector.
    ///
    /// Unlike the shape preconditions elsewhere in this module, a label that
    /// is not integral (within 1e-6) or lies outside `[0, n]` is a data
    /// problem, not a programming one, so it is reported as an error for the
    /// caller to tie to the offending sample.
    pub fn label_to_one_hot(x: f64, n: usize) -> Result<Matrix> {
        let xi = x as i64;
        if (xi as f64 - x).abs() > 1e-6 {
            return Err(Error::BadSample {
                index: 0,
                reason: format!("target {x} is not an integer class label"),
            });
        }
        if xi < 0 || xi as usize >= n {
            return Err(Error::BadSample {
                index: 0,
                reason: format!("target {x} is outside the class range [0, {n})"),
            });
        }

        let mut res = Matrix::zeros(n, 1);
        res.data[xi as usize][0] = 1.0;
        Ok(res)
    }

    /// Index of the maximum element of an `n × 1` vector, `n > 1`; ties go to
    /// the lowest index. Panics if the matrix is not such a vector.
    pub fn argmax(&self) -> usize {
        assert_eq!(self.cols, 1, "argmax needs a column vector, got {}x{}", self.rows, self.cols);
        assert!(self.rows > 1, "argmax needs at least two rows, got {}", self.rows);

        let mut max = self.data[0][0];
        let mut ind = 0;
        for i in 1..self.rows {
            if self.data[i][0] > max {
                max = self.data[i][0];
                ind = i;
            }
        }
        ind
    }

    /// Testing equality: same shape and every |difference| at most `eps`.
    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        if self.rows != other.rows || self.cols != other.cols {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(ra, rb)| ra.iter().zip(rb.iter()).all(|(a, b)| (a - b).abs() <= eps))
    }

    // ── Private helpers ─────────────────────────────────────────────────────

    fn assert_same_shape(&self, rhs: &Matrix) {
        assert!(
            self.rows == rhs.rows && self.cols == rhs.cols,
            "shape mismatch: {}x{} vs {}x{}",
            self.rows,
            self.cols,
            rhs.rows,
            rhs.cols
        );
    }

    fn zip_with<F>(&self, rhs: &Matrix, f: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64 + Sync,
    {
        self.assert_same_shape(rhs);
        let data: Vec<Vec<f64>> = self
            .data
            .par_iter()
            .zip(rhs.data.par_iter())
            .map(|(ra, rb)| ra.iter().zip(rb.iter()).map(|(&a, &b)| f(a, b)).collect())
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    fn zip_with_in_place<F>(&mut self, rhs: &Matrix, f: F)
    where
        F: Fn(f64, f64) -> f64 + Sync,
    {
        self.assert_same_shape(rhs);
        self.data
            .par_iter_mut()
            .zip(rhs.data.par_iter())
            .for_each(|(ra, rb)| {
                for (a, &b) in ra.iter_mut().zip(rb.iter()) {
                    *a = f(*a, b);
                }
            });
    }
}

/// Samples a single value from N(0, 1) using the Box-Muller transform.
/// Both u1 and u2 must be uniform on (0, 1] to avoid log(0).
fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
