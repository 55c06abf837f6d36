//! Text serialization for groups of matrices.
//!
//! A block is: a count-of-matrices line, then for each matrix a `rows cols`
//! line followed by `rows` lines of `cols` space-separated values. Values are
//! written with Rust's shortest-roundtrip float formatting, so reading a block
//! back reproduces every element bit-for-bit.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Writes `matrices` as one block. The stream is neither opened nor closed
/// here; the caller owns it.
pub fn write_matrices<W: Write>(writer: &mut W, matrices: &[Matrix]) -> Result<()> {
    writeln!(writer, "{}", matrices.len())?;

    for matrix in matrices {
        writeln!(writer, "{} {}", matrix.rows, matrix.cols)?;
        for row in &matrix.data {
            for v in row {
                write!(writer, "{v} ")?;
            }
            writeln!(writer)?;
        }
    }

    Ok(())
}

/// Reads one block from `lines`, starting at the current position.
///
/// Any structural problem — missing lines, non-numeric fields, a row with the
/// wrong number of columns — is an [`Error::ModelFormat`] naming what was
/// expected.
pub fn read_matrices<I>(lines: &mut I) -> Result<Vec<Matrix>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let count_line = next_line(lines, "number of matrices")?;
    let count: usize = count_line
        .trim()
        .parse()
        .map_err(|_| Error::ModelFormat(format!("bad matrix count `{}`", count_line.trim())))?;

    let mut matrices = Vec::with_capacity(count);

    for _ in 0..count {
        let dim_line = next_line(lines, "matrix dimensions")?;
        let dims: Vec<&str> = dim_line.split_whitespace().collect();
        if dims.len() != 2 {
            return Err(Error::ModelFormat(format!("bad dimension line `{}`", dim_line.trim())));
        }

        let rows: usize = dims[0]
            .parse()
            .map_err(|_| Error::ModelFormat(format!("bad row count `{}`", dims[0])))?;
        let cols: usize = dims[1]
            .parse()
            .map_err(|_| Error::ModelFormat(format!("bad column count `{}`", dims[1])))?;
        if rows == 0 || cols == 0 {
            return Err(Error::ModelFormat(format!("zero matrix dimension in `{}`", dim_line.trim())));
        }

        let mut data = Vec::with_capacity(rows);
        for _ in 0..rows {
            let row_line = next_line(lines, "matrix row")?;
            let values = row_line
                .split_whitespace()
                .map(|field| {
                    field
                        .parse::<f64>()
                        .map_err(|_| Error::ModelFormat(format!("bad matrix element `{field}`")))
                })
                .collect::<Result<Vec<f64>>>()?;

            if values.len() != cols {
                return Err(Error::ModelFormat(format!(
                    "expected {cols} elements in matrix row, got {}",
                    values.len()
                )));
            }
            data.push(values);
        }

        matrices.push(Matrix { rows, cols, data });
    }

    Ok(matrices)
}

/// Pulls the next line or reports what the format expected there.
pub(crate) fn next_line<I>(lines: &mut I, expected: &str) -> Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    match lines.next() {
        Some(Ok(line)) => Ok(line),
        Some(Err(e)) => Err(Error::Io(e)),
        None => Err(Error::ModelFormat(format!("unexpected end of file, expected {expected}"))),
    }
}
