//! CSV ingestion for labeled numeric datasets.
//!
//! Expects the MNIST-in-CSV layout: a header line, then one record per line
//! of comma-separated numbers where the first field is the class label and
//! the rest are features.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::data::dataset::{Dataset, Sample};
use crate::math::matrix::Matrix;

/// Reads a whole CSV file into a [`Dataset`].
///
/// A record that fails to parse, or whose width differs from the rest of the
/// file, is reported with its line number; nothing before it is kept.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut samples = Vec::new();
    let mut record_width: Option<usize> = None;

    // Line 1 is the header; data records are 1-indexed from the line after it.
    for (line_no, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = line
            .split(',')
            .map(|field| {
                field.trim().parse::<f64>().map_err(|_| Error::BadSample {
                    index: line_no,
                    reason: format!("field `{}` is not a number", field.trim()),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if fields.len() < 2 {
            return Err(Error::BadSample {
                index: line_no,
                reason: "a record needs a label and at least one feature".to_string(),
            });
        }

        match record_width {
            None => record_width = Some(fields.len()),
            Some(w) if w != fields.len() => {
                return Err(Error::BadSample {
                    index: line_no,
                    reason: format!("record has {} fields, expected {w}", fields.len()),
                });
            }
            _ => {}
        }

        let mut target = Matrix::zeros(1, 1);
        target.fill_from_slice(&fields[..1]);

        let mut input = Matrix::zeros(fields.len() - 1, 1);
        input.fill_from_slice(&fields[1..]);

        samples.push(Sample::new(input, target));
    }

    debug!("read {} samples from {}", samples.len(), path.as_ref().display());

    Ok(Dataset::new(samples))
}
