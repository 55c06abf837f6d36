//! Persisted-model text format.
//!
//! Layout:
//! - line 1: layer count `L`
//! - line 2: `L` space-separated layer sizes
//! - line 3: activation name
//! - line 4: `1` followed by a matrix block holding the normalization
//!   vector, or `0` followed by one blank line
//! - a matrix block of the `L-1` weight matrices
//! - a matrix block of the `L-1` bias vectors
//!
//! Matrix blocks are defined in [`crate::math::io`]. Because floats are
//! written in shortest-roundtrip form, a load reproduces every parameter
//! bit-for-bit and `feedforward` output is identical before and after a
//! save/load cycle.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::math::io::{next_line, read_matrices, write_matrices};
use crate::network::network::{validate_parameter_shapes, Network};

impl Network {
    /// Writes the model to `writer` in the text format above.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.sizes.len())?;

        for size in &self.sizes {
            write!(writer, "{size} ")?;
        }
        writeln!(writer)?;

        writeln!(writer, "{}", self.activation.name())?;

        match &self.norm {
            Some(norm) => {
                writeln!(writer, "1")?;
                write_matrices(writer, std::slice::from_ref(norm))?;
            }
            None => {
                writeln!(writer, "0")?;
                writeln!(writer)?;
            }
        }

        write_matrices(writer, &self.weights)?;
        write_matrices(writer, &self.biases)?;

        Ok(())
    }

    /// Reads a model previously produced by [`Network::write`].
    ///
    /// Every structural or value problem — wrong counts, sizes that do not
    /// match the parameter shapes, an unknown activation name — is surfaced
    /// as an explicit error before a partially-built network can escape.
    pub fn read<R: BufRead>(reader: R) -> Result<Network> {
        let mut lines = reader.lines();

        let layer_line = next_line(&mut lines, "layer count")?;
        let num_layers: usize = layer_line
            .trim()
            .parse()
            .map_err(|_| Error::ModelFormat(format!("bad layer count `{}`", layer_line.trim())))?;
        if num_layers < 2 {
            return Err(Error::TooFewLayers(num_layers));
        }

        let sizes_line = next_line(&mut lines, "layer sizes")?;
        let fields: Vec<&str> = sizes_line.split_whitespace().collect();
        if fields.len() != num_layers {
            return Err(Error::ModelFormat(format!(
                "expected {num_layers} layer sizes, got {}",
                fields.len()
            )));
        }

        let mut sizes = Vec::with_capacity(num_layers);
        for (index, field) in fields.iter().enumerate() {
            let size: usize = field
                .parse()
                .map_err(|_| Error::ModelFormat(format!("bad layer size `{field}`")))?;
            if size == 0 {
                return Err(Error::BadLayerSize { index, size });
            }
            sizes.push(size);
        }

        let name_line = next_line(&mut lines, "activation name")?;
        let activation = Activation::from_name(name_line.trim())?;

        let flag_line = next_line(&mut lines, "normalization flag")?;
        let norm = match flag_line.trim() {
            "1" => {
                let mut block = read_matrices(&mut lines)?;
                if block.len() != 1 {
                    return Err(Error::ModelFormat(format!(
                        "expected one normalization vector, got {}",
                        block.len()
                    )));
                }
                let norm = block.pop().expect("length checked above");
                if norm.rows != sizes[0] || norm.cols != 1 {
                    return Err(Error::ModelFormat(format!(
                        "normalization vector is {}x{}, expected {}x1",
                        norm.rows, norm.cols, sizes[0]
                    )));
                }
                Some(norm)
            }
            "0" => {
                next_line(&mut lines, "blank line after normalization flag")?;
                None
            }
            other => {
                return Err(Error::ModelFormat(format!("bad normalization flag `{other}`")));
            }
        };

        let weights = read_matrices(&mut lines)?;
        let biases = read_matrices(&mut lines)?;
        validate_parameter_shapes(&sizes, &weights, &biases).map_err(Error::ModelFormat)?;

        Ok(Network { sizes, weights, biases, activation, norm })
    }

    /// Saves the model to a file, truncating any existing content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)
    }

    /// Loads a model from a file written by [`Network::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path)?;
        Network::read(BufReader::new(file))
    }
}
