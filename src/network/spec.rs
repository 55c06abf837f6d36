use rand::prelude::*;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::network::network::Network;

/// A JSON-serializable description of a network architecture.
///
/// Kept separate from trained weights so run configurations can be written,
/// versioned, and shared before training starts. The activation is stored by
/// its registry name, matching the persisted-model format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, typically used as the model file stem.
    pub name: String,
    /// Layer widths, input first.
    pub sizes: Vec<usize>,
    /// Activation name, e.g. `"Sigmoid"`.
    pub activation: String,
    /// Whether training should normalize features and record the scaling
    /// vector on the network.
    #[serde(default)]
    pub normalize: bool,
}

impl NetworkSpec {
    /// Instantiates a freshly-initialized network from this spec.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Network> {
        let activation = Activation::from_name(&self.activation)?;
        Network::new(self.sizes.clone(), activation, rng)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| Error::ModelFormat(e.to_string()))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| Error::ModelFormat(e.to_string()))
    }
}
