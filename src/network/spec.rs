use serde::{Deserialize, Serialize};

use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::math::matrix::Init;
use crate::math::scalar::Scalar;
use crate::network::network::NeuralNetwork;

/// A fully serializable description of a network architecture: layer sizes,
/// one activation per transition, and the learning rate.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of trained
/// weights, making it possible to store architecture configurations before
/// training starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Ordered layer sizes, input layer first.
    pub layer_sizes: Vec<usize>,
    /// One activation per layer transition.
    pub activations: Vec<Activation>,
    /// Learning rate applied by `backward`.
    pub learning_rate: f64,
}

impl NetworkSpec {
    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
    }

    /// Deserializes a `NetworkSpec` from a JSON file previously written by
    /// `save_json`.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
    }

    /// Instantiates a network with this architecture and the given init
    /// policy.
    pub fn build<T: Scalar>(&self, init: Init) -> Result<NeuralNetwork<T>> {
        NeuralNetwork::new(
            self.layer_sizes.clone(),
            self.activations.clone(),
            T::from_f64(self.learning_rate),
            init,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_preserves_architecture() {
        let spec = NetworkSpec {
            layer_sizes: vec![2, 4, 1],
            activations: vec![Activation::Relu, Activation::Sigmoid],
            learning_rate: 0.05,
        };
        let path = std::env::temp_dir()
            .join(format!("magnetite-nn-{}-spec.json", std::process::id()))
            .to_str()
            .unwrap()
            .to_string();
        spec.save_json(&path).unwrap();
        let restored = NetworkSpec::load_json(&path).unwrap();
        assert_eq!(restored.layer_sizes, spec.layer_sizes);
        assert_eq!(restored.activations, spec.activations);
        assert_eq!(restored.learning_rate, spec.learning_rate);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn build_allocates_matching_parameters() {
        let spec = NetworkSpec {
            layer_sizes: vec![3, 2],
            activations: vec![Activation::Tanh],
            learning_rate: 0.1,
        };
        let net = spec.build::<f32>(Init::Zero).unwrap();
        assert_eq!(net.layer_sizes(), &[3, 2]);
        assert_eq!(net.learning_rate(), 0.1);
    }
}
