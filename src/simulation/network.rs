use crate::error::{NeuroevoError, Result};
use crate::types::WeightMatrix;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Neuron activation applied after every layer transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Sigmoid,
    Tanh,
    Relu,
    Linear,
}

impl Activation {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
            Activation::Relu => x.max(0.0),
            Activation::Linear => x,
        }
    }
}

impl FromStr for Activation {
    type Err = NeuroevoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::Relu),
            "linear" => Ok(Activation::Linear),
            other => Err(NeuroevoError::Configuration(format!(
                "Unknown activation function: {}",
                other
            ))),
        }
    }
}

/// Layer sizes and activation of a fully connected feed-forward network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTopology {
    layers: Vec<usize>,
    activation: Activation,
}

impl NetworkTopology {
    pub fn new(layers: Vec<usize>, activation: Activation) -> Result<Self> {
        if layers.len() < 2 {
            return Err(NeuroevoError::Configuration(format!(
                "A network needs at least an input and an output layer, got {} layer(s)",
                layers.len()
            )));
        }
        if let Some(pos) = layers.iter().position(|&n| n == 0) {
            return Err(NeuroevoError::Configuration(format!(
                "Layer {} has no neurons",
                pos
            )));
        }
        Ok(Self { layers, activation })
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn input_size(&self) -> usize {
        self.layers[0]
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    /// (outputs, inputs) for each adjacent layer pair
    pub fn weight_shapes(&self) -> Vec<(usize, usize)> {
        self.layers
            .windows(2)
            .map(|pair| (pair[1], pair[0]))
            .collect()
    }

    pub fn weight_count(&self) -> usize {
        self.layers.windows(2).map(|pair| pair[0] * pair[1]).sum()
    }
}

/// Feed-forward network without biases.
///
/// Each layer output is `activation(W * input)` where `W` has one row per
/// output neuron.
#[derive(Debug, Clone)]
pub struct FeedForwardNet {
    topology: Arc<NetworkTopology>,
    weights: Vec<WeightMatrix>,
}

impl FeedForwardNet {
    /// Network with all weights zero
    pub fn new(topology: Arc<NetworkTopology>) -> Self {
        let weights = topology
            .weight_shapes()
            .into_iter()
            .map(|(rows, cols)| WeightMatrix::zeros(rows, cols))
            .collect();
        Self { topology, weights }
    }

    pub fn with_weights(
        topology: Arc<NetworkTopology>,
        weights: Vec<WeightMatrix>,
    ) -> Result<Self> {
        let mut net = Self::new(topology);
        net.set_weights(weights)?;
        Ok(net)
    }

    pub fn set_weights(&mut self, weights: Vec<WeightMatrix>) -> Result<()> {
        let shapes = self.topology.weight_shapes();
        if weights.len() != shapes.len() {
            return Err(NeuroevoError::Network(format!(
                "Expected {} weight matrices, got {}",
                shapes.len(),
                weights.len()
            )));
        }
        for (i, (matrix, expected)) in weights.iter().zip(&shapes).enumerate() {
            if matrix.shape() != *expected {
                return Err(NeuroevoError::Network(format!(
                    "Weight matrix {} has shape {:?}, expected {:?}",
                    i,
                    matrix.shape(),
                    expected
                )));
            }
        }
        self.weights = weights;
        Ok(())
    }

    pub fn topology(&self) -> &NetworkTopology {
        &self.topology
    }

    pub fn weights(&self) -> &[WeightMatrix] {
        &self.weights
    }

    pub fn forward(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        if inputs.len() != self.topology.input_size() {
            return Err(NeuroevoError::Network(format!(
                "Expected {} inputs, got {}",
                self.topology.input_size(),
                inputs.len()
            )));
        }

        let activation = self.topology.activation();
        let mut signal = inputs.to_vec();
        for matrix in &self.weights {
            let (rows, _) = matrix.shape();
            signal = (0..rows)
                .map(|r| {
                    let sum: f64 = matrix.row(r).iter().zip(&signal).map(|(w, x)| w * x).sum();
                    activation.apply(sum)
                })
                .collect();
        }
        Ok(signal)
    }
}
