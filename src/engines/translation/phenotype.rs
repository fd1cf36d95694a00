use crate::error::{NeuroevoError, Result};
use crate::simulation::network::{FeedForwardNet, NetworkTopology};
use crate::types::WeightMatrix;
use std::sync::Arc;

/// Representation handed to evaluators, derived from a genotype by a translator
#[derive(Debug, Clone, PartialEq)]
pub enum Phenotype {
    Integer(IntegerPhenotype),
    Weights(WeightsPhenotype),
}

impl Phenotype {
    pub fn kind(&self) -> &'static str {
        match self {
            Phenotype::Integer(_) => "integer",
            Phenotype::Weights(_) => "weights",
        }
    }

    pub fn as_integer(&self) -> Result<&IntegerPhenotype> {
        match self {
            Phenotype::Integer(p) => Ok(p),
            other => Err(NeuroevoError::PhenotypeMismatch {
                expected: "integer",
                found: other.kind(),
            }),
        }
    }

    pub fn as_weights(&self) -> Result<&WeightsPhenotype> {
        match self {
            Phenotype::Weights(p) => Ok(p),
            other => Err(NeuroevoError::PhenotypeMismatch {
                expected: "weights",
                found: other.kind(),
            }),
        }
    }
}

/// Owned copy of the genotype bits, compared position by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerPhenotype {
    values: Vec<u32>,
}

impl IntegerPhenotype {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Weight matrices for every layer transition plus the topology that uses them
#[derive(Debug, Clone, PartialEq)]
pub struct WeightsPhenotype {
    weights: Vec<WeightMatrix>,
    topology: Arc<NetworkTopology>,
}

impl WeightsPhenotype {
    pub fn new(weights: Vec<WeightMatrix>, topology: Arc<NetworkTopology>) -> Self {
        Self { weights, topology }
    }

    pub fn weights(&self) -> &[WeightMatrix] {
        &self.weights
    }

    pub fn topology(&self) -> &Arc<NetworkTopology> {
        &self.topology
    }

    /// All weights in layer order, row-major within each matrix
    pub fn flat_weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.weights.iter().flat_map(|m| m.as_slice().iter().copied())
    }

    /// Build the network these weights describe
    pub fn network(&self) -> Result<FeedForwardNet> {
        FeedForwardNet::with_weights(Arc::clone(&self.topology), self.weights.clone())
    }
}
