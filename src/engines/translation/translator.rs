use super::gray::{decode_weights, TrailingBits};
use super::phenotype::{IntegerPhenotype, Phenotype, WeightsPhenotype};
use crate::config::traits::ConfigSection;
use crate::config::translator::{BinToWeightParams, DefaultTranslatorParams};
use crate::error::{NeuroevoError, Result};
use crate::simulation::network::NetworkTopology;
use crate::types::{Individual, WeightMatrix};
use log::info;
use std::sync::Arc;

/// Turns an individual's genotype into a phenotype.
///
/// Implementations must be deterministic: the same genotype always develops
/// into an equal phenotype, and the genotype is never modified.
pub trait Translator {
    fn develop(&self, individual: &Individual) -> Result<Phenotype>;
}

/// Copies the genotype bits verbatim into an integer phenotype
#[derive(Debug, Clone, Default)]
pub struct DefaultTranslator;

impl DefaultTranslator {
    pub fn new(_params: DefaultTranslatorParams) -> Self {
        Self
    }
}

impl Translator for DefaultTranslator {
    fn develop(&self, individual: &Individual) -> Result<Phenotype> {
        let values = individual
            .genotype()
            .bits()
            .iter()
            .map(|&b| b as u32)
            .collect();
        Ok(Phenotype::Integer(IntegerPhenotype::new(values)))
    }
}

/// Gray-decodes fixed-size bit chunks into network weights in `[0, 1)`.
///
/// Chunks fill the weight matrices in layer order, row-major within each
/// matrix. Matrices are shaped (outputs, inputs).
#[derive(Debug, Clone)]
pub struct BinToWeightTranslator {
    bits_per_weight: usize,
    trailing_bits: TrailingBits,
    topology: Arc<NetworkTopology>,
    weight_shapes: Vec<(usize, usize)>,
    weight_count: usize,
}

impl BinToWeightTranslator {
    pub fn new(params: BinToWeightParams) -> Result<Self> {
        params.validate()?;
        let topology = Arc::new(NetworkTopology::new(
            params.layer_sizes.clone(),
            params.activation,
        )?);
        let weight_shapes = topology.weight_shapes();
        let weight_count = topology.weight_count();

        info!(
            "BinToWeightTranslator: layers {:?}, {} bits per weight, {} weights",
            params.layer_sizes, params.bits_per_weight, weight_count
        );

        Ok(Self {
            bits_per_weight: params.bits_per_weight,
            trailing_bits: params.trailing_bits,
            topology,
            weight_shapes,
            weight_count,
        })
    }

    pub fn bits_per_weight(&self) -> usize {
        self.bits_per_weight
    }

    pub fn weight_shapes(&self) -> &[(usize, usize)] {
        &self.weight_shapes
    }

    pub fn weight_count(&self) -> usize {
        self.weight_count
    }

    pub fn topology(&self) -> &Arc<NetworkTopology> {
        &self.topology
    }

    /// Genotype length that decodes into exactly one value per weight
    pub fn expected_genome_length(&self) -> usize {
        self.weight_count * self.bits_per_weight
    }

    /// Decode `bits` and reshape into one matrix per layer transition
    pub fn decode(&self, bits: &[u8]) -> Result<Vec<WeightMatrix>> {
        let weight_numbers = decode_weights(bits, self.bits_per_weight, self.trailing_bits);
        if weight_numbers.len() != self.weight_count {
            return Err(NeuroevoError::WeightCountMismatch {
                expected: self.weight_count,
                actual: weight_numbers.len(),
            });
        }

        let mut remaining = weight_numbers.into_iter();
        self.weight_shapes
            .iter()
            .map(|&(rows, cols)| {
                let data: Vec<f64> = remaining.by_ref().take(rows * cols).collect();
                WeightMatrix::new(rows, cols, data)
            })
            .collect()
    }
}

impl Translator for BinToWeightTranslator {
    fn develop(&self, individual: &Individual) -> Result<Phenotype> {
        let weights = self.decode(individual.genotype().bits())?;
        Ok(Phenotype::Weights(WeightsPhenotype::new(
            weights,
            Arc::clone(&self.topology),
        )))
    }
}

/// Closed set of translators that configuration can select
#[derive(Debug, Clone)]
pub enum TranslatorKind {
    Default(DefaultTranslator),
    BinToWeight(BinToWeightTranslator),
}

impl TranslatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            TranslatorKind::Default(_) => "DefaultTranslator",
            TranslatorKind::BinToWeight(_) => "BinToWeightTranslator",
        }
    }

    /// Genotype length this translator requires, if it constrains one
    pub fn expected_genome_length(&self) -> Option<usize> {
        match self {
            TranslatorKind::Default(_) => None,
            TranslatorKind::BinToWeight(t) => Some(t.expected_genome_length()),
        }
    }
}

impl Translator for TranslatorKind {
    fn develop(&self, individual: &Individual) -> Result<Phenotype> {
        match self {
            TranslatorKind::Default(t) => t.develop(individual),
            TranslatorKind::BinToWeight(t) => t.develop(individual),
        }
    }
}
