use crate::engines::translation::{Phenotype, Translator};
use crate::error::{NeuroevoError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-length bit sequence owned by an individual.
///
/// Every element is either 0 or 1. The evolutionary loop that produces and
/// mutates genotypes lives outside this crate; here a genotype is only read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Genotype {
    bits: Vec<u8>,
}

impl Genotype {
    pub fn new(bits: Vec<u8>) -> Result<Self> {
        if let Some(pos) = bits.iter().position(|&b| b > 1) {
            return Err(NeuroevoError::InvalidGenotype(format!(
                "value {} at position {} is not a bit",
                bits[pos], pos
            )));
        }
        Ok(Self { bits })
    }

    pub fn from_bools(bits: &[bool]) -> Self {
        Self {
            bits: bits.iter().map(|&b| b as u8).collect(),
        }
    }

    /// Uniformly random genotype of the given length
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen_range(0..=1u8)).collect(),
        }
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl TryFrom<Vec<u8>> for Genotype {
    type Error = NeuroevoError;

    fn try_from(bits: Vec<u8>) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<Genotype> for Vec<u8> {
    fn from(genotype: Genotype) -> Self {
        genotype.bits
    }
}

/// Fitness value tagged with the evaluation round that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredFitness {
    pub value: f64,
    pub round: u64,
}

/// A genotype together with its derived phenotype and fitness.
///
/// Replacing the genotype drops both cached values, so a fitness computed for
/// an older genotype can never be read back.
#[derive(Debug, Clone)]
pub struct Individual {
    genotype: Genotype,
    phenotype: Option<Phenotype>,
    fitness: Option<ScoredFitness>,
}

impl Individual {
    pub fn new(genotype: Genotype) -> Self {
        Self {
            genotype,
            phenotype: None,
            fitness: None,
        }
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    pub fn set_genotype(&mut self, genotype: Genotype) {
        self.genotype = genotype;
        self.phenotype = None;
        self.fitness = None;
    }

    pub fn phenotype(&self) -> Option<&Phenotype> {
        self.phenotype.as_ref()
    }

    pub fn require_phenotype(&self) -> Result<&Phenotype> {
        self.phenotype.as_ref().ok_or(NeuroevoError::MissingPhenotype)
    }

    pub fn set_phenotype(&mut self, phenotype: Phenotype) {
        self.phenotype = Some(phenotype);
    }

    /// Develop the phenotype with `translator` and cache it
    pub fn develop_with<T: Translator + ?Sized>(&mut self, translator: &T) -> Result<()> {
        let phenotype = translator.develop(self)?;
        self.phenotype = Some(phenotype);
        Ok(())
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness.map(|f| f.value)
    }

    pub fn scored(&self) -> Option<ScoredFitness> {
        self.fitness
    }

    /// Fitness only if it was assigned during `round`
    pub fn fitness_for_round(&self, round: u64) -> Option<f64> {
        self.fitness
            .filter(|f| f.round == round)
            .map(|f| f.value)
    }

    pub fn set_fitness(&mut self, value: f64, round: u64) {
        self.fitness = Some(ScoredFitness { value, round });
    }
}

/// Dense row-major matrix of network weights, shaped (outputs, inputs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl WeightMatrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(NeuroevoError::Network(format!(
                "matrix {}x{} needs {} values, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_genotype_rejects_non_binary() {
        let err = Genotype::new(vec![0, 1, 2]).unwrap_err();
        assert!(matches!(err, NeuroevoError::InvalidGenotype(_)));
    }

    #[test]
    fn test_deserialize_checks_bits() {
        let genotype: Genotype = serde_json::from_str("[1, 0, 1]").unwrap();
        assert_eq!(genotype.bits(), &[1, 0, 1]);
        assert_eq!(serde_json::to_string(&genotype).unwrap(), "[1,0,1]");

        assert!(serde_json::from_str::<Genotype>("[0, 2]").is_err());
        assert!(serde_json::from_str::<Genotype>("[2, 2, 2, 2, 2, 2, 2, 2]").is_err());
    }

    #[test]
    fn test_random_genotype_is_binary() {
        let mut rng = StdRng::seed_from_u64(7);
        let genotype = Genotype::random(64, &mut rng);
        assert_eq!(genotype.len(), 64);
        assert!(genotype.bits().iter().all(|&b| b <= 1));
    }

    #[test]
    fn test_set_genotype_clears_cached_state() {
        let mut individual = Individual::new(Genotype::new(vec![1, 0]).unwrap());
        individual.set_fitness(0.5, 3);
        assert_eq!(individual.fitness(), Some(0.5));
        assert_eq!(individual.fitness_for_round(3), Some(0.5));
        assert_eq!(individual.fitness_for_round(4), None);

        individual.set_genotype(Genotype::new(vec![0, 0]).unwrap());
        assert_eq!(individual.fitness(), None);
        assert!(individual.phenotype().is_none());
    }

    #[test]
    fn test_weight_matrix_row_major() {
        let m = WeightMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
        assert!(WeightMatrix::new(2, 2, vec![0.0; 3]).is_err());
    }
}
