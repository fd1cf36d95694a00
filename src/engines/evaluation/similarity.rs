use super::evaluator::FitnessEvaluator;
use crate::config::fitness::SimilarityParams;
use crate::error::{NeuroevoError, Result};
use crate::types::Individual;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fraction of positions where the integer phenotype matches a target vector.
///
/// The target is all ones (one-max) unless a random binary target is
/// requested, in which case it is drawn once here and never changes.
#[derive(Debug, Clone)]
pub struct SimilarityEvaluator {
    target: Vec<u32>,
    round: u64,
}

impl SimilarityEvaluator {
    pub fn new(genome_length: usize, params: SimilarityParams) -> Result<Self> {
        if genome_length == 0 {
            return Err(NeuroevoError::Configuration(
                "Genome length must be positive".to_string(),
            ));
        }

        let target = if params.random_target {
            let mut rng = match params.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let target: Vec<u32> = (0..genome_length).map(|_| rng.gen_range(0..=1)).collect();
            info!("Random target: {:?}", target);
            target
        } else {
            vec![1; genome_length]
        };

        Ok(Self::with_target(target))
    }

    pub fn with_target(target: Vec<u32>) -> Self {
        Self { target, round: 0 }
    }

    pub fn target(&self) -> &[u32] {
        &self.target
    }

    pub fn similarity(&self, values: &[u32]) -> Result<f64> {
        if values.len() != self.target.len() {
            return Err(NeuroevoError::InvalidGenotype(format!(
                "phenotype has {} values, target has {}",
                values.len(),
                self.target.len()
            )));
        }
        let matching = values
            .iter()
            .zip(&self.target)
            .filter(|(p, t)| p == t)
            .count();
        Ok(matching as f64 / self.target.len() as f64)
    }
}

impl FitnessEvaluator for SimilarityEvaluator {
    fn evaluate(&self, individual: &Individual) -> Result<f64> {
        let phenotype = individual.require_phenotype()?.as_integer()?;
        self.similarity(phenotype.values())
    }

    fn round(&self) -> u64 {
        self.round
    }

    fn begin_round(&mut self) -> Result<u64> {
        self.round += 1;
        Ok(self.round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::translation::{DefaultTranslator, Translator};
    use crate::types::Genotype;

    fn developed(bits: Vec<u8>) -> Individual {
        let mut individual = Individual::new(Genotype::new(bits).unwrap());
        individual.develop_with(&DefaultTranslator).unwrap();
        individual
    }

    #[test]
    fn test_one_max() {
        let evaluator = SimilarityEvaluator::new(4, SimilarityParams::default()).unwrap();
        assert_eq!(evaluator.target(), &[1, 1, 1, 1]);
        assert_eq!(evaluator.evaluate(&developed(vec![1, 1, 0, 1])).unwrap(), 0.75);
        assert_eq!(evaluator.evaluate(&developed(vec![1, 1, 1, 1])).unwrap(), 1.0);
        assert_eq!(evaluator.evaluate(&developed(vec![0, 0, 0, 0])).unwrap(), 0.0);
    }

    #[test]
    fn test_complement_of_random_target_scores_zero() {
        let params = SimilarityParams {
            random_target: true,
            seed: Some(3),
        };
        let evaluator = SimilarityEvaluator::new(16, params).unwrap();
        let exact: Vec<u8> = evaluator.target().iter().map(|&t| t as u8).collect();
        let complement: Vec<u8> = exact.iter().map(|&b| 1 - b).collect();
        assert_eq!(evaluator.evaluate(&developed(exact)).unwrap(), 1.0);
        assert_eq!(evaluator.evaluate(&developed(complement)).unwrap(), 0.0);
    }

    #[test]
    fn test_requires_developed_integer_phenotype() {
        let evaluator = SimilarityEvaluator::new(2, SimilarityParams::default()).unwrap();
        let individual = Individual::new(Genotype::new(vec![1, 0]).unwrap());
        assert!(matches!(
            evaluator.evaluate(&individual),
            Err(NeuroevoError::MissingPhenotype)
        ));
        assert!(evaluator.evaluate(&developed(vec![1, 0, 1])).is_err());
    }

    #[test]
    fn test_evaluate_all_tags_round() {
        let mut evaluator = SimilarityEvaluator::new(2, SimilarityParams::default()).unwrap();
        let mut population = vec![developed(vec![1, 1]), developed(vec![0, 1])];
        evaluator.evaluate_all(&mut population).unwrap();
        assert_eq!(evaluator.round(), 1);
        assert_eq!(population[0].fitness_for_round(1), Some(1.0));
        assert_eq!(population[1].fitness_for_round(1), Some(0.5));

        let single = DefaultTranslator.develop(&population[0]).unwrap();
        assert_eq!(single.as_integer().unwrap().values(), &[1, 1]);
    }
}
