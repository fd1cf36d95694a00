use super::agent::FlatlandsAgentEvaluator;
use super::similarity::SimilarityEvaluator;
use crate::error::Result;
use crate::types::Individual;

/// Assigns fitness to developed individuals.
///
/// `evaluate` never touches the individual; `evaluate_all` opens a new round
/// and writes a round-tagged fitness into every individual, keeping the
/// population order.
pub trait FitnessEvaluator {
    fn evaluate(&self, individual: &Individual) -> Result<f64>;

    /// Number of the most recently opened round, 0 before the first
    fn round(&self) -> u64;

    /// Advance to the next round and prepare any round-wide state
    fn begin_round(&mut self) -> Result<u64>;

    fn evaluate_all(&mut self, population: &mut [Individual]) -> Result<()> {
        let round = self.begin_round()?;
        for individual in population.iter_mut() {
            let fitness = self.evaluate(individual)?;
            individual.set_fitness(fitness, round);
        }
        Ok(())
    }
}

/// Closed set of evaluators that configuration can select
pub enum EvaluatorKind {
    Similarity(SimilarityEvaluator),
    FlatlandsAgent(FlatlandsAgentEvaluator),
}

impl EvaluatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            EvaluatorKind::Similarity(_) => "DefaultFitnessEvaluator",
            EvaluatorKind::FlatlandsAgent(_) => "FlatlandsAgentFitnessEvaluator",
        }
    }
}

impl FitnessEvaluator for EvaluatorKind {
    fn evaluate(&self, individual: &Individual) -> Result<f64> {
        match self {
            EvaluatorKind::Similarity(e) => e.evaluate(individual),
            EvaluatorKind::FlatlandsAgent(e) => e.evaluate(individual),
        }
    }

    fn round(&self) -> u64 {
        match self {
            EvaluatorKind::Similarity(e) => e.round(),
            EvaluatorKind::FlatlandsAgent(e) => e.round(),
        }
    }

    fn begin_round(&mut self) -> Result<u64> {
        match self {
            EvaluatorKind::Similarity(e) => e.begin_round(),
            EvaluatorKind::FlatlandsAgent(e) => e.begin_round(),
        }
    }

    fn evaluate_all(&mut self, population: &mut [Individual]) -> Result<()> {
        match self {
            EvaluatorKind::Similarity(e) => e.evaluate_all(population),
            EvaluatorKind::FlatlandsAgent(e) => e.evaluate_all(population),
        }
    }
}

impl From<SimilarityEvaluator> for EvaluatorKind {
    fn from(e: SimilarityEvaluator) -> Self {
        EvaluatorKind::Similarity(e)
    }
}

impl From<FlatlandsAgentEvaluator> for EvaluatorKind {
    fn from(e: FlatlandsAgentEvaluator) -> Self {
        EvaluatorKind::FlatlandsAgent(e)
    }
}
