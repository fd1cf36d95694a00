use super::evaluator::FitnessEvaluator;
use crate::config::fitness::FlatlandsAgentParams;
use crate::error::{NeuroevoError, Result};
use crate::simulation::network::FeedForwardNet;
use crate::simulation::{FlatlandGenerator, Scenario, ScenarioGenerator, TrialScore};
use crate::types::Individual;
use log::{debug, info};
use rayon::prelude::*;

/// Poison costs this fraction of what food earns
pub const POISON_WEIGHT: f64 = 0.8;

/// Fitness earned in one scenario
pub fn scenario_contribution(score: TrialScore) -> f64 {
    score.food / (1.0 + score.poison * POISON_WEIGHT)
}

/// Scores an agent network in several scenarios and averages the results.
///
/// In dynamic mode every round starts by replacing all scenarios, so the whole
/// population of that round is compared on the same fresh landscape. In
/// static mode the scenarios built at construction are reused forever.
pub struct MultiScenarioEvaluator<G: ScenarioGenerator> {
    generator: G,
    scenarios: Vec<G::Scenario>,
    number_of_scenarios: usize,
    dynamic: bool,
    parallel: bool,
    round: u64,
}

pub type FlatlandsAgentEvaluator = MultiScenarioEvaluator<FlatlandGenerator>;

impl<G: ScenarioGenerator> MultiScenarioEvaluator<G> {
    pub fn new(mut generator: G, number_of_scenarios: usize, dynamic: bool) -> Result<Self> {
        if number_of_scenarios == 0 {
            return Err(NeuroevoError::Configuration(
                "At least one scenario is required".to_string(),
            ));
        }
        let scenarios = generate_all(&mut generator, number_of_scenarios)?;
        Ok(Self {
            generator,
            scenarios,
            number_of_scenarios,
            dynamic,
            parallel: false,
            round: 0,
        })
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn scenarios(&self) -> &[G::Scenario] {
        &self.scenarios
    }

    /// Replace every scenario with a freshly generated one
    pub fn regenerate(&mut self) -> Result<()> {
        self.scenarios = generate_all(&mut self.generator, self.number_of_scenarios)?;
        debug!("Regenerated {} scenarios", self.scenarios.len());
        Ok(())
    }

    /// Mean contribution of `net` over all current scenarios
    pub fn score_network(&self, net: &FeedForwardNet) -> Result<f64> {
        let mut total = 0.0;
        for scenario in &self.scenarios {
            total += scenario_contribution(scenario.score_agent(net)?);
        }
        Ok(total / self.scenarios.len() as f64)
    }
}

impl MultiScenarioEvaluator<FlatlandGenerator> {
    pub fn flatlands(params: FlatlandsAgentParams) -> Result<Self> {
        let generator = FlatlandGenerator::new(
            params.grid_dimension,
            params.food_probability,
            params.poison_probability,
            params.steps,
            params.seed,
        )?;
        info!(
            "FlatlandsAgentFitnessEvaluator: {} scenarios of {}x{}, dynamic: {}",
            params.number_of_scenarios,
            params.grid_dimension,
            params.grid_dimension,
            params.dynamic
        );
        let evaluator = Self::new(generator, params.number_of_scenarios, params.dynamic)?;
        Ok(evaluator.with_parallel(params.parallel))
    }
}

fn generate_all<G: ScenarioGenerator>(
    generator: &mut G,
    count: usize,
) -> Result<Vec<G::Scenario>> {
    (0..count).map(|_| generator.generate()).collect()
}

impl<G: ScenarioGenerator> FitnessEvaluator for MultiScenarioEvaluator<G> {
    fn evaluate(&self, individual: &Individual) -> Result<f64> {
        let net = individual.require_phenotype()?.as_weights()?.network()?;
        self.score_network(&net)
    }

    fn round(&self) -> u64 {
        self.round
    }

    fn begin_round(&mut self) -> Result<u64> {
        if self.dynamic {
            self.regenerate()?;
        }
        self.round += 1;
        Ok(self.round)
    }

    fn evaluate_all(&mut self, population: &mut [Individual]) -> Result<()> {
        let round = self.begin_round()?;
        let this = &*self;

        if this.parallel {
            population.par_iter_mut().try_for_each(|individual| {
                let fitness = this.evaluate(individual)?;
                individual.set_fitness(fitness, round);
                Ok::<(), NeuroevoError>(())
            })?;
        } else {
            for individual in population.iter_mut() {
                let fitness = this.evaluate(individual)?;
                individual.set_fitness(fitness, round);
            }
        }

        debug!("Round {}: scored {} individuals", round, population.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::translator::BinToWeightParams;
    use crate::engines::translation::BinToWeightTranslator;
    use crate::types::Genotype;

    struct FixedScenario(TrialScore);

    impl Scenario for FixedScenario {
        fn score_agent(&self, _net: &FeedForwardNet) -> Result<TrialScore> {
            Ok(self.0)
        }
    }

    /// Hands out the given scores in turn, cycling
    struct CyclingGenerator {
        scores: Vec<TrialScore>,
        next: usize,
    }

    impl ScenarioGenerator for CyclingGenerator {
        type Scenario = FixedScenario;

        fn generate(&mut self) -> Result<FixedScenario> {
            let score = self.scores[self.next % self.scores.len()];
            self.next += 1;
            Ok(FixedScenario(score))
        }
    }

    fn agent_individual() -> Individual {
        let translator = BinToWeightTranslator::new(BinToWeightParams {
            layer_sizes: vec![1, 1],
            ..BinToWeightParams::default()
        })
        .unwrap();
        let mut individual = Individual::new(Genotype::new(vec![0; 8]).unwrap());
        individual.develop_with(&translator).unwrap();
        individual
    }

    fn score(food: f64, poison: f64) -> TrialScore {
        TrialScore { food, poison }
    }

    #[test]
    fn test_contribution_formula() {
        assert_eq!(scenario_contribution(score(4.0, 0.0)), 4.0);
        assert!((scenario_contribution(score(2.0, 5.0)) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_mean_over_scenarios() {
        let generator = CyclingGenerator {
            scores: vec![score(4.0, 0.0), score(2.0, 5.0)],
            next: 0,
        };
        let evaluator = MultiScenarioEvaluator::new(generator, 2, false).unwrap();
        let fitness = evaluator.evaluate(&agent_individual()).unwrap();
        assert!((fitness - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_dynamic_regenerates_each_round() {
        let generator = CyclingGenerator {
            scores: vec![score(1.0, 0.0), score(3.0, 0.0)],
            next: 0,
        };
        let mut evaluator = MultiScenarioEvaluator::new(generator, 1, true).unwrap();
        let mut population = vec![agent_individual()];

        evaluator.evaluate_all(&mut population).unwrap();
        let first = population[0].fitness().unwrap();
        evaluator.evaluate_all(&mut population).unwrap();
        let second = population[0].fitness().unwrap();
        assert_ne!(first, second);
        assert_eq!(population[0].scored().unwrap().round, 2);
    }

    #[test]
    fn test_static_reuses_scenarios() {
        let generator = CyclingGenerator {
            scores: vec![score(1.0, 0.0), score(3.0, 0.0)],
            next: 0,
        };
        let mut evaluator = MultiScenarioEvaluator::new(generator, 1, false).unwrap();
        let individual = agent_individual();
        let a = evaluator.evaluate(&individual).unwrap();
        assert_eq!(a, evaluator.evaluate(&individual).unwrap());

        let mut population = vec![individual];
        evaluator.evaluate_all(&mut population).unwrap();
        evaluator.evaluate_all(&mut population).unwrap();
        assert_eq!(population[0].fitness(), Some(a));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let make = |parallel| {
            let generator = CyclingGenerator {
                scores: vec![score(5.0, 1.0), score(2.0, 2.0), score(0.0, 3.0)],
                next: 0,
            };
            MultiScenarioEvaluator::new(generator, 3, false)
                .unwrap()
                .with_parallel(parallel)
        };
        let mut sequential = make(false);
        let mut parallel = make(true);
        let mut a: Vec<Individual> = (0..8).map(|_| agent_individual()).collect();
        let mut b = a.clone();
        sequential.evaluate_all(&mut a).unwrap();
        parallel.evaluate_all(&mut b).unwrap();
        let fa: Vec<_> = a.iter().map(|i| i.fitness()).collect();
        let fb: Vec<_> = b.iter().map(|i| i.fitness()).collect();
        assert_eq!(fa, fb);
    }

    #[test]
    fn test_scoring_failure_propagates() {
        struct Broken;
        impl Scenario for Broken {
            fn score_agent(&self, _net: &FeedForwardNet) -> Result<TrialScore> {
                Err(NeuroevoError::Scenario("simulator crashed".to_string()))
            }
        }
        struct BrokenGenerator;
        impl ScenarioGenerator for BrokenGenerator {
            type Scenario = Broken;
            fn generate(&mut self) -> Result<Broken> {
                Ok(Broken)
            }
        }

        let mut evaluator = MultiScenarioEvaluator::new(BrokenGenerator, 2, false).unwrap();
        let mut population = vec![agent_individual()];
        assert!(matches!(
            evaluator.evaluate_all(&mut population),
            Err(NeuroevoError::Scenario(_))
        ));
        assert_eq!(population[0].fitness(), None);
    }

    #[test]
    fn test_failed_round_leaves_earlier_rounds_distinguishable() {
        let generator = CyclingGenerator {
            scores: vec![score(2.0, 0.0)],
            next: 0,
        };
        let mut evaluator = MultiScenarioEvaluator::new(generator, 1, false).unwrap();
        let mut population = vec![agent_individual(), agent_individual()];
        evaluator.evaluate_all(&mut population).unwrap();

        // same genotype, but now carrying a phenotype this evaluator rejects
        let mut developed = population[1].clone();
        developed
            .develop_with(&crate::engines::translation::DefaultTranslator)
            .unwrap();
        population[1].set_phenotype(developed.phenotype().unwrap().clone());
        assert!(evaluator.evaluate_all(&mut population).is_err());

        let round = evaluator.round();
        assert_eq!(round, 2);
        assert_eq!(population[0].fitness_for_round(round), Some(2.0));
        assert_eq!(population[1].fitness_for_round(round), None);
        assert_eq!(population[1].scored().unwrap().round, 1);
    }

    #[test]
    fn test_rejects_integer_phenotype() {
        let generator = CyclingGenerator {
            scores: vec![score(1.0, 0.0)],
            next: 0,
        };
        let evaluator = MultiScenarioEvaluator::new(generator, 1, false).unwrap();
        let mut individual = Individual::new(Genotype::new(vec![1, 0]).unwrap());
        individual
            .develop_with(&crate::engines::translation::DefaultTranslator)
            .unwrap();
        assert!(matches!(
            evaluator.evaluate(&individual),
            Err(NeuroevoError::PhenotypeMismatch { .. })
        ));
    }
}
