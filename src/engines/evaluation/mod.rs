pub mod agent;
pub mod evaluator;
pub mod similarity;

pub use agent::{
    scenario_contribution, FlatlandsAgentEvaluator, MultiScenarioEvaluator, POISON_WEIGHT,
};
pub use evaluator::{EvaluatorKind, FitnessEvaluator};
pub use similarity::SimilarityEvaluator;
