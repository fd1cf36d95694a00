use super::traits::ConfigSection;
use crate::error::{NeuroevoError, Result};
use crate::simulation::flatland::Flatland;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityParams {
    /// Draw a random binary target once instead of all ones
    pub random_target: bool,
    pub seed: Option<u64>,
}

impl ConfigSection for SimilarityParams {
    fn section_name() -> &'static str {
        "DefaultFitnessEvaluator"
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatlandsAgentParams {
    /// Regenerate every scenario at the start of each evaluation round
    pub dynamic: bool,
    pub number_of_scenarios: usize,
    pub grid_dimension: usize,
    pub food_probability: f64,
    pub poison_probability: f64,
    pub steps: usize,
    pub seed: Option<u64>,
    /// Score individuals on the rayon pool
    pub parallel: bool,
}

impl Default for FlatlandsAgentParams {
    fn default() -> Self {
        Self {
            dynamic: false,
            number_of_scenarios: 5,
            grid_dimension: 10,
            food_probability: 0.33333,
            poison_probability: 0.33333,
            steps: Flatland::DEFAULT_STEPS,
            seed: None,
            parallel: false,
        }
    }
}

impl ConfigSection for FlatlandsAgentParams {
    fn section_name() -> &'static str {
        "FlatlandsAgentFitnessEvaluator"
    }

    fn validate(&self) -> Result<()> {
        if self.number_of_scenarios == 0 {
            return Err(NeuroevoError::Configuration(
                "At least one scenario is required".to_string(),
            ));
        }
        if self.grid_dimension == 0 {
            return Err(NeuroevoError::Configuration(
                "Grid dimension must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.food_probability)
            || !(0.0..=1.0).contains(&self.poison_probability)
        {
            return Err(NeuroevoError::Configuration(
                "Food and poison probabilities must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
