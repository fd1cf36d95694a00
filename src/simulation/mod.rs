pub mod flatland;
pub mod network;

pub use flatland::{Cell, Flatland, FlatlandGenerator, Heading, Snapshot};
pub use network::{Activation, FeedForwardNet, NetworkTopology};

use crate::error::Result;

/// Food and poison eaten during one trial
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrialScore {
    pub food: f64,
    pub poison: f64,
}

/// Scoring contract of a simulated environment.
///
/// Scoring takes `&self`: a scenario's layout is fixed once built, so the same
/// scenario can score any number of agents, in any order or in parallel.
pub trait Scenario: Send + Sync {
    fn score_agent(&self, net: &FeedForwardNet) -> Result<TrialScore>;
}

/// Source of fresh scenarios for an evaluation round
pub trait ScenarioGenerator: Send + Sync {
    type Scenario: Scenario;

    fn generate(&mut self) -> Result<Self::Scenario>;
}
