pub mod fitness;
pub mod manager;
pub mod traits;
pub mod translator;

pub use fitness::{FlatlandsAgentParams, SimilarityParams};
pub use manager::{AppConfig, ComponentSpec, ConfigManager, RunConfig};
pub use translator::{BinToWeightParams, DefaultTranslatorParams};
