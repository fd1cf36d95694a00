use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeuroevoError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid genotype: {0}")]
    InvalidGenotype(String),

    #[error("Weight count mismatch: layers require {expected} weights, genotype produced {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },

    #[error("Individual has no phenotype; develop it with a translator first")]
    MissingPhenotype,

    #[error("Phenotype mismatch: expected {expected}, found {found}")]
    PhenotypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Unknown {kind}: {key}")]
    UnknownComponent { kind: &'static str, key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, NeuroevoError>;
