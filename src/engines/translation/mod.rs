pub mod gray;
pub mod phenotype;
pub mod translator;

pub use gray::TrailingBits;
pub use phenotype::{IntegerPhenotype, Phenotype, WeightsPhenotype};
pub use translator::{BinToWeightTranslator, DefaultTranslator, Translator, TranslatorKind};
