use crate::config::traits::parse_parameters;
use crate::config::{AppConfig, ComponentSpec};
use crate::engines::evaluation::{EvaluatorKind, FlatlandsAgentEvaluator, SimilarityEvaluator};
use crate::engines::translation::{BinToWeightTranslator, DefaultTranslator, TranslatorKind};
use crate::error::{NeuroevoError, Result};
use log::info;
use std::collections::HashMap;

pub type TranslatorConstructor = fn(&serde_json::Value) -> Result<TranslatorKind>;
pub type EvaluatorConstructor = fn(usize, &serde_json::Value) -> Result<EvaluatorKind>;

/// Maps the class names used in configuration to constructors
pub struct ComponentRegistry {
    translators: HashMap<&'static str, TranslatorConstructor>,
    evaluators: HashMap<&'static str, EvaluatorConstructor>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            translators: HashMap::new(),
            evaluators: HashMap::new(),
        };
        registry.register_translators();
        registry.register_evaluators();
        registry
    }

    fn register_translators(&mut self) {
        self.translators.insert("DefaultTranslator", |params| {
            Ok(TranslatorKind::Default(DefaultTranslator::new(
                parse_parameters(params)?,
            )))
        });
        self.translators.insert("BinToWeightTranslator", |params| {
            Ok(TranslatorKind::BinToWeight(BinToWeightTranslator::new(
                parse_parameters(params)?,
            )?))
        });
    }

    fn register_evaluators(&mut self) {
        self.evaluators.insert("DefaultFitnessEvaluator", |genome_length, params| {
            Ok(EvaluatorKind::Similarity(SimilarityEvaluator::new(
                genome_length,
                parse_parameters(params)?,
            )?))
        });
        self.evaluators.insert("FlatlandsAgentFitnessEvaluator", |_genome_length, params| {
            Ok(EvaluatorKind::FlatlandsAgent(FlatlandsAgentEvaluator::flatlands(
                parse_parameters(params)?,
            )?))
        });
    }

    pub fn translator_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.translators.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn evaluator_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.evaluators.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Build the translator configured under `key`
    pub fn make_translator(&self, config: &AppConfig, key: &str) -> Result<TranslatorKind> {
        let spec = lookup(&config.translator, "translator key", key)?;
        let constructor = self
            .translators
            .get(spec.class_name.as_str())
            .ok_or_else(|| NeuroevoError::UnknownComponent {
                kind: "translator class",
                key: spec.class_name.clone(),
            })?;
        info!("Translator '{}': {} {}", key, spec.class_name, spec.parameters);
        constructor(&spec.parameters)
    }

    /// Build the fitness evaluator configured under `key`
    pub fn make_fitness_evaluator(
        &self,
        config: &AppConfig,
        genome_length: usize,
        key: &str,
    ) -> Result<EvaluatorKind> {
        let spec = lookup(&config.fitness, "fitness key", key)?;
        let constructor = self
            .evaluators
            .get(spec.class_name.as_str())
            .ok_or_else(|| NeuroevoError::UnknownComponent {
                kind: "evaluator class",
                key: spec.class_name.clone(),
            })?;
        info!("Fitness '{}': {} {}", key, spec.class_name, spec.parameters);
        constructor(genome_length, &spec.parameters)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup<'a>(
    entries: &'a std::collections::BTreeMap<String, ComponentSpec>,
    kind: &'static str,
    key: &str,
) -> Result<&'a ComponentSpec> {
    entries.get(key).ok_or_else(|| NeuroevoError::UnknownComponent {
        kind,
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_lists_components() {
        let registry = ComponentRegistry::new();
        assert_eq!(
            registry.translator_names(),
            vec!["BinToWeightTranslator", "DefaultTranslator"]
        );
        assert_eq!(
            registry.evaluator_names(),
            vec!["DefaultFitnessEvaluator", "FlatlandsAgentFitnessEvaluator"]
        );
    }

    #[test]
    fn test_make_default_components() {
        let registry = ComponentRegistry::new();
        let config = AppConfig::default();
        let translator = registry.make_translator(&config, "default").unwrap();
        assert_eq!(translator.name(), "DefaultTranslator");
        let evaluator = registry
            .make_fitness_evaluator(&config, 10, "default")
            .unwrap();
        assert_eq!(evaluator.name(), "DefaultFitnessEvaluator");
    }

    #[test]
    fn test_unknown_key_and_class() {
        let registry = ComponentRegistry::new();
        let mut config = AppConfig::default();
        assert!(matches!(
            registry.make_translator(&config, "nope"),
            Err(NeuroevoError::UnknownComponent { .. })
        ));

        config.fitness.insert(
            "odd".to_string(),
            ComponentSpec::new("NoSuchEvaluator", json!({})),
        );
        assert!(matches!(
            registry.make_fitness_evaluator(&config, 4, "odd"),
            Err(NeuroevoError::UnknownComponent { .. })
        ));
    }

    #[test]
    fn test_invalid_parameters_fail_at_construction() {
        let registry = ComponentRegistry::new();
        let mut config = AppConfig::default();
        config.translator.insert(
            "broken".to_string(),
            ComponentSpec::new("BinToWeightTranslator", json!({"layers": [6]})),
        );
        assert!(matches!(
            registry.make_translator(&config, "broken"),
            Err(NeuroevoError::Configuration(_))
        ));
    }
}
