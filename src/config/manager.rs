use crate::error::{NeuroevoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// One selectable implementation: registered class name plus its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub class_name: String,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl ComponentSpec {
    pub fn new(class_name: &str, parameters: serde_json::Value) -> Self {
        Self {
            class_name: class_name.to_string(),
            parameters,
        }
    }
}

/// Which components the binary wires together, and how big a round is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub translator: String,
    pub fitness: String,
    pub population_size: usize,
    /// Defaults to the length the selected translator expects
    pub genome_length: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            translator: "flatlands".to_string(),
            fitness: "flatlands".to_string(),
            population_size: 200,
            genome_length: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub translator: BTreeMap<String, ComponentSpec>,
    pub fitness: BTreeMap<String, ComponentSpec>,
    pub run: RunConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut translator = BTreeMap::new();
        translator.insert(
            "default".to_string(),
            ComponentSpec::new("DefaultTranslator", json!({})),
        );
        translator.insert(
            "flatlands".to_string(),
            ComponentSpec::new("BinToWeightTranslator", json!({"k": 8, "layers": [6, 3]})),
        );

        let mut fitness = BTreeMap::new();
        fitness.insert(
            "default".to_string(),
            ComponentSpec::new("DefaultFitnessEvaluator", json!({"random_target": false})),
        );
        fitness.insert(
            "flatlands".to_string(),
            ComponentSpec::new(
                "FlatlandsAgentFitnessEvaluator",
                json!({"dynamic": false, "number_of_scenarios": 5, "grid_dimension": 10}),
            ),
        );

        Self {
            translator,
            fitness,
            run: RunConfig::default(),
        }
    }
}

impl AppConfig {
    /// Structural checks only; component parameters are validated when the
    /// registry constructs the component.
    pub fn validate(&self) -> Result<()> {
        for (section, entries) in [("translator", &self.translator), ("fitness", &self.fitness)] {
            for (key, spec) in entries {
                if spec.class_name.trim().is_empty() {
                    return Err(NeuroevoError::Configuration(format!(
                        "{} entry '{}' has no class_name",
                        section, key
                    )));
                }
            }
        }
        if !self.translator.contains_key(&self.run.translator) {
            return Err(NeuroevoError::Configuration(format!(
                "Run selects translator '{}' which is not configured",
                self.run.translator
            )));
        }
        if !self.fitness.contains_key(&self.run.fitness) {
            return Err(NeuroevoError::Configuration(format!(
                "Run selects fitness '{}' which is not configured",
                self.run.fitness
            )));
        }
        if self.run.population_size == 0 {
            return Err(NeuroevoError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a JSON or TOML file, picked by extension
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)?;

        std::fs::write(path, toml_str)
            .map_err(|e| NeuroevoError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` and keep the result only if it validates
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
