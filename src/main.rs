use anyhow::{Context, Result};
use log::info;
use neuroevo::config::ConfigManager;
use neuroevo::engines::evaluation::FitnessEvaluator;
use neuroevo::registry::ComponentRegistry;
use neuroevo::types::{Genotype, Individual};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Genome length for translators that accept any length
const DEFAULT_GENOME_LENGTH: usize = 60;

fn main() -> Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?;
    }
    let config = manager.get();
    config.validate()?;

    let registry = ComponentRegistry::new();
    let translator = registry.make_translator(&config, &config.run.translator)?;
    let genome_length = config
        .run
        .genome_length
        .or_else(|| translator.expected_genome_length())
        .unwrap_or(DEFAULT_GENOME_LENGTH);
    let mut evaluator =
        registry.make_fitness_evaluator(&config, genome_length, &config.run.fitness)?;

    let mut rng = match config.run.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut population: Vec<Individual> = (0..config.run.population_size)
        .map(|_| Individual::new(Genotype::random(genome_length, &mut rng)))
        .collect();
    for individual in population.iter_mut() {
        individual.develop_with(&translator)?;
    }

    info!(
        "Evaluating {} individuals with {} / {}",
        population.len(),
        translator.name(),
        evaluator.name()
    );
    evaluator.evaluate_all(&mut population)?;

    let round = evaluator.round();
    let scores: Vec<f64> = population
        .iter()
        .filter_map(|i| i.fitness_for_round(round))
        .collect();
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    println!(
        "Round {} complete. Best fitness: {:.4}, mean fitness: {:.4}",
        round,
        best,
        mean
    );
    Ok(())
}
