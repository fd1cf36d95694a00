//! Genotype-to-phenotype translation and fitness evaluation for
//! neuro-evolution of Flatland agents.

pub mod config;
pub mod engines;
pub mod error;
pub mod registry;
pub mod simulation;
pub mod types;

pub use error::{NeuroevoError, Result};
