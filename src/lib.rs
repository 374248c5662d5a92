pub mod data;
pub mod engine;
pub mod error;
pub mod evolution;
pub mod genome;
pub mod model;
pub mod operators;
pub mod phenotype;
pub mod population;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod swarm;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionOptions, GeneticTrainer, IterationReport, LogLevel};
pub use model::Model;
pub use scoring::{CalculateScore, DatasetScore, ScoreDirection};
pub use swarm::{ParticleSwarm, SwarmOptions};
