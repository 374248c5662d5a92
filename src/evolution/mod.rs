pub mod options;
pub mod trainer;

pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use trainer::{GeneticTrainer, IterationReport};
