//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the configuration of a [`GeneticTrainer`]: how many
//! individuals it evolves, how offspring are produced and mutated, how many worker threads
//! score them, and how much each generation logs.
//!
//! ## Example
//!
//! ```rust
//! use genswarm::evolution::options::{EvolutionOptions, LogLevel};
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(40)
//!     .mutation_amount(0.5)
//!     .cut_length(2)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_population_size(), 40);
//! ```
//!
//! ## Fields
//!
//! - `population_size`: Number of individuals kept from one generation to the next.
//! - `mutation_amount`: Half-width of the uniform perturbation applied to mutated genes.
//! - `mutation_percent`: Probability that a freshly bred offspring is mutated.
//! - `cut_length`: Splice cut length used for crossover.
//! - `percent_to_mate`: Fraction of the population that becomes a mating pair each
//!   generation.
//! - `mating_population`: Fraction of the ranked population parents are drawn from.
//! - `threads`: Size of the worker pool that scores individuals.
//! - `log_level`: How much each generation reports through `tracing`.
//!
//! [`GeneticTrainer`]: super::GeneticTrainer

use crate::error::{GeneticError, Result};

/// How much a driver logs per generation or iteration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// One event per generation with the full score summary.
    Verbose,
    /// One event per generation with the best score only.
    Minimal,
    #[default]
    None,
}

pub(crate) fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    mutation_amount: f64,
    mutation_percent: f64,
    cut_length: usize,
    percent_to_mate: f64,
    mating_population: f64,
    threads: usize,
    log_level: LogLevel,
}

impl EvolutionOptions {
    pub fn new(population_size: usize, mutation_amount: f64, cut_length: usize) -> Self {
        Self {
            population_size,
            mutation_amount,
            cut_length,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_amount(&self) -> f64 {
        self.mutation_amount
    }

    pub fn get_mutation_percent(&self) -> f64 {
        self.mutation_percent
    }

    pub fn get_cut_length(&self) -> usize {
        self.cut_length
    }

    pub fn get_percent_to_mate(&self) -> f64 {
        self.percent_to_mate
    }

    pub fn get_mating_population(&self) -> f64 {
        self.mating_population
    }

    pub fn get_threads(&self) -> usize {
        self.threads
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_mutation_amount(&mut self, mutation_amount: f64) {
        self.mutation_amount = mutation_amount;
    }

    pub fn set_mutation_percent(&mut self, mutation_percent: f64) {
        self.mutation_percent = mutation_percent;
    }

    pub fn set_cut_length(&mut self, cut_length: usize) {
        self.cut_length = cut_length;
    }

    pub fn set_percent_to_mate(&mut self, percent_to_mate: f64) {
        self.percent_to_mate = percent_to_mate;
    }

    pub fn set_mating_population(&mut self, mating_population: f64) {
        self.mating_population = mating_population;
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Number of mating pairs bred per generation: at least one.
    pub fn pairs_per_generation(&self) -> usize {
        ((self.population_size as f64 * self.percent_to_mate).floor() as usize).max(1)
    }

    /// Number of offspring that replace existing individuals each generation. Two per
    /// pair, capped so that the best individual always survives.
    pub fn offspring_per_generation(&self) -> usize {
        (self.pairs_per_generation() * 2).min(self.population_size.saturating_sub(1))
    }

    /// Size of the ranked head parents are drawn from: at least two.
    pub fn mating_pool_size(&self) -> usize {
        ((self.population_size as f64 * self.mating_population).floor() as usize)
            .max(2)
            .min(self.population_size)
    }

    /// Checks the options for values no trainer can run with.
    ///
    /// The cut length is checked against the genome length separately, once the
    /// population is known.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] describing the first invalid option.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(GeneticError::Configuration(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if !self.mutation_amount.is_finite() || self.mutation_amount < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Mutation amount must be a finite, non-negative number, got {}",
                self.mutation_amount
            )));
        }
        check_fraction("Mutation percent", self.mutation_percent)?;
        check_fraction("Percent to mate", self.percent_to_mate)?;
        check_fraction("Mating population", self.mating_population)?;
        if self.threads == 0 {
            return Err(GeneticError::Configuration(
                "Thread count cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use genswarm::evolution::options::EvolutionOptions;
    ///
    /// let options = EvolutionOptions::builder()
    ///     .population_size(10)
    ///     .percent_to_mate(0.5)
    ///     .threads(2)
    ///     .build();
    ///
    /// assert_eq!(options.pairs_per_generation(), 5);
    /// assert_eq!(options.offspring_per_generation(), 9);
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 50,
            mutation_amount: 1.0,
            mutation_percent: 0.1,
            cut_length: 1,
            percent_to_mate: 0.25,
            mating_population: 0.5,
            threads: default_threads(),
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Options left unset take their [`Default`] values.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    mutation_amount: Option<f64>,
    mutation_percent: Option<f64>,
    cut_length: Option<usize>,
    percent_to_mate: Option<f64>,
    mating_population: Option<f64>,
    threads: Option<usize>,
    log_level: Option<LogLevel>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_amount(mut self, value: f64) -> Self {
        self.mutation_amount = Some(value);
        self
    }

    pub fn mutation_percent(mut self, value: f64) -> Self {
        self.mutation_percent = Some(value);
        self
    }

    pub fn cut_length(mut self, value: usize) -> Self {
        self.cut_length = Some(value);
        self
    }

    pub fn percent_to_mate(mut self, value: f64) -> Self {
        self.percent_to_mate = Some(value);
        self
    }

    pub fn mating_population(mut self, value: f64) -> Self {
        self.mating_population = Some(value);
        self
    }

    pub fn threads(mut self, value: usize) -> Self {
        self.threads = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance. Call [`EvolutionOptions::validate`] or
    /// hand the result to a trainer, which validates it.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            mutation_amount: self.mutation_amount.unwrap_or(defaults.mutation_amount),
            mutation_percent: self.mutation_percent.unwrap_or(defaults.mutation_percent),
            cut_length: self.cut_length.unwrap_or(defaults.cut_length),
            percent_to_mate: self.percent_to_mate.unwrap_or(defaults.percent_to_mate),
            mating_population: self.mating_population.unwrap_or(defaults.mating_population),
            threads: self.threads.unwrap_or(defaults.threads),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}
