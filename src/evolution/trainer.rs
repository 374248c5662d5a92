use tracing::{debug, info};

use super::options::{EvolutionOptions, LogLevel};
use crate::{
    engine::{BatchReport, WorkerPool},
    error::{GeneticError, OptionExt, Result},
    model::Model,
    operators::{Crossover, Mutation, Perturb, Splice},
    population::{Fitness, Individual, Population},
    rng::RandomNumberGenerator,
    scoring::{CalculateScore, ScoreDirection},
    selection::{SelectionStrategy, TournamentSelection},
};

/// Outcome of one generation or swarm iteration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// 1-based number of the iteration that just finished.
    pub iteration: usize,
    pub best_score: f64,
}

/// Evolves a population of models with splice crossover and perturbation mutation.
///
/// Each call to [`GeneticTrainer::iteration`] runs one generation: every individual is
/// scored on the worker pool, the population is ranked, parents drawn from the top of the
/// ranking are bred into offspring, the offspring are scored in a second batch and take
/// the places of the weakest individuals. The best individual is never replaced.
///
/// # Examples
///
/// ```rust
/// use genswarm::data::BasicDataset;
/// use genswarm::evolution::{EvolutionOptions, GeneticTrainer};
/// use genswarm::model::Model;
/// use genswarm::scoring::DatasetScore;
///
/// #[derive(Clone, Debug)]
/// struct Scale {
///     weights: Vec<f64>,
/// }
///
/// impl Model for Scale {
///     fn parameters(&self) -> &[f64] { &self.weights }
///     fn parameters_mut(&mut self) -> &mut [f64] { &mut self.weights }
///     fn input_count(&self) -> usize { 1 }
///     fn output_count(&self) -> usize { 1 }
///     fn compute(&self, input: &[f64], output: &mut [f64]) {
///         output[0] = self.weights[0] * input[0];
///     }
/// }
///
/// let dataset = BasicDataset::from_rows(&[vec![1.0], vec![2.0]], &[vec![3.0], vec![6.0]]).unwrap();
/// let models = (0..8).map(|i| Scale { weights: vec![i as f64] }).collect();
/// let options = EvolutionOptions::builder().population_size(8).threads(2).build();
///
/// let mut trainer = GeneticTrainer::new(models, DatasetScore::new(dataset), options)
///     .unwrap()
///     .with_seed(11);
///
/// let first = trainer.iteration().unwrap();
/// let second = trainer.iteration().unwrap();
/// assert!(second.best_score <= first.best_score);
/// ```
pub struct GeneticTrainer<M: Model, S: CalculateScore<M>> {
    population: Population<M>,
    score: S,
    options: EvolutionOptions,
    selection: Box<dyn SelectionStrategy>,
    crossover: Box<dyn Crossover>,
    mutation: Box<dyn Mutation>,
    pool: WorkerPool,
    rng: RandomNumberGenerator,
    iteration: usize,
}

impl<M: Model, S: CalculateScore<M>> GeneticTrainer<M, S> {
    /// Creates a trainer over `models`, one individual per model.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::Configuration`] if the options are invalid, if the number of
    ///   models differs from the configured population size, or if the cut length does
    ///   not fit the genome.
    /// - [`GeneticError::EmptyPopulation`] / [`GeneticError::LengthMismatch`] from
    ///   building the population.
    pub fn new(models: Vec<M>, score: S, options: EvolutionOptions) -> Result<Self> {
        options.validate()?;

        if models.len() != options.get_population_size() {
            return Err(GeneticError::Configuration(format!(
                "Expected {} models for the population, got {}",
                options.get_population_size(),
                models.len()
            )));
        }

        let population = Population::from_models(models)?;

        let splice = Splice::new(options.get_cut_length());
        splice.validate(population.genome_length())?;
        let perturb = Perturb::new(options.get_mutation_amount())?;

        let pool = WorkerPool::new(options.get_threads())?;

        debug!(
            population = population.len(),
            genome_length = population.genome_length(),
            "genetic trainer created"
        );

        Ok(Self {
            population,
            score,
            options,
            selection: Box::new(TournamentSelection::default()),
            crossover: Box::new(splice),
            mutation: Box::new(perturb),
            pool,
            rng: RandomNumberGenerator::new(),
            iteration: 0,
        })
    }

    /// Creates a trainer that draws parents with `selection` instead of the default
    /// two-way tournament.
    pub fn with_selection(
        models: Vec<M>,
        score: S,
        options: EvolutionOptions,
        selection: impl SelectionStrategy + 'static,
    ) -> Result<Self> {
        let mut trainer = Self::new(models, score, options)?;
        trainer.selection = Box::new(selection);
        Ok(trainer)
    }

    /// Replaces the random number generator with one seeded from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn with_crossover(mut self, crossover: impl Crossover + 'static) -> Self {
        self.crossover = Box::new(crossover);
        self
    }

    pub fn with_mutation(mut self, mutation: impl Mutation + 'static) -> Self {
        self.mutation = Box::new(mutation);
        self
    }

    pub fn population(&self) -> &Population<M> {
        &self.population
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn score(&self) -> &S {
        &self.score
    }

    /// Number of generations run so far.
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    pub fn direction(&self) -> ScoreDirection {
        self.score.direction()
    }

    /// The best individual of the last generation, by the scores it was ranked with.
    pub fn best(&self) -> Option<&Individual<M>> {
        self.population.best(self.direction())
    }

    /// Runs one generation.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Evaluation`] if scoring failed for any individual or
    /// offspring. The generation still completes first: failed individuals are marked
    /// [`Fitness::Failed`], rank last and are replaced by offspring, and the iteration
    /// count advances. Crossover and selection errors are returned as is, before any
    /// replacement.
    pub fn iteration(&mut self) -> Result<IterationReport> {
        let direction = self.direction();

        self.population.clear_fitness();
        let scored = evaluate_all(&self.pool, self.population.individuals_mut(), &self.score);
        self.population.rank(direction);

        let mut offspring = self.breed(direction)?;
        let bred_scored = evaluate_all(&self.pool, &mut offspring, &self.score);

        let bred = offspring.len();
        let last = self.population.len() - 1;
        for (k, child) in offspring.into_iter().enumerate() {
            self.population.replace(last - k, child)?;
        }

        self.iteration += 1;
        let best_score = self
            .best()
            .map_or(direction.worst(), |b| b.fitness().rank_value(direction));

        match self.options.get_log_level() {
            LogLevel::Verbose => {
                let scores = self.population.rank_values(direction);
                let finite: Vec<f64> = scores.iter().copied().filter(|s| s.is_finite()).collect();
                let mean = if finite.is_empty() {
                    f64::NAN
                } else {
                    finite.iter().sum::<f64>() / finite.len() as f64
                };
                info!(
                    iteration = self.iteration,
                    best_score,
                    mean_score = mean,
                    offspring = bred,
                    "generation finished"
                );
            }
            LogLevel::Minimal => info!(iteration = self.iteration, best_score, "generation finished"),
            LogLevel::None => {}
        }

        scored?;
        bred_scored?;

        Ok(IterationReport {
            iteration: self.iteration,
            best_score,
        })
    }

    /// Breeds this generation's offspring from the ranked population. Offspring carry a
    /// deep copy of a parent's model, still holding the parent's parameters until they
    /// are decoded.
    fn breed(&mut self, direction: ScoreDirection) -> Result<Vec<Individual<M>>> {
        let ranked = self.population.rank_values(direction);
        let mating_pool = &ranked[..self.options.mating_pool_size()];
        let pairs = self.options.pairs_per_generation();
        let wanted = self.options.offspring_per_generation();
        let mutation_percent = self.options.get_mutation_percent();

        let mut offspring = Vec::with_capacity(wanted);

        for _ in 0..pairs {
            let picked = self
                .selection
                .select(mating_pool, direction, 2, &mut self.rng)?;
            let (mother, father) = match picked.as_slice() {
                [m, f, ..] => (*m, *f),
                [m] => (*m, *m),
                [] => return Err(GeneticError::EmptyPopulation),
            };

            let individuals = self.population.individuals();
            let parent = |index: usize| {
                individuals.get(index).ok_or_else_genetic(|| {
                    GeneticError::Configuration(format!(
                        "Selection returned index {} for a population of {}",
                        index,
                        individuals.len()
                    ))
                })
            };
            let (mother, father) = (parent(mother)?, parent(father)?);
            let (first, second) =
                self.crossover
                    .crossover(mother.genome(), father.genome(), &mut self.rng)?;

            for (mut genome, parent) in [(first, mother), (second, father)] {
                if offspring.len() == wanted {
                    break;
                }
                if self.rng.next_unit() < mutation_percent {
                    self.mutation.mutate(&mut genome, &mut self.rng);
                }
                offspring.push(Individual::with_genome(parent.model().clone(), genome)?);
            }
        }

        Ok(offspring)
    }
}

/// Decodes and scores every individual in one task group.
///
/// Individuals whose task failed, whether by error or panic, are marked failed once the
/// group has drained.
pub(crate) fn evaluate_all<M, S>(
    pool: &WorkerPool,
    individuals: &mut [Individual<M>],
    score: &S,
) -> Result<BatchReport>
where
    M: Model,
    S: CalculateScore<M>,
{
    let result = pool.run_batch(
        individuals
            .iter_mut()
            .map(|individual| move || evaluate(individual, score)),
    );

    if let Err(GeneticError::Evaluation { failures }) = &result {
        for failure in failures {
            if let Some(individual) = individuals.get_mut(failure.sequence) {
                if !individual.fitness().is_failed() {
                    individual.mark_failed(failure.message.clone());
                }
            }
        }
    }

    result
}

fn evaluate<M: Model, S: CalculateScore<M>>(
    individual: &mut Individual<M>,
    score: &S,
) -> Result<()> {
    let outcome = individual
        .decode()
        .and_then(|_| score.calculate_score(individual.model_mut()));

    match outcome {
        Ok(value) => {
            individual.set_fitness(Fitness::Scored(value));
            Ok(())
        }
        Err(err) => {
            individual.mark_failed(err.to_string());
            Err(err)
        }
    }
}
