//! # Particle Swarm
//!
//! [`ParticleSwarm`] trains models by particle-swarm optimization. Each [`Particle`] owns
//! a model; its position is the model's parameter vector. Every iteration each particle is
//! pulled towards its own best position and the swarm's best position, moved, and
//! re-scored on the worker pool. The swarm's best is only ever replaced by a strictly
//! better one, so [`ParticleSwarm::best_score`] never gets worse.
pub mod options;
mod particle;

pub use options::{SwarmOptions, SwarmOptionsBuilder};
pub use particle::Particle;

use tracing::{debug, info};

use crate::{
    engine::WorkerPool,
    error::{ensure_length, GeneticError, OptionExt, Result},
    evolution::{options::LogLevel, IterationReport},
    model::Model,
    rng::RandomNumberGenerator,
    scoring::{CalculateScore, ScoreDirection},
};
use particle::Coefficients;

/// The best position the swarm has found and its score.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BestRecord {
    pub position: Vec<f64>,
    pub score: f64,
}

/// Particle-swarm optimizer over a set of models.
///
/// # Examples
///
/// ```rust
/// use genswarm::model::Model;
/// use genswarm::scoring::CalculateScore;
/// use genswarm::swarm::{ParticleSwarm, SwarmOptions};
///
/// #[derive(Clone, Debug)]
/// struct Point {
///     coords: Vec<f64>,
/// }
///
/// impl Model for Point {
///     fn parameters(&self) -> &[f64] { &self.coords }
///     fn parameters_mut(&mut self) -> &mut [f64] { &mut self.coords }
///     fn input_count(&self) -> usize { 0 }
///     fn output_count(&self) -> usize { 0 }
///     fn compute(&self, _input: &[f64], _output: &mut [f64]) {}
/// }
///
/// struct Sphere;
///
/// impl CalculateScore<Point> for Sphere {
///     fn calculate_score(&self, model: &mut Point) -> genswarm::Result<f64> {
///         Ok(model.coords.iter().map(|c| c * c).sum())
///     }
///     fn should_minimize(&self) -> bool { true }
/// }
///
/// let models = (0..10).map(|i| Point { coords: vec![i as f64 - 5.0, 3.0] }).collect();
/// let options = SwarmOptions::builder().swarm_size(10).threads(2).build();
/// let mut swarm = ParticleSwarm::new(models, Sphere, options).unwrap().with_seed(4);
///
/// let mut last = f64::INFINITY;
/// for _ in 0..20 {
///     let report = swarm.iteration().unwrap();
///     assert!(report.best_score <= last);
///     last = report.best_score;
/// }
/// ```
pub struct ParticleSwarm<M: Model, S: CalculateScore<M>> {
    particles: Vec<Particle<M>>,
    score: S,
    options: SwarmOptions,
    pool: WorkerPool,
    rng: RandomNumberGenerator,
    best: Option<BestRecord>,
    initialized: bool,
    iteration: usize,
}

impl<M: Model, S: CalculateScore<M>> ParticleSwarm<M, S> {
    /// Creates a swarm with one particle per model.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::Configuration`] if the options are invalid or the number of
    ///   models differs from the configured swarm size.
    /// - [`GeneticError::LengthMismatch`] if the models have different parameter counts.
    pub fn new(models: Vec<M>, score: S, options: SwarmOptions) -> Result<Self> {
        options.validate()?;

        if models.len() != options.get_swarm_size() {
            return Err(GeneticError::Configuration(format!(
                "Expected {} models for the swarm, got {}",
                options.get_swarm_size(),
                models.len()
            )));
        }

        let dimensions = models
            .first()
            .map(Model::parameter_count)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        for model in &models {
            ensure_length(dimensions, model.parameter_count())?;
        }

        let pool = WorkerPool::new(options.get_threads())?;
        debug!(particles = models.len(), dimensions, "particle swarm created");

        Ok(Self {
            particles: models.into_iter().map(Particle::new).collect(),
            score,
            options,
            pool,
            rng: RandomNumberGenerator::new(),
            best: None,
            initialized: false,
            iteration: 0,
        })
    }

    /// Replaces the random number generator with one seeded from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn particles(&self) -> &[Particle<M>] {
        &self.particles
    }

    pub fn options(&self) -> &SwarmOptions {
        &self.options
    }

    /// Number of iterations run so far.
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    pub fn direction(&self) -> ScoreDirection {
        self.score.direction()
    }

    /// The swarm's best record, once any particle has been scored.
    pub fn best(&self) -> Option<&BestRecord> {
        self.best.as_ref()
    }

    pub fn best_position(&self) -> Option<&[f64]> {
        self.best.as_ref().map(|b| b.position.as_slice())
    }

    /// The best score found so far, or the direction's worst value before the first
    /// iteration.
    pub fn best_score(&self) -> f64 {
        self.best
            .as_ref()
            .map_or(self.direction().worst(), |b| self.direction().sanitize(b.score))
    }

    /// A copy of a particle's model carrying the best position found so far.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::EmptyPopulation`] before the first iteration.
    pub fn best_model(&self) -> Result<M> {
        let best = self
            .best
            .as_ref()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        let mut model = self
            .particles
            .first()
            .map(|p| p.model().clone())
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        ensure_length(model.parameter_count(), best.position.len())?;
        model.parameters_mut().copy_from_slice(&best.position);
        model.refresh();
        Ok(model)
    }

    /// Runs one iteration. The first call also scores the initial positions and seeds the
    /// personal and global bests.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Evaluation`] if scoring failed for any particle. The batch
    /// has fully drained by then, the failed particles are marked failed, and the global
    /// best has been updated from the particles that succeeded.
    pub fn iteration(&mut self) -> Result<IterationReport> {
        let direction = self.direction();

        if !self.initialized {
            self.initialize(direction)?;
        }

        let coefficients = Coefficients {
            inertia: self.options.get_inertia(),
            c1: self.options.get_c1(),
            c2: self.options.get_c2(),
            max_velocity: self.options.get_max_velocity(),
            max_position: self.options.get_max_position(),
        };
        let seeds: Vec<u64> = (0..self.particles.len())
            .map(|_| self.rng.next_seed())
            .collect();

        // Snapshot of the global best; only the reduction below writes it.
        let global_best = match &self.best {
            Some(best) => best.position.clone(),
            None => Vec::new(),
        };

        let result = {
            let global_best = global_best.as_slice();
            let score = &self.score;
            self.pool.run_batch(self.particles.iter_mut().zip(seeds).map(
                |(particle, seed)| {
                    move || {
                        let mut rng = RandomNumberGenerator::from_seed(seed);
                        if global_best.is_empty() {
                            // Nothing has scored yet: follow the particle's own best.
                            let own = particle.best_position().to_vec();
                            particle.step(&own, coefficients, &mut rng);
                        } else {
                            particle.step(global_best, coefficients, &mut rng);
                        }
                        particle.evaluate(score, direction)
                    }
                },
            ))
        };

        self.mark_failures(&result);
        self.reduce_global_best(direction);
        result?;

        self.iteration += 1;
        let best_score = self.best_score();

        match self.options.get_log_level() {
            LogLevel::Verbose => info!(
                iteration = self.iteration,
                best_score,
                failed = self.particles.iter().filter(|p| p.fitness().is_failed()).count(),
                "swarm iteration finished"
            ),
            LogLevel::Minimal => info!(iteration = self.iteration, best_score, "swarm iteration finished"),
            LogLevel::None => {}
        }

        Ok(IterationReport {
            iteration: self.iteration,
            best_score,
        })
    }

    fn initialize(&mut self, direction: ScoreDirection) -> Result<()> {
        let max_velocity = self.options.get_max_velocity();
        for particle in &mut self.particles {
            particle.randomize_velocity(max_velocity, &mut self.rng);
        }

        let score = &self.score;
        let result = self.pool.run_batch(
            self.particles
                .iter_mut()
                .map(|particle| move || particle.evaluate(score, direction)),
        );

        self.mark_failures(&result);
        self.reduce_global_best(direction);
        self.initialized = true;
        debug!(best_score = self.best_score(), "swarm initialized");

        result.map(|_| ())
    }

    /// Marks particles whose task failed without reporting back, such as on a panic.
    fn mark_failures<T>(&mut self, result: &Result<T>) {
        if let Err(GeneticError::Evaluation { failures }) = result {
            for failure in failures {
                if let Some(particle) = self.particles.get_mut(failure.sequence) {
                    if !particle.fitness().is_failed() {
                        particle.mark_failed(failure.message.clone());
                    }
                }
            }
        }
    }

    /// Serial scan over the personal bests. The global best changes only when a strictly
    /// better score shows up.
    fn reduce_global_best(&mut self, direction: ScoreDirection) {
        for particle in &self.particles {
            let candidate = particle.best_score();
            if candidate.is_nan() {
                continue;
            }
            let improves = match &self.best {
                None => true,
                Some(best) => direction.is_better(candidate, best.score),
            };
            if improves {
                self.best = Some(BestRecord {
                    position: particle.best_position().to_vec(),
                    score: candidate,
                });
            }
        }
    }
}
