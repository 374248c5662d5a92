use crate::{
    error::{ensure_length, Result},
    genome::Genome,
    model::Model,
    phenotype,
    scoring::ScoreDirection,
};

/// The score an individual holds for the current generation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fitness {
    /// Not evaluated in this generation yet.
    #[default]
    Unscored,
    Scored(f64),
    /// Evaluation raised an error; the message is kept for reporting.
    Failed(String),
}

impl Fitness {
    /// The score to rank by: the raw score if there is a finite one, the direction's
    /// worst value otherwise.
    pub fn rank_value(&self, direction: ScoreDirection) -> f64 {
        match self {
            Fitness::Scored(score) => direction.sanitize(*score),
            Fitness::Unscored | Fitness::Failed(_) => direction.worst(),
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Fitness::Scored(score) => Some(*score),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fitness::Failed(_))
    }
}

/// A model paired with the genome that encodes it.
#[derive(Debug, Clone)]
pub struct Individual<M: Model> {
    model: M,
    genome: Genome,
    fitness: Fitness,
}

impl<M: Model> Individual<M> {
    /// Wraps `model`, encoding its current parameters into a fresh genome.
    pub fn new(model: M) -> Self {
        let genome = phenotype::encode(&model);
        Self {
            model,
            genome,
            fitness: Fitness::Unscored,
        }
    }

    /// Pairs `model` with an existing genome.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeneticError::LengthMismatch`] unless the genome is exactly as
    /// long as the model's parameter vector.
    pub fn with_genome(model: M, genome: Genome) -> Result<Self> {
        ensure_length(model.parameter_count(), genome.len())?;
        Ok(Self {
            model,
            genome,
            fitness: Fitness::Unscored,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn genome_mut(&mut self) -> &mut Genome {
        &mut self.genome
    }

    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    pub fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = fitness;
    }

    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.fitness = Fitness::Failed(message.into());
    }

    /// Writes the genome into the model.
    pub fn decode(&mut self) -> Result<()> {
        phenotype::decode(&self.genome, &mut self.model)
    }

    /// Re-synthesizes the genome from the model's current parameters.
    pub fn encode(&mut self) {
        self.genome = phenotype::encode(&self.model);
    }

    pub fn into_model(self) -> M {
        self.model
    }
}
