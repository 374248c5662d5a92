//! # Population
//!
//! A [`Population`] is the ordered set of [`Individual`]s an evolutionary driver works on.
//! Insertion order matters: ranking is a stable sort, so individuals with equal scores
//! keep the order they were added in.
mod individual;

pub use individual::{Fitness, Individual};

use crate::{
    error::{ensure_length, GeneticError, Result},
    model::Model,
    scoring::ScoreDirection,
};

#[derive(Debug, Clone)]
pub struct Population<M: Model> {
    individuals: Vec<Individual<M>>,
}

impl<M: Model> Population<M> {
    /// Builds a population from `models`, one individual each.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::EmptyPopulation`] if `models` is empty.
    /// - [`GeneticError::LengthMismatch`] if the models do not all have the same number
    ///   of parameters.
    pub fn from_models(models: Vec<M>) -> Result<Self> {
        let expected = models
            .first()
            .map(Model::parameter_count)
            .ok_or(GeneticError::EmptyPopulation)?;

        for model in &models {
            ensure_length(expected, model.parameter_count())?;
        }

        Ok(Self {
            individuals: models.into_iter().map(Individual::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Number of genes in each individual's genome.
    pub fn genome_length(&self) -> usize {
        self.individuals.first().map_or(0, |i| i.genome().len())
    }

    pub fn individuals(&self) -> &[Individual<M>] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual<M>] {
        &mut self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual<M>> {
        self.individuals.get(index)
    }

    /// Resets every individual's fitness for a new generation.
    pub fn clear_fitness(&mut self) {
        for individual in &mut self.individuals {
            individual.set_fitness(Fitness::Unscored);
        }
    }

    /// Reorders the population best-first. Ties keep insertion order.
    pub fn rank(&mut self, direction: ScoreDirection) {
        self.individuals.sort_by(|a, b| {
            direction.cmp_best_first(
                a.fitness().rank_value(direction),
                b.fitness().rank_value(direction),
            )
        });
    }

    /// Rank values in population order.
    pub fn rank_values(&self, direction: ScoreDirection) -> Vec<f64> {
        self.individuals
            .iter()
            .map(|i| i.fitness().rank_value(direction))
            .collect()
    }

    /// The best individual by current fitness. Ties go to the earliest.
    pub fn best(&self, direction: ScoreDirection) -> Option<&Individual<M>> {
        self.individuals.iter().reduce(|best, candidate| {
            if direction.is_better(
                candidate.fitness().rank_value(direction),
                best.fitness().rank_value(direction),
            ) {
                candidate
            } else {
                best
            }
        })
    }

    /// Replaces the individual at `index`, returning the one it displaced.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::LengthMismatch`] if the replacement's genome length
    /// differs from the population's.
    pub fn replace(&mut self, index: usize, individual: Individual<M>) -> Result<Individual<M>> {
        ensure_length(self.genome_length(), individual.genome().len())?;
        let len = self.len();
        let slot = self.individuals.get_mut(index).ok_or_else(|| {
            GeneticError::Configuration(format!(
                "Index {} out of range for a population of {}",
                index, len
            ))
        })?;
        Ok(std::mem::replace(slot, individual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        weights: Vec<f64>,
    }

    impl Model for Tag {
        fn parameters(&self) -> &[f64] {
            &self.weights
        }

        fn parameters_mut(&mut self) -> &mut [f64] {
            &mut self.weights
        }

        fn input_count(&self) -> usize {
            0
        }

        fn output_count(&self) -> usize {
            0
        }

        fn compute(&self, _input: &[f64], _output: &mut [f64]) {}
    }

    fn tag(v: f64) -> Tag {
        Tag { weights: vec![v] }
    }

    fn scored(values: &[f64]) -> Population<Tag> {
        let mut population =
            Population::from_models(values.iter().map(|v| tag(*v)).collect()).unwrap();
        for (individual, v) in population.individuals_mut().iter_mut().zip(values) {
            individual.set_fitness(Fitness::Scored(*v));
        }
        population
    }

    #[test]
    fn test_empty_population() {
        let result = Population::<Tag>::from_models(Vec::new());
        assert!(matches!(result, Err(GeneticError::EmptyPopulation)));
    }

    #[test]
    fn test_mismatched_parameter_counts() {
        let result = Population::from_models(vec![tag(1.0), Tag { weights: vec![1.0, 2.0] }]);
        assert!(matches!(result, Err(GeneticError::LengthMismatch { .. })));
    }

    #[test]
    fn test_rank_is_stable_and_sends_failures_last() {
        let mut population = scored(&[3.0, 1.0, 2.0, 1.0]);
        population.individuals_mut()[0].mark_failed("boom");
        population.individuals_mut()[2].set_fitness(Fitness::Scored(f64::NAN));

        population.rank(ScoreDirection::Minimize);

        let order: Vec<f64> = population
            .individuals()
            .iter()
            .map(|i| i.model().weights[0])
            .collect();
        // Both 1.0 scores keep insertion order, then NaN and the failure as worst (stable).
        assert_eq!(order, vec![1.0, 1.0, 3.0, 2.0]);
        assert!(population.individuals()[2].fitness().is_failed());
    }

    #[test]
    fn test_best_respects_direction() {
        let population = scored(&[3.0, 1.0, 2.0]);

        let best = population.best(ScoreDirection::Minimize).unwrap();
        assert_eq!(best.fitness().score(), Some(1.0));

        let best = population.best(ScoreDirection::Maximize).unwrap();
        assert_eq!(best.fitness().score(), Some(3.0));
    }

    #[test]
    fn test_replace_checks_length() {
        let mut population = scored(&[1.0, 2.0]);

        let old = population.replace(1, Individual::new(tag(9.0))).unwrap();
        assert_eq!(old.model(), &tag(2.0));
        assert_eq!(population.individuals()[1].model(), &tag(9.0));

        let wrong = Individual::new(Tag {
            weights: vec![1.0, 1.0],
        });
        assert!(population.replace(0, wrong).is_err());
        assert!(population.replace(5, Individual::new(tag(0.0))).is_err());
    }

    #[test]
    fn test_individual_with_genome_checks_length() {
        use crate::genome::Genome;

        assert!(Individual::with_genome(tag(1.0), Genome::from_values(&[1.0, 2.0])).is_err());

        let mut individual =
            Individual::with_genome(tag(1.0), Genome::from_values(&[4.0])).unwrap();
        individual.decode().unwrap();
        assert_eq!(individual.model(), &tag(4.0));
    }
}
