use super::Crossover;
use crate::{
    error::{ensure_length, GeneticError, Result},
    genome::Genome,
    rng::RandomNumberGenerator,
};

/// Segment-swap crossover.
///
/// A window starting at a uniformly drawn `c1` in `[0, len - cut_length]` and ending at
/// `c2 = c1 + cut_length` is swapped between the two parents. Both window ends are
/// inclusive, so `cut_length + 1` genes change hands (clipped to the genome when the cut
/// spans all of it). A cut length of zero is the identity crossover.
///
/// # Examples
///
/// ```
/// use genswarm::genome::Genome;
/// use genswarm::operators::{Crossover, Splice};
/// use genswarm::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let splice = Splice::new(1);
///
/// let (a, b) = splice
///     .crossover(&Genome::from_values(&[1.0]), &Genome::from_values(&[2.0]), &mut rng)
///     .unwrap();
///
/// assert_eq!(a.values(), vec![2.0]);
/// assert_eq!(b.values(), vec![1.0]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice {
    cut_length: usize,
}

impl Splice {
    pub fn new(cut_length: usize) -> Self {
        Self { cut_length }
    }

    pub fn cut_length(&self) -> usize {
        self.cut_length
    }

    /// Checks that this splice fits genomes of `genome_length` genes.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] when the cut is longer than the genome.
    pub fn validate(&self, genome_length: usize) -> Result<()> {
        if self.cut_length > genome_length {
            return Err(GeneticError::Configuration(format!(
                "Cut length ({}) exceeds genome length ({})",
                self.cut_length, genome_length
            )));
        }
        Ok(())
    }
}

impl Crossover for Splice {
    fn crossover(
        &self,
        mother: &Genome,
        father: &Genome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Genome, Genome)> {
        ensure_length(mother.len(), father.len())?;
        self.validate(mother.len())?;

        if self.cut_length == 0 {
            return Ok((mother.clone(), father.clone()));
        }

        let len = mother.len();
        let c1 = rng.next_index(len - self.cut_length + 1);
        let c2 = c1 + self.cut_length;

        let mut offspring_a = mother.clone();
        let mut offspring_b = father.clone();
        let end = c2.min(len - 1);

        for i in c1..=end {
            offspring_a.genes_mut()[i].copy_from(&father.genes()[i])?;
            offspring_b.genes_mut()[i].copy_from(&mother.genes()[i])?;
        }

        Ok((offspring_a, offspring_b))
    }
}
