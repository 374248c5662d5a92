//! # Genome
//!
//! A [`Genome`] is an ordered, fixed-length sequence of [`Gene`]s encoding one candidate
//! solution. Its length is set when it is built and never changes.
//!
//! Genes are stored behind an `Arc`, so cloning a genome is cheap: parents handed to
//! crossover and offspring produced from them share storage until one of them is
//! written to, at which point the writer gets its own copy.
//!
//! ## Example
//!
//! ```rust
//! use genswarm::genome::{Gene, Genome};
//!
//! let parent = Genome::from_values(&[1.0, 2.0, 3.0]);
//! let mut child = parent.clone();
//! child.set(1, Gene::Scalar(9.0)).unwrap();
//!
//! assert_eq!(parent.values(), vec![1.0, 2.0, 3.0]);
//! assert_eq!(child.values(), vec![1.0, 9.0, 3.0]);
//! ```
mod gene;

pub use gene::{Gene, GeneKind};

use std::sync::Arc;

use crate::error::{ensure_length, GeneticError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    genes: Arc<Vec<Gene>>,
}

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes: Arc::new(genes),
        }
    }

    /// Builds a genome of scalar genes.
    pub fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(Gene::Scalar).collect())
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn get(&self, index: usize) -> Option<&Gene> {
        self.genes.get(index)
    }

    /// Mutable access to the genes, detaching from any shared storage first.
    pub fn genes_mut(&mut self) -> &mut [Gene] {
        Arc::make_mut(&mut self.genes).as_mut_slice()
    }

    /// Replaces the gene at `index` with `gene`, which must be of the same kind.
    pub fn set(&mut self, index: usize, gene: Gene) -> Result<()> {
        let len = self.len();
        let slot = self.genes_mut().get_mut(index).ok_or_else(|| {
            GeneticError::Configuration(format!(
                "Gene index {} out of range for a genome of length {}",
                index, len
            ))
        })?;
        slot.copy_from(&gene)
    }

    /// Copies every gene of `other` into this genome, position by position.
    pub fn copy_from(&mut self, other: &Genome) -> Result<()> {
        ensure_length(self.len(), other.len())?;
        for (dst, src) in self.genes_mut().iter_mut().zip(other.genes()) {
            dst.copy_from(src)?;
        }
        Ok(())
    }

    /// Every gene's value, in order.
    pub fn values(&self) -> Vec<f64> {
        self.genes.iter().map(Gene::value).collect()
    }

    /// `true` while this genome shares its storage with another clone.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.genes) > 1
    }
}

impl FromIterator<Gene> for Genome {
    fn from_iter<I: IntoIterator<Item = Gene>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_copy_on_write() {
        let parent = Genome::from_values(&[1.0, 2.0]);
        let mut child = parent.clone();
        assert!(parent.is_shared());

        child.genes_mut()[0] = Gene::Scalar(5.0);

        assert!(!parent.is_shared());
        assert!(!child.is_shared());
        assert_eq!(parent.values(), vec![1.0, 2.0]);
        assert_eq!(child.values(), vec![5.0, 2.0]);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut genome = Genome::from_values(&[1.0]);
        assert!(genome.set(3, Gene::Scalar(0.0)).is_err());
    }

    #[test]
    fn test_set_checks_kind() {
        let mut genome = Genome::from_values(&[1.0]);
        assert!(matches!(
            genome.set(0, Gene::Integer(2)),
            Err(GeneticError::GeneKindMismatch { .. })
        ));
    }

    #[test]
    fn test_copy_from_genome() {
        let mut target = Genome::from_values(&[0.0, 0.0, 0.0]);
        let source = Genome::from_values(&[1.0, 2.0, 3.0]);

        target.copy_from(&source).unwrap();
        assert_eq!(target, source);

        let short = Genome::from_values(&[1.0]);
        assert!(target.copy_from(&short).is_err());
    }
}
