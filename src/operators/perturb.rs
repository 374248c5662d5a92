use super::Mutation;
use crate::{
    error::{GeneticError, Result},
    genome::{Gene, Genome},
    rng::RandomNumberGenerator,
};

/// Uniform perturbation of scalar genes.
///
/// Every [`Gene::Scalar`] value `v` becomes `v + (amount - u * amount * 2)` with `u`
/// drawn from `[0, 1)`, a zero-mean shift within `[-amount, amount]`. Genes of any other
/// kind are left as they are.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturb {
    amount: f64,
}

impl Perturb {
    /// Creates a perturbation of at most `amount` per gene.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if `amount` is negative or not finite.
    pub fn new(amount: f64) -> Result<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Mutation amount must be a finite, non-negative number, got {}",
                amount
            )));
        }
        Ok(Self { amount })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl Mutation for Perturb {
    fn mutate(&self, genome: &mut Genome, rng: &mut RandomNumberGenerator) {
        if self.amount == 0.0 {
            return;
        }

        for gene in genome.genes_mut() {
            match gene {
                Gene::Scalar(value) => *value += rng.next_symmetric(self.amount),
                Gene::Integer(_) => {}
            }
        }
    }
}
