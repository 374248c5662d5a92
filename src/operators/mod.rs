//! # Genetic Operators
//!
//! The [`Crossover`] and [`Mutation`] traits define the operators the evolutionary
//! driver applies to genomes. Operators are pure transformations over genome state: they
//! never see the model a genome encodes.
pub mod perturb;
pub mod splice;

use std::fmt::Debug;

use crate::{error::Result, genome::Genome, rng::RandomNumberGenerator};

/// Combines two parent genomes into two offspring.
pub trait Crossover: Debug + Send + Sync {
    /// Produces two offspring from `mother` and `father`.
    ///
    /// ## Errors
    ///
    /// Implementations fail if the parents cannot be combined, for example because their
    /// lengths differ or the operator's configuration does not fit the genome.
    fn crossover(
        &self,
        mother: &Genome,
        father: &Genome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Genome, Genome)>;
}

/// Perturbs a genome in place.
pub trait Mutation: Debug + Send + Sync {
    fn mutate(&self, genome: &mut Genome, rng: &mut RandomNumberGenerator);
}

pub use perturb::Perturb;
pub use splice::Splice;
