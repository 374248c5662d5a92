//! # Phenotype Codec
//!
//! Maps a model's parameter vector (the phenotype) to and from a [`Genome`].
//!
//! - [`encode`] copies every parameter, in vector order, into a scalar gene.
//! - [`decode`] writes every gene value back into the parameter vector, in the same
//!   order, and asks the model to refresh derived state.
//!
//! Decoding is idempotent: the parameters after a decode depend only on the genome, never
//! on what the model held before.
//!
//! ## Example
//!
//! ```rust
//! use genswarm::model::Model;
//! use genswarm::phenotype::{decode, encode};
//!
//! #[derive(Clone, Debug)]
//! struct Weights(Vec<f64>);
//!
//! impl Model for Weights {
//!     fn parameters(&self) -> &[f64] { &self.0 }
//!     fn parameters_mut(&mut self) -> &mut [f64] { &mut self.0 }
//!     fn input_count(&self) -> usize { 0 }
//!     fn output_count(&self) -> usize { 0 }
//!     fn compute(&self, _input: &[f64], _output: &mut [f64]) {}
//! }
//!
//! let original = Weights(vec![0.1, -0.2, 0.3]);
//! let genome = encode(&original);
//!
//! let mut scratch = Weights(vec![0.0; 3]);
//! decode(&genome, &mut scratch).unwrap();
//! assert_eq!(scratch.0, original.0);
//! ```

use crate::{
    error::{ensure_length, Result},
    genome::{Genome, Gene},
    model::Model,
};

/// Synthesizes a genome from the model's current parameters.
pub fn encode<M: Model>(model: &M) -> Genome {
    model.parameters().iter().copied().map(Gene::Scalar).collect()
}

/// Writes `genome` into `model`'s parameters, then refreshes the model.
///
/// # Errors
///
/// Returns [`crate::GeneticError::LengthMismatch`] if the genome length differs from the
/// model's parameter count. The model is left untouched in that case.
pub fn decode<M: Model>(genome: &Genome, model: &mut M) -> Result<()> {
    ensure_length(model.parameter_count(), genome.len())?;

    for (param, gene) in model.parameters_mut().iter_mut().zip(genome.genes()) {
        *param = gene.value();
    }
    model.refresh();

    Ok(())
}
