//! # Model Trait
//!
//! The `Model` trait is the narrow contract a trainable model exposes to the optimizers:
//! a flat, ordered parameter vector of fixed length, a forward computation used by the
//! scorers, and a deep copy (via `Clone`) for scratch evaluation.
//!
//! ## Example
//!
//! ```rust
//! use genswarm::model::Model;
//!
//! #[derive(Clone, Debug)]
//! struct Line {
//!     weights: Vec<f64>, // [slope, intercept]
//! }
//!
//! impl Model for Line {
//!     fn parameters(&self) -> &[f64] {
//!         &self.weights
//!     }
//!
//!     fn parameters_mut(&mut self) -> &mut [f64] {
//!         &mut self.weights
//!     }
//!
//!     fn input_count(&self) -> usize {
//!         1
//!     }
//!
//!     fn output_count(&self) -> usize {
//!         1
//!     }
//!
//!     fn compute(&self, input: &[f64], output: &mut [f64]) {
//!         output[0] = self.weights[0] * input[0] + self.weights[1];
//!     }
//! }
//!
//! let line = Line { weights: vec![2.0, 1.0] };
//! let mut out = [0.0];
//! line.compute(&[3.0], &mut out);
//! assert_eq!(out[0], 7.0);
//! assert_eq!(line.parameter_count(), 2);
//! ```

use std::fmt::Debug;

/// A model whose trainable state is a single flat vector of `f64` parameters.
///
/// Implementors must also implement `Clone` (deep copy), `Debug`, `Send`, and `Sync` so
/// that individuals can be evaluated on the worker pool.
pub trait Model: Clone + Debug + Send + Sync {
    /// Every trainable parameter, in a fixed order.
    fn parameters(&self) -> &[f64];

    /// Mutable access to the parameter vector. The length must not change.
    fn parameters_mut(&mut self) -> &mut [f64];

    /// Total number of trainable parameters.
    fn parameter_count(&self) -> usize {
        self.parameters().len()
    }

    /// Rebuilds any state derived from the parameters after they were overwritten.
    fn refresh(&mut self) {}

    fn input_count(&self) -> usize;

    fn output_count(&self) -> usize;

    /// Computes the model output for `input` into `output`.
    ///
    /// `input.len() == self.input_count()` and `output.len() == self.output_count()`
    /// are guaranteed by the scorers.
    fn compute(&self, input: &[f64], output: &mut [f64]);

    /// Resets recurrent or contextual state. Called once before each scoring pass.
    fn clear_context(&mut self) {}
}
