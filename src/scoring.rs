//! # Scoring
//!
//! The [`CalculateScore`] trait turns a model into a scalar score. It is shared by every
//! optimizer; [`ScoreDirection`] lets the drivers rank individuals the same way whether
//! the score is an error to minimize or a reward to maximize.
//!
//! [`DatasetScore`] is the standard scorer: it runs the model over every record of a
//! [`Dataset`] and accumulates a significance-weighted error.
//!
//! ## Example
//!
//! ```rust
//! use genswarm::data::BasicDataset;
//! use genswarm::model::Model;
//! use genswarm::scoring::{CalculateScore, DatasetScore};
//!
//! #[derive(Clone, Debug)]
//! struct Identity {
//!     weights: Vec<f64>,
//! }
//!
//! impl Model for Identity {
//!     fn parameters(&self) -> &[f64] { &self.weights }
//!     fn parameters_mut(&mut self) -> &mut [f64] { &mut self.weights }
//!     fn input_count(&self) -> usize { 1 }
//!     fn output_count(&self) -> usize { 1 }
//!     fn compute(&self, input: &[f64], output: &mut [f64]) {
//!         output[0] = input[0];
//!     }
//! }
//!
//! let dataset = BasicDataset::from_rows(&[vec![0.5], vec![2.0]], &[vec![0.5], vec![2.0]]).unwrap();
//! let score = DatasetScore::new(dataset);
//! let mut model = Identity { weights: vec![] };
//! assert_eq!(score.calculate_score(&mut model).unwrap(), 0.0);
//! ```

use std::cmp::Ordering;

use crate::{
    data::Dataset,
    error::{ensure_length, Result},
    model::Model,
};

/// Whether lower or higher scores are better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDirection {
    Minimize,
    Maximize,
}

impl ScoreDirection {
    pub fn from_should_minimize(should_minimize: bool) -> Self {
        if should_minimize {
            ScoreDirection::Minimize
        } else {
            ScoreDirection::Maximize
        }
    }

    /// The worst possible score in this direction.
    pub fn worst(self) -> f64 {
        match self {
            ScoreDirection::Minimize => f64::INFINITY,
            ScoreDirection::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Maps NaN and infinite scores to [`ScoreDirection::worst`].
    pub fn sanitize(self, score: f64) -> f64 {
        if score.is_finite() {
            score
        } else {
            self.worst()
        }
    }

    /// Returns `true` when `candidate` is strictly better than `incumbent`.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        let candidate = self.sanitize(candidate);
        let incumbent = self.sanitize(incumbent);
        match self {
            ScoreDirection::Minimize => candidate < incumbent,
            ScoreDirection::Maximize => candidate > incumbent,
        }
    }

    /// Total order that puts the better score first.
    pub fn cmp_best_first(self, a: f64, b: f64) -> Ordering {
        let a = self.sanitize(a);
        let b = self.sanitize(b);
        match self {
            ScoreDirection::Minimize => a.total_cmp(&b),
            ScoreDirection::Maximize => b.total_cmp(&a),
        }
    }
}

/// Computes a fitness score for a model.
pub trait CalculateScore<M: Model>: Send + Sync {
    /// Scores `model`. The model is borrowed mutably so that recurrent state can be
    /// cleared before the pass; its parameters must be left untouched.
    fn calculate_score(&self, model: &mut M) -> Result<f64>;

    /// `true` when lower scores are better.
    fn should_minimize(&self) -> bool;

    fn direction(&self) -> ScoreDirection {
        ScoreDirection::from_should_minimize(self.should_minimize())
    }
}

/// How a [`DatasetScore`] folds per-element errors into a single number.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMetric {
    /// Mean squared error.
    #[default]
    Mse,
    /// Root mean squared error.
    Rms,
    /// Half the sum of squared errors.
    Ess,
}

/// Running sum of weighted squared errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorCalculation {
    global_error: f64,
    set_size: usize,
}

impl ErrorCalculation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record. Each delta is scaled by `significance` before squaring.
    pub fn update(&mut self, actual: &[f64], ideal: &[f64], significance: f64) {
        for (a, i) in actual.iter().zip(ideal) {
            let delta = (i - a) * significance;
            self.global_error += delta * delta;
        }
        self.set_size += ideal.len();
    }

    pub fn calculate(&self, metric: ErrorMetric) -> f64 {
        if self.set_size == 0 {
            return 0.0;
        }
        match metric {
            ErrorMetric::Mse => self.global_error / self.set_size as f64,
            ErrorMetric::Rms => (self.global_error / self.set_size as f64).sqrt(),
            ErrorMetric::Ess => self.global_error / 2.0,
        }
    }
}

/// Scores a model by its error over a fixed dataset. Always minimized.
#[derive(Debug, Clone)]
pub struct DatasetScore<D: Dataset> {
    dataset: D,
    metric: ErrorMetric,
}

impl<D: Dataset> DatasetScore<D> {
    pub fn new(dataset: D) -> Self {
        Self {
            dataset,
            metric: ErrorMetric::default(),
        }
    }

    pub fn with_metric(mut self, metric: ErrorMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn metric(&self) -> ErrorMetric {
        self.metric
    }
}

impl<M: Model, D: Dataset> CalculateScore<M> for DatasetScore<D> {
    fn calculate_score(&self, model: &mut M) -> Result<f64> {
        ensure_length(self.dataset.input_width(), model.input_count())?;
        ensure_length(self.dataset.ideal_width(), model.output_count())?;

        // Once per pass, never per record.
        model.clear_context();

        let mut errors = ErrorCalculation::new();
        let mut actual = vec![0.0; model.output_count()];
        for pair in self.dataset.records() {
            ensure_length(self.dataset.input_width(), pair.input.len())?;
            ensure_length(self.dataset.ideal_width(), pair.ideal.len())?;
            model.compute(&pair.input, &mut actual);
            errors.update(&actual, &pair.ideal, pair.significance);
        }

        Ok(errors.calculate(self.metric))
    }

    fn should_minimize(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BasicDataset, DataPair};
    use crate::error::GeneticError;

    #[derive(Clone, Debug)]
    struct Offset {
        weights: Vec<f64>,
        clears: usize,
    }

    impl Model for Offset {
        fn parameters(&self) -> &[f64] {
            &self.weights
        }

        fn parameters_mut(&mut self) -> &mut [f64] {
            &mut self.weights
        }

        fn input_count(&self) -> usize {
            1
        }

        fn output_count(&self) -> usize {
            1
        }

        fn compute(&self, input: &[f64], output: &mut [f64]) {
            output[0] = input[0] + self.weights[0];
        }

        fn clear_context(&mut self) {
            self.clears += 1;
        }
    }

    fn dataset() -> BasicDataset {
        BasicDataset::from_rows(&[vec![0.0], vec![1.0], vec![2.0]], &[vec![0.0], vec![1.0], vec![2.0]])
            .unwrap()
    }

    #[test]
    fn test_perfect_model_scores_zero() {
        let score = DatasetScore::new(dataset());
        let mut model = Offset {
            weights: vec![0.0],
            clears: 0,
        };

        assert_eq!(score.calculate_score(&mut model).unwrap(), 0.0);
    }

    #[test]
    fn test_metrics() {
        let mut model = Offset {
            weights: vec![2.0],
            clears: 0,
        };

        // Every delta is 2.0, so the sum of squares is 12 over 3 elements.
        let mse = DatasetScore::new(dataset()).calculate_score(&mut model).unwrap();
        let rms = DatasetScore::new(dataset())
            .with_metric(ErrorMetric::Rms)
            .calculate_score(&mut model)
            .unwrap();
        let ess = DatasetScore::new(dataset())
            .with_metric(ErrorMetric::Ess)
            .calculate_score(&mut model)
            .unwrap();

        assert!((mse - 4.0).abs() < 1e-12);
        assert!((rms - 2.0).abs() < 1e-12);
        assert!((ess - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_significance_scales_delta() {
        let mut dataset = BasicDataset::new(1, 1);
        dataset
            .push(DataPair::new(vec![0.0], vec![1.0]).with_significance(0.5))
            .unwrap();
        let mut model = Offset {
            weights: vec![0.0],
            clears: 0,
        };

        let mse = DatasetScore::new(dataset).calculate_score(&mut model).unwrap();
        assert!((mse - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_context_cleared_once_per_pass() {
        let score = DatasetScore::new(dataset());
        let mut model = Offset {
            weights: vec![0.0],
            clears: 0,
        };

        score.calculate_score(&mut model).unwrap();
        assert_eq!(model.clears, 1);
        score.calculate_score(&mut model).unwrap();
        assert_eq!(model.clears, 2);
    }

    #[test]
    fn test_empty_dataset_scores_zero() {
        let score = DatasetScore::new(BasicDataset::new(1, 1));
        let mut model = Offset {
            weights: vec![5.0],
            clears: 0,
        };

        assert_eq!(score.calculate_score(&mut model).unwrap(), 0.0);
    }

    #[test]
    fn test_width_mismatch_is_an_error() {
        let score = DatasetScore::new(BasicDataset::new(2, 1));
        let mut model = Offset {
            weights: vec![0.0],
            clears: 0,
        };

        assert!(score.calculate_score(&mut model).is_err());
    }

    /// Declares one-wide records but holds whatever pairs it is given.
    struct Ragged {
        pairs: Vec<DataPair>,
    }

    impl Dataset for Ragged {
        fn input_width(&self) -> usize {
            1
        }

        fn ideal_width(&self) -> usize {
            1
        }

        fn records(&self) -> Box<dyn Iterator<Item = &DataPair> + '_> {
            Box::new(self.pairs.iter())
        }
    }

    #[test]
    fn test_ragged_record_is_an_error() {
        let mut model = Offset {
            weights: vec![0.0],
            clears: 0,
        };

        let wide_ideal = DatasetScore::new(Ragged {
            pairs: vec![
                DataPair::new(vec![0.0], vec![0.0]),
                DataPair::new(vec![1.0], vec![1.0, 2.0]),
            ],
        });
        assert!(matches!(
            wide_ideal.calculate_score(&mut model),
            Err(GeneticError::LengthMismatch {
                expected: 1,
                actual: 2
            })
        ));

        let short_input = DatasetScore::new(Ragged {
            pairs: vec![DataPair::new(vec![], vec![1.0])],
        });
        assert!(matches!(
            short_input.calculate_score(&mut model),
            Err(GeneticError::LengthMismatch {
                expected: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn test_direction_ordering() {
        let min = ScoreDirection::Minimize;
        let max = ScoreDirection::Maximize;

        assert!(min.is_better(1.0, 2.0));
        assert!(max.is_better(2.0, 1.0));
        assert!(!min.is_better(1.0, 1.0));

        assert!(min.is_better(1.0, f64::NAN));
        assert!(!min.is_better(f64::NAN, 1.0));
        assert!(max.is_better(-1e300, f64::NAN));

        let mut scores = vec![3.0, f64::NAN, 1.0, 2.0];
        scores.sort_by(|a, b| min.cmp_best_first(*a, *b));
        assert_eq!(&scores[..3], &[1.0, 2.0, 3.0]);
        assert!(scores[3].is_nan());
    }
}
