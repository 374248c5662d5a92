#![allow(dead_code)]

use std::sync::Once;

use genswarm::{
    data::BasicDataset,
    error::{GeneticError, Result},
    model::Model,
    scoring::CalculateScore,
};

static INIT: Once = Once::new();

/// Routes the library's events to the test output.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// `y = slope * x + intercept`, with `[slope, intercept]` as parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub weights: Vec<f64>,
    pub refreshed: usize,
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self {
            weights: vec![slope, intercept],
            refreshed: 0,
        }
    }
}

impl Model for Line {
    fn parameters(&self) -> &[f64] {
        &self.weights
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    fn refresh(&mut self) {
        self.refreshed += 1;
    }

    fn input_count(&self) -> usize {
        1
    }

    fn output_count(&self) -> usize {
        1
    }

    fn compute(&self, input: &[f64], output: &mut [f64]) {
        output[0] = self.weights[0] * input[0] + self.weights[1];
    }
}

/// Samples of `y = 2x + 1` on `[-2, 2]`.
pub fn line_dataset() -> BasicDataset {
    let xs: Vec<Vec<f64>> = (-4..=4).map(|i| vec![i as f64 * 0.5]).collect();
    let ys: Vec<Vec<f64>> = xs.iter().map(|x| vec![2.0 * x[0] + 1.0]).collect();
    BasicDataset::from_rows(&xs, &ys).unwrap()
}

/// Lines spread over a grid of slopes and intercepts, none of them the target.
pub fn line_models(count: usize) -> Vec<Line> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            Line::new(-3.0 + 4.0 * t, 3.0 - 5.0 * t)
        })
        .collect()
}

/// Fails for any line whose slope is above `threshold`.
pub struct SteepLinesFail {
    pub threshold: f64,
}

impl CalculateScore<Line> for SteepLinesFail {
    fn calculate_score(&self, model: &mut Line) -> Result<f64> {
        if model.weights[0] > self.threshold {
            Err(GeneticError::Scoring(format!(
                "slope {} too steep",
                model.weights[0]
            )))
        } else {
            Ok(model.weights[0].abs())
        }
    }

    fn should_minimize(&self) -> bool {
        true
    }
}

/// Panics for any line with a negative intercept.
pub struct PanicsOnNegativeIntercept;

impl CalculateScore<Line> for PanicsOnNegativeIntercept {
    fn calculate_score(&self, model: &mut Line) -> Result<f64> {
        if model.weights[1] < 0.0 {
            panic!("negative intercept");
        }
        Ok(model.weights[1])
    }

    fn should_minimize(&self) -> bool {
        true
    }
}

/// Rewards large slopes.
pub struct SlopeReward;

impl CalculateScore<Line> for SlopeReward {
    fn calculate_score(&self, model: &mut Line) -> Result<f64> {
        Ok(model.weights[0])
    }

    fn should_minimize(&self) -> bool {
        false
    }
}
