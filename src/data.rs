//! # Datasets
//!
//! A [`Dataset`] produces an ordered, repeatable sequence of [`DataPair`] records, each an
//! input vector, the ideal output for it, and a significance weight. [`BasicDataset`] is
//! the in-memory implementation.

use crate::error::{ensure_length, Result};

/// One training record.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DataPair {
    pub input: Vec<f64>,
    pub ideal: Vec<f64>,
    /// Weight of this record in the error metric. `1.0` for plain records.
    pub significance: f64,
}

impl DataPair {
    pub fn new(input: Vec<f64>, ideal: Vec<f64>) -> Self {
        Self {
            input,
            ideal,
            significance: 1.0,
        }
    }

    pub fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }
}

/// Source of training records consumed by the scorers.
///
/// `records` must yield the same records in the same order every time it is called.
pub trait Dataset: Send + Sync {
    fn input_width(&self) -> usize;

    fn ideal_width(&self) -> usize;

    fn records(&self) -> Box<dyn Iterator<Item = &DataPair> + '_>;
}

/// A dataset held entirely in memory.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BasicDataset {
    input_width: usize,
    ideal_width: usize,
    pairs: Vec<DataPair>,
}

impl BasicDataset {
    /// Creates an empty dataset with the declared record widths.
    pub fn new(input_width: usize, ideal_width: usize) -> Self {
        Self {
            input_width,
            ideal_width,
            pairs: Vec::new(),
        }
    }

    /// Builds a dataset from `(input, ideal)` rows, each with significance `1.0`.
    ///
    /// The widths are taken from the first row; every other row must match them.
    pub fn from_rows(inputs: &[Vec<f64>], ideals: &[Vec<f64>]) -> Result<Self> {
        ensure_length(inputs.len(), ideals.len())?;

        let input_width = inputs.first().map_or(0, Vec::len);
        let ideal_width = ideals.first().map_or(0, Vec::len);
        let mut dataset = Self::new(input_width, ideal_width);

        for (input, ideal) in inputs.iter().zip(ideals) {
            dataset.push(DataPair::new(input.clone(), ideal.clone()))?;
        }

        Ok(dataset)
    }

    /// Appends a record, checking it against the declared widths.
    pub fn push(&mut self, pair: DataPair) -> Result<()> {
        ensure_length(self.input_width, pair.input.len())?;
        ensure_length(self.ideal_width, pair.ideal.len())?;
        self.pairs.push(pair);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[DataPair] {
        &self.pairs
    }
}

impl Dataset for BasicDataset {
    fn input_width(&self) -> usize {
        self.input_width
    }

    fn ideal_width(&self) -> usize {
        self.ideal_width
    }

    fn records(&self) -> Box<dyn Iterator<Item = &DataPair> + '_> {
        Box::new(self.pairs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticError;

    #[test]
    fn test_from_rows() {
        let dataset =
            BasicDataset::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]], &[vec![1.0], vec![1.0]])
                .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.input_width(), 2);
        assert_eq!(dataset.ideal_width(), 1);
        assert!(dataset.records().all(|pair| pair.significance == 1.0));
    }

    #[test]
    fn test_push_rejects_wrong_width() {
        let mut dataset = BasicDataset::new(2, 1);
        let result = dataset.push(DataPair::new(vec![1.0], vec![0.0]));

        assert!(matches!(
            result,
            Err(GeneticError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = BasicDataset::from_rows(&[vec![0.0], vec![1.0, 2.0]], &[vec![1.0], vec![0.0]]);
        assert!(result.is_err());

        let result = BasicDataset::from_rows(&[vec![0.0]], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_records_are_repeatable() {
        let dataset =
            BasicDataset::from_rows(&[vec![0.0], vec![1.0], vec![2.0]], &[vec![0.0], vec![1.0], vec![2.0]])
                .unwrap();

        let first: Vec<_> = dataset.records().map(|p| p.input[0]).collect();
        let second: Vec<_> = dataset.records().map(|p| p.input[0]).collect();
        assert_eq!(first, second);
    }
}
