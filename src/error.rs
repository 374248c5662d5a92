//! # Error Types
//!
//! This module defines the error taxonomy of the library. Errors fall into three
//! groups:
//!
//! - configuration errors (bad options, mismatched lengths), raised synchronously while
//!   a trainer or operator is being set up;
//! - evaluation errors, captured per task by the worker pool and reported only after
//!   the whole batch has drained;
//! - engine invariant violations, which are not represented here at all: they panic,
//!   because they can only come from a synchronization bug.
//!
//! ## Examples
//!
//! ```rust
//! use genswarm::error::{GeneticError, OptionExt, Result};
//!
//! fn first_score(scores: &[f64]) -> Result<f64> {
//!     scores
//!         .first()
//!         .copied()
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_score(&[]).is_err());
//! assert_eq!(first_score(&[0.5]).unwrap(), 0.5);
//! ```

use std::fmt;

use thiserror::Error;

use crate::genome::GeneKind;

/// A single task that failed inside a task group.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// Sequence number the task was given on submission.
    pub sequence: usize,
    /// Rendered error or panic payload.
    pub message: String,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task #{}: {}", self.sequence, self.message)
    }
}

/// Represents errors that can occur while training a population.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Invalid options or operator parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two sequences that must line up position by position do not.
    #[error("Length mismatch: expected {expected}, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A gene was asked to copy its value from a gene of a different kind.
    #[error("Gene kind mismatch: cannot copy a {actual:?} gene into a {expected:?} gene")]
    GeneKindMismatch { expected: GeneKind, actual: GeneKind },

    /// An operation needed at least one individual.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A scorer could not produce a score.
    #[error("Scoring error: {0}")]
    Scoring(String),

    /// One or more tasks of a drained task group failed.
    #[error("Evaluation error: {} of the batch's tasks failed (first: {})", .failures.len(), first_failure(.failures))]
    Evaluation { failures: Vec<TaskFailure> },
}

fn first_failure(failures: &[TaskFailure]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using `err_fn` to build
    /// the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Fails with a [`GeneticError::LengthMismatch`] unless `actual == expected`.
pub(crate) fn ensure_length(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(GeneticError::LengthMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_error_reports_first_failure() {
        let err = GeneticError::Evaluation {
            failures: vec![
                TaskFailure {
                    sequence: 3,
                    message: "diverged".to_string(),
                },
                TaskFailure {
                    sequence: 7,
                    message: "panicked".to_string(),
                },
            ],
        };

        let rendered = err.to_string();
        assert!(rendered.contains("2 of the batch's tasks failed"));
        assert!(rendered.contains("task #3: diverged"));
    }

    #[test]
    fn test_ensure_length() {
        assert!(ensure_length(4, 4).is_ok());

        match ensure_length(4, 5) {
            Err(GeneticError::LengthMismatch { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 5);
            }
            _ => panic!("Expected LengthMismatch error"),
        }
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert!(matches!(
            none.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
            Err(GeneticError::EmptyPopulation)
        ));
        assert_eq!(Some(1).ok_or_else_genetic(|| GeneticError::EmptyPopulation).unwrap(), 1);
    }
}
