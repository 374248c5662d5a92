use std::collections::HashSet;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;
use crate::scoring::ScoreDirection;
use crate::selection::selection_strategy::{ensure_not_empty, SelectionStrategy};

/// A selection strategy that takes the best individuals by fitness.
///
/// Indices are sorted best-first (stable, so ties keep their order) and the top
/// `num_to_select` are returned. NaN scores rank last. Without duplicates the result
/// is at most as long as the population; with duplicates the ranking is cycled.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ElitistSelection {
    /// Whether to allow duplicates in the selected individuals.
    allow_duplicates: bool,
}

impl ElitistSelection {
    pub fn new(allow_duplicates: bool) -> Self {
        Self { allow_duplicates }
    }

    pub fn with_duplicates(mut self) -> Self {
        self.allow_duplicates = true;
        self
    }
}

impl SelectionStrategy for ElitistSelection {
    fn select(
        &self,
        fitness: &[f64],
        direction: ScoreDirection,
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        ensure_not_empty(fitness)?;

        let mut ranked: Vec<usize> = (0..fitness.len()).collect();
        ranked.sort_by(|&a, &b| direction.cmp_best_first(fitness[a], fitness[b]));

        let mut selected = Vec::with_capacity(num_to_select);
        let mut selected_indices = HashSet::new();

        for &idx in &ranked {
            if selected.len() >= num_to_select {
                break;
            }
            if !self.allow_duplicates && !selected_indices.insert(idx) {
                continue;
            }
            selected.push(idx);
        }

        // If we need more individuals and duplicates are allowed, cycle through the best ones
        if self.allow_duplicates {
            let mut idx = 0;
            while selected.len() < num_to_select {
                selected.push(ranked[idx % ranked.len()]);
                idx += 1;
            }
        }

        Ok(selected)
    }
}
