use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::scoring::ScoreDirection;

/// Trait for parent-selection strategies.
///
/// A selection strategy picks individuals by looking only at their fitness values. It
/// returns indices into the `fitness` slice, so it never needs to see the individuals
/// themselves or the models they wrap.
///
/// # Examples
///
/// ```
/// use genswarm::rng::RandomNumberGenerator;
/// use genswarm::scoring::ScoreDirection;
/// use genswarm::selection::{ElitistSelection, SelectionStrategy};
///
/// let fitness = vec![0.5, 0.8, 0.3];
/// let mut rng = RandomNumberGenerator::new();
///
/// let selection = ElitistSelection::default();
/// let selected = selection
///     .select(&fitness, ScoreDirection::Minimize, 2, &mut rng)
///     .unwrap();
///
/// assert_eq!(selected, vec![2, 0]);
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` indices into `fitness`.
    ///
    /// # Errors
    ///
    /// Returns an error if `fitness` is empty or the strategy cannot complete the
    /// selection.
    fn select(
        &self,
        fitness: &[f64],
        direction: ScoreDirection,
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>>;
}

pub(crate) fn ensure_not_empty(fitness: &[f64]) -> Result<()> {
    if fitness.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    Ok(())
}
