//! Population state handed between the driver, the strategies and observers.

use std::time::Instant;

use super::individual::Individual;
use crate::order::{DagPartiallyOrderedCollection, PartiallyOrderedCollection};

/// Run counters.
///
/// Only the controlling thread updates these, always after a batch has been
/// joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    starting_time: Instant,
    elapsed_millis: u64,
    n_of_iterations: u64,
    n_of_births: u64,
    n_of_quality_evaluations: u64,
}

impl Progress {
    /// Starts the clock with all counters at zero.
    pub fn start() -> Self {
        Self {
            starting_time: Instant::now(),
            elapsed_millis: 0,
            n_of_iterations: 0,
            n_of_births: 0,
            n_of_quality_evaluations: 0,
        }
    }

    pub fn starting_time(&self) -> Instant {
        self.starting_time
    }

    /// Milliseconds elapsed at the last refresh.
    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_millis
    }

    pub fn n_of_iterations(&self) -> u64 {
        self.n_of_iterations
    }

    /// Cumulative number of genotypes created.
    pub fn n_of_births(&self) -> u64 {
        self.n_of_births
    }

    /// Cumulative number of quality computations, remaps included.
    pub fn n_of_quality_evaluations(&self) -> u64 {
        self.n_of_quality_evaluations
    }

    /// Records a joined batch of `births` new genotypes and `remaps`
    /// re-evaluated individuals.
    pub fn record_batch(&mut self, births: usize, remaps: usize) {
        self.n_of_births += births as u64;
        self.n_of_quality_evaluations += (births + remaps) as u64;
    }

    /// Closes an iteration: bumps the iteration counter and the clock.
    pub fn advance(&mut self) {
        self.n_of_iterations += 1;
        self.refresh_elapsed();
    }

    /// Updates `elapsed_millis` from the wall clock.
    pub fn refresh_elapsed(&mut self) {
        self.elapsed_millis = self.starting_time.elapsed().as_millis() as u64;
    }

    /// Iteration number given to individuals born during the next update.
    pub fn next_iteration(&self) -> u64 {
        self.n_of_iterations + 1
    }
}

/// Counters plus the current population.
///
/// Replaced wholesale by every update; `Clone` is the immutable snapshot
/// handed to observers.
#[derive(Debug, Clone)]
pub struct PopulationState<G, S, Q> {
    progress: Progress,
    population: DagPartiallyOrderedCollection<Individual<G, S, Q>>,
}

impl<G, S, Q> PopulationState<G, S, Q> {
    pub fn new(
        progress: Progress,
        population: DagPartiallyOrderedCollection<Individual<G, S, Q>>,
    ) -> Self {
        Self {
            progress,
            population,
        }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn population(&self) -> &DagPartiallyOrderedCollection<Individual<G, S, Q>> {
        &self.population
    }

    /// Splits the state into its parts.
    pub fn into_parts(self) -> (Progress, DagPartiallyOrderedCollection<Individual<G, S, Q>>) {
        (self.progress, self.population)
    }

    /// Current non-dominated individuals.
    pub fn firsts(&self) -> Vec<&Individual<G, S, Q>> {
        self.population.firsts()
    }
}

/// A strategy-specific state that exposes a [`PopulationState`].
pub trait SolverState {
    type Genotype;
    type Solution;
    type Quality;

    fn population_state(&self) -> &PopulationState<Self::Genotype, Self::Solution, Self::Quality>;

    fn progress(&self) -> &Progress {
        self.population_state().progress()
    }
}

impl<G, S, Q> SolverState for PopulationState<G, S, Q> {
    type Genotype = G;
    type Solution = S;
    type Quality = Q;

    fn population_state(&self) -> &PopulationState<G, S, Q> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counters() {
        let mut progress = Progress::start();
        progress.record_batch(10, 0);
        assert_eq!(progress.n_of_births(), 10);
        assert_eq!(progress.n_of_quality_evaluations(), 10);

        progress.record_batch(10, 5);
        assert_eq!(progress.n_of_births(), 20);
        assert_eq!(progress.n_of_quality_evaluations(), 25);

        assert_eq!(progress.next_iteration(), 1);
        progress.advance();
        assert_eq!(progress.n_of_iterations(), 1);
        assert_eq!(progress.next_iteration(), 2);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut progress = Progress::start();
        progress.record_batch(3, 0);
        let state: PopulationState<u8, u8, f64> =
            PopulationState::new(progress, DagPartiallyOrderedCollection::default());
        let snapshot = state.clone();

        let (mut live, population) = state.into_parts();
        live.advance();
        let state = PopulationState::new(live, population);

        assert_eq!(snapshot.progress().n_of_iterations(), 0);
        assert_eq!(state.progress().n_of_iterations(), 1);
    }
}
