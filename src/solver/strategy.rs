//! The variation + selection seam of the driver.

use rand::Rng;

use super::evaluation::EvaluationPipeline;
use crate::error::SolverError;

/// One iterative optimization algorithm.
///
/// The driver owns the loop; a strategy only knows how to build the first
/// state and how to turn one state into the next. `M` is the solution
/// mapper and `P` the problem, both reached through the pipeline.
///
/// Every `update` follows the same shape: produce candidate genotypes,
/// evaluate them through the pipeline, combine them with the survivors under
/// the problem's comparator, and return a fresh state whose iteration
/// counter has been advanced.
pub trait Strategy<M, P> {
    /// State produced by this strategy; cloned for observers.
    type State;

    /// Builds and evaluates the initial population.
    fn init<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
    ) -> Result<Self::State, SolverError>;

    /// Performs one iteration, consuming the previous state.
    fn update<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
        state: Self::State,
    ) -> Result<Self::State, SolverError>;
}
