//! Stopping conditions.
//!
//! A [`StopCondition`] is a side-effect-free predicate over a solver state,
//! checked once per generation boundary.

use std::fmt;
use std::sync::Arc;

use super::state::SolverState;
use crate::order::PartiallyOrderedCollection;

type StatePredicate<St> = Arc<dyn Fn(&St) -> bool + Send + Sync>;

/// When to stop iterating.
///
/// # Examples
///
/// ```ignore
/// // Stop after 100 generations or 5 seconds, whichever comes first.
/// let stop = StopCondition::iterations(100).or(StopCondition::elapsed_millis(5_000));
/// ```
pub enum StopCondition<St> {
    /// Elapsed wall-clock time reached the given milliseconds.
    ElapsedMillis(u64),
    /// Number of completed iterations reached the given count.
    Iterations(u64),
    /// Number of quality evaluations reached the given count.
    QualityEvaluations(u64),
    /// Number of births reached the given count.
    Births(u64),
    /// An arbitrary predicate over the state.
    Predicate(StatePredicate<St>),
    /// Any of the inner conditions holds.
    Any(Vec<StopCondition<St>>),
}

impl<St> StopCondition<St> {
    pub fn elapsed_millis(millis: u64) -> Self {
        StopCondition::ElapsedMillis(millis)
    }

    pub fn iterations(n: u64) -> Self {
        StopCondition::Iterations(n)
    }

    pub fn quality_evaluations(n: u64) -> Self {
        StopCondition::QualityEvaluations(n)
    }

    pub fn births(n: u64) -> Self {
        StopCondition::Births(n)
    }

    /// Stops as soon as `predicate` holds.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&St) -> bool + Send + Sync + 'static,
    {
        StopCondition::Predicate(Arc::new(predicate))
    }

    /// Combines two conditions: stops when either holds.
    pub fn or(self, other: StopCondition<St>) -> Self {
        match self {
            StopCondition::Any(mut conditions) => {
                conditions.push(other);
                StopCondition::Any(conditions)
            }
            first => StopCondition::Any(vec![first, other]),
        }
    }
}

impl<St: SolverState> StopCondition<St> {
    /// Stops once some member of the current front has a quality satisfying
    /// `reached` (e.g. "quality reached target").
    pub fn quality_reached<F>(reached: F) -> Self
    where
        F: Fn(&St::Quality) -> bool + Send + Sync + 'static,
    {
        Self::predicate(move |state: &St| {
            state
                .population_state()
                .population()
                .firsts()
                .into_iter()
                .any(|individual| reached(individual.quality()))
        })
    }

    /// Evaluates the condition; a pure query.
    pub fn test(&self, state: &St) -> bool {
        let progress = state.progress();
        match self {
            StopCondition::ElapsedMillis(millis) => progress.elapsed_millis() >= *millis,
            StopCondition::Iterations(n) => progress.n_of_iterations() >= *n,
            StopCondition::QualityEvaluations(n) => progress.n_of_quality_evaluations() >= *n,
            StopCondition::Births(n) => progress.n_of_births() >= *n,
            StopCondition::Predicate(predicate) => predicate(state),
            StopCondition::Any(conditions) => conditions.iter().any(|c| c.test(state)),
        }
    }
}

impl<St> Clone for StopCondition<St> {
    fn clone(&self) -> Self {
        match self {
            StopCondition::ElapsedMillis(v) => StopCondition::ElapsedMillis(*v),
            StopCondition::Iterations(v) => StopCondition::Iterations(*v),
            StopCondition::QualityEvaluations(v) => StopCondition::QualityEvaluations(*v),
            StopCondition::Births(v) => StopCondition::Births(*v),
            StopCondition::Predicate(p) => StopCondition::Predicate(Arc::clone(p)),
            StopCondition::Any(cs) => StopCondition::Any(cs.clone()),
        }
    }
}

impl<St> fmt::Debug for StopCondition<St> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCondition::ElapsedMillis(v) => write!(f, "ElapsedMillis({v})"),
            StopCondition::Iterations(v) => write!(f, "Iterations({v})"),
            StopCondition::QualityEvaluations(v) => write!(f, "QualityEvaluations({v})"),
            StopCondition::Births(v) => write!(f, "Births({v})"),
            StopCondition::Predicate(_) => f.write_str("Predicate(..)"),
            StopCondition::Any(cs) => f.debug_tuple("Any").field(cs).finish(),
        }
    }
}
