//! Generic iterate-until-stop driver.
//!
//! [`IterativeSolver`] runs `init → (terminate? : update)* → extract_solutions`
//! for any [`Strategy`]. A single controlling thread runs the loop; the only
//! parallelism is inside the evaluation pipeline, which joins completely
//! before the strategy ranks or inserts anything. Each generation is
//! therefore a strict sequence: produce candidates → evaluate (parallel) →
//! rank/insert → publish.

use std::sync::Arc;

use log::info;
use rand::Rng;
use rayon::ThreadPool;

use super::evaluation::EvaluationPipeline;
use super::observer::StateObserver;
use super::state::SolverState;
use super::stop::StopCondition;
use super::strategy::Strategy;
use crate::error::SolverError;
use crate::order::PartiallyOrderedCollection;

/// Drives a [`Strategy`] until a [`StopCondition`] holds.
///
/// # Usage
///
/// ```ignore
/// let solver = IterativeSolver::new(
///     Ga::new(GaConfig::default(), factory, crossover, mutation)?,
///     Identity,
///     StopCondition::iterations(100),
/// );
/// let pool = rayon::ThreadPoolBuilder::new().num_threads(8).build()?;
/// let front = solver.solve(&problem, &mut create_rng(42), &pool)?;
/// ```
#[derive(Debug, Clone)]
pub struct IterativeSolver<T, M, St> {
    strategy: T,
    mapper: M,
    stop: StopCondition<St>,
}

impl<T, M, St> IterativeSolver<T, M, St> {
    pub fn new(strategy: T, mapper: M, stop: StopCondition<St>) -> Self {
        Self {
            strategy,
            mapper,
            stop,
        }
    }

    pub fn strategy(&self) -> &T {
        &self.strategy
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn stop_condition(&self) -> &StopCondition<St> {
        &self.stop
    }

    /// Builds and evaluates the initial state.
    pub fn init<P, R>(&self, problem: &P, rng: &mut R, pool: &ThreadPool) -> Result<St, SolverError>
    where
        T: Strategy<M, P, State = St>,
        R: Rng,
    {
        let pipeline = EvaluationPipeline::new(&self.mapper, problem, pool);
        self.strategy.init(&pipeline, rng)
    }

    /// Performs one iteration.
    pub fn update<P, R>(
        &self,
        problem: &P,
        rng: &mut R,
        pool: &ThreadPool,
        state: St,
    ) -> Result<St, SolverError>
    where
        T: Strategy<M, P, State = St>,
        R: Rng,
    {
        let pipeline = EvaluationPipeline::new(&self.mapper, problem, pool);
        self.strategy.update(&pipeline, rng, state)
    }

    /// Whether the run should stop; a pure query.
    pub fn terminate(&self, state: &St) -> bool
    where
        St: SolverState,
    {
        self.stop.test(state)
    }

    /// Solutions of the current non-dominated set.
    pub fn extract_solutions(&self, state: &St) -> Vec<St::Solution>
    where
        St: SolverState,
        St::Solution: Clone,
    {
        state
            .population_state()
            .population()
            .firsts()
            .into_iter()
            .map(|individual| individual.solution().clone())
            .collect()
    }

    /// Runs to termination and returns the final non-dominated solutions.
    pub fn solve<P, R>(
        &self,
        problem: &P,
        rng: &mut R,
        pool: &ThreadPool,
    ) -> Result<Vec<St::Solution>, SolverError>
    where
        T: Strategy<M, P, State = St>,
        St: SolverState + Clone,
        St::Solution: Clone,
        R: Rng,
    {
        self.solve_with_observers(problem, rng, pool, &[])
    }

    /// Runs to termination, publishing a snapshot to every observer after
    /// `init` and after each `update`.
    ///
    /// Any evaluation failure aborts the run; observers then receive no
    /// `done` signal.
    pub fn solve_with_observers<P, R>(
        &self,
        problem: &P,
        rng: &mut R,
        pool: &ThreadPool,
        observers: &[&dyn StateObserver<St>],
    ) -> Result<Vec<St::Solution>, SolverError>
    where
        T: Strategy<M, P, State = St>,
        St: SolverState + Clone,
        St::Solution: Clone,
        R: Rng,
    {
        let pipeline = EvaluationPipeline::new(&self.mapper, problem, pool);
        info!(
            "starting solver on {} worker threads, stop condition {:?}",
            pool.current_num_threads(),
            self.stop
        );

        let mut state = self.strategy.init(&pipeline, rng)?;
        publish(observers, &state);

        while !self.terminate(&state) {
            state = self.strategy.update(&pipeline, rng, state)?;
            publish(observers, &state);
        }

        let progress = state.progress();
        info!(
            "solver terminated after {} iterations: births={} evaluations={} elapsed={}ms",
            progress.n_of_iterations(),
            progress.n_of_births(),
            progress.n_of_quality_evaluations(),
            progress.elapsed_millis(),
        );
        for observer in observers {
            observer.done();
        }

        Ok(self.extract_solutions(&state))
    }
}

/// Hands one shared immutable copy of `state` to every observer.
fn publish<St: Clone>(observers: &[&dyn StateObserver<St>], state: &St) {
    if observers.is_empty() {
        return;
    }
    let snapshot = Arc::new(state.clone());
    for observer in observers {
        observer.listen(Arc::clone(&snapshot));
    }
}
