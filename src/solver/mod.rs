//! Generic population-based iterative solver.
//!
//! # Architecture
//!
//! - [`Individual`]: immutable record of one evaluated candidate
//! - [`Problem`], [`SolutionMapper`], [`GenotypeFactory`], [`Mutation`],
//!   [`Crossover`]: the collaborators the engine invokes but never inspects
//! - [`PopulationState`]: run counters plus the partially ordered population
//! - [`EvaluationPipeline`]: parallel fork-join evaluation on a rayon pool
//! - [`Strategy`]: one algorithm's `init` and `update`
//! - [`IterativeSolver`]: the `init → (terminate? : update)* → extract` loop
//! - [`StopCondition`], [`StateObserver`]: termination and per-iteration
//!   snapshots
//!
//! # References
//!
//! - Luke (2013), "Essentials of Metaheuristics", 2nd ed.

mod evaluation;
mod individual;
mod observer;
mod runner;
mod selection;
mod state;
mod stop;
mod strategy;
mod types;
pub(crate) mod variation;

pub use evaluation::{Batch, EvaluationPipeline, Offspring};
pub use individual::Individual;
pub use observer::{LogObserver, SnapshotCollector, StateObserver};
pub use runner::IterativeSolver;
pub use selection::Selection;
pub use state::{PopulationState, Progress, SolverState};
pub use stop::StopCondition;
pub use strategy::Strategy;
pub use types::{
    Crossover, FnMapper, GenotypeFactory, Identity, Mutation, Problem, QualityOrder,
    SolutionMapper,
};
