//! Concurrent evaluation pipeline.
//!
//! Turns a [`Batch`] of new genotypes and/or individuals to re-evaluate into
//! evaluated [`Individual`]s. Every unit of work runs on the caller-supplied
//! rayon pool; the call returns only once all of them are done (fork-join).
//! A single failing unit fails the whole batch.
//!
//! Results come back in batch order and ids are assigned on the calling
//! thread after the join, so the output does not depend on how many worker
//! threads the pool has.

use log::debug;
use rayon::prelude::*;
use rayon::ThreadPool;

use super::individual::Individual;
use super::state::Progress;
use super::types::{Problem, SolutionMapper};
use crate::error::{BoxError, SolverError};

/// A genotype awaiting its first evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Offspring<G> {
    pub genotype: G,
    pub parent_ids: Vec<u64>,
}

impl<G> Offspring<G> {
    pub fn new(genotype: G, parent_ids: Vec<u64>) -> Self {
        Self {
            genotype,
            parent_ids,
        }
    }

    /// A genotype without parents (initial population, random restarts).
    pub fn orphan(genotype: G) -> Self {
        Self::new(genotype, Vec::new())
    }
}

/// Units of work for one call to [`EvaluationPipeline::evaluate`].
///
/// `births` are mapped and scored; `remaps` only have their quality
/// recomputed. The two counts feed the birth and evaluation counters
/// separately.
#[derive(Debug, Clone)]
pub struct Batch<G, S, Q> {
    pub births: Vec<Offspring<G>>,
    pub remaps: Vec<Individual<G, S, Q>>,
}

impl<G, S, Q> Batch<G, S, Q> {
    /// A batch of new genotypes only.
    pub fn births(births: Vec<Offspring<G>>) -> Self {
        Self {
            births,
            remaps: Vec::new(),
        }
    }

    /// Adds individuals whose quality must be recomputed.
    pub fn with_remaps(mut self, remaps: Vec<Individual<G, S, Q>>) -> Self {
        self.remaps = remaps;
        self
    }
}

/// Evaluates batches on a worker pool.
///
/// Bundles the solution mapper, the problem and the pool for the duration of
/// one run.
pub struct EvaluationPipeline<'a, M, P> {
    mapper: &'a M,
    problem: &'a P,
    pool: &'a ThreadPool,
}

impl<'a, M, P> EvaluationPipeline<'a, M, P> {
    pub fn new(mapper: &'a M, problem: &'a P, pool: &'a ThreadPool) -> Self {
        Self {
            mapper,
            problem,
            pool,
        }
    }

    pub fn mapper(&self) -> &'a M {
        self.mapper
    }

    pub fn problem(&self) -> &'a P {
        self.problem
    }

    pub fn pool(&self) -> &'a ThreadPool {
        self.pool
    }

    /// Runs `work` on every unit in parallel and waits for all of them.
    ///
    /// Results keep the order of `units`. The first failure is returned and
    /// no partial result is kept.
    pub fn fork_join<U, T, F>(&self, units: &[U], work: F) -> Result<Vec<T>, BoxError>
    where
        U: Sync,
        T: Send,
        F: Fn(&U) -> Result<T, BoxError> + Sync,
    {
        self.pool
            .install(|| units.par_iter().map(|unit| work(unit)).collect())
    }

    /// Evaluates a batch, returning births (in order) followed by remaps.
    ///
    /// On success `progress` gains `births.len()` births and
    /// `births.len() + remaps.len()` quality evaluations; on failure it is
    /// left untouched.
    pub fn evaluate<G>(
        &self,
        batch: Batch<G, M::Solution, P::Quality>,
        iteration: u64,
        progress: &mut Progress,
    ) -> Result<Vec<Individual<G, M::Solution, P::Quality>>, SolverError>
    where
        G: Sync,
        M: SolutionMapper<G>,
        M::Solution: Send + Sync,
        P: Problem<M::Solution>,
    {
        let Batch { births, remaps } = batch;
        let (n, m) = (births.len(), remaps.len());

        let (born, rescored) = self.pool.install(|| {
            rayon::join(
                || {
                    births
                        .par_iter()
                        .map(|offspring| -> Result<_, BoxError> {
                            let solution = self.mapper.map(&offspring.genotype)?;
                            let quality = self.problem.quality(&solution)?;
                            Ok((solution, quality))
                        })
                        .collect::<Result<Vec<_>, BoxError>>()
                },
                || {
                    remaps
                        .par_iter()
                        .map(|individual| self.problem.quality(individual.solution()))
                        .collect::<Result<Vec<_>, BoxError>>()
                },
            )
        });
        let born = born.map_err(|source| SolverError::evaluation(iteration, source))?;
        let rescored = rescored.map_err(|source| SolverError::evaluation(iteration, source))?;

        let mut evaluated = Vec::with_capacity(n + m);
        for (offspring, (solution, quality)) in births.into_iter().zip(born) {
            evaluated.push(Individual::new(
                offspring.genotype,
                solution,
                quality,
                iteration,
                offspring.parent_ids,
            ));
        }
        for (individual, quality) in remaps.into_iter().zip(rescored) {
            evaluated.push(individual.with_quality(quality, iteration));
        }

        progress.record_batch(n, m);
        debug!("iteration {iteration}: evaluated {n} births and {m} remaps");
        Ok(evaluated)
    }

    /// Convenience for a batch made of new genotypes only.
    pub fn evaluate_births<G>(
        &self,
        births: Vec<Offspring<G>>,
        iteration: u64,
        progress: &mut Progress,
    ) -> Result<Vec<Individual<G, M::Solution, P::Quality>>, SolverError>
    where
        G: Sync,
        M: SolutionMapper<G>,
        M::Solution: Send + Sync,
        P: Problem<M::Solution>,
    {
        self.evaluate(Batch::births(births), iteration, progress)
    }
}
