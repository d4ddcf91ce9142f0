//! Collaborator traits.
//!
//! The engine never looks inside genotypes, solutions or qualities: it only
//! invokes the capabilities defined here and caches their results inside
//! [`Individual`]s.
//!
//! - [`Problem`]: quality function and quality comparison
//! - [`SolutionMapper`]: genotype → solution decoding
//! - [`GenotypeFactory`]: random genotype construction
//! - [`Mutation`] / [`Crossover`]: variation operators

use rand::Rng;

use super::individual::Individual;
use crate::error::BoxError;
use crate::order::{PartialComparator, PartialComparison};

/// An optimization problem over solutions of type `S`.
///
/// Both methods are treated as pure functions. `quality` may be expensive
/// and is called in parallel from worker threads.
///
/// # Panics
///
/// Only an `Err` from `quality` becomes a [`SolverError`](crate::error::SolverError).
/// A panic in either method is not caught: it unwinds out of the worker and
/// is re-raised by rayon on the thread that called the solver.
///
/// # Implementing
///
/// ```ignore
/// struct OneMax;
///
/// impl Problem<Vec<bool>> for OneMax {
///     type Quality = f64;
///     fn quality(&self, bits: &Vec<bool>) -> Result<f64, BoxError> {
///         Ok(bits.iter().filter(|&&b| b).count() as f64)
///     }
///     fn compare(&self, a: &f64, b: &f64) -> PartialComparison {
///         Direction::Maximize.compare(*a, *b)
///     }
/// }
/// ```
pub trait Problem<S>: Send + Sync {
    /// Objective value: a scalar, any comparable type, or an objective vector.
    type Quality: Clone + Send + Sync + std::fmt::Debug;

    /// Computes the quality of a solution.
    fn quality(&self, solution: &S) -> Result<Self::Quality, BoxError>;

    /// Dominance between two qualities; `Before` means `a` is strictly better.
    fn compare(&self, a: &Self::Quality, b: &Self::Quality) -> PartialComparison;
}

/// Lifts [`Problem::compare`] to a comparator over individuals.
#[derive(Debug)]
pub struct QualityOrder<'a, P: ?Sized>(pub &'a P);

impl<P: ?Sized> Clone for QualityOrder<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for QualityOrder<'_, P> {}

impl<G, S, P> PartialComparator<Individual<G, S, P::Quality>> for QualityOrder<'_, P>
where
    P: Problem<S> + ?Sized,
{
    fn compare(
        &self,
        a: &Individual<G, S, P::Quality>,
        b: &Individual<G, S, P::Quality>,
    ) -> PartialComparison {
        self.0.compare(a.quality(), b.quality())
    }
}

/// Deterministic decoding of a genotype into a solution.
///
/// # Panics
///
/// As with [`Problem`], an `Err` from `map` aborts the run with a
/// [`SolverError`](crate::error::SolverError) while a panic propagates as a panic.
pub trait SolutionMapper<G>: Send + Sync {
    /// The decoded, problem-native form.
    type Solution;

    /// Decodes a genotype.
    fn map(&self, genotype: &G) -> Result<Self::Solution, BoxError>;
}

/// Mapper for problems whose genotype already is the solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<G: Clone> SolutionMapper<G> for Identity {
    type Solution = G;

    fn map(&self, genotype: &G) -> Result<G, BoxError> {
        Ok(genotype.clone())
    }
}

/// Adapts an infallible closure into a [`SolutionMapper`].
#[derive(Debug, Clone, Copy)]
pub struct FnMapper<F>(pub F);

impl<G, S, F> SolutionMapper<G> for FnMapper<F>
where
    F: Fn(&G) -> S + Send + Sync,
{
    type Solution = S;

    fn map(&self, genotype: &G) -> Result<S, BoxError> {
        Ok((self.0)(genotype))
    }
}

/// Builds random genotypes.
pub trait GenotypeFactory: Send + Sync {
    /// The evolvable encoding.
    type Genotype;

    /// Creates one random genotype.
    fn build_one<R: Rng>(&self, rng: &mut R) -> Self::Genotype;

    /// Creates a batch of `n` random genotypes.
    fn build<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Self::Genotype> {
        (0..n).map(|_| self.build_one(rng)).collect()
    }
}

/// Produces a perturbed copy of one parent.
pub trait Mutation<G>: Send + Sync {
    fn mutate<R: Rng>(&self, parent: &G, rng: &mut R) -> G;
}

/// Recombines several parents into one or more children.
pub trait Crossover<G>: Send + Sync {
    /// Number of parents consumed by [`recombine`](Self::recombine).
    fn arity(&self) -> usize {
        2
    }

    /// Produces children from exactly [`arity`](Self::arity) parents.
    fn recombine<R: Rng>(&self, parents: &[&G], rng: &mut R) -> Vec<G>;
}
