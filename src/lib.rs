//! Population-based iterative optimization engine.
//!
//! A generic driver repeatedly creates genotypes, maps them to solutions,
//! scores them in parallel and replaces the population until a stop
//! condition holds. Candidates are ranked only through a partial order, so
//! single- and multi-objective problems share every algorithm.
//!
//! - **Ordering** ([`order`]): partial comparisons, Pareto dominance and
//!   partially ordered collections with front queries.
//! - **Driver** ([`solver`]): individuals, population state, the parallel
//!   evaluation pipeline, stop conditions, observers and
//!   [`IterativeSolver`](solver::IterativeSolver).
//! - **NSGA-II** ([`nsga2`]): fast non-dominated sorting, crowding distance
//!   and the elitist generational strategy.
//! - **MAP-Elites** ([`mapelites`]): feature descriptors, the grid archive
//!   and single, multi-archive and coevolutionary strategies.
//! - **Other strategies**: a generational/overlapping GA ([`ga`]),
//!   (μ,λ)/(μ+λ) evolution strategies ([`es`]), differential evolution
//!   ([`de`]) and random search ([`random_search`]).
//!
//! # Architecture
//!
//! The crate contains no problem-specific concepts. Problems, genotype
//! factories and variation operators are supplied by the caller through the
//! traits in [`solver`]; all randomness flows through a caller-supplied
//! [`rand::Rng`] and all evaluation through a caller-supplied
//! [`rayon::ThreadPool`].

pub mod de;
pub mod error;
pub mod es;
pub mod ga;
pub mod mapelites;
pub mod nsga2;
pub mod order;
pub mod random;
pub mod random_search;
pub mod solver;

#[cfg(test)]
mod testing;
