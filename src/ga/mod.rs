//! Genetic Algorithm.
//!
//! A generic GA driven by [`IterativeSolver`](crate::solver::IterativeSolver).
//! Genotype construction, crossover and mutation are supplied by the caller
//! through [`GenotypeFactory`](crate::solver::GenotypeFactory),
//! [`Crossover`](crate::solver::Crossover) and
//! [`Mutation`](crate::solver::Mutation); quality and its comparison come
//! from the [`Problem`](crate::solver::Problem).
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, rates)
//! - [`Ga`]: The strategy
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod runner;

pub use config::GaConfig;
pub use runner::Ga;
