//! Differential evolution over real vectors.
//!
//! Implements the classic DE/rand/1/bin scheme: for every target vector a
//! donor `x_a + F·(x_b − x_c)` is built from three other members, binomial
//! crossover mixes donor and target into a trial, and the trial replaces the
//! target when it is at least as good.
//!
//! # References
//!
//! - Storn & Price (1997), *Differential Evolution – A Simple and Efficient
//!   Heuristic for Global Optimization over Continuous Spaces*

mod config;
mod runner;

pub use config::DeConfig;
pub use runner::DifferentialEvolution;
