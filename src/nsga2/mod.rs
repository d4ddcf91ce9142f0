//! NSGA-II multi-objective optimization.
//!
//! # Key Types
//!
//! - [`Nsga2`]: the generational strategy, driven by
//!   [`IterativeSolver`](crate::solver::IterativeSolver)
//! - [`Nsga2Config`]: population size, operator rates, remapping
//!
//! # Ranking primitives
//!
//! - [`non_dominated_sort`]: Pareto layers under any comparator
//! - [`crowding_distance`]: per-layer diversity measure
//! - [`rank_and_crowd`], [`truncate`], [`binary_tournament`]: the crowded
//!   comparison operator and environmental selection
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*

mod config;
pub mod ranking;
mod runner;

pub use config::Nsga2Config;
pub use ranking::{
    binary_tournament, crowded_cmp, crowding_distance, non_dominated_sort, rank_and_crowd,
    truncate, truncate_by_layer, NondominatedSortResult, Ranked,
};
pub use runner::Nsga2;
