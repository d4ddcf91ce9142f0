//! Dominance ordering.
//!
//! - [`PartialComparison`] / [`PartialComparator`]: four-outcome comparison
//! - [`ParetoComparator`]: Pareto dominance with per-objective [`Direction`]
//! - [`PartiallyOrderedCollection`]: Pareto-front queries (`firsts`, `lasts`)

mod collection;
mod comparison;

pub use collection::{DagPartiallyOrderedCollection, PartiallyOrderedCollection};
pub use comparison::{natural, Direction, ParetoComparator, PartialComparator, PartialComparison};
