//! Random search.
//!
//! Every iteration samples `batch_size` fresh genotypes from the factory and
//! keeps the non-dominated set of everything seen so far. Useful as a
//! baseline for the other strategies.

mod config;
mod runner;

pub use config::RandomSearchConfig;
pub use runner::RandomSearch;
