//! (μ,λ) and (μ+λ) evolution strategies.
//!
//! μ parents produce λ offspring by mutation alone. Comma selection picks
//! the next parents from the offspring only; plus selection lets parents
//! survive against their offspring.
//!
//! # References
//!
//! - Beyer & Schwefel (2002), *Evolution strategies: A comprehensive introduction*

mod config;
mod runner;

pub use config::EsConfig;
pub use runner::EvolutionStrategy;
