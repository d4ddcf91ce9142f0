//! NSGA-II configuration.

use crate::error::{check_population, check_rate, ConfigError};

/// Configuration for NSGA-II.
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default()
///     .with_population_size(60)
///     .with_crossover_rate(0.8)
///     .with_remap(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Number of survivors kept each generation; also the number of
    /// offspring produced.
    pub population_size: usize,

    /// Probability of recombining the tournament winners (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating each child (0.0–1.0).
    pub mutation_rate: f64,

    /// Re-evaluates the parents alongside the offspring every generation.
    ///
    /// Only useful when the quality function changes over time; every remap
    /// counts as a quality evaluation but not as a birth.
    pub remap: bool,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            crossover_rate: 0.9,
            mutation_rate: 1.0,
            remap: false,
        }
    }
}

impl Nsga2Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parent remapping.
    pub fn with_remap(mut self, remap: bool) -> Self {
        self.remap = remap;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(2, self.population_size)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}
