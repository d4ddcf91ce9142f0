//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control one generation of the
//! genetic algorithm. Stopping criteria are not part of it: they are given
//! to the driver as a [`StopCondition`](crate::solver::StopCondition).

use crate::error::{check_population, check_rate, ConfigError};
use crate::solver::Selection;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, selection strategy, operator rates and the
/// survivor scheme.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert!(config.overlapping);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::GaConfig;
/// use u_evolve::solver::Selection;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_overlapping(false)
///     .with_elite_ratio(0.1)
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    /// Typical range: 50–500.
    pub population_size: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Fraction of the population preserved as elites (0.0–1.0).
    ///
    /// Only used when `overlapping` is off: the best members (by
    /// non-dominated layer) are copied unchanged to the next generation.
    /// Typical range: 0.05–0.2.
    pub elite_ratio: f64,

    /// Probability of applying crossover to the selected parents (0.0–1.0).
    ///
    /// When crossover is not applied, a copy of the first parent is used.
    pub crossover_rate: f64,

    /// Probability of applying mutation to an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Survivor scheme.
    ///
    /// `true`: `population_size` offspring compete with their parents and the
    /// best `population_size` of the union survive.
    /// `false`: elites plus freshly bred offspring replace the population.
    pub overlapping: bool,

    /// Re-evaluates the parents alongside the offspring every generation.
    pub remap: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            selection: Selection::default(),
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            overlapping: true,
            remap: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
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

    /// Selects overlapping (`true`) or generational (`false`) survival.
    pub fn with_overlapping(mut self, overlapping: bool) -> Self {
        self.overlapping = overlapping;
        self
    }

    /// Enables or disables parent remapping.
    pub fn with_remap(mut self, remap: bool) -> Self {
        self.remap = remap;
        self
    }

    /// Number of elites carried over in generational mode.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(2, self.population_size)?;
        check_rate("elite_ratio", self.elite_ratio)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if !self.overlapping && self.elite_count() >= self.population_size {
            return Err(ConfigError::ElitesFillPopulation);
        }
        Ok(())
    }
}
