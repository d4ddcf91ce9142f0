//! MAP-Elites configuration.

use crate::error::{check_population, ConfigError};

/// Configuration shared by the MAP-Elites strategies.
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::mapelites::MapElitesConfig;
///
/// let config = MapElitesConfig::default()
///     .with_initial_population(200)
///     .with_batch_size(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapElitesConfig {
    /// Number of random genotypes evaluated by `init`.
    pub initial_population: usize,

    /// Number of offspring produced and offered to the archive per iteration.
    pub batch_size: usize,
}

impl Default for MapElitesConfig {
    fn default() -> Self {
        Self {
            initial_population: 100,
            batch_size: 100,
        }
    }
}

impl MapElitesConfig {
    /// Sets the size of the initial random batch.
    pub fn with_initial_population(mut self, n: usize) -> Self {
        self.initial_population = n;
        self
    }

    /// Sets the number of offspring per iteration.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(1, self.initial_population)?;
        if self.batch_size == 0 {
            return Err(ConfigError::NonPositive { name: "batch_size" });
        }
        Ok(())
    }
}
