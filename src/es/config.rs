//! Evolution strategy configuration.

use crate::error::{check_population, ConfigError};

/// Configuration for [`EvolutionStrategy`](super::EvolutionStrategy).
///
/// # Example
///
/// ```
/// use u_evolve::es::EsConfig;
///
/// let config = EsConfig::default().with_parents(5).with_offspring(35).with_plus_selection(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EsConfig {
    /// μ: number of parents kept between generations.
    pub parents: usize,

    /// λ: number of offspring bred per generation.
    pub offspring: usize,

    /// `true` for (μ+λ), `false` for (μ,λ).
    pub plus_selection: bool,
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            parents: 15,
            offspring: 100,
            plus_selection: false,
        }
    }
}

impl EsConfig {
    pub fn with_parents(mut self, mu: usize) -> Self {
        self.parents = mu;
        self
    }

    pub fn with_offspring(mut self, lambda: usize) -> Self {
        self.offspring = lambda;
        self
    }

    pub fn with_plus_selection(mut self, plus: bool) -> Self {
        self.plus_selection = plus;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(1, self.parents)?;
        if self.offspring == 0 {
            return Err(ConfigError::NonPositive { name: "offspring" });
        }
        if !self.plus_selection && self.parents > self.offspring {
            return Err(ConfigError::TooFewOffspring {
                parents: self.parents,
                offspring: self.offspring,
            });
        }
        Ok(())
    }
}
