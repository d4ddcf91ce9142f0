//! Differential evolution configuration.

use crate::error::{check_population, check_rate, ConfigError};

/// Configuration for [`DifferentialEvolution`](super::DifferentialEvolution).
///
/// # Example
///
/// ```
/// use u_evolve::de::DeConfig;
///
/// let config = DeConfig::default()
///     .with_population_size(30)
///     .with_differential_weight(0.7)
///     .with_bounds(-5.0, 5.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeConfig {
    /// Number of vectors; at least 4 (target plus three distinct donors).
    pub population_size: usize,

    /// F: scale of the difference vector. Typical range: 0.4–1.0.
    pub differential_weight: f64,

    /// CR: probability of taking each gene from the donor (0.0–1.0).
    pub crossover_probability: f64,

    /// Optional `(lower, upper)` box every trial gene is clamped to.
    pub bounds: Option<(f64, f64)>,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            differential_weight: 0.5,
            crossover_probability: 0.8,
            bounds: None,
        }
    }
}

impl DeConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_differential_weight(mut self, f: f64) -> Self {
        self.differential_weight = f;
        self
    }

    pub fn with_crossover_probability(mut self, cr: f64) -> Self {
        self.crossover_probability = cr.clamp(0.0, 1.0);
        self
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Some((lower, upper));
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(4, self.population_size)?;
        if !self.differential_weight.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "differential_weight",
                value: self.differential_weight,
            });
        }
        if self.differential_weight <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "differential_weight",
            });
        }
        check_rate("crossover_probability", self.crossover_probability)?;
        if let Some((lower, upper)) = self.bounds {
            for (name, value) in [("lower bound", lower), ("upper bound", upper)] {
                if !value.is_finite() {
                    return Err(ConfigError::NotFinite { name, value });
                }
            }
            if lower > upper {
                return Err(ConfigError::InvalidBounds { lower, upper });
            }
        }
        Ok(())
    }
}
