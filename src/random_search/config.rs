//! Random search configuration.

use crate::error::ConfigError;

/// Configuration for [`RandomSearch`](super::RandomSearch).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomSearchConfig {
    /// Genotypes sampled and evaluated per iteration (and at init).
    pub batch_size: usize,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

impl RandomSearchConfig {
    /// Sets the batch size.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::NonPositive { name: "batch_size" });
        }
        Ok(())
    }
}
