//! Feature descriptors: one axis of the archive grid.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// Extracts one behavioral feature from an archived item.
pub type Extractor<T> = Arc<dyn Fn(&T) -> f64 + Send + Sync>;

/// One dimension of the feature space: an extractor plus its binning.
///
/// Values are normalized against `[min, max]`, clamped to `[0, 1]`, scaled
/// by `n_of_bins`, floored and clamped to `[0, n_of_bins - 1]`.
///
/// # Example
///
/// ```
/// use u_evolve::mapelites::Descriptor;
///
/// let length = Descriptor::new(|v: &Vec<f64>| v.len() as f64, 0.0, 10.0, 5);
/// assert_eq!(length.bin_of(0.0), 0);
/// assert_eq!(length.bin_of(3.9), 1);
/// assert_eq!(length.bin_of(10.0), 4);
/// assert_eq!(length.bin_of(-7.0), 0);
/// ```
pub struct Descriptor<T> {
    extractor: Extractor<T>,
    min: f64,
    max: f64,
    n_of_bins: usize,
}

impl<T> Descriptor<T> {
    /// Creates a descriptor. Parameters are checked when the descriptor is
    /// handed to an archive.
    pub fn new<F>(extractor: F, min: f64, max: f64, n_of_bins: usize) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        Self {
            extractor: Arc::new(extractor),
            min,
            max,
            n_of_bins,
        }
    }

    /// Zips parallel parameter arrays into descriptors.
    ///
    /// Fails with [`ConfigError::DescriptorLengthMismatch`] unless all four
    /// arrays have the same length.
    pub fn from_arrays(
        extractors: Vec<Extractor<T>>,
        mins: &[f64],
        maxs: &[f64],
        bins: &[usize],
    ) -> Result<Vec<Self>, ConfigError> {
        let n = extractors.len();
        if mins.len() != n || maxs.len() != n || bins.len() != n {
            return Err(ConfigError::DescriptorLengthMismatch {
                mins: mins.len(),
                maxs: maxs.len(),
                bins: bins.len(),
                extractors: n,
            });
        }
        Ok(extractors
            .into_iter()
            .zip(mins.iter().zip(maxs).zip(bins))
            .map(|(extractor, ((&min, &max), &n_of_bins))| Self {
                extractor,
                min,
                max,
                n_of_bins,
            })
            .collect())
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn n_of_bins(&self) -> usize {
        self.n_of_bins
    }

    /// Raw feature value of `item`.
    pub fn value(&self, item: &T) -> f64 {
        (self.extractor)(item)
    }

    /// Bin index of `item` along this dimension.
    pub fn bin(&self, item: &T) -> usize {
        self.bin_of(self.value(item))
    }

    /// Bin index of a raw feature value. NaN goes to bin 0.
    pub fn bin_of(&self, value: f64) -> usize {
        if value.is_nan() || self.n_of_bins == 0 {
            return 0;
        }
        let normalized = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        let bin = (normalized * self.n_of_bins as f64).floor() as usize;
        bin.min(self.n_of_bins - 1)
    }

    /// Checks the parameters of the descriptor at position `index`.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.n_of_bins == 0 {
            return Err(ConfigError::ZeroBins { index });
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ConfigError::InvalidDescriptorRange {
                index,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl<T> Clone for Descriptor<T> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            min: self.min,
            max: self.max,
            n_of_bins: self.n_of_bins,
        }
    }
}

impl<T> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("n_of_bins", &self.n_of_bins)
            .finish_non_exhaustive()
    }
}
