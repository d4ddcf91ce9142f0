//! Error types shared by every solver.
//!
//! Configuration problems are reported synchronously as [`ConfigError`] when
//! a strategy or archive is built. Everything that can go wrong while a run
//! is in progress surfaces as a single [`SolverError`].

/// Error type returned by fallible collaborators (solution mappers and
/// quality functions).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid construction parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population size must be at least {min}, got {actual}")]
    PopulationTooSmall { min: usize, actual: usize },

    #[error("{name} must be in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be positive")]
    NonPositive { name: &'static str },

    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("at least one feature descriptor is required")]
    NoDescriptors,

    #[error("at least one archive is required")]
    NoArchives,

    #[error("descriptor {index}: min ({min}) must be lower than max ({max})")]
    InvalidDescriptorRange { index: usize, min: f64, max: f64 },

    #[error("descriptor {index}: number of bins must be positive")]
    ZeroBins { index: usize },

    #[error("descriptor parameter arrays differ in length: {mins} mins, {maxs} maxs, {bins} bin counts, {extractors} extractors")]
    DescriptorLengthMismatch {
        mins: usize,
        maxs: usize,
        bins: usize,
        extractors: usize,
    },

    #[error("elite_ratio too high: elites fill entire population")]
    ElitesFillPopulation,

    #[error("parent count ({parents}) must not exceed offspring count ({offspring}) with comma selection")]
    TooFewOffspring { parents: usize, offspring: usize },

    #[error("lower bound ({lower}) must not exceed upper bound ({upper})")]
    InvalidBounds { lower: f64, upper: f64 },
}

/// Run-aborting failure of an optimization run.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("evaluation failed at iteration {iteration}: {source}")]
    Evaluation {
        iteration: u64,
        #[source]
        source: BoxError,
    },

    #[error("cannot {operation} an empty population")]
    EmptyPopulation { operation: &'static str },

    #[error("genotype dimensions differ: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl SolverError {
    /// Wraps a collaborator failure raised while evaluating a batch.
    pub fn evaluation(iteration: u64, source: BoxError) -> Self {
        SolverError::Evaluation { iteration, source }
    }
}

/// Checks that a probability lies in `[0, 1]`.
pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

/// Checks a minimum population size.
pub(crate) fn check_population(min: usize, actual: usize) -> Result<(), ConfigError> {
    if actual < min {
        Err(ConfigError::PopulationTooSmall { min, actual })
    } else {
        Ok(())
    }
}
