//! Evaluated candidates.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Returns a process-unique, increasing identifier.
fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Immutable record of one evaluated candidate.
///
/// `quality` is always the quality of `solution` as computed at
/// `quality_mapping_iteration`. Nothing is mutated after construction:
/// re-evaluation produces a new value through [`with_quality`](Self::with_quality).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G, S, Q> {
    id: u64,
    genotype: G,
    solution: S,
    quality: Q,
    genotype_birth_iteration: u64,
    quality_mapping_iteration: u64,
    parent_ids: BTreeSet<u64>,
}

impl<G, S, Q> Individual<G, S, Q> {
    /// Creates a newly born individual with a fresh id.
    ///
    /// The quality mapping iteration equals the birth iteration.
    pub fn new<I>(genotype: G, solution: S, quality: Q, birth_iteration: u64, parent_ids: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self {
            id: next_id(),
            genotype,
            solution,
            quality,
            genotype_birth_iteration: birth_iteration,
            quality_mapping_iteration: birth_iteration,
            parent_ids: parent_ids.into_iter().collect(),
        }
    }

    /// Returns the same candidate re-scored at `iteration`.
    ///
    /// Id, genotype, solution, birth iteration and parents are kept.
    pub fn with_quality(self, quality: Q, iteration: u64) -> Self {
        Self {
            quality,
            quality_mapping_iteration: iteration,
            ..self
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn genotype(&self) -> &G {
        &self.genotype
    }

    pub fn solution(&self) -> &S {
        &self.solution
    }

    pub fn quality(&self) -> &Q {
        &self.quality
    }

    /// Iteration at which the genotype was created.
    pub fn genotype_birth_iteration(&self) -> u64 {
        self.genotype_birth_iteration
    }

    /// Iteration at which the quality was last computed.
    pub fn quality_mapping_iteration(&self) -> u64 {
        self.quality_mapping_iteration
    }

    /// Ids of the parents; empty for the initial population.
    pub fn parent_ids(&self) -> &BTreeSet<u64> {
        &self.parent_ids
    }
}
