//! Map of elites over a discretized feature space.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::descriptor::Descriptor;
use crate::error::ConfigError;
use crate::order::{PartialComparator, PartialComparison};

/// Outcome of offering a candidate to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The cell was empty and now holds the candidate.
    Occupied,
    /// The candidate took the resident's place.
    Replaced,
    /// The candidate was not stored.
    Discarded,
}

/// At most one elite per cell, keyed by one bin index per descriptor.
///
/// Cells are never evicted, only taken over by a strictly better candidate (or
/// any candidate, when the resident is NaN-like), so occupancy never decreases
/// and never exceeds [`capacity`](Self::capacity).
#[derive(Debug, Clone)]
pub struct Archive<T> {
    descriptors: Vec<Descriptor<T>>,
    cells: BTreeMap<Vec<usize>, T>,
}

impl<T> Archive<T> {
    /// Creates an empty archive after checking every descriptor.
    pub fn new(descriptors: Vec<Descriptor<T>>) -> Result<Self, ConfigError> {
        validate_descriptors(&descriptors)?;
        Ok(Self {
            descriptors,
            cells: BTreeMap::new(),
        })
    }

    pub fn descriptors(&self) -> &[Descriptor<T>] {
        &self.descriptors
    }

    /// Cell key of `item`.
    pub fn coordinates(&self, item: &T) -> Vec<usize> {
        self.descriptors.iter().map(|d| d.bin(item)).collect()
    }

    /// Offers `candidate` to `cell`.
    ///
    /// An empty cell is occupied; an occupied one is taken over only when
    /// `comparator` ranks the candidate strictly `Before` the resident (ties
    /// keep the resident), or when the resident is not `Same` to itself, e.g.
    /// a NaN quality. Keys outside the grid are discarded.
    pub fn put<C>(&mut self, cell: Vec<usize>, candidate: T, comparator: &C) -> Placement
    where
        C: PartialComparator<T> + ?Sized,
    {
        if !self.contains_key(&cell) {
            return Placement::Discarded;
        }
        match self.cells.entry(cell) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
                Placement::Occupied
            }
            Entry::Occupied(mut slot) => {
                let resident = slot.get();
                if comparator.compare(resident, resident) != PartialComparison::Same
                    || comparator.compare(&candidate, resident) == PartialComparison::Before
                {
                    slot.insert(candidate);
                    Placement::Replaced
                } else {
                    Placement::Discarded
                }
            }
        }
    }

    /// Offers `candidate` to the cell its own features map to.
    pub fn add<C>(&mut self, candidate: T, comparator: &C) -> Placement
    where
        C: PartialComparator<T> + ?Sized,
    {
        let cell = self.coordinates(&candidate);
        self.put(cell, candidate, comparator)
    }

    /// Resident of `cell`, if any.
    pub fn get(&self, cell: &[usize]) -> Option<&T> {
        self.cells.get(cell)
    }

    /// All residents in cell-key order.
    pub fn occupants(&self) -> Vec<&T> {
        self.cells.values().collect()
    }

    /// Occupied cells with their residents, in cell-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[usize], &T)> {
        self.cells.iter().map(|(cell, item)| (cell.as_slice(), item))
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells in the grid: the product of the bin counts.
    pub fn capacity(&self) -> usize {
        self.descriptors
            .iter()
            .fold(1usize, |acc, d| acc.saturating_mul(d.n_of_bins()))
    }

    /// Occupied fraction of the grid.
    pub fn coverage(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    fn contains_key(&self, cell: &[usize]) -> bool {
        cell.len() == self.descriptors.len()
            && cell
                .iter()
                .zip(&self.descriptors)
                .all(|(&bin, d)| bin < d.n_of_bins())
    }
}

/// Checks a descriptor set: non-empty, each one well-formed.
pub(crate) fn validate_descriptors<T>(descriptors: &[Descriptor<T>]) -> Result<(), ConfigError> {
    if descriptors.is_empty() {
        return Err(ConfigError::NoDescriptors);
    }
    for (index, descriptor) in descriptors.iter().enumerate() {
        descriptor.validate(index)?;
    }
    Ok(())
}
