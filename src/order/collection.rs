//! Partially ordered collections.
//!
//! [`DagPartiallyOrderedCollection`] materializes the dominance relation
//! eagerly as a DAG: an edge `a → b` exists when `a` is `Before` `b`.
//! Callers only depend on the [`PartiallyOrderedCollection`] trait, so the
//! O(n²) construction can be replaced by an incremental index later.

use super::comparison::{PartialComparator, PartialComparison};

/// A set of items exposing Pareto-front queries.
pub trait PartiallyOrderedCollection<T> {
    /// All members, in insertion order.
    fn all(&self) -> &[T];

    /// Members not dominated by any other member (the Pareto front).
    ///
    /// Never empty when the collection is non-empty.
    fn firsts(&self) -> Vec<&T>;

    /// Members that dominate no other member.
    fn lasts(&self) -> Vec<&T>;

    /// Number of members.
    fn len(&self) -> usize {
        self.all().len()
    }

    /// Whether the collection has no members.
    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

/// Eagerly built dominance DAG over a vector of items.
///
/// The comparator is not stored: it is supplied when the collection is built
/// or extended, which keeps the collection a plain, cheaply cloneable value.
///
/// # Example
///
/// ```
/// use u_evolve::order::{DagPartiallyOrderedCollection, ParetoComparator, PartiallyOrderedCollection};
///
/// let points = vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![4.0, 4.0]];
/// let collection = DagPartiallyOrderedCollection::new(points, &ParetoComparator::minimizing(2));
///
/// let front: Vec<&Vec<f64>> = collection.firsts();
/// assert_eq!(front.len(), 2); // (4, 4) is dominated by (3, 3)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DagPartiallyOrderedCollection<T> {
    items: Vec<T>,
    /// `dominated[i]` lists the members that member `i` dominates.
    dominated: Vec<Vec<usize>>,
    /// Number of members dominating member `i`.
    dominators: Vec<usize>,
    /// Members that do not compare `Same` to themselves, e.g. a NaN quality.
    degenerate: Vec<bool>,
}

impl<T> Default for DagPartiallyOrderedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            dominated: Vec::new(),
            dominators: Vec::new(),
            degenerate: Vec::new(),
        }
    }
}

impl<T> DagPartiallyOrderedCollection<T> {
    /// Builds the collection, comparing every pair once.
    pub fn new<C>(items: Vec<T>, comparator: &C) -> Self
    where
        C: PartialComparator<T> + ?Sized,
    {
        let n = items.len();
        let mut dominated = vec![Vec::new(); n];
        let mut dominators = vec![0usize; n];
        let degenerate = items
            .iter()
            .map(|item| is_degenerate(item, comparator))
            .collect();

        for i in 0..n {
            for j in (i + 1)..n {
                match comparator.compare(&items[i], &items[j]) {
                    PartialComparison::Before => {
                        dominated[i].push(j);
                        dominators[j] += 1;
                    }
                    PartialComparison::After => {
                        dominated[j].push(i);
                        dominators[i] += 1;
                    }
                    PartialComparison::Same | PartialComparison::NotComparable => {}
                }
            }
        }

        Self {
            items,
            dominated,
            dominators,
            degenerate,
        }
    }

    /// Adds one member, comparing it against every existing member.
    pub fn add<C>(&mut self, item: T, comparator: &C)
    where
        C: PartialComparator<T> + ?Sized,
    {
        let k = self.items.len();
        self.dominated.push(Vec::new());
        self.dominators.push(0);
        self.degenerate.push(is_degenerate(&item, comparator));

        for i in 0..k {
            match comparator.compare(&self.items[i], &item) {
                PartialComparison::Before => {
                    self.dominated[i].push(k);
                    self.dominators[k] += 1;
                }
                PartialComparison::After => {
                    self.dominated[k].push(i);
                    self.dominators[i] += 1;
                }
                PartialComparison::Same | PartialComparison::NotComparable => {}
            }
        }

        self.items.push(item);
    }

    /// Consumes the collection, returning its members in insertion order.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Consumes the collection, returning only its front, in insertion order.
    pub fn into_firsts(self) -> Vec<T> {
        let keep = self.first_indices();
        let mut keep = keep.into_iter().peekable();
        self.items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| {
                if keep.peek() == Some(&i) {
                    keep.next();
                    Some(item)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Like [`into_firsts`](Self::into_firsts), but keeps one member per
    /// `Same` class: a front member that is `Same` as an earlier kept one
    /// is dropped.
    pub fn into_distinct_firsts<C>(self, comparator: &C) -> Vec<T>
    where
        C: PartialComparator<T> + ?Sized,
    {
        let mut kept: Vec<T> = Vec::new();
        for item in self.into_firsts() {
            let duplicate = kept
                .iter()
                .any(|k| comparator.compare(k, &item) == PartialComparison::Same);
            if !duplicate {
                kept.push(item);
            }
        }
        kept
    }

    /// Number of members dominating the member at `index`.
    pub fn dominator_count(&self, index: usize) -> usize {
        self.dominators[index]
    }

    /// Undominated members, leaving out degenerate ones unless nothing
    /// else is undominated.
    fn first_indices(&self) -> Vec<usize> {
        let undominated: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.dominators[i] == 0)
            .collect();
        let sound: Vec<usize> = undominated
            .iter()
            .copied()
            .filter(|&i| !self.degenerate[i])
            .collect();
        if !sound.is_empty() {
            sound
        } else if !undominated.is_empty() {
            undominated
        } else {
            // Only reachable with a comparator that is not a strict partial order.
            (0..self.items.len()).collect()
        }
    }
}

fn is_degenerate<T, C>(item: &T, comparator: &C) -> bool
where
    C: PartialComparator<T> + ?Sized,
{
    comparator.compare(item, item) != PartialComparison::Same
}

impl<T> PartiallyOrderedCollection<T> for DagPartiallyOrderedCollection<T> {
    fn all(&self) -> &[T] {
        &self.items
    }

    fn firsts(&self) -> Vec<&T> {
        self.first_indices()
            .into_iter()
            .map(|i| &self.items[i])
            .collect()
    }

    fn lasts(&self) -> Vec<&T> {
        let lasts: Vec<&T> = (0..self.items.len())
            .filter(|&i| self.dominated[i].is_empty())
            .map(|i| &self.items[i])
            .collect();
        if lasts.is_empty() {
            self.items.iter().collect()
        } else {
            lasts
        }
    }
}
