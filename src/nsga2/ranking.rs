//! Non-dominated sorting and crowding distance.
//!
//! Domain-agnostic ranking primitives for Pareto-based methods. Sorting is
//! generic over any [`PartialComparator`], so the same layers serve scalar
//! qualities (a total order gives one member per distinct value and layer)
//! and objective vectors.
//!
//! # Algorithms
//!
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment for diversity preservation
//! - [`rank_and_crowd`], [`truncate`], [`binary_tournament`]: the crowded
//!   comparison operator and what is built on it
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use std::cmp::Ordering;

use rand::Rng;

use crate::order::{PartialComparator, PartialComparison};

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the item at the
/// same index. Rank 0 is the Pareto front (non-dominated items).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Pareto rank for each item (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair of items, determine dominance
/// 2. Items dominated by no other belong to front 0 (rank 0)
/// 3. Remove front 0, decrementing the domination count of everything it
///    dominates, and repeat to find subsequent fronts
///
/// Items that are never released (only possible when the comparator has
/// cycles) are put together in one last front. So are degenerate items, those
/// not `Same` to themselves such as a NaN quality, unless every item is
/// degenerate, in which case they all form front 0.
///
/// # Complexity
///
/// O(n²) comparisons, O(n) fronts in the worst case
///
/// # Example
///
/// ```
/// use u_evolve::nsga2::non_dominated_sort;
/// use u_evolve::order::ParetoComparator;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives, &ParetoComparator::minimizing(2));
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort<T, C>(items: &[T], comparator: &C) -> NondominatedSortResult
where
    C: PartialComparator<T> + ?Sized,
{
    let n = items.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut degenerate: Vec<bool> = items
        .iter()
        .map(|item| comparator.compare(item, item) != PartialComparison::Same)
        .collect();
    if degenerate.iter().all(|&d| d) {
        degenerate.fill(false);
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in (0..n).filter(|&i| !degenerate[i]) {
        for j in ((i + 1)..n).filter(|&j| !degenerate[j]) {
            match comparator.compare(&items[i], &items[j]) {
                PartialComparison::Before => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                PartialComparison::After => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                PartialComparison::Same | PartialComparison::NotComparable => {}
            }
        }
    }

    let mut ranks = vec![usize::MAX; n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = (0..n)
        .filter(|&i| !degenerate[i] && domination_count[i] == 0)
        .collect();
    let mut assigned = 0;

    while !current.is_empty() {
        let rank = fronts.len();
        let mut next = Vec::new();
        for &i in &current {
            ranks[i] = rank;
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        assigned += current.len();
        next.sort_unstable();
        fronts.push(std::mem::replace(&mut current, next));
    }

    if assigned < n {
        let rank = fronts.len();
        let stuck: Vec<usize> = (0..n).filter(|&i| ranks[i] == usize::MAX).collect();
        for &i in &stuck {
            ranks[i] = rank;
        }
        fronts.push(stuck);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance of each member of one rank, measuring how
/// isolated it is in objective space. Higher distance means more isolated.
///
/// For each objective with a non-zero range, the two boundary members
/// receive `f64::INFINITY` and every interior member accumulates
/// `(next - previous) / (max - min)`. Objectives whose range is zero (or not
/// a number) contribute nothing, not even the boundary infinities. Ranks of
/// one or two members are all boundary.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of members
///
/// # Example
///
/// ```
/// use u_evolve::nsga2::crowding_distance;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&objectives);
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance<V: AsRef<[f64]>>(objectives: &[V]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives.iter().map(|o| o.as_ref().len()).min().unwrap_or(0);
    let mut distances = vec![0.0f64; n];

    for obj in 0..m {
        let value = |i: usize| objectives[i].as_ref()[obj];

        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let range = value(indices[n - 1]) - value(indices[0]);
        if !(range > 0.0) || !range.is_finite() {
            continue;
        }

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;
        for k in 1..(n - 1) {
            let gap = value(indices[k + 1]) - value(indices[k - 1]);
            distances[indices[k]] += gap / range;
        }
    }

    distances
}

/// An item annotated with its Pareto rank and crowding distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub rank: usize,
    pub crowding_distance: f64,
}

/// The crowded comparison operator: ascending rank, then descending
/// crowding distance.
pub fn crowded_cmp<T>(a: &Ranked<T>, b: &Ranked<T>) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| b.crowding_distance.total_cmp(&a.crowding_distance))
}

/// Sorts `items` into fronts and computes crowding distances within each
/// front. The output keeps the input order.
///
/// `objectives` extracts the objective vector used for crowding.
pub fn rank_and_crowd<T, C, F>(items: Vec<T>, comparator: &C, objectives: F) -> Vec<Ranked<T>>
where
    C: PartialComparator<T> + ?Sized,
    F: Fn(&T) -> &[f64],
{
    let sorted = non_dominated_sort(&items, comparator);
    let mut distances = vec![0.0f64; items.len()];
    for front in &sorted.fronts {
        let values: Vec<&[f64]> = front.iter().map(|&i| objectives(&items[i])).collect();
        for (&i, d) in front.iter().zip(crowding_distance(&values)) {
            distances[i] = d;
        }
    }

    items
        .into_iter()
        .zip(sorted.ranks)
        .zip(distances)
        .map(|((item, rank), crowding_distance)| Ranked {
            item,
            rank,
            crowding_distance,
        })
        .collect()
}

/// Keeps the first `n` members under the crowded comparison operator.
///
/// The sort is stable, so members that compare equal keep their input order.
pub fn truncate<T>(mut ranked: Vec<Ranked<T>>, n: usize) -> Vec<Ranked<T>> {
    ranked.sort_by(crowded_cmp);
    ranked.truncate(n);
    ranked
}

/// Keeps the `n` best items by non-dominated layer alone.
///
/// Stable within a layer: earlier items win ties.
pub fn truncate_by_layer<T, C>(items: Vec<T>, comparator: &C, n: usize) -> Vec<T>
where
    C: PartialComparator<T> + ?Sized,
{
    let ranks = non_dominated_sort(&items, comparator).ranks;
    let mut layered: Vec<(usize, T)> = ranks.into_iter().zip(items).collect();
    layered.sort_by_key(|(rank, _)| *rank);
    layered.into_iter().take(n).map(|(_, item)| item).collect()
}

/// Binary tournament: draws two members uniformly and returns the index of
/// the better one under [`crowded_cmp`]. Ties go to the first draw.
///
/// # Panics
/// Panics if `ranked` is empty.
pub fn binary_tournament<T, R: Rng>(ranked: &[Ranked<T>], rng: &mut R) -> usize {
    assert!(!ranked.is_empty(), "cannot select from empty population");
    let a = rng.random_range(0..ranked.len());
    let b = rng.random_range(0..ranked.len());
    if crowded_cmp(&ranked[b], &ranked[a]) == Ordering::Less {
        b
    } else {
        a
    }
}

// ============================================================================
// Tests
// ============================================================================
