//! Dominance comparison between candidates.
//!
//! A [`PartialComparator`] answers, for two values, which one is strictly
//! better. Single-objective qualities degenerate to a total order; vector
//! qualities use Pareto dominance, where two trade-off points are
//! [`NotComparable`](PartialComparison::NotComparable).

use std::cmp::Ordering;

/// Outcome of comparing two values under a (partial) order.
///
/// `Before` means the left value is strictly better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartialComparison {
    /// Left is strictly better.
    Before,
    /// Right is strictly better.
    After,
    /// Equal on every objective.
    Same,
    /// Neither dominates the other.
    NotComparable,
}

impl PartialComparison {
    /// Converts a `partial_cmp` result where `Less` means better.
    ///
    /// `None` (e.g. a NaN operand) becomes `NotComparable`.
    pub fn from_ordering(ordering: Option<Ordering>) -> Self {
        match ordering {
            Some(Ordering::Less) => PartialComparison::Before,
            Some(Ordering::Greater) => PartialComparison::After,
            Some(Ordering::Equal) => PartialComparison::Same,
            None => PartialComparison::NotComparable,
        }
    }

    /// Swaps the roles of left and right.
    pub fn reverse(self) -> Self {
        match self {
            PartialComparison::Before => PartialComparison::After,
            PartialComparison::After => PartialComparison::Before,
            other => other,
        }
    }
}

/// A three/four-outcome comparison over values of type `T`.
///
/// Implementations must be antisymmetric:
/// `compare(a, b) == Before` iff `compare(b, a) == After`.
///
/// Any `Fn(&T, &T) -> PartialComparison` is a comparator.
pub trait PartialComparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> PartialComparison;
}

impl<T: ?Sized, F> PartialComparator<T> for F
where
    F: Fn(&T, &T) -> PartialComparison,
{
    fn compare(&self, a: &T, b: &T) -> PartialComparison {
        self(a, b)
    }
}

/// Natural order of a `PartialOrd` value, smaller is better.
///
/// Incomparable operands (NaN) yield `NotComparable`.
pub fn natural<Q: PartialOrd + ?Sized>(a: &Q, b: &Q) -> PartialComparison {
    PartialComparison::from_ordering(a.partial_cmp(b))
}

/// Optimization direction of a single objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower values are better.
    #[default]
    Minimize,
    /// Higher values are better.
    Maximize,
}

impl Direction {
    /// Compares two scalar objective values under this direction.
    pub fn compare(self, a: f64, b: f64) -> PartialComparison {
        match self {
            Direction::Minimize => natural(&a, &b),
            Direction::Maximize => natural(&b, &a),
        }
    }
}

/// Pareto dominance over fixed-length objective vectors.
///
/// `a` is `Before` `b` iff it is no worse on every objective (after direction
/// normalization) and strictly better on at least one. Vectors containing
/// NaN, or of a different length than the configured objectives, are
/// `NotComparable` to everything.
///
/// # Example
///
/// ```
/// use u_evolve::order::{Direction, ParetoComparator, PartialComparator, PartialComparison};
///
/// let cmp = ParetoComparator::new(vec![Direction::Minimize, Direction::Maximize]);
/// assert_eq!(cmp.compare(&[1.0, 5.0][..], &[2.0, 4.0][..]), PartialComparison::Before);
/// assert_eq!(cmp.compare(&[1.0, 3.0][..], &[2.0, 4.0][..]), PartialComparison::NotComparable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParetoComparator {
    directions: Vec<Direction>,
}

impl ParetoComparator {
    /// Creates a comparator with one direction per objective.
    pub fn new(directions: Vec<Direction>) -> Self {
        Self { directions }
    }

    /// A comparator minimizing all `k` objectives.
    pub fn minimizing(k: usize) -> Self {
        Self::new(vec![Direction::Minimize; k])
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Whether no objective is configured.
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Per-objective directions.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }
}

impl PartialComparator<[f64]> for ParetoComparator {
    fn compare(&self, a: &[f64], b: &[f64]) -> PartialComparison {
        if a.len() != self.directions.len() || b.len() != self.directions.len() {
            return PartialComparison::NotComparable;
        }

        let mut a_better_in_some = false;
        let mut b_better_in_some = false;

        for ((&va, &vb), &direction) in a.iter().zip(b).zip(&self.directions) {
            match direction.compare(va, vb) {
                PartialComparison::Before => a_better_in_some = true,
                PartialComparison::After => b_better_in_some = true,
                PartialComparison::Same => {}
                PartialComparison::NotComparable => return PartialComparison::NotComparable,
            }
        }

        match (a_better_in_some, b_better_in_some) {
            (true, false) => PartialComparison::Before,
            (false, true) => PartialComparison::After,
            (false, false) => PartialComparison::Same,
            (true, true) => PartialComparison::NotComparable,
        }
    }
}

impl PartialComparator<Vec<f64>> for ParetoComparator {
    fn compare(&self, a: &Vec<f64>, b: &Vec<f64>) -> PartialComparison {
        PartialComparator::<[f64]>::compare(self, a.as_slice(), b.as_slice())
    }
}
