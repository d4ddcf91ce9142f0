//! Parent selection over non-dominated layers.
//!
//! Selection works on layer ranks rather than raw qualities, so it applies
//! equally to scalar and vector qualities: rank 0 is the front, rank 1 the
//! front once rank 0 is removed, and so on. Lower is better.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_evolve::random::create_rng;
/// use u_evolve::solver::Selection;
///
/// let ranks = [2, 0, 1, 0];
/// let mut rng = create_rng(7);
/// let picked = Selection::Tournament(4).select(&ranks, &mut rng);
/// assert!(picked < ranks.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` members at random, keep the best.
    ///
    /// Higher `k` = stronger selection pressure.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Linear ranking over members sorted by layer.
    ///
    /// The member at sorted position `i` (best first) gets weight `n - i`.
    /// Members of the same layer keep their relative order.
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects the index of one parent given each member's layer rank.
    ///
    /// # Panics
    /// Panics if `ranks` is empty.
    pub fn select<R: Rng>(&self, ranks: &[usize], rng: &mut R) -> usize {
        assert!(!ranks.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(ranks, *k, rng),
            Selection::Rank => linear_rank(ranks, rng),
        }
    }
}

fn tournament<R: Rng>(ranks: &[usize], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = ranks.len();

    let mut best = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if ranks[idx] < ranks[best] {
            best = idx;
        }
    }
    best
}

fn linear_rank<R: Rng>(ranks: &[usize], rng: &mut R) -> usize {
    let n = ranks.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| ranks[i]);

    // weight_i = n - position_i
    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (position, &idx) in order.iter().enumerate() {
        cumulative += (n - position) as f64;
        if cumulative > threshold {
            return idx;
        }
    }

    order[n - 1] // floating-point fallback
}
