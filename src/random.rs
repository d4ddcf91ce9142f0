//! Random number helpers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded, reproducible random number generator.
///
/// Two generators created from the same seed yield the same stream, which
/// is what makes whole runs reproducible regardless of the worker-pool size.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws `k` distinct indices from `0..n`, never returning `excluded`.
///
/// Uses a partial Fisher-Yates shuffle over the candidate indices.
///
/// # Panics
/// Panics if fewer than `k` candidates are available.
pub fn distinct_indices<R: Rng>(
    n: usize,
    k: usize,
    excluded: Option<usize>,
    rng: &mut R,
) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).filter(|&i| Some(i) != excluded).collect();
    assert!(
        pool.len() >= k,
        "cannot draw {k} distinct indices from {} candidates",
        pool.len()
    );
    for i in 0..k {
        let j = rng.random_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        let xs: Vec<u64> = (0..16).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_distinct_indices_excludes_and_is_distinct() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let picked = distinct_indices(5, 3, Some(2), &mut rng);
            assert_eq!(picked.len(), 3);
            assert!(!picked.contains(&2));
            let mut sorted = picked.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 3);
        }
    }

    #[test]
    #[should_panic(expected = "cannot draw 3 distinct indices")]
    fn test_distinct_indices_too_few() {
        let mut rng = create_rng(42);
        distinct_indices(3, 3, Some(0), &mut rng);
    }
}
