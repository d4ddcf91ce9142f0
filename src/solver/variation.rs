//! Offspring production shared by the crossover-based strategies.

use rand::Rng;

use super::evaluation::Offspring;
use super::individual::Individual;
use super::types::{Crossover, Mutation};
use crate::error::SolverError;

/// Crossover then mutation, each applied with its own probability.
pub(crate) struct Variation<'a, C, Mu> {
    pub crossover: &'a C,
    pub mutation: &'a Mu,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
}

impl<C, Mu> Variation<'_, C, Mu> {
    /// Produces exactly `n` offspring from `parents`.
    ///
    /// `pick` returns the index of the next parent in `parents`. Without
    /// crossover the child is a copy of the first picked parent, and only
    /// that parent is recorded.
    pub(crate) fn breed<G, S, Q, R, F>(
        &self,
        n: usize,
        parents: &[&Individual<G, S, Q>],
        rng: &mut R,
        mut pick: F,
    ) -> Vec<Offspring<G>>
    where
        G: Clone,
        C: Crossover<G>,
        Mu: Mutation<G>,
        R: Rng,
        F: FnMut(&mut R) -> usize,
    {
        let arity = self.crossover.arity().max(1);
        let mut offspring = Vec::with_capacity(n);

        while offspring.len() < n {
            let chosen: Vec<&Individual<G, S, Q>> =
                (0..arity).map(|_| parents[pick(rng)]).collect();

            let mut children = Vec::new();
            let mut parent_ids: Vec<u64> = Vec::new();
            if rng.random_range(0.0..1.0) < self.crossover_rate {
                let genotypes: Vec<&G> = chosen.iter().map(|p| p.genotype()).collect();
                children = self.crossover.recombine(&genotypes, rng);
                parent_ids = chosen.iter().map(|p| p.id()).collect();
            }
            if children.is_empty() {
                children = vec![chosen[0].genotype().clone()];
                parent_ids = vec![chosen[0].id()];
            }

            for child in children {
                if offspring.len() >= n {
                    break;
                }
                let child = if rng.random_range(0.0..1.0) < self.mutation_rate {
                    self.mutation.mutate(&child, rng)
                } else {
                    child
                };
                offspring.push(Offspring::new(child, parent_ids.clone()));
            }
        }

        offspring
    }
}

/// Mutates `n` parents drawn uniformly, with replacement, from `parents`.
pub(crate) fn mutate_uniform<G, S, Q, Mu, R>(
    parents: &[&Individual<G, S, Q>],
    n: usize,
    mutation: &Mu,
    rng: &mut R,
) -> Result<Vec<Offspring<G>>, SolverError>
where
    Mu: Mutation<G>,
    R: Rng,
{
    if parents.is_empty() {
        return Err(SolverError::EmptyPopulation { operation: "mutate" });
    }
    Ok((0..n)
        .map(|_| {
            let parent = parents[rng.random_range(0..parents.len())];
            Offspring::new(mutation.mutate(parent.genotype(), rng), vec![parent.id()])
        })
        .collect())
}
