//! GA strategy.
//!
//! One generation:
//! 1. Assign every member its non-dominated layer under the problem's
//!    comparator (layer 0 is the front)
//! 2. Breed offspring from parents chosen by [`Selection`](crate::solver::Selection)
//!    over those layers
//! 3. Evaluate the offspring (and, with `remap`, the parents) in one batch
//! 4. Pick survivors: overlapping keeps the best of parents ∪ offspring,
//!    generational keeps elites plus offspring

use log::debug;
use rand::Rng;

use super::config::GaConfig;
use crate::error::{ConfigError, SolverError};
use crate::nsga2::{non_dominated_sort, truncate_by_layer};
use crate::order::{DagPartiallyOrderedCollection, PartiallyOrderedCollection};
use crate::solver::variation::Variation;
use crate::solver::{
    Batch, Crossover, EvaluationPipeline, GenotypeFactory, Mutation, Offspring, PopulationState,
    Problem, Progress, QualityOrder, SolutionMapper, Strategy,
};

/// Genetic Algorithm over any genotype and quality type.
///
/// Ranking only uses [`Problem::compare`], so scalar and multi-objective
/// problems are handled alike: members of the same non-dominated layer tie,
/// and ties keep their current order (parents before offspring).
#[derive(Debug, Clone)]
pub struct Ga<F, C, Mu> {
    config: GaConfig,
    factory: F,
    crossover: C,
    mutation: Mu,
}

impl<F, C, Mu> Ga<F, C, Mu> {
    pub fn new(config: GaConfig, factory: F, crossover: C, mutation: Mu) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            crossover,
            mutation,
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Offspring bred per generation.
    fn offspring_count(&self) -> usize {
        if self.config.overlapping {
            self.config.population_size
        } else {
            self.config.population_size - self.config.elite_count()
        }
    }
}

impl<F, C, Mu, M, P> Strategy<M, P> for Ga<F, C, Mu>
where
    F: GenotypeFactory,
    F::Genotype: Clone + Sync,
    C: Crossover<F::Genotype>,
    Mu: Mutation<F::Genotype>,
    M: SolutionMapper<F::Genotype>,
    M::Solution: Send + Sync,
    P: Problem<M::Solution>,
{
    type State = PopulationState<F::Genotype, M::Solution, P::Quality>;

    fn init<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
    ) -> Result<Self::State, SolverError> {
        let mut progress = Progress::start();
        let births = self
            .factory
            .build(self.config.population_size, rng)
            .into_iter()
            .map(Offspring::orphan)
            .collect();
        let population = pipeline.evaluate_births(births, 0, &mut progress)?;
        progress.refresh_elapsed();

        let order = QualityOrder(pipeline.problem());
        Ok(PopulationState::new(
            progress,
            DagPartiallyOrderedCollection::new(population, &order),
        ))
    }

    fn update<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
        state: Self::State,
    ) -> Result<Self::State, SolverError> {
        let (mut progress, population) = state.into_parts();
        let parents = population.into_items();
        if parents.is_empty() {
            return Err(SolverError::EmptyPopulation { operation: "breed from" });
        }

        let order = QualityOrder(pipeline.problem());
        let iteration = progress.next_iteration();

        let ranks = non_dominated_sort(&parents, &order).ranks;
        let pool: Vec<_> = parents.iter().collect();
        let variation = Variation {
            crossover: &self.crossover,
            mutation: &self.mutation,
            crossover_rate: self.config.crossover_rate,
            mutation_rate: self.config.mutation_rate,
        };
        let births = variation.breed(self.offspring_count(), &pool, rng, |rng| {
            self.config.selection.select(&ranks, rng)
        });
        let n_births = births.len();

        let (batch, kept) = if self.config.remap {
            (Batch::births(births).with_remaps(parents), None)
        } else {
            (Batch::births(births), Some(parents))
        };
        let mut offspring = pipeline.evaluate(batch, iteration, &mut progress)?;
        let parents = match kept {
            Some(parents) => parents,
            None => offspring.split_off(n_births),
        };

        let survivors = if self.config.overlapping {
            let mut union = parents;
            union.extend(offspring);
            truncate_by_layer(union, &order, self.config.population_size)
        } else {
            let mut next = truncate_by_layer(parents, &order, self.config.elite_count());
            next.extend(offspring);
            next
        };

        progress.advance();
        let population = DagPartiallyOrderedCollection::new(survivors, &order);
        debug!(
            "ga generation {}: population={} front={}",
            progress.n_of_iterations(),
            population.len(),
            population.firsts().len()
        );
        Ok(PopulationState::new(progress, population))
    }
}
