//! NSGA-II generational strategy.

use log::debug;
use rand::Rng;

use super::config::Nsga2Config;
use super::ranking::{binary_tournament, rank_and_crowd, truncate};
use crate::error::{ConfigError, SolverError};
use crate::order::{DagPartiallyOrderedCollection, PartiallyOrderedCollection};
use crate::solver::variation::Variation;
use crate::solver::{
    Batch, Crossover, EvaluationPipeline, GenotypeFactory, Individual, Mutation, Offspring,
    PopulationState, Problem, Progress, QualityOrder, SolutionMapper, Strategy,
};

/// Elitist non-dominated sorting GA (Deb et al., 2002).
///
/// Each generation:
/// 1. rank and crowd the current population
/// 2. breed `population_size` offspring from binary-tournament winners
/// 3. evaluate the offspring (and, with `remap`, the parents) in one batch
/// 4. rank offspring ∪ parents and keep the first `population_size` under
///    the crowded comparison operator
///
/// Qualities must expose their objective vector through `AsRef<[f64]>`; the
/// problem's comparator decides dominance, the raw values only feed the
/// crowding distance.
#[derive(Debug, Clone)]
pub struct Nsga2<F, C, Mu> {
    config: Nsga2Config,
    factory: F,
    crossover: C,
    mutation: Mu,
}

impl<F, C, Mu> Nsga2<F, C, Mu> {
    pub fn new(config: Nsga2Config, factory: F, crossover: C, mutation: Mu) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            crossover,
            mutation,
        })
    }

    pub fn config(&self) -> &Nsga2Config {
        &self.config
    }
}

fn objectives<G, S, Q: AsRef<[f64]>>(individual: &Individual<G, S, Q>) -> &[f64] {
    individual.quality().as_ref()
}

impl<F, C, Mu, M, P> Strategy<M, P> for Nsga2<F, C, Mu>
where
    F: GenotypeFactory,
    F::Genotype: Clone + Sync,
    C: Crossover<F::Genotype>,
    Mu: Mutation<F::Genotype>,
    M: SolutionMapper<F::Genotype>,
    M::Solution: Send + Sync,
    P: Problem<M::Solution>,
    P::Quality: AsRef<[f64]>,
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

        let ranked = rank_and_crowd(parents, &order, objectives);
        let pool: Vec<_> = ranked.iter().map(|r| &r.item).collect();
        let variation = Variation {
            crossover: &self.crossover,
            mutation: &self.mutation,
            crossover_rate: self.config.crossover_rate,
            mutation_rate: self.config.mutation_rate,
        };
        let births = variation.breed(self.config.population_size, &pool, rng, |rng| {
            binary_tournament(&ranked, rng)
        });
        let parents: Vec<_> = ranked.into_iter().map(|r| r.item).collect();

        let (batch, kept) = if self.config.remap {
            (Batch::births(births).with_remaps(parents), Vec::new())
        } else {
            (Batch::births(births), parents)
        };
        let mut union = pipeline.evaluate(batch, iteration, &mut progress)?;
        union.extend(kept);

        let survivors: Vec<_> = truncate(
            rank_and_crowd(union, &order, objectives),
            self.config.population_size,
        )
        .into_iter()
        .map(|r| r.item)
        .collect();

        progress.advance();
        let population = DagPartiallyOrderedCollection::new(survivors, &order);
        debug!(
            "nsga2 generation {}: population={}",
            progress.n_of_iterations(),
            population.all().len()
        );
        Ok(PopulationState::new(progress, population))
    }
}
