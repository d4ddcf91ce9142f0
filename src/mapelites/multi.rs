//! Several archives over one genotype/solution space.

use std::collections::BTreeSet;

use log::debug;
use rand::Rng;

use super::archive::{validate_descriptors, Archive, Placement};
use super::config::MapElitesConfig;
use super::descriptor::Descriptor;
use super::runner::occupant_population;
use crate::error::{ConfigError, SolverError};
use crate::solver::variation::mutate_uniform;
use crate::solver::{
    EvaluationPipeline, GenotypeFactory, Individual, Mutation, Offspring, PopulationState,
    Problem, Progress, QualityOrder, SolutionMapper, SolverState, Strategy,
};

/// State of a multi-archive run.
#[derive(Debug, Clone)]
pub struct MultiArchiveState<G, S, Q> {
    population: PopulationState<G, S, Q>,
    archives: Vec<Archive<Individual<G, S, Q>>>,
}

impl<G, S, Q> MultiArchiveState<G, S, Q> {
    pub fn archives(&self) -> &[Archive<Individual<G, S, Q>>] {
        &self.archives
    }
}

impl<G, S, Q> SolverState for MultiArchiveState<G, S, Q> {
    type Genotype = G;
    type Solution = S;
    type Quality = Q;

    fn population_state(&self) -> &PopulationState<G, S, Q> {
        &self.population
    }
}

/// MAP-Elites with several archives, each with its own descriptor set.
///
/// Every evaluated offspring is offered to every archive, which applies the
/// usual per-cell replacement independently. Parents are drawn uniformly from
/// the union of all occupants; an individual resident in several archives
/// counts once.
#[derive(Debug, Clone)]
pub struct MultiArchiveMapElites<F, Mu, T> {
    config: MapElitesConfig,
    factory: F,
    mutation: Mu,
    descriptor_sets: Vec<Vec<Descriptor<T>>>,
}

impl<F, Mu, T> MultiArchiveMapElites<F, Mu, T> {
    pub fn new(
        config: MapElitesConfig,
        factory: F,
        mutation: Mu,
        descriptor_sets: Vec<Vec<Descriptor<T>>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if descriptor_sets.is_empty() {
            return Err(ConfigError::NoArchives);
        }
        for set in &descriptor_sets {
            validate_descriptors(set)?;
        }
        Ok(Self {
            config,
            factory,
            mutation,
            descriptor_sets,
        })
    }

    pub fn config(&self) -> &MapElitesConfig {
        &self.config
    }
}

/// Occupants of all archives, first occurrence of each id only.
fn union_of_occupants<G, S, Q>(archives: &[Archive<Individual<G, S, Q>>]) -> Vec<&Individual<G, S, Q>> {
    let mut seen = BTreeSet::new();
    archives
        .iter()
        .flat_map(|archive| archive.occupants())
        .filter(|individual| seen.insert(individual.id()))
        .collect()
}

impl<F, Mu, G, S, Q> MultiArchiveMapElites<F, Mu, Individual<G, S, Q>>
where
    G: Clone,
    S: Clone,
    Q: Clone,
{
    /// Offers every individual to every archive, returning how many
    /// placements took an empty cell or replaced a resident.
    fn insert_all<P>(
        archives: &mut [Archive<Individual<G, S, Q>>],
        evaluated: Vec<Individual<G, S, Q>>,
        problem: &P,
    ) -> (usize, usize)
    where
        P: Problem<S, Quality = Q>,
    {
        let order = QualityOrder(problem);
        let (mut occupied, mut replaced) = (0usize, 0usize);
        for individual in evaluated {
            for archive in archives.iter_mut() {
                match archive.add(individual.clone(), &order) {
                    Placement::Occupied => occupied += 1,
                    Placement::Replaced => replaced += 1,
                    Placement::Discarded => {}
                }
            }
        }
        (occupied, replaced)
    }
}

impl<F, Mu, M, P, G, S, Q> Strategy<M, P> for MultiArchiveMapElites<F, Mu, Individual<G, S, Q>>
where
    F: GenotypeFactory<Genotype = G>,
    Mu: Mutation<G>,
    M: SolutionMapper<G, Solution = S>,
    P: Problem<S, Quality = Q>,
    G: Clone + Sync,
    S: Clone + Send + Sync,
    Q: Clone + Send + Sync,
{
    type State = MultiArchiveState<G, S, Q>;

    fn init<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
    ) -> Result<Self::State, SolverError> {
        let mut progress = Progress::start();
        let births = self
            .factory
            .build(self.config.initial_population, rng)
            .into_iter()
            .map(Offspring::orphan)
            .collect();
        let evaluated = pipeline.evaluate_births(births, 0, &mut progress)?;

        let mut archives = self
            .descriptor_sets
            .iter()
            .map(|set| Archive::new(set.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::insert_all(&mut archives, evaluated, pipeline.problem());
        progress.refresh_elapsed();

        let population =
            occupant_population(progress, union_of_occupants(&archives), pipeline.problem());
        Ok(MultiArchiveState {
            population,
            archives,
        })
    }

    fn update<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
        state: Self::State,
    ) -> Result<Self::State, SolverError> {
        let MultiArchiveState {
            population,
            mut archives,
        } = state;
        let (mut progress, _) = population.into_parts();
        let iteration = progress.next_iteration();

        let births = mutate_uniform(
            &union_of_occupants(&archives),
            self.config.batch_size,
            &self.mutation,
            rng,
        )?;
        let evaluated = pipeline.evaluate_births(births, iteration, &mut progress)?;
        let (occupied, replaced) = Self::insert_all(&mut archives, evaluated, pipeline.problem());
        progress.advance();
        debug!(
            "multi-archive map-elites iteration {iteration}: {} archives, {occupied} new cells, {replaced} replaced",
            archives.len()
        );

        let population =
            occupant_population(progress, union_of_occupants(&archives), pipeline.problem());
        Ok(MultiArchiveState {
            population,
            archives,
        })
    }
}
