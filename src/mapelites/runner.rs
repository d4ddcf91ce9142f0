//! Single-archive MAP-Elites strategy.

use log::debug;
use rand::Rng;

use super::archive::{validate_descriptors, Archive, Placement};
use super::config::MapElitesConfig;
use super::descriptor::Descriptor;
use crate::error::{ConfigError, SolverError};
use crate::order::DagPartiallyOrderedCollection;
use crate::solver::variation::mutate_uniform;
use crate::solver::{
    EvaluationPipeline, GenotypeFactory, Individual, Mutation, Offspring, PopulationState,
    Problem, Progress, QualityOrder, SolutionMapper, SolverState, Strategy,
};

/// State of a MAP-Elites run: the archive plus the population view of its
/// occupants.
#[derive(Debug, Clone)]
pub struct MapElitesState<G, S, Q> {
    population: PopulationState<G, S, Q>,
    archive: Archive<Individual<G, S, Q>>,
}

impl<G, S, Q> MapElitesState<G, S, Q> {
    pub fn archive(&self) -> &Archive<Individual<G, S, Q>> {
        &self.archive
    }

    pub fn into_parts(self) -> (PopulationState<G, S, Q>, Archive<Individual<G, S, Q>>) {
        (self.population, self.archive)
    }
}

impl<G, S, Q> SolverState for MapElitesState<G, S, Q> {
    type Genotype = G;
    type Solution = S;
    type Quality = Q;

    fn population_state(&self) -> &PopulationState<G, S, Q> {
        &self.population
    }
}

/// Builds the population view of a set of archives: every occupant once,
/// ordered by the problem's comparator.
pub(crate) fn occupant_population<'a, G, S, P, I>(
    progress: Progress,
    occupants: I,
    problem: &P,
) -> PopulationState<G, S, P::Quality>
where
    G: Clone + 'a,
    S: Clone + 'a,
    P: Problem<S>,
    P::Quality: 'a,
    I: IntoIterator<Item = &'a Individual<G, S, P::Quality>>,
{
    let members: Vec<_> = occupants.into_iter().cloned().collect();
    PopulationState::new(
        progress,
        DagPartiallyOrderedCollection::new(members, &QualityOrder(problem)),
    )
}

/// MAP-Elites (Mouret & Clune, 2015).
///
/// Each iteration mutates `batch_size` parents drawn uniformly from the
/// current occupants, evaluates the offspring in one batch and offers each
/// to the cell its features map to. The reported population is the set of
/// all occupants.
///
/// `T` is the archived individual type,
/// `Individual<Genotype, Solution, Quality>`; descriptors read features from it.
#[derive(Debug, Clone)]
pub struct MapElites<F, Mu, T> {
    config: MapElitesConfig,
    factory: F,
    mutation: Mu,
    descriptors: Vec<Descriptor<T>>,
}

impl<F, Mu, T> MapElites<F, Mu, T> {
    pub fn new(
        config: MapElitesConfig,
        factory: F,
        mutation: Mu,
        descriptors: Vec<Descriptor<T>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_descriptors(&descriptors)?;
        Ok(Self {
            config,
            factory,
            mutation,
            descriptors,
        })
    }

    pub fn config(&self) -> &MapElitesConfig {
        &self.config
    }

    pub fn descriptors(&self) -> &[Descriptor<T>] {
        &self.descriptors
    }
}

impl<F, Mu, M, P, G, S, Q> Strategy<M, P> for MapElites<F, Mu, Individual<G, S, Q>>
where
    F: GenotypeFactory<Genotype = G>,
    Mu: Mutation<G>,
    M: SolutionMapper<G, Solution = S>,
    P: Problem<S, Quality = Q>,
    G: Clone + Sync,
    S: Clone + Send + Sync,
    Q: Clone + Send + Sync,
{
    type State = MapElitesState<G, S, Q>;

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

        let order = QualityOrder(pipeline.problem());
        let mut archive = Archive::new(self.descriptors.clone())?;
        for individual in evaluated {
            archive.add(individual, &order);
        }
        progress.refresh_elapsed();

        let population = occupant_population(progress, archive.occupants(), pipeline.problem());
        Ok(MapElitesState {
            population,
            archive,
        })
    }

    fn update<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
        state: Self::State,
    ) -> Result<Self::State, SolverError> {
        let (population, mut archive) = state.into_parts();
        let (mut progress, _) = population.into_parts();
        let iteration = progress.next_iteration();

        let births = mutate_uniform(
            &archive.occupants(),
            self.config.batch_size,
            &self.mutation,
            rng,
        )?;
        let evaluated = pipeline.evaluate_births(births, iteration, &mut progress)?;

        let order = QualityOrder(pipeline.problem());
        let (mut occupied, mut replaced) = (0usize, 0usize);
        for individual in evaluated {
            match archive.add(individual, &order) {
                Placement::Occupied => occupied += 1,
                Placement::Replaced => replaced += 1,
                Placement::Discarded => {}
            }
        }
        progress.advance();
        debug!(
            "map-elites iteration {iteration}: {}/{} cells occupied ({occupied} new, {replaced} replaced)",
            archive.len(),
            archive.capacity()
        );

        let population = occupant_population(progress, archive.occupants(), pipeline.problem());
        Ok(MapElitesState {
            population,
            archive,
        })
    }
}
