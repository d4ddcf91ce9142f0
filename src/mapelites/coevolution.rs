//! Two co-evolving archives of partial genotypes.
//!
//! Each side evolves its own partial genotype in its own archive. A partial
//! genotype is only evaluable once paired with a collaborator from the other
//! side: both halves are decoded by their side's mapper, merged into one
//! solution by the driver's mapper (a `SolutionMapper<(S1, S2)>`), and scored
//! by the shared problem. The partial individual inherits the quality of the
//! pairing it was born in.

use log::debug;
use rand::Rng;

use super::archive::{validate_descriptors, Archive};
use super::config::MapElitesConfig;
use super::descriptor::Descriptor;
use crate::error::{BoxError, ConfigError, SolverError};
use crate::order::{DagPartiallyOrderedCollection, PartialComparison};
use crate::solver::{
    EvaluationPipeline, GenotypeFactory, Individual, Mutation, PopulationState, Problem, Progress,
    QualityOrder, SolutionMapper, SolverState, Strategy,
};

/// One side of a co-evolution: how its partial genotypes are built, varied,
/// decoded and binned.
#[derive(Debug, Clone)]
pub struct Side<F, Mu, Mp, T> {
    pub factory: F,
    pub mutation: Mu,
    pub mapper: Mp,
    pub descriptors: Vec<Descriptor<T>>,
}

impl<F, Mu, Mp, T> Side<F, Mu, Mp, T> {
    pub fn new(factory: F, mutation: Mu, mapper: Mp, descriptors: Vec<Descriptor<T>>) -> Self {
        Self {
            factory,
            mutation,
            mapper,
            descriptors,
        }
    }
}

/// State of a co-evolution run.
///
/// The population holds the non-dominated merged individuals seen so far.
#[derive(Debug, Clone)]
pub struct CoMapElitesState<G1, S1, G2, S2, S, Q> {
    population: PopulationState<(G1, G2), S, Q>,
    first: Archive<Individual<G1, S1, Q>>,
    second: Archive<Individual<G2, S2, Q>>,
}

impl<G1, S1, G2, S2, S, Q> CoMapElitesState<G1, S1, G2, S2, S, Q> {
    pub fn first(&self) -> &Archive<Individual<G1, S1, Q>> {
        &self.first
    }

    pub fn second(&self) -> &Archive<Individual<G2, S2, Q>> {
        &self.second
    }
}

impl<G1, S1, G2, S2, S, Q> SolverState for CoMapElitesState<G1, S1, G2, S2, S, Q> {
    type Genotype = (G1, G2);
    type Solution = S;
    type Quality = Q;

    fn population_state(&self) -> &PopulationState<(G1, G2), S, Q> {
        &self.population
    }
}

/// Which archive(s) receive the partial individuals of a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Newborn {
    First,
    Second,
    Both,
}

/// One unit of evaluation: two partial genotypes to be merged.
struct Pairing<G1, G2> {
    first: G1,
    second: G2,
    newborn: Newborn,
    /// Parent of the newborn half; empty for the initial pairings.
    parent: Option<u64>,
    collaborator: Option<u64>,
}

/// Co-evolutionary MAP-Elites over two archives.
#[derive(Debug, Clone)]
pub struct CoMapElites<A, B> {
    config: MapElitesConfig,
    first: A,
    second: B,
}

impl<F1, Mu1, Mp1, T1, F2, Mu2, Mp2, T2> CoMapElites<Side<F1, Mu1, Mp1, T1>, Side<F2, Mu2, Mp2, T2>> {
    pub fn new(
        config: MapElitesConfig,
        first: Side<F1, Mu1, Mp1, T1>,
        second: Side<F2, Mu2, Mp2, T2>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_descriptors(&first.descriptors)?;
        validate_descriptors(&second.descriptors)?;
        Ok(Self {
            config,
            first,
            second,
        })
    }

    pub fn config(&self) -> &MapElitesConfig {
        &self.config
    }
}

type Archives<G1, S1, G2, S2, Q> = (Archive<Individual<G1, S1, Q>>, Archive<Individual<G2, S2, Q>>);

impl<F1, Mu1, Mp1, G1, S1, F2, Mu2, Mp2, G2, S2, M, P, S, Q> Strategy<M, P>
    for CoMapElites<
        Side<F1, Mu1, Mp1, Individual<G1, S1, Q>>,
        Side<F2, Mu2, Mp2, Individual<G2, S2, Q>>,
    >
where
    F1: GenotypeFactory<Genotype = G1>,
    Mu1: Mutation<G1>,
    Mp1: SolutionMapper<G1, Solution = S1>,
    F2: GenotypeFactory<Genotype = G2>,
    Mu2: Mutation<G2>,
    Mp2: SolutionMapper<G2, Solution = S2>,
    M: SolutionMapper<(S1, S2), Solution = S>,
    P: Problem<S, Quality = Q>,
    G1: Clone + Send + Sync,
    S1: Clone + Send + Sync,
    G2: Clone + Send + Sync,
    S2: Clone + Send + Sync,
    S: Clone + Send + Sync,
    Q: Clone + Send + Sync,
{
    type State = CoMapElitesState<G1, S1, G2, S2, S, Q>;

    fn init<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
    ) -> Result<Self::State, SolverError> {
        let mut progress = Progress::start();
        let n = self.config.initial_population;
        let pairings: Vec<_> = self
            .first
            .factory
            .build(n, rng)
            .into_iter()
            .zip(self.second.factory.build(n, rng))
            .map(|(first, second)| Pairing {
                first,
                second,
                newborn: Newborn::Both,
                parent: None,
                collaborator: None,
            })
            .collect();

        let mut archives = (
            Archive::new(self.first.descriptors.clone())?,
            Archive::new(self.second.descriptors.clone())?,
        );
        let merged = self.evaluate(pipeline, pairings, 0, &mut progress, &mut archives)?;
        progress.refresh_elapsed();

        let order = QualityOrder(pipeline.problem());
        let front =
            DagPartiallyOrderedCollection::new(merged, &order).into_distinct_firsts(&order);
        Ok(CoMapElitesState {
            population: PopulationState::new(progress, DagPartiallyOrderedCollection::new(front, &order)),
            first: archives.0,
            second: archives.1,
        })
    }

    fn update<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
        state: Self::State,
    ) -> Result<Self::State, SolverError> {
        let CoMapElitesState {
            population,
            first,
            second,
        } = state;
        let (mut progress, front) = population.into_parts();
        let iteration = progress.next_iteration();

        let (ones, twos) = (first.occupants(), second.occupants());
        if ones.is_empty() || twos.is_empty() {
            return Err(SolverError::EmptyPopulation { operation: "pair" });
        }
        let mut pairings = Vec::with_capacity(2 * self.config.batch_size);
        for _ in 0..self.config.batch_size {
            let parent = ones[rng.random_range(0..ones.len())];
            let collaborator = twos[rng.random_range(0..twos.len())];
            pairings.push(Pairing {
                first: self.first.mutation.mutate(parent.genotype(), rng),
                second: collaborator.genotype().clone(),
                newborn: Newborn::First,
                parent: Some(parent.id()),
                collaborator: Some(collaborator.id()),
            });
        }
        for _ in 0..self.config.batch_size {
            let parent = twos[rng.random_range(0..twos.len())];
            let collaborator = ones[rng.random_range(0..ones.len())];
            pairings.push(Pairing {
                first: collaborator.genotype().clone(),
                second: self.second.mutation.mutate(parent.genotype(), rng),
                newborn: Newborn::Second,
                parent: Some(parent.id()),
                collaborator: Some(collaborator.id()),
            });
        }

        let mut archives = (first, second);
        let mut merged = self.evaluate(pipeline, pairings, iteration, &mut progress, &mut archives)?;
        progress.advance();
        debug!(
            "co-evolution iteration {iteration}: archives hold {}/{} and {}/{} cells",
            archives.0.len(),
            archives.0.capacity(),
            archives.1.len(),
            archives.1.capacity()
        );

        let order = QualityOrder(pipeline.problem());
        let mut candidates = front.into_items();
        candidates.append(&mut merged);
        let front =
            DagPartiallyOrderedCollection::new(candidates, &order).into_distinct_firsts(&order);
        Ok(CoMapElitesState {
            population: PopulationState::new(progress, DagPartiallyOrderedCollection::new(front, &order)),
            first: archives.0,
            second: archives.1,
        })
    }
}

impl<F1, Mu1, Mp1, G1, S1, F2, Mu2, Mp2, G2, S2, Q>
    CoMapElites<
        Side<F1, Mu1, Mp1, Individual<G1, S1, Q>>,
        Side<F2, Mu2, Mp2, Individual<G2, S2, Q>>,
    >
where
    Mp1: SolutionMapper<G1, Solution = S1>,
    Mp2: SolutionMapper<G2, Solution = S2>,
    G1: Clone + Send + Sync,
    S1: Send,
    G2: Clone + Send + Sync,
    S2: Send,
    Q: Clone + Send,
{
    /// Evaluates all pairings in one fork-join, offers the newborn halves to
    /// their archives and returns the merged individuals in pairing order.
    fn evaluate<M, P, S>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        pairings: Vec<Pairing<G1, G2>>,
        iteration: u64,
        progress: &mut Progress,
        archives: &mut Archives<G1, S1, G2, S2, Q>,
    ) -> Result<Vec<Individual<(G1, G2), S, Q>>, SolverError>
    where
        M: SolutionMapper<(S1, S2), Solution = S>,
        P: Problem<S, Quality = Q>,
        S: Send,
    {
        let (mapper1, mapper2) = (&self.first.mapper, &self.second.mapper);
        let scored = pipeline
            .fork_join(&pairings, |pairing| -> Result<_, BoxError> {
                let halves = (mapper1.map(&pairing.first)?, mapper2.map(&pairing.second)?);
                let solution = pipeline.mapper().map(&halves)?;
                let quality = pipeline.problem().quality(&solution)?;
                Ok((halves, solution, quality))
            })
            .map_err(|source| SolverError::evaluation(iteration, source))?;
        progress.record_batch(pairings.len(), 0);

        let problem = pipeline.problem();
        let by_quality_1 = |a: &Individual<G1, S1, Q>, b: &Individual<G1, S1, Q>| -> PartialComparison {
            problem.compare(a.quality(), b.quality())
        };
        let by_quality_2 = |a: &Individual<G2, S2, Q>, b: &Individual<G2, S2, Q>| -> PartialComparison {
            problem.compare(a.quality(), b.quality())
        };

        let mut merged = Vec::with_capacity(pairings.len());
        for (pairing, ((s1, s2), solution, quality)) in pairings.into_iter().zip(scored) {
            let parents: Vec<u64> = pairing.parent.into_iter().chain(pairing.collaborator).collect();
            if pairing.newborn != Newborn::Second {
                let half = Individual::new(
                    pairing.first.clone(),
                    s1,
                    quality.clone(),
                    iteration,
                    pairing.parent,
                );
                archives.0.add(half, &by_quality_1);
            }
            if pairing.newborn != Newborn::First {
                let half = Individual::new(
                    pairing.second.clone(),
                    s2,
                    quality.clone(),
                    iteration,
                    pairing.parent,
                );
                archives.1.add(half, &by_quality_2);
            }
            merged.push(Individual::new(
                (pairing.first, pairing.second),
                solution,
                quality,
                iteration,
                parents,
            ));
        }
        debug!("iteration {iteration}: evaluated {} pairings", merged.len());
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Direction, PartiallyOrderedCollection};
    use crate::random::create_rng;
    use crate::solver::{FnMapper, Identity, IterativeSolver, SnapshotCollector, StopCondition};
    use crate::testing::{GaussianLike, RealFactory, Sphere};
    use rayon::ThreadPoolBuilder;

    type Half = Individual<Vec<f64>, Vec<f64>, f64>;
    type State = CoMapElitesState<Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, f64>;

    fn side() -> Side<RealFactory, GaussianLike, Identity, Half> {
        Side::new(
            RealFactory {
                dim: 2,
                lower: 0.0,
                upper: 1.0,
            },
            GaussianLike { step: 0.2 },
            Identity,
            vec![Descriptor::new(|h: &Half| h.solution()[0], 0.0, 1.0, 4)],
        )
    }

    fn concat(halves: &(Vec<f64>, Vec<f64>)) -> Vec<f64> {
        halves.0.iter().chain(&halves.1).copied().collect()
    }

    struct RejectAll;

    impl SolutionMapper<(Vec<f64>, Vec<f64>)> for RejectAll {
        type Solution = Vec<f64>;

        fn map(&self, _: &(Vec<f64>, Vec<f64>)) -> Result<Vec<f64>, BoxError> {
            Err("cannot merge".into())
        }
    }

    #[test]
    fn test_coevolution_run() {
        let strategy = CoMapElites::new(
            MapElitesConfig::default()
                .with_initial_population(6)
                .with_batch_size(5),
            side(),
            side(),
        )
        .unwrap();
        let solver = IterativeSolver::new(strategy, FnMapper(concat), StopCondition::iterations(20));
        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let collector: SnapshotCollector<State> = SnapshotCollector::new();

        let solutions = solver
            .solve_with_observers(&Sphere, &mut create_rng(8), &pool, &[&collector])
            .unwrap();
        assert!(!solutions.is_empty());
        assert!(solutions.iter().all(|s| s.len() == 4));

        let snapshots = collector.snapshots();
        let last = snapshots.last().unwrap();
        assert_eq!(last.progress().n_of_births(), 6 + 2 * 5 * 20);
        assert_eq!(last.progress().n_of_quality_evaluations(), last.progress().n_of_births());
        assert!(last.first().len() <= 4);
        assert!(last.second().len() <= 4);

        // The merged front is elitist: its best quality never gets worse.
        let best = |state: &State| {
            state
                .population_state()
                .population()
                .all()
                .iter()
                .map(|i| *i.quality())
                .fold(f64::INFINITY, f64::min)
        };
        for pair in snapshots.windows(2) {
            assert!(best(&pair[1]) <= best(&pair[0]));
        }

        for merged in last.population_state().population().all() {
            assert_eq!(merged.solution(), &concat(merged.genotype()));
        }
    }

    /// Scores every merged solution the same.
    struct Flat;

    impl Problem<Vec<f64>> for Flat {
        type Quality = f64;

        fn quality(&self, _: &Vec<f64>) -> Result<f64, BoxError> {
            Ok(0.0)
        }

        fn compare(&self, a: &f64, b: &f64) -> PartialComparison {
            Direction::Minimize.compare(*a, *b)
        }
    }

    #[test]
    fn test_flat_quality_keeps_single_merged_member() {
        let strategy = CoMapElites::new(
            MapElitesConfig::default()
                .with_initial_population(8)
                .with_batch_size(16),
            side(),
            side(),
        )
        .unwrap();
        let solver = IterativeSolver::new(strategy, FnMapper(concat), StopCondition::iterations(30));
        let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let mut rng = create_rng(5);

        let mut state: State = solver.init(&Flat, &mut rng, &pool).unwrap();
        let first_id = state.population_state().population().all()[0].id();
        while !solver.terminate(&state) {
            state = solver.update(&Flat, &mut rng, &pool, state).unwrap();
            let front = state.population_state().population();
            assert_eq!(front.len(), 1);
            assert_eq!(front.all()[0].id(), first_id);
        }
    }

    #[test]
    fn test_merge_failure_aborts() {
        let strategy = CoMapElites::new(MapElitesConfig::default(), side(), side()).unwrap();
        let solver = IterativeSolver::new(strategy, RejectAll, StopCondition::iterations(5));
        let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let result: Result<Vec<Vec<f64>>, _> = solver.solve(&Sphere, &mut create_rng(1), &pool);
        assert!(matches!(result, Err(SolverError::Evaluation { iteration: 0, .. })));
    }

    #[test]
    fn test_rejects_bad_side() {
        let mut bad = side();
        bad.descriptors.clear();
        let result = CoMapElites::new(MapElitesConfig::default(), side(), bad);
        assert!(matches!(result, Err(ConfigError::NoDescriptors)));
    }
}
