//! Random search strategy.

use log::debug;
use rand::Rng;

use super::config::RandomSearchConfig;
use crate::error::{ConfigError, SolverError};
use crate::order::DagPartiallyOrderedCollection;
use crate::solver::{
    EvaluationPipeline, GenotypeFactory, Offspring, PopulationState, Problem, Progress,
    QualityOrder, SolutionMapper, Strategy,
};

/// Samples fresh genotypes every iteration and keeps the best seen.
///
/// The population is always the non-dominated set of the previous
/// population plus the new batch, so it never gets worse. Of members that
/// compare `Same`, only the earliest is kept.
#[derive(Debug, Clone)]
pub struct RandomSearch<F> {
    config: RandomSearchConfig,
    factory: F,
}

impl<F> RandomSearch<F> {
    pub fn new(config: RandomSearchConfig, factory: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, factory })
    }

    pub fn config(&self) -> &RandomSearchConfig {
        &self.config
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Vec<Offspring<F::Genotype>>
    where
        F: GenotypeFactory,
    {
        self.factory
            .build(self.config.batch_size, rng)
            .into_iter()
            .map(Offspring::orphan)
            .collect()
    }
}

impl<F, M, P> Strategy<M, P> for RandomSearch<F>
where
    F: GenotypeFactory,
    F::Genotype: Sync,
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
        let evaluated = pipeline.evaluate_births(self.sample(rng), 0, &mut progress)?;
        progress.refresh_elapsed();

        let order = QualityOrder(pipeline.problem());
        let front =
            DagPartiallyOrderedCollection::new(evaluated, &order).into_distinct_firsts(&order);
        Ok(PopulationState::new(
            progress,
            DagPartiallyOrderedCollection::new(front, &order),
        ))
    }

    fn update<R: Rng>(
        &self,
        pipeline: &EvaluationPipeline<'_, M, P>,
        rng: &mut R,
        state: Self::State,
    ) -> Result<Self::State, SolverError> {
        let (mut progress, population) = state.into_parts();
        let iteration = progress.next_iteration();

        let evaluated = pipeline.evaluate_births(self.sample(rng), iteration, &mut progress)?;
        let mut candidates = population.into_items();
        candidates.extend(evaluated);

        let order = QualityOrder(pipeline.problem());
        let front =
            DagPartiallyOrderedCollection::new(candidates, &order).into_distinct_firsts(&order);
        progress.advance();
        debug!("random search iteration {iteration}: front size {}", front.len());

        Ok(PopulationState::new(
            progress,
            DagPartiallyOrderedCollection::new(front, &order),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::PartiallyOrderedCollection;
    use crate::random::create_rng;
    use crate::solver::{Identity, IterativeSolver, StopCondition};
    use crate::testing::{BitFactory, OneMax, RealFactory, Zdt1};
    use rayon::ThreadPoolBuilder;

    #[test]
    fn test_rejects_zero_batch() {
        let result = RandomSearch::new(
            RandomSearchConfig::default().with_batch_size(0),
            BitFactory { len: 4 },
        );
        assert!(matches!(result, Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn test_best_never_regresses() {
        let strategy = RandomSearch::new(
            RandomSearchConfig::default().with_batch_size(8),
            BitFactory { len: 16 },
        )
        .unwrap();
        let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let solver = IterativeSolver::new(strategy, Identity, StopCondition::iterations(20));
        let mut rng = create_rng(9);

        let mut state: PopulationState<Vec<bool>, Vec<bool>, f64> =
            solver.init(&OneMax, &mut rng, &pool).unwrap();
        let mut best = *state.firsts()[0].quality();
        while !solver.terminate(&state) {
            state = solver.update(&OneMax, &mut rng, &pool, state).unwrap();
            let current = *state.firsts()[0].quality();
            assert!(current >= best);
            best = current;
            // A scalar front is one tie class, held by a single member.
            assert_eq!(state.population().len(), 1);
        }
        assert_eq!(state.progress().n_of_births(), 8 * 21);
    }

    #[test]
    fn test_plateaued_front_stays_bounded() {
        // 64 samples of 6 bits hit the optimum almost at once, then keep
        // producing exact ties of it.
        let strategy = RandomSearch::new(
            RandomSearchConfig::default().with_batch_size(64),
            BitFactory { len: 6 },
        )
        .unwrap();
        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let solver = IterativeSolver::new(strategy, Identity, StopCondition::iterations(200));
        let mut rng = create_rng(11);

        let mut state: PopulationState<Vec<bool>, Vec<bool>, f64> =
            solver.init(&OneMax, &mut rng, &pool).unwrap();
        assert_eq!(state.population().len(), 1);
        let mut incumbent = state.population().all()[0].id();
        while !solver.terminate(&state) {
            let previous = *state.firsts()[0].quality();
            state = solver.update(&OneMax, &mut rng, &pool, state).unwrap();
            assert_eq!(state.population().len(), 1);
            let kept = &state.population().all()[0];
            // A tie never displaces the member already held.
            if *kept.quality() == previous {
                assert_eq!(kept.id(), incumbent);
            }
            incumbent = kept.id();
        }
        assert_eq!(*state.firsts()[0].quality(), 6.0);
        assert_eq!(state.progress().n_of_births(), 64 * 201);
    }

    #[test]
    fn test_multi_objective_front_is_mutually_non_dominated() {
        let strategy = RandomSearch::new(
            RandomSearchConfig::default().with_batch_size(30),
            RealFactory {
                dim: 4,
                lower: 0.0,
                upper: 1.0,
            },
        )
        .unwrap();
        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let solver = IterativeSolver::new(strategy, Identity, StopCondition::iterations(5));
        let problem = Zdt1::new();
        let mut rng = create_rng(3);
        let mut state: PopulationState<Vec<f64>, Vec<f64>, Vec<f64>> =
            solver.init(&problem, &mut rng, &pool).unwrap();
        while !solver.terminate(&state) {
            state = solver.update(&problem, &mut rng, &pool, state).unwrap();
        }

        let front = state.population();
        assert!(!front.is_empty());
        assert_eq!(front.firsts().len(), front.len());
        assert_eq!(solver.extract_solutions(&state).len(), front.len());
    }
}
