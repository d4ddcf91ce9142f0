//! Evolution strategy.

use log::debug;
use rand::Rng;

use super::config::EsConfig;
use crate::error::{ConfigError, SolverError};
use crate::nsga2::truncate_by_layer;
use crate::order::DagPartiallyOrderedCollection;
use crate::solver::variation::mutate_uniform;
use crate::solver::{
    EvaluationPipeline, GenotypeFactory, Mutation, Offspring, PopulationState, Problem, Progress,
    QualityOrder, SolutionMapper, Strategy,
};

/// (μ,λ) / (μ+λ) evolution strategy.
///
/// Survivors are the best μ by non-dominated layer; within a layer the
/// current order is kept, parents ahead of offspring in plus mode.
#[derive(Debug, Clone)]
pub struct EvolutionStrategy<F, Mu> {
    config: EsConfig,
    factory: F,
    mutation: Mu,
}

impl<F, Mu> EvolutionStrategy<F, Mu> {
    pub fn new(config: EsConfig, factory: F, mutation: Mu) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            mutation,
        })
    }

    pub fn config(&self) -> &EsConfig {
        &self.config
    }
}

impl<F, Mu, M, P> Strategy<M, P> for EvolutionStrategy<F, Mu>
where
    F: GenotypeFactory,
    F::Genotype: Sync,
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
            .build(self.config.parents, rng)
            .into_iter()
            .map(Offspring::orphan)
            .collect();
        let parents = pipeline.evaluate_births(births, 0, &mut progress)?;
        progress.refresh_elapsed();

        let order = QualityOrder(pipeline.problem());
        Ok(PopulationState::new(
            progress,
            DagPartiallyOrderedCollection::new(parents, &order),
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
        let iteration = progress.next_iteration();

        let pool: Vec<_> = parents.iter().collect();
        let births = mutate_uniform(&pool, self.config.offspring, &self.mutation, rng)?;
        let offspring = pipeline.evaluate_births(births, iteration, &mut progress)?;

        let candidates = if self.config.plus_selection {
            let mut union = parents;
            union.extend(offspring);
            union
        } else {
            offspring
        };
        let order = QualityOrder(pipeline.problem());
        let survivors = truncate_by_layer(candidates, &order, self.config.parents);

        progress.advance();
        debug!(
            "es generation {}: {} parents from {} offspring",
            progress.n_of_iterations(),
            survivors.len(),
            self.config.offspring
        );
        Ok(PopulationState::new(
            progress,
            DagPartiallyOrderedCollection::new(survivors, &order),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::PartiallyOrderedCollection;
    use crate::random::create_rng;
    use crate::solver::{Identity, IterativeSolver, StopCondition};
    use crate::testing::{GaussianLike, RealFactory, Sphere};
    use rayon::ThreadPoolBuilder;

    type State = PopulationState<Vec<f64>, Vec<f64>, f64>;

    fn factory() -> RealFactory {
        RealFactory {
            dim: 4,
            lower: 0.0,
            upper: 1.0,
        }
    }

    fn best(state: &State) -> f64 {
        state
            .population()
            .all()
            .iter()
            .map(|i| *i.quality())
            .fold(f64::INFINITY, f64::min)
    }

    fn run(config: EsConfig, threads: usize, generations: u64) -> Vec<State> {
        let strategy = EvolutionStrategy::new(config, factory(), GaussianLike { step: 0.1 }).unwrap();
        let pool = ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
        let solver = IterativeSolver::new(strategy, Identity, StopCondition::iterations(generations));
        let mut rng = create_rng(21);
        let mut states = vec![solver.init(&Sphere, &mut rng, &pool).unwrap()];
        while !solver.terminate(states.last().unwrap()) {
            let state = states.last().unwrap().clone();
            states.push(solver.update(&Sphere, &mut rng, &pool, state).unwrap());
        }
        states
    }

    #[test]
    fn test_plus_selection_is_elitist() {
        let config = EsConfig::default()
            .with_parents(4)
            .with_offspring(12)
            .with_plus_selection(true);
        let states = run(config, 2, 25);
        for pair in states.windows(2) {
            assert!(best(&pair[1]) <= best(&pair[0]));
            assert_eq!(pair[1].population().len(), 4);
        }
        let last = states.last().unwrap();
        assert_eq!(last.progress().n_of_births(), 4 + 12 * 25);
        assert!(best(last) < best(&states[0]));
    }

    #[test]
    fn test_comma_selection_discards_parents() {
        let config = EsConfig::default().with_parents(3).with_offspring(9);
        let states = run(config, 2, 5);
        for pair in states.windows(2) {
            let next_iteration = pair[1].progress().n_of_iterations();
            assert!(pair[1]
                .population()
                .all()
                .iter()
                .all(|i| i.genotype_birth_iteration() == next_iteration));
            assert_eq!(pair[1].population().len(), 3);
        }
    }

    #[test]
    fn test_deterministic_across_pool_sizes() {
        let config = EsConfig::default().with_parents(5).with_offspring(20);
        let genotypes = |states: Vec<State>| {
            states
                .last()
                .unwrap()
                .population()
                .all()
                .iter()
                .map(|i| i.genotype().clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(
            genotypes(run(config.clone(), 1, 10)),
            genotypes(run(config, 8, 10))
        );
    }
}
