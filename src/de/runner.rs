//! DE/rand/1/bin strategy.

use log::debug;
use rand::Rng;

use super::config::DeConfig;
use crate::error::{ConfigError, SolverError};
use crate::order::{DagPartiallyOrderedCollection, PartialComparison};
use crate::random::distinct_indices;
use crate::solver::{
    EvaluationPipeline, GenotypeFactory, Individual, Offspring, PopulationState, Problem,
    Progress, QualityOrder, SolutionMapper, Strategy,
};

/// Differential evolution on `Vec<f64>` genotypes.
///
/// The population keeps a fixed slot per vector: trial `i` only ever
/// competes with target `i`, and wins when it is `Before` or `Same`.
/// All vectors must share one dimension.
#[derive(Debug, Clone)]
pub struct DifferentialEvolution<F> {
    config: DeConfig,
    factory: F,
}

impl<F> DifferentialEvolution<F> {
    pub fn new(config: DeConfig, factory: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, factory })
    }

    pub fn config(&self) -> &DeConfig {
        &self.config
    }

    /// Builds the trial vector for target `i`.
    fn trial<S, Q, R: Rng>(
        &self,
        i: usize,
        targets: &[Individual<Vec<f64>, S, Q>],
        rng: &mut R,
    ) -> Offspring<Vec<f64>> {
        let picked = distinct_indices(targets.len(), 3, Some(i), rng);
        let (a, b, c) = (&targets[picked[0]], &targets[picked[1]], &targets[picked[2]]);
        let target = targets[i].genotype();
        let (xa, xb, xc) = (a.genotype(), b.genotype(), c.genotype());

        let dim = target.len();
        let j_rand = if dim > 0 { rng.random_range(0..dim) } else { 0 };
        let weight = self.config.differential_weight;
        let genes = (0..dim)
            .map(|j| {
                let gene = if j == j_rand
                    || rng.random_range(0.0..1.0) < self.config.crossover_probability
                {
                    xa[j] + weight * (xb[j] - xc[j])
                } else {
                    target[j]
                };
                match self.config.bounds {
                    Some((lower, upper)) => gene.clamp(lower, upper),
                    None => gene,
                }
            })
            .collect();

        Offspring::new(genes, vec![targets[i].id(), a.id(), b.id(), c.id()])
    }
}

impl<F, M, P> Strategy<M, P> for DifferentialEvolution<F>
where
    F: GenotypeFactory<Genotype = Vec<f64>>,
    M: SolutionMapper<Vec<f64>>,
    M::Solution: Send + Sync,
    P: Problem<M::Solution>,
{
    type State = PopulationState<Vec<f64>, M::Solution, P::Quality>;

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
        let targets = population.into_items();
        if targets.len() < 4 {
            return Err(ConfigError::PopulationTooSmall {
                min: 4,
                actual: targets.len(),
            }
            .into());
        }
        let expected = targets[0].genotype().len();
        if let Some(ragged) = targets.iter().find(|t| t.genotype().len() != expected) {
            return Err(SolverError::DimensionMismatch {
                expected,
                actual: ragged.genotype().len(),
            });
        }
        let iteration = progress.next_iteration();

        let trials: Vec<_> = (0..targets.len())
            .map(|i| self.trial(i, &targets, rng))
            .collect();
        let trials = pipeline.evaluate_births(trials, iteration, &mut progress)?;

        let problem = pipeline.problem();
        let mut replaced = 0usize;
        let next: Vec<_> = targets
            .into_iter()
            .zip(trials)
            .map(
                |(target, trial)| match problem.compare(trial.quality(), target.quality()) {
                    PartialComparison::Before | PartialComparison::Same => {
                        replaced += 1;
                        trial
                    }
                    PartialComparison::After | PartialComparison::NotComparable => target,
                },
            )
            .collect();

        progress.advance();
        debug!(
            "de generation {}: {replaced}/{} targets replaced",
            progress.n_of_iterations(),
            next.len()
        );
        Ok(PopulationState::new(
            progress,
            DagPartiallyOrderedCollection::new(next, &QualityOrder(problem)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::PartiallyOrderedCollection;
    use crate::random::create_rng;
    use crate::solver::{Identity, IterativeSolver, StopCondition};
    use crate::testing::{RealFactory, Sphere};
    use rayon::ThreadPoolBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Alternates between 3- and 2-dimensional vectors.
    struct RaggedFactory {
        built: AtomicUsize,
    }

    impl GenotypeFactory for RaggedFactory {
        type Genotype = Vec<f64>;

        fn build_one<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
            let dim = if self.built.fetch_add(1, Ordering::Relaxed) % 2 == 0 { 3 } else { 2 };
            (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect()
        }
    }

    type State = PopulationState<Vec<f64>, Vec<f64>, f64>;

    fn strategy() -> DifferentialEvolution<RealFactory> {
        DifferentialEvolution::new(
            DeConfig::default()
                .with_population_size(20)
                .with_crossover_probability(0.9)
                .with_bounds(-1.0, 1.0),
            RealFactory {
                dim: 5,
                lower: -1.0,
                upper: 1.0,
            },
        )
        .unwrap()
    }

    fn run(threads: usize, generations: u64) -> Vec<State> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
        let solver = IterativeSolver::new(strategy(), Identity, StopCondition::iterations(generations));
        let mut rng = create_rng(8);
        let mut states = vec![solver.init(&Sphere, &mut rng, &pool).unwrap()];
        while !solver.terminate(states.last().unwrap()) {
            let state = states.last().unwrap().clone();
            states.push(solver.update(&Sphere, &mut rng, &pool, state).unwrap());
        }
        states
    }

    fn qualities(state: &State) -> Vec<f64> {
        state.population().all().iter().map(|i| *i.quality()).collect()
    }

    #[test]
    fn test_rejects_small_population() {
        let result = DifferentialEvolution::new(
            DeConfig::default().with_population_size(3),
            RealFactory {
                dim: 2,
                lower: 0.0,
                upper: 1.0,
            },
        );
        assert!(matches!(result, Err(ConfigError::PopulationTooSmall { min: 4, .. })));
    }

    #[test]
    fn test_ragged_population_is_rejected() {
        let strategy = DifferentialEvolution::new(
            DeConfig::default().with_population_size(6),
            RaggedFactory {
                built: AtomicUsize::new(0),
            },
        )
        .unwrap();
        let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let solver = IterativeSolver::new(strategy, Identity, StopCondition::iterations(3));
        let mut rng = create_rng(2);
        let state: State = solver.init(&Sphere, &mut rng, &pool).unwrap();

        let err = solver.update(&Sphere, &mut rng, &pool, state).unwrap_err();
        assert!(matches!(
            err,
            SolverError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            "genotype dimensions differ: expected 3, got 2"
        );
    }

    #[test]
    fn test_slots_never_worsen_and_converge() {
        let states = run(4, 150);
        for pair in states.windows(2) {
            for (before, after) in qualities(&pair[0]).iter().zip(qualities(&pair[1])) {
                assert!(after <= *before);
            }
        }
        let last = states.last().unwrap();
        let best = qualities(last).into_iter().fold(f64::INFINITY, f64::min);
        assert!(best < 1e-2, "best sphere value {best}");
        assert_eq!(last.progress().n_of_births(), 20 * 151);
    }

    #[test]
    fn test_trials_stay_in_bounds() {
        let states = run(2, 20);
        for state in &states {
            for individual in state.population().all() {
                assert!(individual.genotype().iter().all(|g| (-1.0..=1.0).contains(g)));
            }
        }
    }

    #[test]
    fn test_trial_parents_are_target_and_donors() {
        let states = run(2, 10);
        for individual in states.last().unwrap().population().all() {
            let parents = individual.parent_ids().len();
            assert!(parents == 0 || parents == 4);
        }
    }

    #[test]
    fn test_deterministic_across_pool_sizes() {
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
        assert_eq!(genotypes(run(1, 30)), genotypes(run(8, 30)));
    }
}
