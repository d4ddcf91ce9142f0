//! Criterion benchmarks for u-evolve.
//!
//! Uses synthetic problems (OneMax, Sphere, ZDT1) to measure engine overhead
//! independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rayon::{ThreadPool, ThreadPoolBuilder};
use u_evolve::error::BoxError;
use u_evolve::ga::{Ga, GaConfig};
use u_evolve::mapelites::{Descriptor, MapElites, MapElitesConfig, MapElitesState};
use u_evolve::nsga2::{non_dominated_sort, Nsga2, Nsga2Config};
use u_evolve::order::{Direction, ParetoComparator, PartialComparator, PartialComparison};
use u_evolve::random::create_rng;
use u_evolve::solver::{
    Crossover, GenotypeFactory, Identity, Individual, IterativeSolver, Mutation, PopulationState,
    Problem, StopCondition,
};

type BitState = PopulationState<Vec<bool>, Vec<bool>, f64>;
type FrontState = PopulationState<Vec<f64>, Vec<f64>, Vec<f64>>;
type GridState = MapElitesState<Vec<f64>, Vec<f64>, f64>;

// ===========================================================================
// OneMax: maximize the number of true bits
// ===========================================================================

struct OneMax;

impl Problem<Vec<bool>> for OneMax {
    type Quality = f64;

    fn quality(&self, bits: &Vec<bool>) -> Result<f64, BoxError> {
        Ok(bits.iter().filter(|&&b| b).count() as f64)
    }

    fn compare(&self, a: &f64, b: &f64) -> PartialComparison {
        Direction::Maximize.compare(*a, *b)
    }
}

struct Bits(usize);

impl GenotypeFactory for Bits {
    type Genotype = Vec<bool>;

    fn build_one<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
        (0..self.0).map(|_| rng.random_bool(0.5)).collect()
    }
}

struct BitFlip;

impl Mutation<Vec<bool>> for BitFlip {
    fn mutate<R: Rng>(&self, parent: &Vec<bool>, rng: &mut R) -> Vec<bool> {
        let mut child = parent.clone();
        let i = rng.random_range(0..child.len());
        child[i] = !child[i];
        child
    }
}

struct OnePoint;

impl<T: Clone + Send + Sync> Crossover<Vec<T>> for OnePoint {
    fn recombine<R: Rng>(&self, parents: &[&Vec<T>], rng: &mut R) -> Vec<Vec<T>> {
        let point = rng.random_range(0..parents[0].len());
        let mut child = parents[0].clone();
        child[point..].clone_from_slice(&parents[1][point..]);
        vec![child]
    }
}

// ===========================================================================
// Real-valued problems on [0, 1]^d
// ===========================================================================

struct Reals(usize);

impl GenotypeFactory for Reals {
    type Genotype = Vec<f64>;

    fn build_one<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.0).map(|_| rng.random_range(0.0..1.0)).collect()
    }
}

struct Perturb;

impl Mutation<Vec<f64>> for Perturb {
    fn mutate<R: Rng>(&self, parent: &Vec<f64>, rng: &mut R) -> Vec<f64> {
        let mut child = parent.clone();
        let i = rng.random_range(0..child.len());
        child[i] = (child[i] + rng.random_range(-0.1..0.1)).clamp(0.0, 1.0);
        child
    }
}

struct Sphere;

impl Problem<Vec<f64>> for Sphere {
    type Quality = f64;

    fn quality(&self, x: &Vec<f64>) -> Result<f64, BoxError> {
        Ok(x.iter().map(|v| (v - 0.5) * (v - 0.5)).sum())
    }

    fn compare(&self, a: &f64, b: &f64) -> PartialComparison {
        Direction::Minimize.compare(*a, *b)
    }
}

struct Zdt1(ParetoComparator);

impl Problem<Vec<f64>> for Zdt1 {
    type Quality = Vec<f64>;

    fn quality(&self, x: &Vec<f64>) -> Result<Vec<f64>, BoxError> {
        let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
        Ok(vec![x[0], g * (1.0 - (x[0] / g).sqrt())])
    }

    fn compare(&self, a: &Vec<f64>, b: &Vec<f64>) -> PartialComparison {
        self.0.compare(a, b)
    }
}

fn pool() -> ThreadPool {
    ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("thread pool")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_onemax");
    group.sample_size(10);
    let pool = pool();

    for (len, pop, gen) in [(32usize, 50usize, 50u64), (128, 100, 30)] {
        let solver = IterativeSolver::new(
            Ga::new(
                GaConfig::default().with_population_size(pop),
                Bits(len),
                OnePoint,
                BitFlip,
            )
            .expect("valid config"),
            Identity,
            StopCondition::<BitState>::iterations(gen),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", len, pop, gen), len),
            &solver,
            |b, s| b.iter(|| black_box(s.solve(&OneMax, &mut create_rng(42), &pool))),
        );
    }
    group.finish();
}

fn bench_nsga2_zdt1(c: &mut Criterion) {
    let mut group = c.benchmark_group("nsga2_zdt1");
    group.sample_size(10);
    let pool = pool();
    let problem = Zdt1(ParetoComparator::minimizing(2));

    for &pop in &[40usize, 100] {
        let solver = IterativeSolver::new(
            Nsga2::new(
                Nsga2Config::default().with_population_size(pop),
                Reals(10),
                OnePoint,
                Perturb,
            )
            .expect("valid config"),
            Identity,
            StopCondition::<FrontState>::iterations(30),
        );
        group.bench_with_input(BenchmarkId::from_parameter(pop), &solver, |b, s| {
            b.iter(|| black_box(s.solve(&problem, &mut create_rng(42), &pool)))
        });
    }
    group.finish();
}

fn bench_mapelites_sphere(c: &mut Criterion) {
    type Ind = Individual<Vec<f64>, Vec<f64>, f64>;

    let mut group = c.benchmark_group("mapelites_sphere");
    group.sample_size(10);
    let pool = pool();

    for &bins in &[10usize, 30] {
        let descriptors = (0..2)
            .map(|k| Descriptor::new(move |i: &Ind| i.solution()[k], 0.0, 1.0, bins))
            .collect();
        let solver = IterativeSolver::new(
            MapElites::new(MapElitesConfig::default(), Reals(4), Perturb, descriptors)
                .expect("valid config"),
            Identity,
            StopCondition::<GridState>::iterations(50),
        );
        group.bench_with_input(BenchmarkId::from_parameter(bins), &solver, |b, s| {
            b.iter(|| black_box(s.solve(&Sphere, &mut create_rng(42), &pool)))
        });
    }
    group.finish();
}

fn bench_non_dominated_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_dominated_sort");
    let cmp = ParetoComparator::minimizing(3);

    for &n in &[100usize, 500] {
        let mut rng = create_rng(7);
        let points: Vec<Vec<f64>> = (0..n)
            .map(|_| (0..3).map(|_| rng.random_range(0.0..1.0)).collect())
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, p| {
            b.iter(|| black_box(non_dominated_sort(black_box(p), &cmp)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_ga_onemax,
    bench_nsga2_zdt1,
    bench_mapelites_sphere,
    bench_non_dominated_sort
);
criterion_main!(benches);
