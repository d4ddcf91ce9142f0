//! Shared fixtures for unit tests.

use rand::Rng;

use crate::error::BoxError;
use crate::order::{Direction, ParetoComparator, PartialComparator, PartialComparison};
use crate::solver::{Crossover, GenotypeFactory, Mutation, Problem};

/// OneMax: maximize the number of true bits.
pub struct OneMax;

impl Problem<Vec<bool>> for OneMax {
    type Quality = f64;

    fn quality(&self, bits: &Vec<bool>) -> Result<f64, BoxError> {
        Ok(bits.iter().filter(|&&b| b).count() as f64)
    }

    fn compare(&self, a: &f64, b: &f64) -> PartialComparison {
        Direction::Maximize.compare(*a, *b)
    }
}

/// OneMax whose quality function fails on genotypes with `poison` true bits.
pub struct FailingProblem {
    pub poison: usize,
}

impl Problem<Vec<bool>> for FailingProblem {
    type Quality = f64;

    fn quality(&self, bits: &Vec<bool>) -> Result<f64, BoxError> {
        let ones = bits.iter().filter(|&&b| b).count();
        if ones == self.poison {
            return Err(format!("refusing to score {ones} ones").into());
        }
        Ok(ones as f64)
    }

    fn compare(&self, a: &f64, b: &f64) -> PartialComparison {
        Direction::Maximize.compare(*a, *b)
    }
}

/// Random bit strings of a fixed length.
pub struct BitFactory {
    pub len: usize,
}

impl GenotypeFactory for BitFactory {
    type Genotype = Vec<bool>;

    fn build_one<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
        (0..self.len).map(|_| rng.random_bool(0.5)).collect()
    }
}

/// Flips one random bit.
pub struct BitFlip;

impl Mutation<Vec<bool>> for BitFlip {
    fn mutate<R: Rng>(&self, parent: &Vec<bool>, rng: &mut R) -> Vec<bool> {
        let mut child = parent.clone();
        let idx = rng.random_range(0..child.len());
        child[idx] = !child[idx];
        child
    }
}

/// Single-point crossover producing two children.
pub struct OnePoint;

impl Crossover<Vec<bool>> for OnePoint {
    fn recombine<R: Rng>(&self, parents: &[&Vec<bool>], rng: &mut R) -> Vec<Vec<bool>> {
        let (p1, p2) = (parents[0], parents[1]);
        let point = rng.random_range(0..p1.len());
        let mut c1 = p1[..point].to_vec();
        c1.extend_from_slice(&p2[point..]);
        let mut c2 = p2[..point].to_vec();
        c2.extend_from_slice(&p1[point..]);
        vec![c1, c2]
    }
}

/// Real vectors uniform in `[lower, upper]`.
pub struct RealFactory {
    pub dim: usize,
    pub lower: f64,
    pub upper: f64,
}

impl GenotypeFactory for RealFactory {
    type Genotype = Vec<f64>;

    fn build_one<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dim)
            .map(|_| rng.random_range(self.lower..=self.upper))
            .collect()
    }
}

/// Perturbs one gene, clamping to `[0, 1]`.
pub struct GaussianLike {
    pub step: f64,
}

impl Mutation<Vec<f64>> for GaussianLike {
    fn mutate<R: Rng>(&self, parent: &Vec<f64>, rng: &mut R) -> Vec<f64> {
        let mut child = parent.clone();
        let idx = rng.random_range(0..child.len());
        child[idx] = (child[idx] + rng.random_range(-self.step..=self.step)).clamp(0.0, 1.0);
        child
    }
}

/// Arithmetic crossover producing one child.
pub struct Blend;

impl Crossover<Vec<f64>> for Blend {
    fn recombine<R: Rng>(&self, parents: &[&Vec<f64>], rng: &mut R) -> Vec<Vec<f64>> {
        let w: f64 = rng.random_range(0.0..=1.0);
        vec![parents[0]
            .iter()
            .zip(parents[1].iter())
            .map(|(a, b)| w * a + (1.0 - w) * b)
            .collect()]
    }
}

/// Minimize the squared distance to the origin.
pub struct Sphere;

impl Problem<Vec<f64>> for Sphere {
    type Quality = f64;

    fn quality(&self, x: &Vec<f64>) -> Result<f64, BoxError> {
        Ok(x.iter().map(|v| v * v).sum())
    }

    fn compare(&self, a: &f64, b: &f64) -> PartialComparison {
        Direction::Minimize.compare(*a, *b)
    }
}

/// Two-objective ZDT1 on genes in `[0, 1]`, both minimized.
pub struct Zdt1 {
    pareto: ParetoComparator,
}

impl Zdt1 {
    pub fn new() -> Self {
        Self {
            pareto: ParetoComparator::minimizing(2),
        }
    }
}

impl Problem<Vec<f64>> for Zdt1 {
    type Quality = Vec<f64>;

    fn quality(&self, x: &Vec<f64>) -> Result<Vec<f64>, BoxError> {
        let n = x.len() as f64;
        let f1 = x[0];
        let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (n - 1.0);
        let f2 = g * (1.0 - (f1 / g).sqrt());
        Ok(vec![f1, f2])
    }

    fn compare(&self, a: &Vec<f64>, b: &Vec<f64>) -> PartialComparison {
        self.pareto.compare(a, b)
    }
}
