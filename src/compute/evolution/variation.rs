//! Variation operators: single-point crossover and relative Gaussian mutation.
//!
//! Every operator re-rounds the tread-count gene before returning, so no
//! floating-point drift survives from one operator into the next.

use rand::prelude::*;

use crate::schema::{
    Chromosome, GENE_COUNT, MAX_TREAD_COUNT, MIN_GENE_VALUE, MutationConfig, TREAD_COUNT_INDEX,
    coerce_integer_gene,
};

/// Random number generator wrapper for chromosome operations.
///
/// This is the only randomness source of a generational step.
pub struct ChromosomeRng {
    rng: StdRng,
}

impl ChromosomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Single-point crossover at a cut point drawn from `1..GENE_COUNT`.
    pub fn crossover(&mut self, p1: &Chromosome, p2: &Chromosome) -> Chromosome {
        let point = self.rng.gen_range(1..GENE_COUNT);
        crossover_at(p1, p2, point)
    }

    /// Mutate each gene independently with probability `config.rate`.
    ///
    /// Noise has standard deviation `config.std_scale * gene`, so every gene is
    /// perturbed relative to its own magnitude.
    pub fn mutate(&mut self, chromosome: &Chromosome, config: &MutationConfig) -> Chromosome {
        let mut genes = *chromosome.genes();

        for (index, gene) in genes.iter_mut().enumerate() {
            if self.rng.r#gen::<f64>() < config.rate {
                let z: f64 = self.rng.sample(rand_distr::StandardNormal);
                let noise = z * config.std_scale * *gene;
                *gene = perturb_gene(*gene, noise, index == TREAD_COUNT_INDEX);
            }
        }

        Chromosome::from_genes_unchecked(genes)
    }

    /// Produce one offspring: crossover, mutation, then a final coercion pass.
    pub fn breed_offspring(
        &mut self,
        p1: &Chromosome,
        p2: &Chromosome,
        config: &MutationConfig,
    ) -> Chromosome {
        let child = self.crossover(p1, p2);
        self.mutate(&child, config).coerce_integer_gene()
    }
}

/// Take genes `[0, point)` from `p1` and `[point, GENE_COUNT)` from `p2`.
///
/// `point` must lie in `1..GENE_COUNT`.
pub fn crossover_at(p1: &Chromosome, p2: &Chromosome, point: usize) -> Chromosome {
    debug_assert!((1..GENE_COUNT).contains(&point));

    let mut genes = [0.0; GENE_COUNT];
    genes[..point].copy_from_slice(&p1.genes()[..point]);
    genes[point..].copy_from_slice(&p2.genes()[point..]);

    Chromosome::from_genes_unchecked(coerce_integer_gene(genes))
}

/// Apply a noise draw to one gene, flooring at [`MIN_GENE_VALUE`] and rounding
/// the tread-count gene, which is also capped at [`MAX_TREAD_COUNT`].
pub fn perturb_gene(value: f64, noise: f64, is_tread_count: bool) -> f64 {
    let mutated = (value + noise).max(MIN_GENE_VALUE);
    if is_tread_count {
        mutated.round().min(MAX_TREAD_COUNT)
    } else {
        mutated
    }
}
