//! Generation controller: one full generational step.
//!
//! [`advance_generation`] is the pure step over in-memory artifacts;
//! [`run_generation`] loads them from a [`CycleStore`], advances, and
//! writes the results back. Nothing is written unless all offspring were
//! produced.

use crate::schema::{
    Chromosome, ConfigError, EvolutionConfig, FitnessLedger, MutationConfig, POPULATION_SIZE,
    Population, PopulationError,
};

use super::selection::{ParentPair, SelectionError, select_parents};
use super::store::{CycleStore, GenerationCounter, StoreError};
use super::variation::ChromosomeRng;

/// Result of a generational step.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The offspring population replacing the evaluated one.
    pub population: Population,
    /// Counter after the step.
    pub generation: GenerationCounter,
    /// Parents the offspring were bred from.
    pub parents: ParentPair,
}

/// Generational step errors. All are fatal to the current step.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Parent env_id {env_id} is outside the population of {population_size}")]
    IndexOutOfRange {
        env_id: usize,
        population_size: usize,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Population(#[from] PopulationError),
    #[error("Generation counter {generation} cannot be advanced")]
    CounterOverflow { generation: u64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn resolve_parent(population: &Population, env_id: usize) -> Result<&Chromosome, GenerationError> {
    population
        .get(env_id)
        .ok_or(GenerationError::IndexOutOfRange {
            env_id,
            population_size: population.len(),
        })
}

/// Breed the next population from the two best-ranked individuals.
pub fn advance_generation(
    population: &Population,
    ledger: &FitnessLedger,
    prior: GenerationCounter,
    mutation: &MutationConfig,
    rng: &mut ChromosomeRng,
) -> Result<GenerationOutcome, GenerationError> {
    let generation = prior
        .next()
        .ok_or(GenerationError::CounterOverflow {
            generation: prior.generation,
        })?;

    let parents = select_parents(ledger)?;
    let parent1 = resolve_parent(population, parents.first.env_id)?;
    let parent2 = resolve_parent(population, parents.second.env_id)?;

    log::info!(
        "Parent 1: env_id {} (rank {}) {}",
        parents.first.env_id,
        parents.first.rank,
        parent1
    );
    log::info!(
        "Parent 2: env_id {} (rank {}) {}",
        parents.second.env_id,
        parents.second.rank,
        parent2
    );

    let offspring: Vec<Chromosome> = (0..POPULATION_SIZE)
        .map(|_| rng.breed_offspring(parent1, parent2, mutation))
        .collect();

    for (i, child) in offspring.iter().enumerate() {
        log::debug!("Offspring {}: {}", i, child);
    }

    Ok(GenerationOutcome {
        population: Population::new(offspring)?,
        generation,
        parents,
    })
}

/// Run one generational step against the artifacts in `store`.
///
/// The population is written before the counter, so an interrupted step
/// never advances the counter past the population it describes.
pub fn run_generation(
    store: &CycleStore,
    config: &EvolutionConfig,
    rng: &mut ChromosomeRng,
) -> Result<GenerationOutcome, GenerationError> {
    config.validate()?;

    let ledger = store.load_ledger()?;
    log::info!("Loaded {} fitness results", ledger.len());

    let population = store.load_population()?;
    let prior = store.load_generation()?;

    let outcome = advance_generation(&population, &ledger, prior, &config.mutation, rng)?;

    store.save_population(&outcome.population)?;
    log::info!(
        "Updated {} with {} new offspring",
        store.population_path().display(),
        outcome.population.len()
    );

    store.save_generation(outcome.generation)?;
    log::info!(
        "Updated generation: {} -> {}",
        prior.generation,
        outcome.generation.generation
    );

    Ok(outcome)
}
