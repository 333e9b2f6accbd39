//! Fixed-size population of chromosomes.

use serde::Serialize;

use super::Chromosome;

/// Number of individuals in every generation.
pub const POPULATION_SIZE: usize = 10;

/// An ordered population. The position of each chromosome is its
/// environment id in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Population {
    individuals: Vec<Chromosome>,
}

impl Population {
    /// Create a population, requiring exactly [`POPULATION_SIZE`] individuals.
    pub fn new(individuals: Vec<Chromosome>) -> Result<Self, PopulationError> {
        if individuals.len() != POPULATION_SIZE {
            return Err(PopulationError::WrongSize {
                expected: POPULATION_SIZE,
                actual: individuals.len(),
            });
        }
        Ok(Self { individuals })
    }

    /// Look up an individual by environment id.
    pub fn get(&self, env_id: usize) -> Option<&Chromosome> {
        self.individuals.get(env_id)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.individuals.iter()
    }

    pub fn as_slice(&self) -> &[Chromosome] {
        &self.individuals
    }
}

/// Population construction errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PopulationError {
    #[error("Population must contain {expected} chromosomes, got {actual}")]
    WrongSize { expected: usize, actual: usize },
}
