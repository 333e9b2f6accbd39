//! Tire Evolve - Generational genetic algorithm for tire geometry.
//!
//! This crate implements the optimizer stage of a design pipeline in which
//! tire geometries are synthesized, raced in a physics simulation, and bred
//! from the best finishers.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Chromosome, population, fitness ledger and configuration types
//! - `compute`: Selection, variation operators, persistence and the
//!   generation controller
//!
//! # Example
//!
//! ```rust,no_run
//! use tire_evolve::{
//!     compute::evolution::{ChromosomeRng, CycleStore, run_generation},
//!     schema::EvolutionConfig,
//! };
//!
//! let config = EvolutionConfig::default();
//! let store = CycleStore::new("cycle_updates");
//! let mut rng = ChromosomeRng::new(7);
//!
//! let outcome = run_generation(&store, &config, &mut rng)?;
//! for child in outcome.population.iter() {
//!     println!("{}", child);
//! }
//! # Ok::<(), tire_evolve::compute::evolution::GenerationError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{ChromosomeRng, CycleStore, GenerationError, run_generation};
pub use schema::{Chromosome, EvolutionConfig, FitnessLedger, Population};
