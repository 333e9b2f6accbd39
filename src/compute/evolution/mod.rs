//! Generational genetic algorithm for tire geometry optimization.
//!
//! One call to [`run_generation`] performs a full step of the race
//! pipeline's optimizer:
//!
//! - **Selection** (`selection`): the two best-ranked tires become parents
//! - **Variation** (`variation`): single-point crossover and relative
//!   Gaussian mutation, with the tread count kept integral
//! - **Generation** (`generation`): breeds ten offspring and advances the
//!   generation counter
//! - **Store** (`store`): the JSON artifacts shared with the geometry and
//!   simulation stages
//!
//! # Example
//!
//! ```rust,no_run
//! use tire_evolve::compute::evolution::{ChromosomeRng, CycleStore, run_generation};
//! use tire_evolve::schema::EvolutionConfig;
//!
//! let config = EvolutionConfig::default();
//! let store = CycleStore::with_paths("cycle_updates", config.artifacts.clone());
//! let mut rng = ChromosomeRng::new(42);
//!
//! let outcome = run_generation(&store, &config, &mut rng)?;
//! println!("Now at generation {}", outcome.generation.generation);
//! # Ok::<(), tire_evolve::compute::evolution::GenerationError>(())
//! ```

mod generation;
mod selection;
mod store;
mod variation;

pub use generation::{GenerationError, GenerationOutcome, advance_generation, run_generation};
pub use selection::{ParentPair, SelectedParent, SelectionError, select_parents};
pub use store::{CycleStore, GenerationCounter, StoreError};
pub use variation::{ChromosomeRng, crossover_at, perturb_gene};
