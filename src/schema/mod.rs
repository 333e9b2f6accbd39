//! Schema module - Chromosome, population, fitness and configuration types.

mod chromosome;
mod evolution;
mod fitness;
mod population;

pub use chromosome::*;
pub use evolution::*;
pub use fitness::*;
pub use population::*;
