//! Compute module - Evolutionary operators and the generational step.

pub mod evolution;
