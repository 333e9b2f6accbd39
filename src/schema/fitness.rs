//! Fitness ledger produced by the race simulation.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Race result for one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessRecord {
    /// Finishing position, 1 is best; 0 is rejected when parsing.
    /// Unranked records are ignored by selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<NonZeroU32>,
    /// Population index of the evaluated chromosome.
    pub env_id: usize,
    /// Whether the tire crossed the finish line.
    #[serde(default)]
    pub finished: bool,
    /// Simulation step at which the finish line was crossed.
    #[serde(default)]
    pub finish_step: Option<u64>,
    /// Final travelled distance.
    #[serde(default)]
    pub distance: f64,
}

/// Unordered collection of fitness records for the current population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FitnessLedger {
    pub records: Vec<FitnessRecord>,
}

impl FitnessLedger {
    pub fn new(records: Vec<FitnessRecord>) -> Self {
        Self { records }
    }

    /// Records that carry a rank, in ledger order.
    pub fn ranked(&self) -> impl Iterator<Item = &FitnessRecord> {
        self.records.iter().filter(|r| r.rank.is_some())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
