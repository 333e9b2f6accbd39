//! Rank-based truncation selection of the two breeding parents.

use crate::schema::FitnessLedger;

/// One selected parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedParent {
    /// Population index of the parent.
    pub env_id: usize,
    /// Rank the parent achieved in the simulation.
    pub rank: u32,
}

/// The two best-ranked individuals of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentPair {
    pub first: SelectedParent,
    pub second: SelectedParent,
}

impl ParentPair {
    /// Population indices of both parents.
    pub fn indices(&self) -> (usize, usize) {
        (self.first.env_id, self.second.env_id)
    }
}

/// Selection errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Need at least 2 ranked results, found {ranked}")]
    InsufficientRankedResults { ranked: usize },
}

/// Pick the two lowest-ranked records of the ledger.
///
/// Records without a rank are ignored. Equal ranks keep ledger order.
pub fn select_parents(ledger: &FitnessLedger) -> Result<ParentPair, SelectionError> {
    let mut ranked: Vec<SelectedParent> = ledger
        .ranked()
        .filter_map(|r| {
            r.rank.map(|rank| SelectedParent {
                env_id: r.env_id,
                rank: rank.get(),
            })
        })
        .collect();

    if ranked.len() < 2 {
        return Err(SelectionError::InsufficientRankedResults {
            ranked: ranked.len(),
        });
    }

    // Stable, so ties resolve by ledger position.
    ranked.sort_by_key(|p| p.rank);

    Ok(ParentPair {
        first: ranked[0],
        second: ranked[1],
    })
}
