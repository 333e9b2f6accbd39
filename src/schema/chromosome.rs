//! Tire chromosome: a fixed-length gene vector with one integer-typed gene.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// Number of genes in a chromosome.
pub const GENE_COUNT: usize = 5;

/// Position of the tread-count gene, the only integer-valued gene.
pub const TREAD_COUNT_INDEX: usize = 2;

/// Lower bound enforced on every gene after mutation.
pub const MIN_GENE_VALUE: f64 = 1.0;

/// Largest tread count that can be stored and written to the population store.
pub const MAX_TREAD_COUNT: f64 = u32::MAX as f64;

/// Gene names in chromosome order, used for diagnostics.
pub const GENE_NAMES: [&str; GENE_COUNT] = [
    "outer_radius",
    "axial_width",
    "tread_count",
    "tread_width",
    "tread_depth",
];

fn gene_name(index: &usize) -> &'static str {
    GENE_NAMES.get(*index).copied().unwrap_or("extra")
}

/// Round the tread-count gene to the nearest whole number.
///
/// Halfway values round away from zero, so `6.5` becomes `7`.
pub fn coerce_integer_gene(mut genes: [f64; GENE_COUNT]) -> [f64; GENE_COUNT] {
    genes[TREAD_COUNT_INDEX] = genes[TREAD_COUNT_INDEX].round();
    genes
}

/// A validated tire parameter vector.
///
/// Genes are ordered `[outer_radius, axial_width, tread_count, tread_width,
/// tread_depth]`. The tread count is stored as `f64` but always holds a whole
/// number of at least 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromosome {
    genes: [f64; GENE_COUNT],
}

impl Chromosome {
    /// Validate a raw gene vector and coerce its tread-count gene.
    pub fn validate(genes: &[f64]) -> Result<Self, ChromosomeError> {
        let genes: [f64; GENE_COUNT] =
            genes.try_into().map_err(|_| ChromosomeError::WrongLength {
                expected: GENE_COUNT,
                actual: genes.len(),
            })?;

        for (index, &value) in genes.iter().enumerate() {
            if !value.is_finite() {
                return Err(ChromosomeError::NonFinite { index });
            }
        }

        let genes = coerce_integer_gene(genes);
        let tread_count = genes[TREAD_COUNT_INDEX];
        if tread_count < 1.0 {
            return Err(ChromosomeError::DegenerateTreadCount { value: tread_count });
        }
        if tread_count > MAX_TREAD_COUNT {
            return Err(ChromosomeError::TreadCountTooLarge { value: tread_count });
        }

        for (index, &value) in genes.iter().enumerate() {
            if value <= 0.0 {
                return Err(ChromosomeError::NonPositive { index, value });
            }
        }

        Ok(Self { genes })
    }

    /// Validate a gene vector read from JSON, rejecting non-numeric entries.
    pub fn from_json_values(values: &[serde_json::Value]) -> Result<Self, ChromosomeError> {
        let genes = values
            .iter()
            .enumerate()
            .map(|(index, v)| v.as_f64().ok_or(ChromosomeError::NonNumeric { index }))
            .collect::<Result<Vec<f64>, _>>()?;
        Self::validate(&genes)
    }

    /// Build from genes already known to satisfy the invariants.
    pub(crate) fn from_genes_unchecked(genes: [f64; GENE_COUNT]) -> Self {
        Self { genes }
    }

    /// Re-apply integer coercion to the tread-count gene.
    pub fn coerce_integer_gene(self) -> Self {
        Self {
            genes: coerce_integer_gene(self.genes),
        }
    }

    pub fn genes(&self) -> &[f64; GENE_COUNT] {
        &self.genes
    }

    pub fn outer_radius(&self) -> f64 {
        self.genes[0]
    }

    pub fn axial_width(&self) -> f64 {
        self.genes[1]
    }

    /// Number of repeated tread features.
    pub fn tread_count(&self) -> u32 {
        self.genes[TREAD_COUNT_INDEX] as u32
    }

    pub fn tread_width(&self) -> f64 {
        self.genes[3]
    }

    pub fn tread_depth(&self) -> f64 {
        self.genes[4]
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}, {}, {:.3}, {:.3}]",
            self.outer_radius(),
            self.axial_width(),
            self.tread_count(),
            self.tread_width(),
            self.tread_depth()
        )
    }
}

// The geometry collaborator loops over the tread count, so it is written as
// a JSON integer rather than a float.
impl Serialize for Chromosome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(GENE_COUNT)?;
        for (index, value) in self.genes.iter().enumerate() {
            if index == TREAD_COUNT_INDEX {
                tuple.serialize_element(&(*value as u32))?;
            } else {
                tuple.serialize_element(value)?;
            }
        }
        tuple.end()
    }
}

/// Chromosome validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChromosomeError {
    #[error("Chromosome must have {expected} genes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Gene {index} ({}) is not a number", gene_name(.index))]
    NonNumeric { index: usize },
    #[error("Gene {index} ({}) is not finite", gene_name(.index))]
    NonFinite { index: usize },
    #[error("Gene {index} ({}) must be positive, got {value}", gene_name(.index))]
    NonPositive { index: usize, value: f64 },
    #[error("Tread count must round to at least 1, got {value}")]
    DegenerateTreadCount { value: f64 },
    #[error("Tread count must be at most {}, got {value}", u32::MAX)]
    TreadCountTooLarge { value: f64 },
}
