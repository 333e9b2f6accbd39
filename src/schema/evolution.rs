//! Evolution configuration for the generational step.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration and the step runs with the standard operator settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for one generational step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Mutation operator settings.
    #[serde(default)]
    pub mutation: MutationConfig,
    /// Artifact file names, relative to the cycle directory.
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Gaussian mutation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Probability that each gene is perturbed (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub rate: f64,
    /// Noise standard deviation as a fraction of the gene's current value.
    #[serde(default = "default_std_scale")]
    pub std_scale: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: default_mutation_rate(),
            std_scale: default_std_scale(),
        }
    }
}

fn default_mutation_rate() -> f64 {
    0.2
}
fn default_std_scale() -> f64 {
    0.15
}

/// File names of the persisted artifacts shared with the other pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Population store read by the geometry stage.
    #[serde(default = "default_population_file")]
    pub population: PathBuf,
    /// Ranked results written by the simulation stage.
    #[serde(default = "default_ledger_file")]
    pub ledger: PathBuf,
    /// Generation counter.
    #[serde(default = "default_generation_file")]
    pub generation: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            population: default_population_file(),
            ledger: default_ledger_file(),
            generation: default_generation_file(),
        }
    }
}

fn default_population_file() -> PathBuf {
    PathBuf::from("chromosomes.json")
}
fn default_ledger_file() -> PathBuf {
    PathBuf::from("fitness_results.json")
}
fn default_generation_file() -> PathBuf {
    PathBuf::from("current_generation.json")
}

// ============================================================================
// Validation
// ============================================================================

/// Evolution configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Mutation rate must be between 0 and 1, got {0}")]
    InvalidMutationRate(f64),
    #[error("Mutation std scale must be finite and non-negative, got {0}")]
    InvalidStdScale(f64),
    #[error("Artifact path for {0} is empty")]
    EmptyArtifactPath(&'static str),
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl MutationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.rate) {
            return Err(ConfigError::InvalidMutationRate(self.rate));
        }
        if !self.std_scale.is_finite() || self.std_scale < 0.0 {
            return Err(ConfigError::InvalidStdScale(self.std_scale));
        }
        Ok(())
    }
}

impl EvolutionConfig {
    /// Validate evolution configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mutation.validate()?;

        let paths = [
            (&self.artifacts.population, "population"),
            (&self.artifacts.ledger, "ledger"),
            (&self.artifacts.generation, "generation"),
        ];
        for (path, name) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyArtifactPath(name));
            }
        }

        Ok(())
    }

    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}
