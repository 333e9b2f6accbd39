//! Persistence of the cycle artifacts shared with the other pipeline stages.
//!
//! A cycle directory holds three JSON files: the population store, the
//! fitness ledger and the generation counter. Every write goes through a
//! temporary sibling file that is renamed over the target.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schema::{
    ArtifactPaths, Chromosome, ChromosomeError, FitnessLedger, Population, PopulationError,
};

/// Persisted generation counter, stored as `{"generation": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCounter {
    #[serde(default)]
    pub generation: u64,
}

impl GenerationCounter {
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }

    /// The counter for the following generation, or `None` if it would overflow.
    pub fn next(self) -> Option<Self> {
        self.generation
            .checked_add(1)
            .map(|generation| Self { generation })
    }
}

/// Artifact persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Corrupt artifact {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid chromosome at index {index}: {source}")]
    InvalidChromosome {
        index: usize,
        source: ChromosomeError,
    },
    #[error("Invalid population: {0}")]
    Population(#[from] PopulationError),
}

/// The artifact files of one pipeline cycle directory.
#[derive(Debug, Clone)]
pub struct CycleStore {
    dir: PathBuf,
    paths: ArtifactPaths,
}

impl CycleStore {
    /// Open a cycle directory with the default artifact names.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_paths(dir, ArtifactPaths::default())
    }

    /// Open a cycle directory with custom artifact names.
    pub fn with_paths<P: AsRef<Path>>(dir: P, paths: ArtifactPaths) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            paths,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn population_path(&self) -> PathBuf {
        self.dir.join(&self.paths.population)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.join(&self.paths.ledger)
    }

    pub fn generation_path(&self) -> PathBuf {
        self.dir.join(&self.paths.generation)
    }

    /// Load and validate the population store.
    pub fn load_population(&self) -> Result<Population, StoreError> {
        let path = self.population_path();
        let rows: Vec<Vec<serde_json::Value>> = read_json(&path)?;

        let individuals = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                Chromosome::from_json_values(row)
                    .map_err(|source| StoreError::InvalidChromosome { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Population::new(individuals)?)
    }

    /// Replace the population store.
    pub fn save_population(&self, population: &Population) -> Result<(), StoreError> {
        write_json(&self.population_path(), population)
    }

    /// Load the fitness ledger written by the simulation stage.
    pub fn load_ledger(&self) -> Result<FitnessLedger, StoreError> {
        read_json(&self.ledger_path())
    }

    /// Load the generation counter. A missing file means generation 0.
    pub fn load_generation(&self) -> Result<GenerationCounter, StoreError> {
        let path = self.generation_path();
        match fs::read_to_string(&path) {
            Ok(content) => parse_json(&path, &content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No generation counter at {}, starting at 0", path.display());
                Ok(GenerationCounter::default())
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    pub fn save_generation(&self, counter: GenerationCounter) -> Result<(), StoreError> {
        write_json(&self.generation_path(), &counter)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(path, &content)
}

fn parse_json<T: for<'de> Deserialize<'de>>(path: &Path, content: &str) -> Result<T, StoreError> {
    serde_json::from_str(content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, json)
        .and_then(|()| fs::rename(&tmp, path))
        .map_err(|source| {
            // Best effort; the write or rename error is the one reported.
            let _ = fs::remove_file(&tmp);
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const POPULATION_JSON: &str = r#"[
        [20, 30, 6, 2, 1], [25, 35, 8, 3, 1.5], [22, 31, 7, 2.5, 1.2],
        [21, 32, 5, 2, 1], [24, 33, 9, 3, 1.1], [23, 34, 6, 2.2, 1.3],
        [26, 36, 10, 3.5, 1.4], [19, 29, 4, 1.8, 1], [27, 37, 11, 3.2, 1.6],
        [28, 38, 12, 4, 2]
    ]"#;

    #[test]
    fn test_population_roundtrip_keeps_integer_tread_count() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("chromosomes.json"), POPULATION_JSON).unwrap();
        let store = CycleStore::new(dir.path());

        let population = store.load_population().unwrap();
        assert_eq!(population.len(), 10);
        assert_eq!(population.get(1).unwrap().tread_count(), 8);

        store.save_population(&population).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.population_path()).unwrap()).unwrap();
        assert!(raw[0][2].is_u64());
        assert!(raw[0][0].is_f64());
        assert!(!dir.path().join("chromosomes.json.tmp").exists());
    }

    #[test]
    fn test_population_with_bad_chromosome() {
        let dir = tempdir().unwrap();
        let json = POPULATION_JSON.replace("[25, 35, 8, 3, 1.5]", "[25, 35, 8, 3]");
        fs::write(dir.path().join("chromosomes.json"), json).unwrap();

        let err = CycleStore::new(dir.path()).load_population().unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidChromosome {
                index: 1,
                source: ChromosomeError::WrongLength { .. }
            }
        ));
    }

    #[test]
    fn test_population_wrong_size() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("chromosomes.json"), "[[20, 30, 6, 2, 1]]").unwrap();

        let err = CycleStore::new(dir.path()).load_population().unwrap_err();
        assert!(matches!(err, StoreError::Population(_)));
    }

    #[test]
    fn test_missing_population_is_io_error() {
        let dir = tempdir().unwrap();
        let err = CycleStore::new(dir.path()).load_population().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_corrupt_ledger() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fitness_results.json"), "{ not json").unwrap();
        let err = CycleStore::new(dir.path()).load_ledger().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_rank_zero_ledger_is_corrupt() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("fitness_results.json"),
            r#"[{"rank": 0, "env_id": 3}, {"rank": 1, "env_id": 0}]"#,
        )
        .unwrap();
        let err = CycleStore::new(dir.path()).load_ledger().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_generation_defaults_to_zero() {
        let dir = tempdir().unwrap();
        let store = CycleStore::new(dir.path());
        assert_eq!(store.load_generation().unwrap(), GenerationCounter::new(0));
    }

    #[test]
    fn test_generation_without_key_defaults_to_zero() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("current_generation.json"), "{}").unwrap();
        let store = CycleStore::new(dir.path());
        assert_eq!(store.load_generation().unwrap().generation, 0);
    }

    #[test]
    fn test_generation_roundtrip() {
        let dir = tempdir().unwrap();
        let store = CycleStore::new(dir.path());
        store.save_generation(GenerationCounter::new(4)).unwrap();

        let raw = fs::read_to_string(store.generation_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"generation": 4}));
        assert_eq!(store.load_generation().unwrap().next().unwrap().generation, 5);
    }

    #[test]
    fn test_generation_next_overflows_to_none() {
        assert_eq!(GenerationCounter::new(u64::MAX - 1).next().unwrap().generation, u64::MAX);
        assert_eq!(GenerationCounter::new(u64::MAX).next(), None);
    }

    #[test]
    fn test_largest_tread_count_roundtrips() {
        let dir = tempdir().unwrap();
        let row = format!("[20, 30, {}, 2, 1]", u32::MAX);
        let json = format!("[{}]", vec![row; 10].join(", "));
        fs::write(dir.path().join("chromosomes.json"), json).unwrap();
        let store = CycleStore::new(dir.path());

        let population = store.load_population().unwrap();
        store.save_population(&population).unwrap();
        let back = store.load_population().unwrap();
        assert_eq!(population, back);
        assert_eq!(back.get(0).unwrap().tread_count(), u32::MAX);
    }

    #[test]
    fn test_oversized_tread_count_rejected_on_load() {
        let dir = tempdir().unwrap();
        let json = format!("[{}]", vec!["[20, 30, 1e25, 2, 1]"; 10].join(", "));
        fs::write(dir.path().join("chromosomes.json"), json).unwrap();

        let err = CycleStore::new(dir.path()).load_population().unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidChromosome {
                index: 0,
                source: ChromosomeError::TreadCountTooLarge { .. }
            }
        ));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        let target = dir.path().join("current_generation.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupied"), "x").unwrap();
        let store = CycleStore::new(dir.path());

        let err = store.save_generation(GenerationCounter::new(1)).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!dir.path().join("current_generation.json.tmp").exists());
    }
}
