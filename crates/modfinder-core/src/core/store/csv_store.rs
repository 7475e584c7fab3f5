use super::memory::MemoryObservationStore;
use super::provider::{DescriptionProvider, ObservationMap, ObservationProvider, StoreError};
use crate::core::models::modification::ModificationType;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const TABLE_EXTENSION: &str = "csv";
const DESCRIPTIONS_STEM: &str = "descriptions";

#[derive(Debug, Deserialize)]
struct ObservationRow {
    accession: String,
    position: usize,
    frequency: u32,
}

#[derive(Debug, Deserialize)]
struct DescriptionRow {
    accession: String,
    description: String,
}

/// Observation store backed by a directory of CSV tables.
///
/// Each modification type lives in `<tag>.csv` (`acetyl.csv`, `phosphoryl.csv`,
/// `dimethyl.csv`, `GGyl.csv`, `hydroxyl.csv`) with the header
/// `accession,position,frequency`. An optional `descriptions.csv` with the header
/// `accession,description` supplies protein descriptions. Any other `.csv` file is
/// treated as a table for an unrecognized modification type and rejected.
#[derive(Debug, Clone)]
pub struct CsvObservationStore {
    root: PathBuf,
    inner: MemoryObservationStore,
}

impl CsvObservationStore {
    pub fn connect(root: &Path) -> Result<Self, StoreError> {
        if !root.is_dir() {
            return Err(StoreError::Connection {
                path: root.to_path_buf(),
                reason: "store directory does not exist".to_string(),
            });
        }
        let entries = fs::read_dir(root).map_err(|e| StoreError::Connection {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut tables = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| StoreError::Io {
                    path: root.to_path_buf(),
                    source: e,
                })?
                .path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(TABLE_EXTENSION)
            {
                tables.push(path);
            }
        }
        tables.sort();

        let mut inner = MemoryObservationStore::new();
        let mut loaded = BTreeSet::new();
        for path in &tables {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if stem == DESCRIPTIONS_STEM {
                load_descriptions(path, &mut inner)?;
                continue;
            }
            let modification: ModificationType = stem.parse()?;
            let rows = load_observations(path, modification, &mut inner)?;
            debug!("Loaded {} '{}' rows from {:?}", rows, modification, path);
            loaded.insert(modification);
        }

        for modification in ModificationType::ALL {
            if !loaded.contains(&modification) {
                warn!(
                    "No '{}' table in observation store {:?}; treating it as empty.",
                    modification, root
                );
            }
        }
        info!(
            "Connected to observation store {:?} ({} table(s)).",
            root,
            loaded.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            inner,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(root: &Path, modification: ModificationType) -> PathBuf {
        root.join(format!("{}.{}", modification.tag(), TABLE_EXTENSION))
    }
}

fn open_table(path: &Path) -> Result<csv::Reader<fs::File>, StoreError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| StoreError::Table {
            path: path.to_path_buf(),
            source: e,
        })
}

fn load_observations(
    path: &Path,
    modification: ModificationType,
    store: &mut MemoryObservationStore,
) -> Result<usize, StoreError> {
    let mut reader = open_table(path)?;
    let mut rows = 0;
    for record in reader.deserialize::<ObservationRow>() {
        let row = record.map_err(|e| StoreError::Table {
            path: path.to_path_buf(),
            source: e,
        })?;
        store.insert_observation(&row.accession, modification, row.position, row.frequency);
        rows += 1;
    }
    Ok(rows)
}

fn load_descriptions(path: &Path, store: &mut MemoryObservationStore) -> Result<(), StoreError> {
    let mut reader = open_table(path)?;
    for record in reader.deserialize::<DescriptionRow>() {
        let row = record.map_err(|e| StoreError::Table {
            path: path.to_path_buf(),
            source: e,
        })?;
        store.insert_description(&row.accession, &row.description);
    }
    Ok(())
}

impl ObservationProvider for CsvObservationStore {
    fn lookup(
        &self,
        accession: &str,
        modification: ModificationType,
        length: usize,
    ) -> Result<ObservationMap, StoreError> {
        self.inner.lookup(accession, modification, length)
    }
}

impl DescriptionProvider for CsvObservationStore {
    fn describe(&self, accession: &str) -> String {
        self.inner.describe(accession)
    }
}
