use super::provider::{DescriptionProvider, ObservationMap, ObservationProvider, StoreError};
use crate::core::models::modification::{ModificationTable, ModificationType};
use std::collections::HashMap;

type SparseObservations = HashMap<String, Vec<(usize, u32)>>;

/// Observation store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryObservationStore {
    observations: ModificationTable<SparseObservations>,
    descriptions: HashMap<String, String>,
}

impl MemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_observation(
        &mut self,
        accession: &str,
        modification: ModificationType,
        position: usize,
        count: u32,
    ) {
        self.observations[modification]
            .entry(accession.to_string())
            .or_default()
            .push((position, count));
    }

    pub fn insert_description(&mut self, accession: &str, description: &str) {
        self.descriptions
            .insert(accession.to_string(), description.to_string());
    }

    pub fn with_observation(
        mut self,
        accession: &str,
        modification: ModificationType,
        position: usize,
        count: u32,
    ) -> Self {
        self.insert_observation(accession, modification, position, count);
        self
    }

    pub fn with_description(mut self, accession: &str, description: &str) -> Self {
        self.insert_description(accession, description);
        self
    }

    /// Number of accessions with at least one row for the given type.
    pub fn accession_count(&self, modification: ModificationType) -> usize {
        self.observations[modification].len()
    }
}

impl ObservationProvider for MemoryObservationStore {
    fn lookup(
        &self,
        accession: &str,
        modification: ModificationType,
        length: usize,
    ) -> Result<ObservationMap, StoreError> {
        Ok(match self.observations[modification].get(accession) {
            Some(rows) => ObservationMap::from_observations(length, rows.iter().copied()),
            None => ObservationMap::zeroed(length),
        })
    }
}

impl DescriptionProvider for MemoryObservationStore {
    fn describe(&self, accession: &str) -> String {
        self.descriptions.get(accession).cloned().unwrap_or_default()
    }
}
