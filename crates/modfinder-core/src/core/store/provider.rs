use crate::core::models::modification::{
    ModificationTable, ModificationType, UnknownModificationType,
};
use std::path::PathBuf;
use thiserror::Error;

/// Observation counts for every position `1..=length` of one protein and one
/// modification type. Positions never reported by the store hold zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationMap {
    counts: Vec<u32>,
}

impl ObservationMap {
    pub fn zeroed(length: usize) -> Self {
        Self {
            counts: vec![0; length],
        }
    }

    /// Builds a map covering `1..=length` from sparse `(position, count)` pairs.
    /// Pairs outside the range are dropped; a repeated position keeps the last count.
    pub fn from_observations(
        length: usize,
        observations: impl IntoIterator<Item = (usize, u32)>,
    ) -> Self {
        let mut map = Self::zeroed(length);
        for (position, count) in observations {
            if let Some(slot) = position
                .checked_sub(1)
                .and_then(|i| map.counts.get_mut(i))
            {
                *slot = count;
            }
        }
        map
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count at a 1-based position, `None` outside `1..=len`.
    pub fn get(&self, position: usize) -> Option<u32> {
        position
            .checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
    }

    /// `(position, count)` pairs in ascending position order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().enumerate().map(|(i, &c)| (i + 1, c))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not connect to observation store at '{path}': {reason}", path = path.display())]
    Connection { path: PathBuf, reason: String },

    #[error("I/O error reading '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed observation table '{path}': {source}", path = path.display())]
    Table { path: PathBuf, source: ::csv::Error },

    #[error(transparent)]
    UnknownModificationType(#[from] UnknownModificationType),
}

/// Source of per-residue observation counts.
pub trait ObservationProvider {
    /// Returns a map covering `1..=length`. Unknown accessions yield an all-zero map;
    /// only connection-level failures are errors.
    fn lookup(
        &self,
        accession: &str,
        modification: ModificationType,
        length: usize,
    ) -> Result<ObservationMap, StoreError>;
}

/// Source of free-text protein descriptions.
pub trait DescriptionProvider {
    /// Returns an empty string when the accession has no description.
    fn describe(&self, accession: &str) -> String;
}

/// Looks up all modification types for one protein.
pub fn lookup_all<P: ObservationProvider + ?Sized>(
    provider: &P,
    accession: &str,
    length: usize,
) -> Result<ModificationTable<ObservationMap>, StoreError> {
    ModificationTable::try_from_fn(|modification| provider.lookup(accession, modification, length))
}
