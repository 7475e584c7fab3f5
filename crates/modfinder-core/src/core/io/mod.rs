//! Reading protein sequences and writing the two per-species annotation files.
//!
//! - [`fasta`] - Accession/sequence records from a FASTA file
//! - [`summary`] - The XML-like summary file (`<species>_mod.xml`)
//! - [`detail`] - The JSON-lines detail file (`<species>_mod.json`)

pub mod detail;
pub mod fasta;
pub mod summary;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
