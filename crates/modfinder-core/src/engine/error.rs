use super::config::ConfigError;
use crate::core::io::WriteError;
use crate::core::io::fasta::FastaError;
use crate::core::store::provider::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Observation store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to read FASTA input: {0}")]
    Fasta(#[from] FastaError),

    #[error("Failed to write annotation output: {0}")]
    Write(#[from] WriteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
