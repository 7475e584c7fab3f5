use crate::core::models::protein::ProteinRecord;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

const GENE_SYMBOL_FIELD: &str = "gene_symbol:";

static ENSEMBL_ACCESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ENS[A-Z]*\d+").expect("Ensembl accession pattern is valid"));

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Sequence data on line {line} appears before any '>' header")]
    SequenceBeforeHeader { line: usize },
    #[error("Header on line {line} has no accession")]
    EmptyHeader { line: usize },
}

/// Reads protein FASTA files into [`ProteinRecord`]s.
///
/// Ensembl headers (`>ENSP00000354587.3 pep ...`) are keyed by the unversioned stable id;
/// other headers by their first whitespace-delimited token. A repeated accession keeps
/// its first position and takes the last sequence.
pub struct FastaReader;

impl FastaReader {
    pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<ProteinRecord>, FastaError> {
        let mut proteins: IndexMap<String, ProteinRecord> = IndexMap::new();
        let mut current: Option<ProteinRecord> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('>') {
                if let Some(done) = current.take() {
                    proteins.insert(done.accession.clone(), done);
                }
                let (accession, description) = parse_header(header);
                if accession.is_empty() {
                    return Err(FastaError::EmptyHeader { line: line_num });
                }
                current = Some(ProteinRecord::new(accession, "").with_description(description));
            } else {
                let Some(protein) = current.as_mut() else {
                    return Err(FastaError::SequenceBeforeHeader { line: line_num });
                };
                protein
                    .sequence
                    .extend(line.chars().filter(|c| !c.is_whitespace()));
            }
        }
        if let Some(done) = current.take() {
            proteins.insert(done.accession.clone(), done);
        }

        Ok(proteins.into_values().collect())
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ProteinRecord>, FastaError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

fn parse_header(header: &str) -> (String, String) {
    let header = header.trim();
    let (first, rest) = header
        .split_once(char::is_whitespace)
        .map_or((header, ""), |(first, rest)| (first, rest.trim()));

    let accession = ENSEMBL_ACCESSION
        .find(first)
        .map_or(first, |m| m.as_str())
        .to_string();

    let description = rest
        .split_whitespace()
        .find_map(|field| field.strip_prefix(GENE_SYMBOL_FIELD))
        .unwrap_or(rest)
        .to_string();

    (accession, description)
}
