use phf::{Map, phf_map};
use std::collections::HashMap;
use std::path::Path;

static BINOMIAL_NAMES: Map<&'static str, &'static str> = phf_map! {
    "yeast" => "Saccharomyces cerevisiae",
    "rat" => "Rattus norvegicus",
    "human" => "Homo sapiens",
    "mouse" => "Mus musculus",
};

/// Derives the species common name from an input file name: everything up to the first
/// underscore (`human_proteins.fasta` -> `human`). Names without an underscore are
/// returned whole.
pub fn common_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('_') {
        Some((prefix, rest)) if !prefix.is_empty() && !rest.is_empty() => prefix.to_string(),
        _ => file_name,
    }
}

/// Common-name to binomial-name lookup: built-in entries plus configured additions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesTable {
    extra: HashMap<String, String>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured entries take precedence over the built-in ones.
    pub fn with_entries(extra: HashMap<String, String>) -> Self {
        Self { extra }
    }

    /// The binomial name for a common name, or the common name itself when unknown.
    pub fn binomial<'a>(&'a self, common_name: &'a str) -> &'a str {
        self.extra
            .get(common_name)
            .map(String::as_str)
            .or_else(|| BINOMIAL_NAMES.get(common_name).copied())
            .unwrap_or(common_name)
    }
}
