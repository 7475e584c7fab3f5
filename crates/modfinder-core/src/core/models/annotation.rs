use super::evidence::EvidenceEntry;
use serde::Serialize;

/// One `<protein>` element of the summary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub accession: String,
    /// Canonical notations joined with the notation separator.
    pub pmods: String,
}

/// One protein line of the detail file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub accession: String,
    pub description: String,
    pub acetyl: Vec<EvidenceEntry>,
    pub phosphoryl: Vec<EvidenceEntry>,
    pub dimethyl: Vec<EvidenceEntry>,
    #[serde(rename = "GGyl")]
    pub gg: Vec<EvidenceEntry>,
    #[serde(rename = "seq")]
    pub sequence: String,
}
