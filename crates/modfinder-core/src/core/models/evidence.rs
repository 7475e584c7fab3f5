use serde::Serialize;

/// One residue position with a positive observation count.
///
/// Serialized with the short keys used by the detail file: `r` (residue letter),
/// `c` (1-based position) and `n` (observation count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvidenceEntry {
    #[serde(rename = "r")]
    pub residue: char,
    #[serde(rename = "c")]
    pub position: usize,
    #[serde(rename = "n")]
    pub count: u32,
}

impl EvidenceEntry {
    pub fn new(residue: char, position: usize, count: u32) -> Self {
        Self {
            residue,
            position,
            count,
        }
    }
}
