/// A protein sequence read from the input FASTA file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinRecord {
    pub accession: String,
    pub sequence: String,
    pub description: Option<String>,
}

impl ProteinRecord {
    pub fn new(accession: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            sequence: sequence.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Residue at a 1-based position.
    pub fn residue_at(&self, position: usize) -> Option<u8> {
        position
            .checked_sub(1)
            .and_then(|i| self.sequence.as_bytes().get(i))
            .copied()
    }
}
