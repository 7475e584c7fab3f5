use super::classify::Classification;
use super::resolve::Resolution;
use crate::core::models::annotation::{DetailRecord, SummaryLine};
use crate::core::models::modification::{GeneClassSet, ModificationType};
use crate::core::models::protein::ProteinRecord;

/// Run-level totals written to the detail file footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateCounters {
    pub accessions: usize,
    /// Proteins with at least one rendered notation.
    pub modified: usize,
    /// Proteins with any qualifying tag or gene class, whether or not a notation resulted.
    pub evidenced: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub summary: Option<SummaryLine>,
    pub detail: DetailRecord,
}

/// Builds output records and keeps the run counters.
#[derive(Debug, Default)]
pub struct Assembler {
    counters: AggregateCounters,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> AggregateCounters {
        self.counters
    }

    pub fn assemble(
        &mut self,
        protein: &ProteinRecord,
        description: &str,
        mut classification: Classification,
        gene_classes: &GeneClassSet,
        resolution: &Resolution,
    ) -> Annotation {
        self.counters.accessions += 1;
        if !classification.tags.is_empty() || !gene_classes.is_empty() {
            self.counters.evidenced += 1;
        }

        let summary = resolution.is_renderable().then(|| {
            self.counters.modified += 1;
            SummaryLine {
                accession: protein.accession.clone(),
                pmods: resolution.notations.render(),
            }
        });

        let evidence = &mut classification.evidence;
        let detail = DetailRecord {
            accession: protein.accession.clone(),
            description: description.to_string(),
            acetyl: std::mem::take(&mut evidence[ModificationType::Acetylation]),
            phosphoryl: std::mem::take(&mut evidence[ModificationType::Phosphorylation]),
            dimethyl: std::mem::take(&mut evidence[ModificationType::Dimethylation]),
            gg: std::mem::take(&mut evidence[ModificationType::GlyGly]),
            sequence: protein.sequence.clone(),
        };

        Annotation { summary, detail }
    }
}
