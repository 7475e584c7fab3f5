use crate::core::io::detail::{DetailFooter, DetailHeader, DetailWriter};
use crate::core::io::summary::SummaryWriter;
use crate::core::models::modification::GeneClassSet;
use crate::core::models::protein::ProteinRecord;
use crate::core::rules::gene_class::match_gene_classes;
use crate::core::store::provider::{
    DescriptionProvider, ObservationProvider, lookup_all,
};
use crate::engine::assemble::{AggregateCounters, Annotation, Assembler};
use crate::engine::classify::{Classification, classify};
use crate::engine::config::{AnnotationConfig, CHECKPOINT_INTERVAL};
use crate::engine::error::EngineError;
use crate::engine::progress::{Checkpoint, Progress, ProgressReporter};
use crate::engine::resolve::{Resolution, resolve};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub counters: AggregateCounters,
    /// Lines written to the detail file, header and footer included.
    pub detail_lines: usize,
    pub summary_proteins: usize,
    pub extra_appended: bool,
}

/// Everything the engine concluded about one protein, before assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinFindings {
    pub description: String,
    pub classification: Classification,
    pub gene_classes: GeneClassSet,
    pub resolution: Resolution,
}

/// Looks up, classifies and resolves a single protein.
pub fn examine_protein<P>(
    protein: &ProteinRecord,
    provider: &P,
    min_observations: u32,
) -> Result<ProteinFindings, EngineError>
where
    P: ObservationProvider + DescriptionProvider + ?Sized,
{
    let observations = lookup_all(provider, &protein.accession, protein.len())?;
    let classification = classify(&protein.sequence, &observations, min_observations);

    let mut description = provider.describe(&protein.accession);
    if description.is_empty() {
        description = protein.description.clone().unwrap_or_default();
    }
    let gene_classes = match_gene_classes(&description);

    let resolution = resolve(
        &classification.tags,
        &gene_classes,
        classification.hydroxyl_hits,
    );

    Ok(ProteinFindings {
        description,
        classification,
        gene_classes,
        resolution,
    })
}

/// Annotates every protein of a species, writing the summary file to `summary_out` and the
/// detail file to `detail_out`.
///
/// Proteins are processed in input order. A store failure aborts the run; proteins the
/// store does not know are annotated from all-zero observations.
#[instrument(skip_all, name = "annotation_workflow", fields(species = %config.binomial_name))]
pub fn run<P, S, D>(
    proteins: &[ProteinRecord],
    provider: &P,
    config: &AnnotationConfig,
    summary_out: S,
    detail_out: D,
    reporter: &ProgressReporter,
) -> Result<RunSummary, EngineError>
where
    P: ObservationProvider + DescriptionProvider + ?Sized,
    S: Write,
    D: Write,
{
    info!(
        "Annotating {} protein(s) with a minimum of {} observation(s).",
        proteins.len(),
        config.min_observations
    );

    let mut summary = SummaryWriter::new(summary_out);
    let mut detail = DetailWriter::new(detail_out);
    summary.write_header(&config.binomial_name, &config.release, &config.run_date)?;
    detail.write_header(&DetailHeader {
        release: config.release.clone(),
        species: config.binomial_name.clone(),
        date: config.run_date.clone(),
        min_observations: config.min_observations,
    })?;

    reporter.report(Progress::PhaseStart { name: "Annotating" });
    reporter.report(Progress::TaskStart {
        total_steps: proteins.len() as u64,
    });

    let mut assembler = Assembler::new();
    let start = Instant::now();
    let mut last_checkpoint = start;

    for (index, protein) in proteins.iter().enumerate() {
        let findings = examine_protein(protein, provider, config.min_observations)?;
        if !findings.gene_classes.is_empty() {
            debug!(
                "{}: gene classes {:?} from '{}'",
                protein.accession, findings.gene_classes, findings.description
            );
        }

        let Annotation {
            summary: line,
            detail: record,
        } = assembler.assemble(
            protein,
            &findings.description,
            findings.classification,
            &findings.gene_classes,
            &findings.resolution,
        );
        if let Some(line) = line {
            summary.write_protein(&line)?;
        }
        detail.write_record(&record)?;
        reporter.report(Progress::TaskIncrement);

        let processed = index + 1;
        if processed % CHECKPOINT_INTERVAL == 0 {
            let now = Instant::now();
            let checkpoint = Checkpoint {
                processed,
                total: proteins.len(),
                modified: assembler.counters().modified,
                since_last: now - last_checkpoint,
                elapsed: now - start,
            };
            last_checkpoint = now;
            info!(
                "{}/{}: {} ({:.1}%) delta: {:.1} s, current: {:.3} m, remaining: {:.3} m",
                checkpoint.processed,
                checkpoint.total,
                checkpoint.modified,
                checkpoint.percent(),
                checkpoint.since_last.as_secs_f64(),
                checkpoint.elapsed.as_secs_f64() / 60.0,
                checkpoint.remaining().as_secs_f64() / 60.0
            );
            reporter.report(Progress::Checkpoint(checkpoint));
        }
    }
    reporter.report(Progress::TaskFinish);

    let extra_appended = match &config.extra_path {
        Some(path) => {
            let appended = summary.append_extra(path)?;
            if appended {
                info!("Added curated annotation from {:?}", path);
                reporter.report(Progress::Message(format!(
                    "Added curated annotation from {}",
                    path.display()
                )));
            } else {
                info!("No curated annotation file {:?} exists.", path);
            }
            appended
        }
        None => false,
    };

    let counters = assembler.counters();
    let summary_proteins = summary.proteins_written();
    summary.finish()?;

    detail.write_footer(&DetailFooter {
        lines: detail.lines_written() + 1,
        accessions: counters.accessions,
        modified: counters.modified,
    })?;
    let detail_lines = detail.lines_written();
    detail.finish()?;

    reporter.report(Progress::PhaseFinish);
    info!(
        "Annotated {} accession(s): {} modified, {} with evidence.",
        counters.accessions, counters.modified, counters.evidenced
    );

    Ok(RunSummary {
        counters,
        detail_lines,
        summary_proteins,
        extra_appended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::modification::{GeneClass, ModTag, ModificationType};
    use crate::core::store::memory::MemoryObservationStore;
    use crate::core::store::provider::{ObservationMap, StoreError};
    use crate::engine::config::AnnotationConfigBuilder;
    use crate::engine::resolve::HydroxylationPath;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn config() -> AnnotationConfig {
        AnnotationConfigBuilder::new()
            .common_name("human")
            .binomial_name("Homo sapiens")
            .run_date("2021-06-01")
            .build()
            .unwrap()
    }

    fn run_to_strings(
        proteins: &[ProteinRecord],
        store: &MemoryObservationStore,
        config: &AnnotationConfig,
    ) -> (RunSummary, String, String) {
        let mut summary = Vec::new();
        let mut detail = Vec::new();
        let result = run(
            proteins,
            store,
            config,
            &mut summary,
            &mut detail,
            &ProgressReporter::new(),
        )
        .unwrap();
        (
            result,
            String::from_utf8(summary).unwrap(),
            String::from_utf8(detail).unwrap(),
        )
    }

    #[test]
    fn phospho_serine_end_to_end() {
        let proteins = vec![ProteinRecord::new("P1", "MSTK")];
        let store = MemoryObservationStore::new().with_observation(
            "P1",
            ModificationType::Phosphorylation,
            2,
            7,
        );

        let (result, summary, detail) = run_to_strings(&proteins, &store, &config());

        assert!(summary.contains(r#"<protein label="P1" pmods="79.966331@S" />"#));
        let lines: Vec<_> = detail.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(r#""phosphoryl": [{"r": "S", "c": 2, "n": 7}]"#));
        assert_eq!(result.counters.modified, 1);
        assert_eq!(result.summary_proteins, 1);
    }

    #[test]
    fn footer_counts_lines_accessions_and_modified() {
        let proteins = vec![
            ProteinRecord::new("P1", "MSTK"),
            ProteinRecord::new("P2", "AAAA"),
            ProteinRecord::new("P3", "KKKK"),
        ];
        let store = MemoryObservationStore::new()
            .with_observation("P1", ModificationType::Phosphorylation, 2, 7)
            .with_observation("P3", ModificationType::GlyGly, 1, 9);

        let (result, summary, detail) = run_to_strings(&proteins, &store, &config());

        assert_eq!(
            detail.lines().last().unwrap(),
            r#"{"lines": 5, "accessions": 3, "modified": 1}"#
        );
        assert_eq!(result.detail_lines, 5);
        assert_eq!(result.counters.evidenced, 2);
        assert_eq!(summary.matches("<protein ").count(), 1);
        assert!(summary.ends_with("</bioml>\n"));
    }

    #[test]
    fn header_lines_carry_species_release_and_date() {
        let (_, summary, detail) =
            run_to_strings(&[], &MemoryObservationStore::new(), &config());
        assert_eq!(
            summary,
            "<?xml version=\"1.0\"?>\n\
             <bioml label=\"Homo sapiens ENSEMBL v.104 potential modification annotation, gpmdb 2021-06-01\">\n\
             </bioml>\n"
        );
        assert_eq!(
            detail,
            "{\"ENSEMBL\": \"104\", \"species\": \"Homo sapiens\", \"GPMDB\": \"2021-06-01\", \"min obs\": 5}\n\
             {\"lines\": 2, \"accessions\": 0, \"modified\": 0}\n"
        );
    }

    #[test]
    fn rerunning_produces_identical_output() {
        let proteins = vec![
            ProteinRecord::new("P1", "MSTKPPPPP").with_description("COL1A1"),
            ProteinRecord::new("P2", "RRKY"),
        ];
        let store = MemoryObservationStore::new()
            .with_observation("P1", ModificationType::Phosphorylation, 2, 7)
            .with_observation("P2", ModificationType::Dimethylation, 1, 12)
            .with_observation("P2", ModificationType::Acetylation, 3, 5);

        let first = run_to_strings(&proteins, &store, &config());
        let second = run_to_strings(&proteins, &store, &config());
        assert_eq!(first, second);
    }

    #[test]
    fn store_description_takes_precedence_over_fasta() {
        let protein = ProteinRecord::new("P1", "MSTK").with_description("TP53");
        let store = MemoryObservationStore::new().with_description("P1", "KRT14");

        let findings = examine_protein(&protein, &store, 5).unwrap();
        assert_eq!(findings.description, "KRT14");
        assert_eq!(
            findings.gene_classes,
            GeneClassSet::from([GeneClass::CitrullineR])
        );
        assert_eq!(findings.resolution.notations.render(), "0.984016@]R");
    }

    #[test]
    fn fasta_description_is_used_when_store_has_none() {
        let protein = ProteinRecord::new("P1", "GPPGPP").with_description("COL1A1:p.G2S");
        let findings = examine_protein(&protein, &MemoryObservationStore::new(), 5).unwrap();
        assert_eq!(
            findings.resolution.hydroxylation,
            Some(HydroxylationPath::GeneClass)
        );
    }

    #[test]
    fn hydroxylation_site_count_boundary() {
        let sequence = "PPPPPKA";
        let four = (1..=4).fold(MemoryObservationStore::new(), |s, p| {
            s.with_observation("P1", ModificationType::Hydroxylation, p, 20)
        });
        let five = four
            .clone()
            .with_observation("P1", ModificationType::Hydroxylation, 6, 25);
        let protein = ProteinRecord::new("P1", sequence);

        let below = examine_protein(&protein, &four, 5).unwrap();
        assert_eq!(below.classification.hydroxyl_hits, 4);
        assert!(below.classification.tags.contains(&ModTag::HydroxyP));
        assert!(!below.resolution.is_renderable());

        let at = examine_protein(&protein, &five, 5).unwrap();
        assert_eq!(at.classification.hydroxyl_hits, 5);
        assert_eq!(
            at.resolution.notations.render(),
            "15.994915@K,15.994915@P,0.000000@X"
        );
    }

    #[test]
    fn extra_file_lines_are_appended_before_closing_tag() {
        let dir = tempfile::tempdir().unwrap();
        let extra = dir.path().join("human_extra.xml");
        std::fs::write(&extra, "<protein label=\"X1\" pmods=\"0.000000@Z\" />\n").unwrap();
        let mut config = config();
        config.extra_path = Some(extra);

        let (result, summary, _) =
            run_to_strings(&[], &MemoryObservationStore::new(), &config);
        assert!(result.extra_appended);
        assert!(summary.ends_with(
            "<protein label=\"X1\" pmods=\"0.000000@Z\" />\n</bioml>\n"
        ));
    }

    #[test]
    fn appended_extra_file_is_announced_to_the_reporter() {
        let dir = tempfile::tempdir().unwrap();
        let extra = dir.path().join("human_extra.xml");
        std::fs::write(&extra, "<protein label=\"X1\" pmods=\"0.000000@Z\" />\n").unwrap();
        let mut config = config();
        config.extra_path = Some(extra);

        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = messages.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if let Progress::Message(msg) = p {
                sink.lock().unwrap().push(msg);
            }
        }));
        run(
            &[],
            &MemoryObservationStore::new(),
            &config,
            Vec::new(),
            Vec::new(),
            &reporter,
        )
        .unwrap();

        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("human_extra.xml"));
    }

    #[test]
    fn missing_extra_file_is_not_fatal() {
        let mut config = config();
        config.extra_path = Some(PathBuf::from("/nonexistent/human_extra.xml"));
        let (result, _, _) = run_to_strings(&[], &MemoryObservationStore::new(), &config);
        assert!(!result.extra_appended);
    }

    struct BrokenStore;

    impl ObservationProvider for BrokenStore {
        fn lookup(
            &self,
            _accession: &str,
            _modification: ModificationType,
            _length: usize,
        ) -> Result<ObservationMap, StoreError> {
            Err(StoreError::Connection {
                path: PathBuf::from("gpmdb"),
                reason: "connection reset".to_string(),
            })
        }
    }

    impl DescriptionProvider for BrokenStore {
        fn describe(&self, _accession: &str) -> String {
            String::new()
        }
    }

    #[test]
    fn store_failure_aborts_the_run() {
        let proteins = vec![ProteinRecord::new("P1", "MSTK")];
        let err = run(
            &proteins,
            &BrokenStore,
            &config(),
            Vec::new(),
            Vec::new(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Store(StoreError::Connection { .. })));
    }

    #[test]
    fn progress_reports_one_increment_per_protein() {
        let increments = Arc::new(Mutex::new(0usize));
        let sink = increments.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if matches!(p, Progress::TaskIncrement) {
                *sink.lock().unwrap() += 1;
            }
        }));
        let proteins = vec![ProteinRecord::new("P1", "M"), ProteinRecord::new("P2", "K")];

        run(
            &proteins,
            &MemoryObservationStore::new(),
            &config(),
            Vec::new(),
            Vec::new(),
            &reporter,
        )
        .unwrap();
        assert_eq!(*increments.lock().unwrap(), 2);
    }
}
