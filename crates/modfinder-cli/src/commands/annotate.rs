use crate::cli::Cli;
use crate::config::{PartialRunConfig, RunConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use modfinder::{
    core::{io::fasta::FastaReader, store::csv_store::CsvObservationStore},
    engine::progress::ProgressReporter,
    workflows::{self, annotate::RunSummary},
};
use std::fs::{self, File};
use std::io::BufWriter;
use tracing::{info, warn};

pub fn run(args: &Cli) -> Result<RunSummary> {
    let partial_config = PartialRunConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(args)?;

    let progress_handler = if args.quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    execute(&config, &progress_handler)
}

pub fn execute(config: &RunConfig, progress_handler: &CliProgressHandler) -> Result<RunSummary> {
    info!("Loading input sequences from {:?}", &config.input_path);
    let proteins = FastaReader::read_from_path(&config.input_path)
        .map_err(|e| CliError::fasta(&config.input_path, e))?;
    if proteins.is_empty() {
        warn!("No protein sequences found in {:?}", &config.input_path);
    }

    info!("Connecting to observation store at {:?}", &config.store_path);
    let store = CsvObservationStore::connect(&config.store_path)?;

    fs::create_dir_all(&config.output_dir)?;
    let summary_path = config.summary_path();
    let detail_path = config.detail_path();
    let summary_out = BufWriter::new(File::create(&summary_path)?);
    let detail_out = BufWriter::new(File::create(&detail_path)?);

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Annotating {} protein(s) for {} (minimum {} observations)...",
        proteins.len(),
        config.core_config.binomial_name,
        config.core_config.min_observations
    );
    info!("Invoking the core annotation workflow...");

    let summary = workflows::annotate::run(
        &proteins,
        &store,
        &config.core_config,
        summary_out,
        detail_out,
        &reporter,
    )?;

    println!(
        "✓ {} of {} accession(s) annotated ({} with evidence).",
        summary.counters.modified, summary.counters.accessions, summary.counters.evidenced
    );
    println!("  Summary written to: {}", summary_path.display());
    println!("  Details written to: {}", detail_path.display());
    if summary.extra_appended {
        if let Some(extra) = &config.core_config.extra_path {
            println!("  Curated lines added from: {}", extra.display());
        }
    }

    Ok(summary)
}
