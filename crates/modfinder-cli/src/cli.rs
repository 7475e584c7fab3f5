use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Ron Beavis",
    version,
    about = "modfinder - Builds per-species post-translational modification annotation files from GPMDB residue observation frequencies.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Core Arguments ---
    /// Path to the input protein FASTA file (e.g., human_proteins.fasta).
    /// The species is taken from the file name up to the first '_'.
    #[arg(value_name = "FASTA")]
    pub input: PathBuf,

    /// Minimum observation count for a residue to qualify (default 5).
    /// Values that are not positive integers are ignored.
    #[arg(value_name = "MIN_OBS")]
    pub min_observations: Option<String>,

    // --- Location Overrides ---
    /// Path to the configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the observation store tables.
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Directory the summary and detail files are written to.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory searched for the hand-curated '<species>_extra.xml' file.
    #[arg(long, value_name = "DIR")]
    pub extra_dir: Option<PathBuf>,

    /// Override the genome release written into the file headers.
    #[arg(long, value_name = "RELEASE")]
    pub release: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S min-observations=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The positional threshold, when it is a positive integer.
    pub fn min_observations_arg(&self) -> Option<u32> {
        self.min_observations
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
    }
}
