mod defaults;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use modfinder::core::rules::species::{SpeciesTable, common_name_from_path};
use modfinder::engine::config::{AnnotationConfig, AnnotationConfigBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything the annotate command needs, after all sources have been merged.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub store_path: PathBuf,
    pub output_dir: PathBuf,
    pub core_config: AnnotationConfig,
}

impl RunConfig {
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(self.core_config.summary_file_name())
    }

    pub fn detail_path(&self) -> PathBuf {
        self.output_dir.join(self.core_config.detail_file_name())
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialRunConfig {
    min_observations: Option<u32>,
    release: Option<String>,
    store: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    extra_dir: Option<PathBuf>,
    run_date: Option<String>,
    /// Additional common-name to binomial-name entries.
    species: Option<HashMap<String, String>>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(mut self, args: &Cli) -> Result<RunConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let common_name = common_name_from_path(&args.input);
        if common_name.is_empty() {
            return Err(CliError::Argument(format!(
                "Cannot derive a species name from {:?}",
                args.input
            )));
        }
        let species = SpeciesTable::with_entries(self.species.take().unwrap_or_default());
        let binomial_name = species.binomial(&common_name).to_string();

        let min_observations = args
            .min_observations_arg()
            .or(self.min_observations.filter(|&n| n > 0))
            .unwrap_or(defaults.min_observations);

        let extra_dir = args
            .extra_dir
            .clone()
            .or(self.extra_dir)
            .unwrap_or(defaults.extra_dir);

        let mut builder = AnnotationConfigBuilder::new()
            .common_name(common_name)
            .binomial_name(binomial_name)
            .release(
                args.release
                    .clone()
                    .or(self.release)
                    .unwrap_or(defaults.release),
            )
            .min_observations(min_observations);
        if let Some(run_date) = self.run_date {
            builder = builder.run_date(run_date);
        }
        let mut core_config = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        core_config.extra_path = Some(extra_dir.join(core_config.extra_file_name()));

        Ok(RunConfig {
            input_path: args.input.clone(),
            store_path: args.store.clone().or(self.store).unwrap_or(defaults.store),
            output_dir: args
                .output_dir
                .clone()
                .or(self.output_dir)
                .unwrap_or(defaults.output_dir),
            core_config,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "min-observations" => {
                    self.min_observations = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "release" => self.release = Some(value_str.to_string()),
                "store" => self.store = Some(PathBuf::from(value_str)),
                "output-dir" => self.output_dir = Some(PathBuf::from(value_str)),
                "extra-dir" => self.extra_dir = Some(PathBuf::from(value_str)),
                "run-date" => self.run_date = Some(value_str.to_string()),
                _ => match key.strip_prefix("species.") {
                    Some(common) if !common.is_empty() => {
                        self.species
                            .get_or_insert_with(Default::default)
                            .insert(common.to_string(), value_str.to_string());
                    }
                    _ => {
                        return Err(CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        )));
                    }
                },
            }
        }
        Ok(())
    }
}
