use crate::core::models::modification::ModificationType;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MIN_OBSERVATIONS: u32 = 5;
pub const DEFAULT_RELEASE: &str = "104";

/// Hydroxylation sites qualify at this count regardless of the configured threshold.
pub const HYDROXYLATION_MIN_OBSERVATIONS: u32 = 20;
/// Qualifying hydroxylation sites a protein needs before the sites alone trigger the
/// hydroxylation notations.
pub const HYDROXYLATION_MIN_SITES: usize = 5;

/// Number of proteins between progress checkpoints.
pub const CHECKPOINT_INTERVAL: usize = 1000;

const RUN_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Minimum observation count must be positive")]
    ZeroThreshold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationConfig {
    /// Species common name, used to name the output files.
    pub common_name: String,
    /// Species binomial name, written into the file headers.
    pub binomial_name: String,
    /// Genome release the input sequences come from.
    pub release: String,
    pub min_observations: u32,
    pub run_date: String,
    /// Hand-curated summary lines appended after the generated ones, if the file exists.
    pub extra_path: Option<PathBuf>,
}

impl AnnotationConfig {
    pub fn summary_file_name(&self) -> String {
        format!("{}_mod.xml", self.common_name)
    }

    pub fn detail_file_name(&self) -> String {
        format!("{}_mod.json", self.common_name)
    }

    pub fn extra_file_name(&self) -> String {
        format!("{}_extra.xml", self.common_name)
    }

    /// Threshold a site of the given type must reach to qualify.
    pub fn threshold_for(&self, modification: ModificationType) -> u32 {
        threshold_for(modification, self.min_observations)
    }
}

pub fn threshold_for(modification: ModificationType, min_observations: u32) -> u32 {
    match modification {
        ModificationType::Hydroxylation => HYDROXYLATION_MIN_OBSERVATIONS,
        _ => min_observations,
    }
}

#[derive(Default)]
pub struct AnnotationConfigBuilder {
    common_name: Option<String>,
    binomial_name: Option<String>,
    release: Option<String>,
    min_observations: Option<u32>,
    run_date: Option<String>,
    extra_path: Option<PathBuf>,
}

impl AnnotationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn common_name(mut self, name: impl Into<String>) -> Self {
        self.common_name = Some(name.into());
        self
    }
    pub fn binomial_name(mut self, name: impl Into<String>) -> Self {
        self.binomial_name = Some(name.into());
        self
    }
    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }
    pub fn min_observations(mut self, n: u32) -> Self {
        self.min_observations = Some(n);
        self
    }
    pub fn run_date(mut self, date: impl Into<String>) -> Self {
        self.run_date = Some(date.into());
        self
    }
    pub fn extra_path(mut self, path: PathBuf) -> Self {
        self.extra_path = Some(path);
        self
    }

    pub fn build(self) -> Result<AnnotationConfig, ConfigError> {
        let min_observations = self.min_observations.unwrap_or(DEFAULT_MIN_OBSERVATIONS);
        if min_observations == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(AnnotationConfig {
            common_name: self
                .common_name
                .ok_or(ConfigError::MissingParameter("common_name"))?,
            binomial_name: self
                .binomial_name
                .ok_or(ConfigError::MissingParameter("binomial_name"))?,
            release: self.release.unwrap_or_else(|| DEFAULT_RELEASE.to_string()),
            min_observations,
            run_date: self
                .run_date
                .unwrap_or_else(|| chrono::Local::now().format(RUN_DATE_FORMAT).to_string()),
            extra_path: self.extra_path,
        })
    }
}
