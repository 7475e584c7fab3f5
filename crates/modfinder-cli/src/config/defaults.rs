use modfinder::engine::config::{DEFAULT_MIN_OBSERVATIONS, DEFAULT_RELEASE};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub min_observations: u32,
    pub release: String,
    pub store: PathBuf,
    pub output_dir: PathBuf,
    pub extra_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            release: DEFAULT_RELEASE.to_string(),
            store: PathBuf::from("gpmdb"),
            output_dir: PathBuf::from("."),
            extra_dir: PathBuf::from("."),
        }
    }
}
