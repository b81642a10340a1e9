pub mod ops_detail;
pub mod ops_list;
pub mod ops_load;
pub mod ops_zip;

use std::path::PathBuf;

use jspec_core::config::GlobalConfig;
use jspec_resolver::BuildOptions;

/// Settings shared by every operation: where the repository lives and how
/// resolution is bounded.
#[derive(Debug, Clone)]
pub struct Settings {
    pub repository: PathBuf,
    pub manifest_extension: String,
    pub build: BuildOptions,
}

impl Settings {
    /// Combine the global configuration with an explicit repository path.
    ///
    /// The explicit path wins, then `[repository] path`, then the current directory.
    pub fn from_config(config: &GlobalConfig, repository: Option<PathBuf>) -> Self {
        let repository = repository
            .or_else(|| config.repository.path.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            repository,
            manifest_extension: config.repository.manifest_extension.clone(),
            build: BuildOptions::from(&config.resolver),
        }
    }
}
