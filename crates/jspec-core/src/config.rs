use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::manifest::DEFAULT_MANIFEST_EXTENSION;

/// Global user configuration loaded from `~/.jspec/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Repository settings from `[repository]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository used when `--repository` is not given.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_extension", rename = "manifest-extension")]
    pub manifest_extension: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            manifest_extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    DEFAULT_MANIFEST_EXTENSION.to_string()
}

/// Resolver limits from `[resolver]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_max_depth", rename = "max-depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_nodes", rename = "max-nodes")]
    pub max_nodes: usize,
    #[serde(default)]
    pub traversal: Traversal,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            traversal: Traversal::default(),
        }
    }
}

fn default_max_depth() -> usize {
    64
}

fn default_max_nodes() -> usize {
    100_000
}

/// Order in which the candidate tree's worklist is drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// Last in, first out.
    #[default]
    DepthFirst,
    /// First in, first out.
    BreadthFirst,
}

impl GlobalConfig {
    /// Load the global configuration from `~/.jspec/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            jspec_util::errors::JspecError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            jspec_util::errors::JspecError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the jspec data directory: `$JSPEC_HOME`, else `~/.jspec/`.
pub fn dirs_path() -> PathBuf {
    if let Ok(home) = std::env::var("JSPEC_HOME") {
        return PathBuf::from(home);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".jspec")
}
