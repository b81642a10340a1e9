use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jspec_util::errors::JspecError;

use crate::dependency::DependencyRange;
use crate::file_set::{collect_files, split_patterns, FileMatcher};
use crate::package::{Package, SourceSpec};
use crate::properties::interpolate;
use crate::version::Version;

/// Default extension of package manifest files.
pub const DEFAULT_MANIFEST_EXTENSION: &str = "jspec";

/// One package declaration inside a `.jspec` file.
///
/// A manifest file holds a JSON array of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    #[serde(alias = "Name")]
    pub name: String,

    #[serde(alias = "Version")]
    pub version: String,

    #[serde(default, alias = "BaseDir", skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<String>,

    #[serde(default, alias = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, alias = "Files")]
    pub files: Vec<FileSet>,

    /// Dependency name to range string (`1.2`, `1.2~`, `~2`, `1~2`).
    #[serde(default, alias = "Dependencies")]
    pub dependencies: BTreeMap<String, String>,
}

/// Include/exclude pattern lists, each separated by `;` or newlines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSet {
    #[serde(default, alias = "Include")]
    pub include: String,

    #[serde(default, alias = "Exclude", skip_serializing_if = "String::is_empty")]
    pub exclude: String,
}

impl PackageSpec {
    /// Build a [`Package`] from this declaration.
    ///
    /// `{name}` and `{version}` placeholders are substituted in the base
    /// directory, the file patterns and the dependency ranges. The base
    /// directory is relative to the directory containing `manifest_path`.
    pub fn to_package(&self, manifest_path: &Path) -> miette::Result<Package> {
        let version = Version::parse(&self.version).map_err(|e| JspecError::Manifest {
            message: format!("{}: package '{}': {e}", manifest_path.display(), self.name),
        })?;

        let manifest_dir = manifest_path.parent().unwrap_or(Path::new("."));
        let base_dir = match self.base_dir.as_deref().map(|b| self.substitute(b)) {
            Some(b) if !b.trim().is_empty() => manifest_dir.join(b.trim()),
            _ => manifest_dir.to_path_buf(),
        };

        let mut dependencies = Vec::with_capacity(self.dependencies.len());
        for (name, range) in &self.dependencies {
            let dep = DependencyRange::parse(name.as_str(), &self.substitute(range)).map_err(|e| {
                JspecError::Manifest {
                    message: format!(
                        "{}: package '{}': dependency '{name}': {e}",
                        manifest_path.display(),
                        self.name
                    ),
                }
            })?;
            dependencies.push(dep);
        }

        let matchers = self
            .files
            .iter()
            .map(|set| {
                FileMatcher::new(
                    &split_patterns(&self.substitute(&set.include)),
                    &split_patterns(&self.substitute(&set.exclude)),
                )
            })
            .collect::<miette::Result<Vec<_>>>()?;
        let files = collect_files(&base_dir, &matchers)?;

        Ok(Package {
            name: self.name.clone(),
            version,
            base_dir,
            files,
            dependencies,
            source: SourceSpec {
                manifest_path: Some(manifest_path.to_path_buf()),
                description: self.description.clone(),
            },
        })
    }

    fn substitute(&self, input: &str) -> String {
        interpolate(input, &self.name, &self.version)
    }
}

/// Parse the JSON content of a manifest file.
pub fn parse_specs(content: &str) -> Result<Vec<PackageSpec>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Serialize specs the way manifest files are written: a pretty JSON array.
pub fn specs_to_json(specs: &[PackageSpec]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(specs)
}

/// Load every package declared in one manifest file.
pub fn load_packages(path: &Path) -> miette::Result<Vec<Package>> {
    let content = std::fs::read_to_string(path).map_err(|e| JspecError::Manifest {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;
    let specs = parse_specs(&content).map_err(|e| JspecError::Manifest {
        message: format!("Failed to parse {}: {e}", path.display()),
    })?;
    tracing::debug!("{}: {} package spec(s)", path.display(), specs.len());
    specs.iter().map(|spec| spec.to_package(path)).collect()
}

/// Find every manifest file with the given extension below `root`, sorted.
pub fn discover_manifests(root: &Path, extension: &str) -> miette::Result<Vec<PathBuf>> {
    let files = jspec_util::fs::walk_files(root).map_err(|e| JspecError::Manifest {
        message: format!("Failed to scan repository {}: {e}", root.display()),
    })?;
    Ok(files
        .into_iter()
        .filter(|f| {
            f.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect())
}
