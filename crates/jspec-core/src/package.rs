use std::fmt;
use std::path::PathBuf;

use crate::dependency::DependencyRange;
use crate::version::Version;

/// A single installable package version, created once per manifest entry.
///
/// Packages are owned by the package index after registration and are only
/// borrowed by resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: Version,
    /// Directory the package's file paths are relative to.
    pub base_dir: PathBuf,
    /// Absolute file paths, sorted by path without duplicates.
    pub files: Vec<PathBuf>,
    pub dependencies: Vec<DependencyRange>,
    pub source: SourceSpec,
}

/// Where a package was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSpec {
    /// The `.jspec` file containing the declaration.
    pub manifest_path: Option<PathBuf>,
    pub description: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            base_dir: PathBuf::new(),
            files: Vec::new(),
            dependencies: Vec::new(),
            source: SourceSpec::default(),
        }
    }

    pub fn with_dependency(mut self, dependency: DependencyRange) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.files.extend(files);
        self
    }

    /// A package with no declared dependencies.
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Whether any declared dependency targets `name`.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.name == name)
    }

    /// Directory name used when packaging: `name-version`.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_queries() {
        let pkg = Package::new("jquery.ui.core", Version::new(1, 10, 2, 0))
            .with_dependency(DependencyRange::parse("jquery", "1.9~").unwrap());
        assert!(!pkg.is_leaf());
        assert!(pkg.depends_on("jquery"));
        assert!(!pkg.depends_on("jquery.ui"));
        assert_eq!(pkg.dir_name(), "jquery.ui.core-1.10.2.0");
        assert_eq!(pkg.to_string(), "jquery.ui.core - 1.10.2.0");
    }
}
