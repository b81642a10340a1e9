//! Operation: load every manifest in a repository into a package index.

use std::path::Path;

use jspec_core::manifest::{discover_manifests, load_packages};
use jspec_resolver::PackageIndex;
use jspec_util::errors::{JspecError, JspecResult};

use crate::Settings;

/// Scan the repository directory and register every declared package.
///
/// Fails on the first unreadable manifest, invalid declaration or duplicate
/// name and version pair.
pub fn load_repository(settings: &Settings) -> JspecResult<PackageIndex> {
    load_from(&settings.repository, &settings.manifest_extension)
}

/// Like [`load_repository`] with an explicit root and manifest extension.
pub fn load_from(root: &Path, extension: &str) -> JspecResult<PackageIndex> {
    if !root.is_dir() {
        return Err(JspecError::Generic {
            message: format!("Repository directory {} not found", root.display()),
        }
        .into());
    }
    let root = root.canonicalize().map_err(JspecError::Io)?;

    let manifests = discover_manifests(&root, extension)?;
    let mut index = PackageIndex::new();
    for manifest in &manifests {
        let packages = load_packages(manifest)?;
        index.register_all(packages)?;
    }
    tracing::debug!(
        "loaded {} package(s) from {} manifest(s) in {}",
        index.len(),
        manifests.len(),
        root.display()
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_root_is_an_error() {
        let err = load_from(Path::new("/nonexistent/repository"), "jspec").unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {err}");
    }

    #[test]
    fn empty_repository_gives_empty_index() {
        let tmp = tempfile::tempdir().unwrap();
        let index = load_from(tmp.path(), "jspec").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn duplicates_across_manifests_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let spec = r#"[{ "name": "a", "version": "1.0" }]"#;
        fs::write(tmp.path().join("one.jspec"), spec).unwrap();
        fs::write(tmp.path().join("two.jspec"), spec).unwrap();
        let err = load_from(tmp.path(), "jspec").unwrap_err();
        assert!(err.to_string().contains("more than once"), "got: {err}");
    }
}
