use std::fmt;

use jspec_core::dependency::DependencyRange;
use jspec_core::version::{Version, VersionConstraint};
use miette::Diagnostic;
use thiserror::Error;

use crate::conflict::ConflictReport;

/// Everything that can abort registration, tree building or resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("Package {name} {version} is registered more than once")]
    #[diagnostic(
        code(jspec::duplicate_package),
        help("Each name and version pair may only be declared by one manifest entry")
    )]
    DuplicatePackage { name: String, version: Version },

    #[error("Unknown package '{name}'")]
    #[diagnostic(code(jspec::unknown_package))]
    UnknownPackage { name: String },

    #[error("Package '{name}' has no version {version}")]
    #[diagnostic(code(jspec::package_not_found))]
    PackageNotFound { name: String, version: Version },

    #[error(
        "No version of '{name}' in range {} required by {dependent} (available: {})",
        range_text(.min, .max),
        version_list(.available)
    )]
    #[diagnostic(code(jspec::no_matching_version))]
    NoMatchingVersion {
        name: String,
        dependent: String,
        min: Option<VersionConstraint>,
        max: Option<VersionConstraint>,
        available: Vec<Version>,
    },

    #[error("{0}")]
    #[diagnostic(
        code(jspec::version_conflict),
        help("Widen one of the dependency ranges so the dependents share a version")
    )]
    VersionConflict(ConflictReport),

    #[error("Package '{name}' was resolved twice")]
    #[diagnostic(code(jspec::duplicate_resolution))]
    DuplicateResolution { name: String },

    #[error("Dependency cycle: {}", .path.join(" -> "))]
    #[diagnostic(code(jspec::dependency_cycle))]
    DependencyCycle { path: Vec<String> },

    #[error("Candidate tree exceeds the {limit} limit of {value}")]
    #[diagnostic(
        code(jspec::tree_limit_exceeded),
        help("Raise the limit in the [resolver] section of ~/.jspec/config.toml")
    )]
    TreeLimitExceeded { limit: TreeLimit, value: usize },

    #[error("Packages left unresolved: {}", .names.join(", "))]
    #[diagnostic(code(jspec::unresolved))]
    Unresolved { names: Vec<String> },
}

/// Which ceiling a candidate tree ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLimit {
    Depth,
    Nodes,
}

impl fmt::Display for TreeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeLimit::Depth => f.write_str("max-depth"),
            TreeLimit::Nodes => f.write_str("max-nodes"),
        }
    }
}

fn range_text(min: &Option<VersionConstraint>, max: &Option<VersionConstraint>) -> String {
    DependencyRange::new("", *min, *max).bounds()
}

pub(crate) fn version_list(versions: &[Version]) -> String {
    if versions.is_empty() {
        return "none".to_string();
    }
    versions
        .iter()
        .map(Version::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
