//! The registry of every known package, keyed by name then version.

use std::collections::BTreeMap;

use jspec_core::dependency::DependencyRange;
use jspec_core::package::Package;
use jspec_core::version::{Version, VersionConstraint};

use crate::error::ResolveError;

/// Owns every registered [`Package`].
///
/// Filled once through [`register`](Self::register) and then only read;
/// resolution borrows packages from here for its whole lifetime.
#[derive(Debug, Default)]
pub struct PackageIndex {
    packages: BTreeMap<String, BTreeMap<Version, Package>>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package. A second package with the same name and version is rejected.
    pub fn register(&mut self, package: Package) -> Result<(), ResolveError> {
        let versions = self.packages.entry(package.name.clone()).or_default();
        if versions.contains_key(&package.version) {
            return Err(ResolveError::DuplicatePackage {
                name: package.name,
                version: package.version,
            });
        }
        tracing::trace!("registered {package}");
        versions.insert(package.version, package);
        Ok(())
    }

    /// Register each package in order, stopping at the first duplicate.
    pub fn register_all(
        &mut self,
        packages: impl IntoIterator<Item = Package>,
    ) -> Result<(), ResolveError> {
        packages.into_iter().try_for_each(|p| self.register(p))
    }

    /// Every package whose name contains `keyword`, ordered by name then version.
    pub fn find_by_keyword<'s>(&'s self, keyword: &'s str) -> impl Iterator<Item = &'s Package> + 's {
        self.packages
            .iter()
            .filter(move |(name, _)| name.contains(keyword))
            .flat_map(|(_, versions)| versions.values())
    }

    /// Every registered version of `name` inside the given bounds, oldest first.
    ///
    /// Fails with [`ResolveError::UnknownPackage`] when nothing named `name`
    /// exists. An existing name with no version in range yields an empty iterator.
    pub fn find_in_range(
        &self,
        name: &str,
        min: Option<VersionConstraint>,
        max: Option<VersionConstraint>,
    ) -> Result<impl Iterator<Item = &Package> + '_, ResolveError> {
        let versions = self.versions_of(name)?;
        let range = DependencyRange::new(name, min, max);
        Ok(versions.values().filter(move |p| range.contains(&p.version)))
    }

    /// The highest registered version of `name`.
    pub fn latest_version(&self, name: &str) -> Result<Version, ResolveError> {
        self.versions_of(name)?
            .keys()
            .next_back()
            .copied()
            .ok_or_else(|| ResolveError::UnknownPackage {
                name: name.to_string(),
            })
    }

    /// Exact lookup by name and version.
    pub fn get(&self, name: &str, version: &Version) -> Result<&Package, ResolveError> {
        self.versions_of(name)?
            .get(version)
            .ok_or_else(|| ResolveError::PackageNotFound {
                name: name.to_string(),
                version: *version,
            })
    }

    /// Registered versions of `name`, oldest first. Unknown names yield nothing.
    pub fn versions(&self, name: &str) -> impl Iterator<Item = Version> + '_ {
        self.packages
            .get(name)
            .into_iter()
            .flat_map(|versions| versions.keys().copied())
    }

    /// Distinct package names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Total number of registered packages across all names.
    pub fn len(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn versions_of(&self, name: &str) -> Result<&BTreeMap<Version, Package>, ResolveError> {
        self.packages
            .get(name)
            .ok_or_else(|| ResolveError::UnknownPackage {
                name: name.to_string(),
            })
    }
}
