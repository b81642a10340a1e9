//! Operation: list the packages in a repository.

use jspec_core::package::Package;
use jspec_resolver::PackageIndex;

use crate::ops_load::load_repository;
use crate::Settings;

/// Packages whose name contains `filter`, or every package.
pub fn matching_packages<'a>(index: &'a PackageIndex, filter: Option<&'a str>) -> Vec<&'a Package> {
    index.find_by_keyword(filter.unwrap_or("")).collect()
}

/// Print `name - version` for each matching package.
pub fn list(settings: &Settings, filter: Option<&str>) -> miette::Result<()> {
    let index = load_repository(settings)?;
    let packages = matching_packages(&index, filter);
    if packages.is_empty() {
        jspec_util::progress::status_warn("Warning", "no packages matched");
    }
    for package in packages {
        println!("{package}");
    }
    Ok(())
}
