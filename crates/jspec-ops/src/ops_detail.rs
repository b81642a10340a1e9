//! Operation: show the resolved package set for requirements.

use jspec_core::requirement::{parse_requirements, Requirements};
use jspec_core::version::Version;
use jspec_resolver::{resolve_requests, BuildOptions, PackageIndex, Resolution};

use crate::ops_load::load_repository;
use crate::Settings;

/// Options for `jspec detail`.
#[derive(Debug, Default)]
pub struct DetailOptions {
    /// Requirement list, e.g. `jquery, jquery.ui.core 1.10.2`.
    pub require: String,
    /// Resolve all requirements as one set instead of one at a time.
    pub together: bool,
}

/// One resolved group: a heading naming what was requested, and the result.
pub struct DetailGroup<'a> {
    pub heading: String,
    pub resolution: Resolution<'a>,
}

/// Resolve each requirement on its own, or all of them together.
pub fn resolve_groups<'a>(
    index: &'a PackageIndex,
    requirements: &Requirements,
    together: bool,
    build: &BuildOptions,
) -> miette::Result<Vec<DetailGroup<'a>>> {
    if together {
        let resolution = resolve_requests(index, requirements, build)?;
        let heading = requirements
            .iter()
            .map(|(name, version)| describe(name, version.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");
        return Ok(vec![DetailGroup {
            heading,
            resolution,
        }]);
    }

    let mut groups = Vec::with_capacity(requirements.len());
    for (name, version) in requirements {
        let single = Requirements::from([(name.clone(), *version)]);
        groups.push(DetailGroup {
            heading: describe(name, version.as_ref()),
            resolution: resolve_requests(index, &single, build)?,
        });
    }
    Ok(groups)
}

fn describe(name: &str, version: Option<&Version>) -> String {
    match version {
        Some(v) => format!("{name} - {v}"),
        None => format!("{name} - latest"),
    }
}

/// Print a heading and the `name - version` lines of each resolved group.
pub fn detail(settings: &Settings, opts: &DetailOptions) -> miette::Result<()> {
    let requirements = parse_requirements(&opts.require)?;
    let index = load_repository(settings)?;
    let groups = resolve_groups(&index, &requirements, opts.together, &settings.build)?;
    for group in groups {
        println!("Packages required by {}:", group.heading);
        for package in group.resolution.values() {
            println!("  {package}");
        }
    }
    Ok(())
}
