//! Operation: package a resolved set into a zip archive.
//!
//! Each package lands under `{name}-{version}/` with its files at their
//! paths relative to the package base directory, plus a regenerated
//! `{name}-{version}.jspec` whose dependencies are pinned to the versions
//! that were actually resolved.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use jspec_core::manifest::{specs_to_json, FileSet, PackageSpec, DEFAULT_MANIFEST_EXTENSION};
use jspec_core::package::Package;
use jspec_core::requirement::parse_requirements;
use jspec_resolver::{resolve_requests, Resolution};
use jspec_util::errors::JspecError;
use jspec_util::fs::{ensure_dir, relative_slash_path};
use jspec_util::hash::sha256_file;
use jspec_util::progress::{progress_bar, status, status_info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::ops_load::load_repository;
use crate::Settings;

/// Options for `jspec zip`.
#[derive(Debug)]
pub struct ZipOptions {
    pub require: String,
    pub output: PathBuf,
}

/// What was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipSummary {
    pub packages: usize,
    pub entries: usize,
    pub sha256: String,
}

/// Resolve the requirements as one set and write the archive.
pub fn zip(settings: &Settings, opts: &ZipOptions) -> miette::Result<()> {
    let requirements = parse_requirements(&opts.require)?;
    let index = load_repository(settings)?;
    let resolution = resolve_requests(&index, &requirements, &settings.build)?;
    status("Resolved", &format!("{} packages", resolution.len()));
    let summary = write_archive(&resolution, &opts.output)?;
    status_info("Checksum", &format!("sha256:{}", summary.sha256));
    println!(
        "Packaged {} packages into {}",
        summary.packages,
        opts.output.display()
    );
    Ok(())
}

/// Write every resolved package into a deflate-compressed archive at `output`.
///
/// A partially written archive is removed when packaging fails.
pub fn write_archive(resolution: &Resolution<'_>, output: &Path) -> miette::Result<ZipSummary> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).map_err(JspecError::Io)?;
    }
    let file = File::create(output).map_err(|e| JspecError::Archive {
        message: format!("Failed to create {}: {e}", output.display()),
    })?;

    let entries = match write_entries(ZipWriter::new(file), resolution, output) {
        Ok(entries) => entries,
        Err(e) => {
            if let Err(remove) = std::fs::remove_file(output) {
                tracing::warn!("could not remove {}: {remove}", output.display());
            }
            return Err(e);
        }
    };

    let sha256 = sha256_file(output).map_err(JspecError::Io)?;
    Ok(ZipSummary {
        packages: resolution.len(),
        entries,
        sha256,
    })
}

fn write_entries(
    mut writer: ZipWriter<File>,
    resolution: &Resolution<'_>,
    output: &Path,
) -> miette::Result<usize> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let pb = progress_bar(resolution.len() as u64, "Packaging");
    let mut entries = 0usize;
    for package in resolution.values() {
        pb.set_message(package.to_string());
        let dir = package.dir_name();

        for path in &package.files {
            let rel = relative_slash_path(&package.base_dir, path).ok_or_else(|| {
                JspecError::Archive {
                    message: format!(
                        "{} is outside the base directory of {package}",
                        path.display()
                    ),
                }
            })?;
            let mut source = File::open(path).map_err(|e| JspecError::Archive {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
            start_entry(&mut writer, format!("{dir}/{rel}"), options)?;
            std::io::copy(&mut source, &mut writer).map_err(JspecError::Io)?;
            entries += 1;
        }

        let spec = pinned_spec(package, resolution);
        let json = specs_to_json(&[spec]).map_err(|e| JspecError::Archive {
            message: format!("Failed to serialize manifest for {package}: {e}"),
        })?;
        start_entry(
            &mut writer,
            format!("{dir}/{dir}.{DEFAULT_MANIFEST_EXTENSION}"),
            options,
        )?;
        writer.write_all(json.as_bytes()).map_err(JspecError::Io)?;
        entries += 1;

        tracing::debug!("packaged {package} ({} file(s))", package.files.len());
        pb.inc(1);
    }
    pb.finish_and_clear();

    writer.finish().map_err(|e| JspecError::Archive {
        message: format!("Failed to finish {}: {e}", output.display()),
    })?;
    Ok(entries)
}

fn start_entry(
    writer: &mut ZipWriter<File>,
    name: String,
    options: SimpleFileOptions,
) -> miette::Result<()> {
    writer.start_file(name.clone(), options).map_err(|e| {
        JspecError::Archive {
            message: format!("Failed to add {name}: {e}"),
        }
        .into()
    })
}

/// The manifest shipped inside the archive for `package`: every file in its
/// directory, and each dependency pinned to the resolved version.
pub fn pinned_spec(package: &Package, resolution: &Resolution<'_>) -> PackageSpec {
    let dependencies: BTreeMap<String, String> = package
        .dependencies
        .iter()
        .map(|dep| {
            let pinned = match resolution.get(&dep.name) {
                Some(resolved) => resolved.version.to_string(),
                None => dep.bounds(),
            };
            (dep.name.clone(), pinned)
        })
        .collect();
    PackageSpec {
        name: package.name.clone(),
        version: package.version.to_string(),
        base_dir: None,
        description: package.source.description.clone(),
        files: vec![FileSet {
            include: "**/*".to_string(),
            exclude: format!("**/*.{DEFAULT_MANIFEST_EXTENSION}"),
        }],
        dependencies,
    }
}
