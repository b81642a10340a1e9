use std::fs;
use std::io::Read;
use std::path::Path;

use jspec_core::manifest::parse_specs;
use jspec_core::requirement::parse_requirements;
use jspec_ops::ops_load::load_from;
use jspec_ops::ops_zip::write_archive;
use jspec_resolver::{resolve_requests, BuildOptions};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn repository() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("jquery/1.8.3/jquery.js"), "// jquery 1.8.3");
    write(&root.join("jquery/1.9.1/jquery.js"), "// jquery 1.9.1");
    write(
        &root.join("jquery/jquery.jspec"),
        r#"[
            { "name": "jquery", "version": "1.8.3", "baseDir": "{version}", "files": [{ "include": "*.js" }] },
            { "name": "jquery", "version": "1.9.1", "baseDir": "{version}", "files": [{ "include": "*.js" }] }
        ]"#,
    );
    write(&root.join("ui/core/jquery.ui.core.js"), "// core");
    write(&root.join("ui/core/themes/base.css"), "/* base */");
    write(&root.join("ui/core/notes.txt"), "not shipped");
    write(
        &root.join("ui/ui.jspec"),
        r#"[{
            "Name": "jquery.ui.core",
            "Version": "1.10.2",
            "BaseDir": "core",
            "Files": [{ "Include": "**/*.js\n**/*.css" }],
            "Dependencies": { "jquery": "1.6~" }
        }]"#,
    );
    tmp
}

fn entry_names(archive: &mut zip::ZipArchive<fs::File>) -> Vec<String> {
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn archive_contains_files_and_pinned_manifests() {
    let repo = repository();
    let index = load_from(repo.path(), "jspec").unwrap();
    let reqs = parse_requirements("jquery.ui.core").unwrap();
    let resolution = resolve_requests(&index, &reqs, &BuildOptions::default()).unwrap();

    let out = TempDir::new().unwrap();
    let output = out.path().join("bundle.zip");
    let summary = write_archive(&resolution, &output).unwrap();
    assert_eq!(summary.packages, 2);
    assert_eq!(summary.entries, 5);

    let mut archive = zip::ZipArchive::new(fs::File::open(&output).unwrap()).unwrap();
    assert_eq!(
        entry_names(&mut archive),
        vec![
            "jquery-1.9.1.0/jquery-1.9.1.0.jspec",
            "jquery-1.9.1.0/jquery.js",
            "jquery.ui.core-1.10.2.0/jquery.ui.core-1.10.2.0.jspec",
            "jquery.ui.core-1.10.2.0/jquery.ui.core.js",
            "jquery.ui.core-1.10.2.0/themes/base.css",
        ]
    );

    let mut content = String::new();
    archive
        .by_name("jquery-1.9.1.0/jquery.js")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "// jquery 1.9.1");

    let mut manifest = String::new();
    archive
        .by_name("jquery.ui.core-1.10.2.0/jquery.ui.core-1.10.2.0.jspec")
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    let specs = parse_specs(&manifest).unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].name, "jquery.ui.core");
    assert_eq!(specs[0].dependencies["jquery"], "1.9.1.0");
    assert_eq!(specs[0].files[0].exclude, "**/*.jspec");
}

#[test]
fn checksum_matches_the_written_file() {
    let repo = repository();
    let index = load_from(repo.path(), "jspec").unwrap();
    let reqs = parse_requirements("jquery 1.8.3").unwrap();
    let resolution = resolve_requests(&index, &reqs, &BuildOptions::default()).unwrap();

    let out = TempDir::new().unwrap();
    let output = out.path().join("jquery.zip");
    let summary = write_archive(&resolution, &output).unwrap();
    assert_eq!(
        summary.sha256,
        jspec_util::hash::sha256_file(&output).unwrap()
    );
}
