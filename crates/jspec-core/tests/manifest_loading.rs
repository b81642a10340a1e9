use std::fs;
use std::path::Path;

use jspec_core::manifest::{discover_manifests, load_packages, DEFAULT_MANIFEST_EXTENSION};
use jspec_core::version::Version;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("jquery/jquery-1.9.1.js"), "// jquery");
    write(&root.join("jquery/jquery-1.9.1.min.js"), "// min");
    write(&root.join("jquery/readme.txt"), "readme");
    write(
        &root.join("jquery/jquery.jspec"),
        r#"[{
            "name": "jquery",
            "version": "1.9.1",
            "files": [{ "include": "{name}-{version}*.js", "exclude": "*.min.js" }]
        }]"#,
    );
    write(&root.join("ui/1.10.2/core/core.js"), "// core");
    write(&root.join("ui/1.10.2/core/themes/base.css"), "/* css */");
    write(&root.join("ui/1.10.2/core/themes/base/images/x.png"), "png");
    write(
        &root.join("ui/ui.jspec"),
        r#"[{
            "Name": "jquery.ui.core",
            "Version": "1.10.2",
            "BaseDir": "{version}/core",
            "Files": [{ "Include": "*.js;themes/" }],
            "Dependencies": { "jquery": "1.9~" }
        }, {
            "Name": "jquery.ui.core",
            "Version": "1.8",
            "Dependencies": { "jquery": "~1.8" }
        }]"#,
    );
    tmp
}

#[test]
fn discovers_manifests_recursively_in_sorted_order() {
    let repo = sample_repo();
    let manifests = discover_manifests(repo.path(), DEFAULT_MANIFEST_EXTENSION).unwrap();
    let names: Vec<_> = manifests
        .iter()
        .map(|p| p.strip_prefix(repo.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![
            Path::new("jquery/jquery.jspec").to_path_buf(),
            Path::new("ui/ui.jspec").to_path_buf()
        ]
    );
}

#[test]
fn discover_ignores_other_extensions() {
    let repo = sample_repo();
    let manifests = discover_manifests(repo.path(), "pkg").unwrap();
    assert!(manifests.is_empty());
}

#[test]
fn placeholders_are_substituted_in_file_patterns() {
    let repo = sample_repo();
    let packages = load_packages(&repo.path().join("jquery/jquery.jspec")).unwrap();
    assert_eq!(packages.len(), 1);
    let pkg = &packages[0];
    assert_eq!(pkg.name, "jquery");
    assert_eq!(pkg.version, Version::new(1, 9, 1, 0));
    assert!(pkg.is_leaf());
    assert_eq!(pkg.files, vec![repo.path().join("jquery/jquery-1.9.1.js")]);
}

#[test]
fn base_dir_and_directory_patterns() {
    let repo = sample_repo();
    let packages = load_packages(&repo.path().join("ui/ui.jspec")).unwrap();
    assert_eq!(packages.len(), 2);

    let core = &packages[0];
    assert_eq!(core.base_dir, repo.path().join("ui/1.10.2/core"));
    assert_eq!(
        core.files,
        vec![
            repo.path().join("ui/1.10.2/core/core.js"),
            repo.path().join("ui/1.10.2/core/themes/base.css"),
        ]
    );
    assert!(core.depends_on("jquery"));
    assert!(core.dependencies[0].contains(&Version::new(1, 9, 1, 0)));

    let old = &packages[1];
    assert_eq!(old.version, Version::new(1, 8, 0, 0));
    assert!(old.files.is_empty());
    assert!(!old.dependencies[0].contains(&Version::new(1, 9, 1, 0)));
}

#[test]
fn source_records_manifest_path() {
    let repo = sample_repo();
    let path = repo.path().join("jquery/jquery.jspec");
    let packages = load_packages(&path).unwrap();
    assert_eq!(packages[0].source.manifest_path.as_deref(), Some(path.as_path()));
}

#[test]
fn invalid_json_is_a_manifest_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.jspec");
    write(&path, "{ not json");
    let err = load_packages(&path).unwrap_err();
    assert!(err.to_string().contains("Manifest error"), "got: {err}");
}

#[test]
fn invalid_dependency_range_names_the_dependency() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.jspec");
    write(
        &path,
        r#"[{ "name": "a", "version": "1.0", "dependencies": { "b": "*.1" } }]"#,
    );
    let err = load_packages(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("dependency 'b'"), "got: {msg}");
}

#[test]
fn missing_base_dir_with_patterns_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.jspec");
    write(
        &path,
        r#"[{ "name": "a", "version": "1.0", "baseDir": "nowhere", "files": [{ "include": "*.js" }] }]"#,
    );
    let err = load_packages(&path).unwrap_err();
    assert!(err.to_string().contains("does not exist"), "got: {err}");
}

#[test]
fn files_are_sorted_by_path_not_pattern_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("pkg/z.js"), "z");
    write(&root.join("pkg/b.js"), "b");
    write(&root.join("pkg/a.css"), "a");
    let path = root.join("pkg/pkg.jspec");
    write(
        &path,
        r#"[{
            "name": "pkg",
            "version": "1.0",
            "files": [{ "include": "z.js;*.css" }, { "include": "*.js" }]
        }]"#,
    );
    let packages = load_packages(&path).unwrap();
    assert_eq!(
        packages[0].files,
        vec![
            root.join("pkg/a.css"),
            root.join("pkg/b.js"),
            root.join("pkg/z.js"),
        ]
    );
}
