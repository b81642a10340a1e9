use jspec_util::fs::{ensure_dir, relative_slash_path, walk_files};
use tempfile::TempDir;

#[test]
fn test_ensure_dir_creates_nested() {
    let tmp = TempDir::new().unwrap();
    let deep = tmp.path().join("x").join("y").join("z");
    assert!(!deep.exists());
    ensure_dir(&deep).unwrap();
    assert!(deep.is_dir());
}

#[test]
fn test_ensure_dir_idempotent() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("already");
    std::fs::create_dir(&dir).unwrap();
    ensure_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn test_walk_files_recurses_and_sorts() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("b/c")).unwrap();
    std::fs::write(tmp.path().join("z.js"), "").unwrap();
    std::fs::write(tmp.path().join("b/a.js"), "").unwrap();
    std::fs::write(tmp.path().join("b/c/d.css"), "").unwrap();

    let files = walk_files(tmp.path()).unwrap();
    let rel: Vec<String> = files
        .iter()
        .map(|f| relative_slash_path(tmp.path(), f).unwrap())
        .collect();
    assert_eq!(rel, vec!["b/a.js", "b/c/d.css", "z.js"]);
}

#[test]
fn test_walk_files_skips_directories() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("empty/nested")).unwrap();
    assert!(walk_files(tmp.path()).unwrap().is_empty());
}

#[test]
fn test_relative_slash_path_outside_base() {
    let tmp = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    assert_eq!(relative_slash_path(tmp.path(), other.path()), None);
}

#[test]
fn test_relative_slash_path_same_dir_is_none() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(relative_slash_path(tmp.path(), tmp.path()), None);
}
