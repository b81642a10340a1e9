use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// `jspec` with an isolated home so no user configuration leaks in.
pub fn jspec_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jspec").unwrap();
    cmd.env("JSPEC_HOME", home).env_remove("JSPEC_REPOSITORY");
    cmd
}

pub fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small jQuery-style repository:
///
/// - jquery 1.8.3 and 1.9.1
/// - jquery.ui.core 1.10.2 needing jquery 1.6 or later
/// - legacy.plugin 1.0 needing jquery up to 1.8
pub fn sample_repository() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("jquery/1.8.3/jquery.js"), "// 1.8.3");
    write(&root.join("jquery/1.9.1/jquery.js"), "// 1.9.1");
    write(
        &root.join("jquery/jquery.jspec"),
        r#"[
            { "name": "jquery", "version": "1.8.3", "baseDir": "{version}", "files": [{ "include": "*.js" }] },
            { "name": "jquery", "version": "1.9.1", "baseDir": "{version}", "files": [{ "include": "*.js" }] }
        ]"#,
    );
    write(&root.join("ui/jquery.ui.core.js"), "// core");
    write(
        &root.join("ui/ui.jspec"),
        r#"[{
            "name": "jquery.ui.core",
            "version": "1.10.2",
            "files": [{ "include": "*.js" }],
            "dependencies": { "jquery": "1.6~" }
        }]"#,
    );
    write(
        &root.join("legacy/legacy.jspec"),
        r#"[{ "name": "legacy.plugin", "version": "1.0", "dependencies": { "jquery": "~1.8" } }]"#,
    );
    tmp
}
