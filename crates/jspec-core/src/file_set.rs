//! Selecting a package's files with include/exclude glob patterns.
//!
//! Patterns are relative to the package base directory and always use `/`.
//! `*` stays within one path segment and `**` spans any number of them; a
//! pattern ending in `/` selects every file directly inside that directory.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use jspec_util::errors::JspecError;
use jspec_util::fs::{relative_slash_path, walk_files};

/// One include/exclude pair compiled to glob sets.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: GlobSet,
    exclude: GlobSet,
}

impl FileMatcher {
    pub fn new(includes: &[String], excludes: &[String]) -> miette::Result<Self> {
        Ok(Self {
            include: build_set(includes)?,
            exclude: build_set(excludes)?,
        })
    }

    /// Whether a `/`-separated path relative to the base directory is selected.
    pub fn is_match(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }
}

/// Split a pattern list on `;`, CR and LF, dropping empty entries.
pub fn split_patterns(list: &str) -> Vec<String> {
    list.split([';', '\r', '\n'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every file below `base_dir` selected by at least one matcher, sorted and
/// as absolute paths.
pub fn collect_files(base_dir: &Path, matchers: &[FileMatcher]) -> miette::Result<Vec<PathBuf>> {
    if matchers.iter().all(FileMatcher::is_empty) {
        return Ok(Vec::new());
    }
    if !base_dir.is_dir() {
        return Err(JspecError::Manifest {
            message: format!("Base directory {} does not exist", base_dir.display()),
        }
        .into());
    }

    let files = walk_files(base_dir).map_err(JspecError::Io)?;
    Ok(files
        .into_iter()
        .filter(|file| {
            relative_slash_path(base_dir, file)
                .is_some_and(|rel| matchers.iter().any(|m| m.is_match(&rel)))
        })
        .collect())
}

fn normalize_pattern(pattern: &str) -> String {
    let mut p = pattern.trim().replace('\\', "/");
    while let Some(stripped) = p.strip_prefix("./") {
        p = stripped.to_string();
    }
    if p.ends_with('/') {
        p.push('*');
    }
    p
}

fn build_set(patterns: &[String]) -> miette::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let normalized = normalize_pattern(pattern);
        let glob = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .build()
            .map_err(|e| JspecError::Manifest {
                message: format!("Invalid file pattern \"{pattern}\": {e}"),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        JspecError::Manifest {
            message: format!("Invalid file patterns: {e}"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(include: &str, exclude: &str) -> FileMatcher {
        FileMatcher::new(&split_patterns(include), &split_patterns(exclude)).unwrap()
    }

    #[test]
    fn split_on_all_separators() {
        assert_eq!(
            split_patterns("a.js; b/*.css\r\n\n**/*.png;"),
            vec!["a.js", "b/*.css", "**/*.png"]
        );
        assert!(split_patterns("  ;\n").is_empty());
    }

    #[test]
    fn single_star_stays_in_segment() {
        let m = matcher("*.js", "");
        assert!(m.is_match("jquery.js"));
        assert!(!m.is_match("ui/jquery.ui.js"));
    }

    #[test]
    fn double_star_crosses_segments() {
        let m = matcher("**/*.js", "**/*.min.js");
        assert!(m.is_match("jquery.js"));
        assert!(m.is_match("a/b/c.js"));
        assert!(!m.is_match("a/b/c.min.js"));
        assert!(!m.is_match("a/b/c.css"));
    }

    #[test]
    fn trailing_slash_means_directory_contents() {
        let m = matcher("themes/", "");
        assert!(m.is_match("themes/base.css"));
        assert!(!m.is_match("themes/base/images/x.png"));
    }

    #[test]
    fn backslashes_and_dot_prefix_are_normalized() {
        let m = matcher(r".\src\*.js", "");
        assert!(m.is_match("src/a.js"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(FileMatcher::new(&["a[".to_string()], &[]).is_err());
    }
}
