use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for jspec operations that touch the outside world.
///
/// Resolution failures have their own structured type in `jspec-resolver`;
/// this enum covers I/O, manifests, configuration and archive output.
#[derive(Debug, Error, Diagnostic)]
pub enum JspecError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed package manifest (a `.jspec` file).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check the .jspec file for JSON syntax errors and version strings"))]
    Manifest { message: String },

    /// Invalid global configuration (`~/.jspec/config.toml`).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Writing the distributable archive failed.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type JspecResult<T> = miette::Result<T>;
