//! Command dispatch and handler modules.

mod detail;
mod list;
mod zip;

use std::path::PathBuf;

use jspec_core::config::GlobalConfig;
use jspec_ops::Settings;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = settings(cli.repository)?;
    match cli.command {
        Command::List { filter } => list::exec(&settings, filter.as_deref()),
        Command::Detail { require, together } => detail::exec(&settings, require, together),
        Command::Zip { require, output } => zip::exec(&settings, require, output),
    }
}

fn settings(repository: Option<PathBuf>) -> Result<Settings> {
    let config = GlobalConfig::load()?;
    let settings = Settings::from_config(&config, repository);
    tracing::debug!("using repository {}", settings.repository.display());
    Ok(settings)
}
