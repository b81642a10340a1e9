//! CLI argument definitions for jspec.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jspec",
    version,
    about = "Resolve and package JavaScript libraries described by .jspec manifests",
    long_about = "jspec reads a repository of .jspec manifests, resolves a requirement list \
                  to exactly one version per package, and can bundle the result into a zip archive."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Repository directory containing .jspec manifests
    #[arg(short, long, global = true, env = "JSPEC_REPOSITORY")]
    pub repository: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List packages in the repository
    List {
        /// Only show packages whose name contains this keyword
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show the packages each requirement resolves to
    Detail {
        /// Requirements, e.g. "jquery, jquery.ui.core 1.10.2"
        #[arg(long)]
        require: String,
        /// Resolve all requirements as one set
        #[arg(long)]
        together: bool,
    },

    /// Resolve requirements and package them into a zip archive
    Zip {
        /// Requirements, e.g. "jquery.ui.core; knockout-3.0"
        #[arg(long)]
        require: String,
        /// Archive to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
