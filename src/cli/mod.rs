//! Command-line interface for pxdiag.
//!
//! The process takes one archive argument and then runs an interactive
//! pxctl-style session against it.

use clap::Parser;
use std::path::PathBuf;

pub mod help;
pub mod shell;

/// One-line usage printed when the archive argument is missing or doubled
pub const USAGE: &str = "Usage: pxdiag <diag.tar.gz>";

/// pxdiag - offline pxctl shell over a captured diagnostic bundle
#[derive(Parser, Debug)]
#[command(name = "pxdiag")]
#[command(about = "Explore a Portworx diagnostic bundle with pxctl-style commands")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Diagnostic bundle (.tar.gz) or an already extracted bundle directory
    pub archive: Option<PathBuf>,

    /// Anything after the archive; only used to detect misuse
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (defaults to the per-user config location)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The archive path, if exactly one positional argument was given
    pub fn archive_path(&self) -> Option<&PathBuf> {
        if self.extra.is_empty() {
            self.archive.as_ref()
        } else {
            None
        }
    }
}
