//! # pxdiag
//!
//! Offline pxctl-style shell over a captured Portworx diagnostic bundle.
//!
//! ## Features
//!
//! - **Bundle loading**: extracts the `.tar.gz` into a scoped temporary directory
//! - **Command resolution**: pxctl and host commands, abbreviations, `-j`, volume IDs
//! - **Filters**: `| grep`, `| egrep`, `| less`, `| more` on any text output
//! - **Volume views**: `volume list` table, `volume inspect` detail, raw JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pxdiag::bundle::Bundle;
//! use pxdiag::cli::shell::Shell;
//! use pxdiag::command::CommandResolver;
//! use pxdiag::config::PagerConfig;
//! use pxdiag::stream::ProcessPager;
//! use std::path::Path;
//!
//! # fn main() -> pxdiag::Result<()> {
//! let bundle = Bundle::open(Path::new("diags.tar.gz"))?;
//! let pager = ProcessPager::new(PagerConfig::default());
//! let mut shell = Shell::new(&bundle, CommandResolver::default(), pager, "pxctl> ".into());
//!
//! let mut out = std::io::stdout();
//! shell.execute("pxctl volume list", &mut out)?;
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod stream;
pub mod volume;

// Re-export commonly used types
pub use bundle::Bundle;
pub use command::{CommandResolver, FilterSpec, ParsedCommand};
pub use error::{Error, Result};
pub use volume::{VolumeDataset, VolumeRecord, VolumeRegistry};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
