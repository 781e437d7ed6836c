//! pxdiag - offline pxctl shell
//!
//! Main binary entry point: load the bundle, then run the session on stdin/stdout.

use anyhow::{Context, Result};
use clap::Parser;
use pxdiag::cli::shell::Shell;
use pxdiag::cli::{Cli, USAGE};
use pxdiag::command::{AliasTable, CommandResolver};
use pxdiag::config::Config;
use pxdiag::stream::ProcessPager;
use pxdiag::Bundle;
use std::io;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let archive = match cli.archive_path() {
        Some(path) => path.clone(),
        None => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    pxdiag::logging::init_logging(cli.verbose, &config.logging.level);

    info!("Starting pxdiag v{}", pxdiag::VERSION);

    // Dropped on every return path below, removing the extracted tree
    let bundle = Bundle::open(&archive)
        .with_context(|| format!("Failed to load diag bundle {}", archive.display()))?;

    let resolver = CommandResolver::new(AliasTable::new());
    let pager = ProcessPager::new(config.pager.clone());
    let mut shell = Shell::new(&bundle, resolver, pager, config.shell.prompt.clone());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)?;

    info!("Session ended");
    Ok(())
}
