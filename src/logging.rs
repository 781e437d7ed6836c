//! Tracing setup for the shell.
//!
//! Output goes to stderr so log lines never mix with command output.

use tracing_subscriber::EnvFilter;

/// Default directive when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
pub fn build_filter(verbose: bool, level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if verbose {
        EnvFilter::new("pxdiag=debug")
    } else {
        EnvFilter::try_new(format!("pxdiag={}", level))
            .unwrap_or_else(|_| EnvFilter::new(format!("pxdiag={}", DEFAULT_LEVEL)))
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init_logging(verbose: bool, level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .try_init();
}
