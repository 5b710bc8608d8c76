//! Tracing subscriber setup.
//!
//! Command-line subcommands log to stderr. The interactive editor owns the
//! terminal, so it logs to a file in the config directory instead.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter(verbose: bool, quiet_level: &str) -> EnvFilter {
    let default = if verbose { "debug" } else { quiet_level };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Logs to stderr. `RUST_LOG` overrides the level chosen by `verbose`.
pub fn init_stderr(verbose: bool) {
    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter(verbose, "warn"))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Appends logs to `path`, creating its directory when needed.
pub fn init_file(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let _ = tracing_subscriber::registry()
        .with(filter(verbose, "info"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
    Ok(())
}
