use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Sends `log` records to an append-only file; the terminal belongs to the TUI.
pub fn init(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let (filter, rejected) = parse_filter(level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))?;

    if let Some(err) = rejected {
        log::warn!("invalid log filter {level:?} ({err}); falling back to {DEFAULT_FILTER}");
    }
    Ok(())
}

const DEFAULT_FILTER: &str = "info";

/// An unparsable directive falls back to `info` and hands back the parse error.
fn parse_filter(level: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_FILTER), Some(err)),
    }
}
