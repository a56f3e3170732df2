//! File based logging. The terminal is owned by the UI, so nothing goes to stdout.
//!
//! Logs land in `<data dir>/recyclo/recyclo.log` unless `--log-file` says
//! otherwise. `RUST_LOG` overrides the default `info` filter.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "recyclo.log";

/// Install the global subscriber.
///
/// The returned guard must live until shutdown so buffered lines get flushed.
pub(crate) fn init(path: Option<&Path>) -> Result<WorkerGuard> {
    let path = path.map_or_else(default_path, Path::to_path_buf);

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(guard)
}

fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("recyclo")
        .join(LOG_FILE_NAME)
}
