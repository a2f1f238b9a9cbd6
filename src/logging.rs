//! File logging.
//!
//! The visualizer draws over the whole terminal, so `tracing` events are written
//! to a daily file under the state directory instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;

const LOG_FILE_PREFIX: &str = "stereobars.log";

/// A week of daily files.
const MAX_LOG_FILES: usize = 7;

/// Dropping the guard stops the background writer, so it lives in a static.
static APPENDER_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Installs the global subscriber and prunes old files first.
///
/// `RUST_LOG` selects the level, `info` when unset or unparsable.
///
/// # Errors
/// - If no state directory can be found or created
/// - If called twice
pub fn init_logging() -> Result<(), anyhow::Error> {
    let log_dir = get_log_dir()?;

    if let Err(e) = cleanup_old_logs(&log_dir) {
        eprintln!("Warning: could not prune logs in {}: {e}", log_dir.display());
    }

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    APPENDER_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("init_logging called more than once"))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .init();

    tracing::debug!("Writing logs to {}", log_dir.display());
    Ok(())
}

/// `$XDG_STATE_HOME/stereobars`, falling back to `~/.local/state/stereobars`.
fn get_log_dir() -> Result<PathBuf, anyhow::Error> {
    let state_home = match std::env::var_os("XDG_STATE_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .map(|home| home.join(".local/state"))
            .ok_or_else(|| anyhow::anyhow!("no home directory for log files"))?,
    };
    let log_dir = state_home.join("stereobars");
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

/// Removes all but the `MAX_LOG_FILES` most recently modified daily files.
fn cleanup_old_logs(log_dir: &Path) -> Result<(), anyhow::Error> {
    let mut rotated: Vec<(PathBuf, std::time::SystemTime)> = fs::read_dir(log_dir)?
        .filter_map(Result::ok)
        .filter(|entry| is_rotated_log(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| {
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((entry.path(), modified))
        })
        .collect();

    rotated.sort_by_key(|(_, modified)| std::cmp::Reverse(*modified));

    for (path, _) in rotated.into_iter().skip(MAX_LOG_FILES) {
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Could not remove {}: {e}", path.display());
        }
    }

    Ok(())
}

/// Matches `stereobars.log.YYYY-MM-DD`, the names `rolling::daily` produces.
fn is_rotated_log(file_name: &str) -> bool {
    file_name
        .strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| date.matches('-').count() == 2)
}
