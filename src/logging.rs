//! Tracing setup: stdout plus one log file per launch.
//!
//! Each launch opens a fresh timestamped file under the app's log directory
//! and older files beyond a fixed count are deleted.

use std::{fs, io, path::PathBuf, sync::OnceLock, time::SystemTime};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

const KEEP_LOG_FILES: usize = 10;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Filesystem work in the log directory failed.
    #[error("log directory {path}: {source}")]
    LogDir { path: PathBuf, source: io::Error },
    #[error("formatting log filename: {0}")]
    FileName(#[from] time::error::Format),
    #[error("installing tracing subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Calling more than once is a no-op.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let dir = app_dirs::logs_dir()?;
    let file_name = launch_file_name(local_now())?;
    prune_old_logs(&dir)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&dir, &file_name));
    let timer = wall_clock_timer();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(file = %dir.join(&file_name).display(), "logging started");
    Ok(())
}

fn launch_file_name(now: OffsetDateTime) -> Result<String, time::error::Format> {
    const STAMP: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("riskscope_{}.log", now.format(STAMP)?))
}

fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn wall_clock_timer()
-> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const STAMP: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, STAMP.into())
}

/// Delete the oldest `.log` files so at most `KEEP_LOG_FILES - 1` remain
/// before the new launch file is opened.
fn prune_old_logs(dir: &std::path::Path) -> Result<(), LoggingError> {
    let in_dir = |source: io::Error| LoggingError::LogDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut logs: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)
        .map_err(in_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "log"))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();

    logs.sort_by_key(|(modified, _)| *modified);
    let excess = logs.len().saturating_sub(KEEP_LOG_FILES - 1);
    for (_, path) in logs.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::LogDir { path, source })?;
    }
    Ok(())
}
