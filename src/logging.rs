//! Tracing output for fraudform.
//!
//! Events go to stdout and to `<app dir>/logs/fraudform_<launch time>.log`.
//! Only the newest launches keep their files.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::{app_dirs, form::timestamp::local_offset};

const KEPT_LAUNCH_LOGS: usize = 10;
const LOG_PREFIX: &str = "fraudform_";
const LOG_EXTENSION: &str = ".log";
const FILE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot prune launch logs in {path}: {source}")]
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot format log file name: {0}")]
    FileStamp(#[from] time::error::Format),
    #[error("A global tracing subscriber is already installed: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the stdout and file subscriber once per process.
///
/// `RUST_LOG` overrides the default `info` filter. On error nothing is
/// installed and the app runs without logs.
pub fn init() -> Result<(), LoggingError> {
    if FILE_WRITER_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;
    let offset = local_offset();
    let file_name = launch_log_name(OffsetDateTime::now_utc().to_offset(offset))?;
    let log_path = log_dir.join(&file_name);
    touch(&log_path)?;
    prune_launch_logs(&log_dir, KEPT_LAUNCH_LOGS)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, file_name));
    let timer = fmt::time::OffsetTime::new(offset, LINE_STAMP);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing::subscriber::set_global_default(
        Registry::default()
            .with(filter)
            .with(fmt::layer().with_timer(timer.clone()))
            .with(fmt::layer().with_ansi(false).with_timer(timer).with_writer(file_writer)),
    )?;
    let _ = FILE_WRITER_GUARD.set(guard);

    tracing::info!(path = %log_path.display(), "Writing launch log");
    Ok(())
}

fn launch_log_name(launched: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!("{LOG_PREFIX}{}{LOG_EXTENSION}", launched.format(FILE_STAMP)?))
}

fn touch(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|source| LoggingError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Delete all but the `keep` newest launch logs. Other files are left alone.
///
/// Names embed the launch time, so name order is launch order.
fn prune_launch_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let prune_error = |source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut launches: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(prune_error)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_launch_log(path))
        .collect();
    launches.sort();
    let surplus = launches.len().saturating_sub(keep);
    for path in launches.drain(..surplus) {
        fs::remove_file(&path).map_err(prune_error)?;
    }
    Ok(())
}

fn is_launch_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOG_PREFIX) && name.ends_with(LOG_EXTENSION))
}
