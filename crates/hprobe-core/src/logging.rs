//! Diagnostic logging
//!
//! Tracing output goes to a daily file under the user's data directory so
//! stdout only ever carries result entries. Files are named
//! `hprobe.YYYY-MM-DD.log`, dated in UTC like the appender rotates them.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable controlling the diagnostic log filter
pub const LOG_ENV_VAR: &str = "HPROBE_LOG";

const DEFAULT_FILTER: &str = "hybrid_probe=info,hprobe_app=info,warn";
const FILE_PREFIX: &str = "hprobe";
const FILE_SUFFIX: &str = "log";

/// Install the file subscriber, returning the directory logs are written to
///
/// ```bash
/// HPROBE_LOG=debug hprobe route 'myapp://home'
/// ```
pub fn init() -> Result<PathBuf> {
    let dir = log_directory();
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(FILE_PREFIX)
        .filename_suffix(FILE_SUFFIX)
        .build(&dir)
        .map_err(|e| Error::logging(e.to_string()))?;

    let timer = fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string());
    let file_layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_timer(timer);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::logging(e.to_string()))?;

    tracing::info!(dir = %dir.display(), "Hybrid Probe starting");
    Ok(dir)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `<data_local_dir>/hybrid-probe/logs`, or `./hybrid-probe/logs` without one
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hybrid-probe")
        .join("logs")
}

/// File the appender writes to on `date`
pub fn log_file_for(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!(
        "{}.{}.{}",
        FILE_PREFIX,
        date.format("%Y-%m-%d"),
        FILE_SUFFIX
    ))
}

/// File receiving today's log lines
pub fn current_log_file() -> PathBuf {
    log_file_for(&log_directory(), Utc::now().date_naive())
}
