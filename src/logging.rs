use std::{
    fs::{self, File, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use directories::BaseDirs;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::DIR_NAME;

const LOG_FILE: &str = "egg-timer.log";

/// Sends `tracing` output to a file under the data dir.
///
/// The terminal belongs to the UI, so when no log file can be opened logging
/// is simply dropped.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match open_log_file() {
        Some((path, file)) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %path.display(), "logging initialized");
        }
        None => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn open_log_file() -> Option<(PathBuf, File)> {
    let dirs = BaseDirs::new()?;
    let dir = dirs.data_dir().join(DIR_NAME);
    fs::create_dir_all(&dir).ok()?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    Some((path, file))
}
