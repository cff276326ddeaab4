//! File-backed tracing setup. The TUI owns stdout, so log lines go to a file
//! under the application data directory instead. Initialization is best
//! effort: a missing home directory or unwritable disk silently disables
//! logging rather than taking the application down.

use std::fs::{self, File};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config;

const LOG_FILE_NAME: &str = "lending-desk.log";

/// Install the global tracing subscriber. Safe to call once at startup;
/// repeated calls are no-ops.
pub fn init() {
    let Ok(dir) = config::data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE_NAME)) else {
        return;
    };

    let filter = EnvFilter::try_from_env(config::LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
