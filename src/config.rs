//! Runtime configuration: where the library service lives and where this
//! application keeps its own files.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Service root used when no override is present. Matches the development
/// default of the backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable that overrides the service base URL.
pub const API_URL_VAR: &str = "LENDING_DESK_API_URL";

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_VAR: &str = "LENDING_DESK_LOG";

/// Folder name used beneath the user's home directory for application data
/// (currently just the log file).
const DATA_DIR_NAME: &str = ".lending-desk";

/// Resolve the API base URL from the environment, falling back to the
/// default for blank or unset values.
pub fn api_base_url() -> String {
    resolve_base_url(env::var(API_URL_VAR).ok())
}

fn resolve_base_url(configured: Option<String>) -> String {
    configured
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Resolve the absolute path of the application data directory inside the
/// user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
