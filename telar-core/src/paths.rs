//! Centralized path configuration.
//!
//! Every file location goes through this module so the CLI, the config
//! and the session store agree on where things live.

use std::path::PathBuf;

/// Get the telar data directory.
///
/// Resolution order:
/// 1. `TELAR_DATA_DIR` environment variable
/// 2. `~/.telar`
/// 3. `.telar` in the working directory when no home is known
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TELAR_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".telar"))
        .unwrap_or_else(|| PathBuf::from(".telar"))
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Get the default editing-session file path.
///
/// `TELAR_SESSION` overrides the location; a `--session` flag on the
/// CLI overrides both.
pub fn session_path() -> PathBuf {
    if let Ok(path) = std::env::var("TELAR_SESSION") {
        return PathBuf::from(path);
    }
    data_dir().join("session.json")
}
