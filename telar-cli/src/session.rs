//! Editing-session persistence.
//!
//! A session file carries the whole editor state (topology, slice
//! identity, name, platform, change baseline, cached image catalog)
//! between invocations, so consecutive commands compose one continuous
//! editing session. Commands load it, act and write it back.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use telar_core::config::Config;
use telar_core::{paths, Editor};

pub struct Session {
    path: PathBuf,
    pub editor: Editor,
}

impl Session {
    /// Load the session at `path`, or at the default location when
    /// none is given. A missing file starts a fresh editor on the
    /// configured platform; a file that does not parse is an error, not
    /// a silent reset.
    pub fn load(path: Option<PathBuf>, config: &Config) -> Result<Self> {
        let path = path.unwrap_or_else(paths::session_path);
        let editor = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read session {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("session file {} is not valid", path.display()))?
        } else {
            debug!(path = %path.display(), "no session file, starting fresh");
            Editor::with_platform(config.platform)
        };
        Ok(Self { path, editor })
    }

    /// Write the session back to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.editor)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session {}", self.path.display()))?;
        debug!(path = %self.path.display(), "session written");
        Ok(())
    }
}
