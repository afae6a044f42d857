//! `telar export` / `telar import` commands.

use std::path::{Path, PathBuf};

use anyhow::Result;

use telar_core::config::Config;

use crate::banner;
use crate::session::Session;

/// Write the topology to a JSON export file.
pub fn export(session_path: Option<PathBuf>, path: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let session = Session::load(session_path, &config)?;

    let event = session.editor.export(path)?;
    banner::event(&event);
    Ok(())
}

/// Load a topology from an export file, replacing the current one.
pub fn import(session_path: Option<PathBuf>, path: &Path) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    let event = session.editor.import(path)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}
