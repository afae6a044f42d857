//! `telar clear` command.

use std::path::PathBuf;

use anyhow::Result;

use telar_core::config::Config;

use crate::banner;
use crate::session::Session;

/// Reset the editing session. Keeps the platform choice and the cached
/// image catalog.
pub fn clear(session_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    let event = session.editor.clear();
    session.save()?;
    banner::event(&event);
    Ok(())
}
