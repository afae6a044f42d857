//! `telar connect` / `telar disconnect` commands.

use std::path::PathBuf;

use anyhow::Result;

use telar_core::config::Config;

use crate::banner;
use crate::session::Session;

/// Connect exactly two VMs. A duplicate link is a warning, not an
/// error, and nothing is added.
pub fn connect(session_path: Option<PathBuf>, vms: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    let event = session.editor.connect(&vms)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}

/// Remove the link between two VMs, whichever way it was created.
pub fn disconnect(session_path: Option<PathBuf>, a: &str, b: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    let event = session.editor.disconnect(a, b)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}
