//! `telar save` command.

use std::path::PathBuf;

use anyhow::Result;

use telar_core::config::Config;

use crate::banner;
use crate::commands;
use crate::session::Session;

/// Persist the slice: create on first save, update afterwards.
pub async fn save(session_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;
    let client = commands::provisioner(&config)?;

    let spinner = commands::spinner("Saving slice...");
    let result = session.editor.save(&client).await;
    spinner.finish_and_clear();

    let event = result?;
    session.save()?;
    banner::event(&event);
    Ok(())
}
