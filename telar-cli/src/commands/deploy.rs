//! `telar deploy` command.

use std::path::PathBuf;

use anyhow::Result;

use telar_core::config::Config;

use crate::banner;
use crate::commands;
use crate::session::Session;

/// Deploy the saved slice onto its platform.
///
/// Refused locally when the slice has never been saved or carries
/// unsaved changes; the request only goes out for a clean, saved
/// slice.
pub async fn deploy(session_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;
    let client = commands::provisioner(&config)?;

    let spinner = commands::spinner("Requesting deployment...");
    let result = session.editor.deploy(&client).await;
    spinner.finish_and_clear();

    banner::event(&result?);
    Ok(())
}
