//! CLI command implementations.

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use telar_core::config::Config;
use telar_core::ProvisionerClient;

use crate::session::Session;

pub mod apply;
pub mod clear;
pub mod deploy;
pub mod images;
pub mod link;
pub mod logs;
pub mod save;
pub mod show;
pub mod slices;
pub mod transfer;
pub mod vm;

/// Build the REST client from the loaded configuration.
pub(crate) fn provisioner(config: &Config) -> Result<ProvisionerClient> {
    ProvisionerClient::new(config.api_url.as_str(), config.token.clone())
        .context("failed to create provisioning client")
}

/// Fetch the image catalog into the session when the cache is empty.
pub(crate) async fn ensure_catalog(session: &mut Session, config: &Config) -> Result<()> {
    if session.editor.catalog().is_empty() {
        let client = provisioner(config)?;
        session.editor.refresh_catalog(&client, false).await?;
    }
    Ok(())
}

/// Spinner shown while a request is in flight.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
