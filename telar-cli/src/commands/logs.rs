//! `telar logs` command.

use anyhow::Result;
use colored::Colorize;

use telar_core::config::Config;
use telar_core::Provisioner;

use crate::commands;

/// Print the provisioning service's log feed.
pub async fn logs() -> Result<()> {
    let config = Config::load()?;
    let client = commands::provisioner(&config)?;
    let entries = client.fetch_logs().await?;

    if entries.is_empty() {
        println!("No logs available.");
        return Ok(());
    }

    for entry in entries {
        if entry.timestamp.is_empty() {
            println!("{}", entry.message);
        } else {
            println!("{} {}", entry.timestamp.dimmed(), entry.message);
        }
    }
    Ok(())
}
