//! `telar slices` commands: list, edit, rm.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use telar_core::config::Config;
use telar_core::{Provisioner, SliceStatus};

use crate::banner;
use crate::commands;
use crate::session::Session;

#[derive(Tabled)]
struct SliceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

/// List slices on the provisioning service.
pub async fn list() -> Result<()> {
    let config = Config::load()?;
    let client = commands::provisioner(&config)?;
    let slices = client.list_slices().await?;

    if slices.is_empty() {
        println!("No slices yet.");
        println!();
        println!("Compose a topology and create one with: {}", "telar save".cyan());
        return Ok(());
    }

    let rows: Vec<SliceRow> = slices
        .iter()
        .map(|s| SliceRow {
            id: s.slice_id,
            name: s.display_name().to_string(),
            status: colorize_status(s.status),
            created: format_created(s.created_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
    Ok(())
}

/// Load a slice into the editing session.
///
/// Deployed slices are immutable server-side, so only pending ones can
/// be loaded for editing.
pub async fn edit(session_path: Option<PathBuf>, id: i64) -> Result<()> {
    let config = Config::load()?;
    let client = commands::provisioner(&config)?;
    let slices = client.list_slices().await?;
    let slice = slices
        .iter()
        .find(|s| s.slice_id == id)
        .ok_or_else(|| anyhow::anyhow!("slice {id} not found"))?;

    if !slice.status.is_editable() {
        banner::warn(&format!(
            "slice {id} is {}, only {} slices can be edited",
            slice.status,
            SliceStatus::Pendiente
        ));
        return Ok(());
    }

    let mut session = Session::load(session_path, &config)?;
    let event = session.editor.load_slice(slice)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}

/// Delete a slice server-side, after confirmation.
pub async fn rm(id: i64, yes: bool) -> Result<()> {
    let config = Config::load()?;

    if !yes {
        print!("Delete slice {id}? [y/N]: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let client = commands::provisioner(&config)?;
    client.delete_slice(id).await?;
    banner::success(&format!("slice {id} deleted"));
    Ok(())
}

fn colorize_status(status: SliceStatus) -> String {
    match status {
        SliceStatus::Pendiente => status.to_string().yellow().to_string(),
        SliceStatus::Desplegado => status.to_string().green().to_string(),
        SliceStatus::Unknown => status.to_string().dimmed().to_string(),
    }
}

fn format_created(created: Option<DateTime<Utc>>) -> String {
    created
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
