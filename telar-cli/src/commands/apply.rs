//! `telar apply` command: generated topologies.

use std::path::PathBuf;

use anyhow::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use telar_core::config::Config;
use telar_core::Pattern;

use crate::banner;
use crate::commands;
use crate::session::Session;

#[derive(Tabled)]
struct PatternRow {
    #[tabled(rename = "PATTERN")]
    name: &'static str,
    #[tabled(rename = "PARAMETER")]
    parameter: &'static str,
    #[tabled(rename = "DEFAULT")]
    default: u32,
    #[tabled(rename = "MIN")]
    min: u32,
    #[tabled(rename = "DESCRIPTION")]
    description: &'static str,
}

/// Apply a pattern, or list the available patterns when none is given.
///
/// Applying replaces the whole topology.
pub async fn apply(
    session_path: Option<PathBuf>,
    pattern: Option<Pattern>,
    size: Option<u32>,
) -> Result<()> {
    let Some(pattern) = pattern else {
        list_patterns();
        return Ok(());
    };

    let size = size.unwrap_or_else(|| pattern.default_size());
    if size < pattern.min_size() {
        banner::warn(&format!(
            "{pattern} needs a size of at least {}",
            pattern.min_size()
        ));
        return Ok(());
    }

    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;
    commands::ensure_catalog(&mut session, &config).await?;

    let event = session.editor.apply_pattern(pattern, size)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}

fn list_patterns() {
    let rows: Vec<PatternRow> = Pattern::all()
        .iter()
        .map(|p| PatternRow {
            name: p.as_str(),
            parameter: p.parameter_label(),
            default: p.default_size(),
            min: p.min_size(),
            description: p.describe(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
