//! `telar images` command.

use std::path::PathBuf;

use anyhow::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use telar_core::config::Config;

use crate::commands;
use crate::session::Session;

/// List the image catalog, going to the service when the session cache
/// is empty or a refresh is forced.
pub async fn images(session_path: Option<PathBuf>, refresh: bool) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    if refresh || session.editor.catalog().is_empty() {
        let client = commands::provisioner(&config)?;
        session.editor.refresh_catalog(&client, refresh).await?;
        session.save()?;
    }

    let catalog = session.editor.catalog();
    if catalog.is_empty() {
        println!("No images available from the provisioning service.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct ImageRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "NAME")]
        name: String,
    }

    let rows: Vec<ImageRow> = catalog
        .iter()
        .map(|img| ImageRow { id: img.id, name: img.name.clone() })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
    Ok(())
}
