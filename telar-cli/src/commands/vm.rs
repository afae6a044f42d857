//! `telar vm` commands: add, edit, rm.

use std::path::PathBuf;

use anyhow::Result;

use telar_core::config::Config;
use telar_core::{TelarError, VmForm};

use crate::banner;
use crate::commands;
use crate::session::Session;

/// Add a VM to the topology.
///
/// The name defaults to the next sequential `VM{n}` and the image to
/// the first catalog entry, the way the add form prefills.
pub async fn add(
    session_path: Option<PathBuf>,
    name: Option<String>,
    cpu: u32,
    ram: u32,
    disk: u32,
    image: Option<i64>,
) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;
    commands::ensure_catalog(&mut session, &config).await?;

    let name = name.unwrap_or_else(|| session.editor.suggest_name());
    let image_id = match image {
        Some(id) => id,
        None => first_image(&session)?,
    };
    let form = VmForm { name, cpu, ram, disk, image_id };
    let event = session.editor.add_vm(&form)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}

/// Edit a VM in place; omitted fields keep their current values.
pub async fn edit(
    session_path: Option<PathBuf>,
    name: &str,
    rename: Option<String>,
    cpu: Option<u32>,
    ram: Option<u32>,
    disk: Option<u32>,
    image: Option<i64>,
) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;
    commands::ensure_catalog(&mut session, &config).await?;

    let current = session
        .editor
        .graph()
        .get(name)
        .ok_or_else(|| TelarError::UnknownNode { name: name.to_string() })?
        .clone();
    let image_id = match image.or(current.image_id) {
        Some(id) => id,
        None => first_image(&session)?,
    };

    let form = VmForm {
        name: rename.unwrap_or_else(|| current.name.clone()),
        cpu: cpu.unwrap_or(current.cpu),
        ram: ram.unwrap_or(current.ram),
        disk: disk.unwrap_or(current.disk),
        image_id,
    };
    let event = session.editor.update_vm(name, &form)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}

/// Remove VMs; links touching them go too.
pub fn rm(session_path: Option<PathBuf>, names: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    let event = session.editor.remove_vms(&names)?;
    session.save()?;
    banner::event(&event);
    Ok(())
}

fn first_image(session: &Session) -> Result<i64> {
    session
        .editor
        .catalog()
        .first()
        .map(|img| img.id)
        .ok_or_else(|| TelarError::EmptyCatalog.into())
}
