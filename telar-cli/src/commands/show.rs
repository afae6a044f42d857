//! `telar status`, `telar name`, `telar platform` commands.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use telar_core::config::Config;
use telar_core::types::image::find_image;
use telar_core::{Editor, Platform};

use crate::banner;
use crate::session::Session;

#[derive(Tabled)]
struct VmRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CPU")]
    cpu: u32,
    #[tabled(rename = "RAM")]
    ram: String,
    #[tabled(rename = "DISK")]
    disk: String,
    #[tabled(rename = "IMAGE")]
    image: String,
    #[tabled(rename = "LINKS")]
    links: usize,
}

/// Show the editing session: slice identity, dirty state, VM table and
/// links.
pub fn status(session_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let session = Session::load(session_path, &config)?;
    let editor = &session.editor;

    println!("{}: {}", "Slice".bold(), editor.slice_name());
    println!("{}: {}", "Mode".bold(), editor.mode());
    println!("{}: {}", "Platform".bold(), editor.platform());
    match editor.slice_id() {
        Some(id) => println!("{}: {}", "Slice id".bold(), id),
        None => println!("{}: {}", "Slice id".bold(), "not saved yet".dimmed()),
    }
    println!(
        "{}: {}   {}: {}",
        "VMs".bold(),
        editor.graph().node_count(),
        "Links".bold(),
        editor.graph().link_count()
    );
    if editor.is_dirty() {
        println!("{}", "● unsaved changes".yellow());
    }

    if editor.graph().node_count() > 0 {
        println!();
        let rows: Vec<VmRow> = editor
            .graph()
            .nodes()
            .iter()
            .map(|vm| VmRow {
                name: vm.name.clone(),
                cpu: vm.cpu,
                ram: ram_label(vm.ram),
                disk: format!("{}G", vm.disk),
                image: image_label(editor, vm.image_id),
                links: editor.graph().links_of(&vm.name).len(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::modern());
        println!("{table}");
    }

    if editor.graph().link_count() > 0 {
        println!();
        for link in editor.graph().links() {
            println!("  {link}");
        }
    }

    Ok(())
}

/// Set the slice name for the session.
pub fn set_name(session_path: Option<PathBuf>, name: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    let event = session.editor.set_name(name);
    session.save()?;
    banner::event(&event);
    Ok(())
}

/// Set the deployment platform for the session.
pub fn set_platform(session_path: Option<PathBuf>, platform: Platform) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(session_path, &config)?;

    let event = session.editor.set_platform(platform);
    session.save()?;
    banner::event(&event);
    Ok(())
}

fn ram_label(mb: u32) -> String {
    if mb >= 1024 && mb % 1024 == 0 {
        format!("{}G", mb / 1024)
    } else {
        format!("{}M", mb)
    }
}

fn image_label(editor: &Editor, image_id: Option<i64>) -> String {
    match image_id {
        None => "-".to_string(),
        Some(id) => find_image(editor.catalog(), id)
            .map(|img| img.name.clone())
            .unwrap_or_else(|| format!("#{id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_label() {
        assert_eq!(ram_label(256), "256M");
        assert_eq!(ram_label(512), "512M");
        assert_eq!(ram_label(1024), "1G");
        assert_eq!(ram_label(1536), "1536M");
        assert_eq!(ram_label(4096), "4G");
    }

    #[test]
    fn test_image_label_falls_back_to_id() {
        let mut editor = Editor::new();
        editor.set_catalog(vec![telar_core::Image {
            id: 3,
            name: "ubuntu-22.04".into(),
        }]);
        assert_eq!(image_label(&editor, Some(3)), "ubuntu-22.04");
        assert_eq!(image_label(&editor, Some(9)), "#9");
        assert_eq!(image_label(&editor, None), "-");
    }
}
