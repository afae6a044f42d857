//! Status banners.
//!
//! The editor returns tagged events and classified errors; this module
//! collapses them into the single colored line a command prints.
//! Refused preconditions come out as yellow warnings, real failures as
//! red errors.

use colored::Colorize;
use telar_core::{EditorEvent, ErrorClass, TelarError};

#[derive(Debug)]
enum Tone {
    Success,
    Info,
    Warning,
}

/// Print the banner for a successful editor operation.
pub fn event(event: &EditorEvent) {
    let (tone, text) = describe(event);
    match tone {
        Tone::Success => success(&text),
        Tone::Info => info(&text),
        Tone::Warning => warn(&text),
    }
}

fn describe(event: &EditorEvent) -> (Tone, String) {
    match event {
        EditorEvent::VmAdded { name } => (Tone::Success, format!("VM \"{name}\" added")),
        EditorEvent::VmUpdated { name, renamed_from: Some(old) } => (
            Tone::Success,
            format!("VM \"{old}\" updated and renamed to \"{name}\""),
        ),
        EditorEvent::VmUpdated { name, renamed_from: None } => {
            (Tone::Success, format!("VM \"{name}\" updated"))
        }
        EditorEvent::VmsRemoved { count, links_removed: 0 } => {
            (Tone::Success, format!("{count} VM(s) removed"))
        }
        EditorEvent::VmsRemoved { count, links_removed } => (
            Tone::Success,
            format!("{count} VM(s) removed along with {links_removed} link(s)"),
        ),
        EditorEvent::Linked { from, to } => {
            (Tone::Success, format!("{from} and {to} connected"))
        }
        EditorEvent::AlreadyLinked { from, to } => {
            (Tone::Warning, format!("{from} and {to} are already connected"))
        }
        EditorEvent::Unlinked { from, to } => {
            (Tone::Success, format!("link {from} -- {to} removed"))
        }
        EditorEvent::PatternApplied { pattern, nodes, links } => (
            Tone::Success,
            format!("{pattern} topology applied: {nodes} VMs, {links} links"),
        ),
        EditorEvent::Imported { name, nodes, links } => (
            Tone::Success,
            format!("imported \"{name}\": {nodes} VMs, {links} links"),
        ),
        EditorEvent::Exported { path } => (
            Tone::Success,
            format!("topology exported to {}", path.display()),
        ),
        EditorEvent::Saved { slice_id, created: true } => {
            (Tone::Success, format!("slice created (id {slice_id})"))
        }
        EditorEvent::Saved { created: false, .. } => {
            (Tone::Success, "slice updated".to_string())
        }
        EditorEvent::Deployed { slice_id, platform } => (
            Tone::Success,
            format!(
                "deployment of slice {slice_id} started on {}",
                platform.as_str().to_uppercase()
            ),
        ),
        EditorEvent::SliceLoaded { slice_id, name } => {
            (Tone::Info, format!("editing slice {slice_id}: \"{name}\""))
        }
        EditorEvent::NameSet { name } => (Tone::Info, format!("slice name set to \"{name}\"")),
        EditorEvent::PlatformSet { platform } => {
            (Tone::Info, format!("platform set to {platform}"))
        }
        EditorEvent::CatalogRefreshed { count } => {
            (Tone::Info, format!("{count} image(s) in the catalog"))
        }
        EditorEvent::Cleared => (Tone::Info, "topology cleared".to_string()),
    }
}

/// Print the banner for a failed command.
pub fn failure(err: &anyhow::Error) {
    match err.downcast_ref::<TelarError>() {
        Some(te) if te.class() == ErrorClass::Precondition => {
            eprintln!("{} {te}", "⚠".yellow().bold());
        }
        Some(te) => eprintln!("{} {te}", "✗".red().bold()),
        None => eprintln!("{} {err:#}", "✗".red().bold()),
    }
}

pub fn success(text: &str) {
    println!("{} {text}", "✓".green().bold());
}

pub fn info(text: &str) {
    println!("{} {text}", "→".cyan().bold());
}

pub fn warn(text: &str) {
    println!("{} {text}", "⚠".yellow().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use telar_core::Platform;

    #[test]
    fn test_describe_saved_and_deployed() {
        let (tone, text) = describe(&EditorEvent::Saved { slice_id: 42, created: true });
        assert!(matches!(tone, Tone::Success));
        assert!(text.contains("42"));

        let (_, text) = describe(&EditorEvent::Saved { slice_id: 42, created: false });
        assert_eq!(text, "slice updated");

        let (_, text) = describe(&EditorEvent::Deployed {
            slice_id: 7,
            platform: Platform::Aws,
        });
        assert!(text.contains("AWS"));
    }

    #[test]
    fn test_describe_duplicate_link_warns() {
        let (tone, _) = describe(&EditorEvent::AlreadyLinked {
            from: "VM1".into(),
            to: "VM2".into(),
        });
        assert!(matches!(tone, Tone::Warning));
    }

    #[test]
    fn test_describe_export_shows_path() {
        let (_, text) = describe(&EditorEvent::Exported {
            path: PathBuf::from("lab_topology.json"),
        });
        assert!(text.contains("lab_topology.json"));
    }

    #[test]
    fn test_describe_cascade_mentions_links() {
        let (_, text) = describe(&EditorEvent::VmsRemoved { count: 2, links_removed: 3 });
        assert!(text.contains("2 VM(s)"));
        assert!(text.contains("3 link(s)"));

        let (_, text) = describe(&EditorEvent::VmsRemoved { count: 1, links_removed: 0 });
        assert!(!text.contains("link"));
    }
}
