//! Editing session controller.
//!
//! [`Editor`] wires user actions onto the graph, the validator, the
//! change tracker and the provisioning gateway, and enforces the
//! ordering between them: a deploy acts on exactly the persisted
//! template, never on unsaved edits. Operations return a tagged
//! [`EditorEvent`] on success; failures are classified [`TelarError`]s
//! and leave the session in the state it was in before the call.
//!
//! The whole session state serializes, so a CLI can park it in a file
//! between invocations and every command composes one continuous
//! editing session.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::client::{Provisioner, SlicePayload};
use crate::codec::{self, TopologyExport};
use crate::error::{Result, TelarError};
use crate::graph::patterns::Pattern;
use crate::graph::{LinkOutcome, TopologyGraph};
use crate::tracker::ChangeTracker;
use crate::types::{Image, Platform, Slice};
use crate::validate::{validate_form, VmForm};

/// Name a fresh session starts with, until the user picks one.
pub const UNTITLED_NAME: &str = "new-topology";

/// Whether the session is composing a new slice or editing a saved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No slice identity yet, the first save creates one.
    Creating,
    /// Bound to a saved slice, saves update it in place.
    Editing,
}

impl std::fmt::Display for EditorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorMode::Creating => write!(f, "creating"),
            EditorMode::Editing => write!(f, "editing"),
        }
    }
}

/// Tagged outcome of a successful editor operation.
///
/// The view layer collapses these into one transient banner per
/// command; the variants carry what the banner needs and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    VmAdded { name: String },
    VmUpdated { name: String, renamed_from: Option<String> },
    VmsRemoved { count: usize, links_removed: usize },
    Linked { from: String, to: String },
    AlreadyLinked { from: String, to: String },
    Unlinked { from: String, to: String },
    PatternApplied { pattern: Pattern, nodes: usize, links: usize },
    Imported { name: String, nodes: usize, links: usize },
    Exported { path: PathBuf },
    Saved { slice_id: i64, created: bool },
    Deployed { slice_id: i64, platform: Platform },
    SliceLoaded { slice_id: i64, name: String },
    NameSet { name: String },
    PlatformSet { platform: Platform },
    CatalogRefreshed { count: usize },
    Cleared,
}

/// The editing session: topology, change tracking, slice identity and
/// the cached image catalog.
///
/// The provisioner is passed into the operations that need it rather
/// than owned, so a serialized editor round-trips through a session
/// file untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Editor {
    graph: TopologyGraph,
    tracker: ChangeTracker,
    slice_id: Option<i64>,
    slice_name: String,
    platform: Platform,
    catalog: Vec<Image>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an empty session in creation mode.
    pub fn new() -> Self {
        Self {
            graph: TopologyGraph::new(),
            tracker: ChangeTracker::new(),
            slice_id: None,
            slice_name: UNTITLED_NAME.to_string(),
            platform: Platform::default(),
            catalog: Vec::new(),
        }
    }

    /// Create an empty session starting on the given platform.
    pub fn with_platform(platform: Platform) -> Self {
        let mut editor = Self::new();
        editor.platform = platform;
        editor
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn slice_id(&self) -> Option<i64> {
        self.slice_id
    }

    pub fn slice_name(&self) -> &str {
        &self.slice_name
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn catalog(&self) -> &[Image] {
        &self.catalog
    }

    /// Whether the topology differs from the last saved baseline.
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Creating until a save or a slice load binds an id.
    pub fn mode(&self) -> EditorMode {
        if self.slice_id.is_some() {
            EditorMode::Editing
        } else {
            EditorMode::Creating
        }
    }

    /// Default name for the next VM, the way the add form prefills it.
    pub fn suggest_name(&self) -> String {
        format!("VM{}", self.graph.node_count() + 1)
    }

    /// Replace the cached image catalog.
    pub fn set_catalog(&mut self, catalog: Vec<Image>) {
        self.catalog = catalog;
    }

    /// Fetch the image catalog when the cache is empty or a refresh is
    /// forced.
    pub async fn refresh_catalog<P>(&mut self, provisioner: &P, force: bool) -> Result<EditorEvent>
    where
        P: Provisioner + ?Sized,
    {
        if force || self.catalog.is_empty() {
            self.catalog = provisioner.list_images().await?;
        }
        Ok(EditorEvent::CatalogRefreshed {
            count: self.catalog.len(),
        })
    }

    /// Validate and admit a new VM.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub fn add_vm(&mut self, form: &VmForm) -> Result<EditorEvent> {
        let spec = validate_form(form, &self.graph, &self.catalog, None)?;
        let name = spec.name.clone();
        self.graph.add_node(spec)?;
        self.tracker.recompute(&self.graph)?;
        debug!(vms = self.graph.node_count(), "vm added");
        Ok(EditorEvent::VmAdded { name })
    }

    /// Validate and apply an edit to an existing VM, renaming it when
    /// the form carries a different name. A rename repoints every link
    /// touching the VM.
    #[instrument(skip(self, form), fields(vm = %name))]
    pub fn update_vm(&mut self, name: &str, form: &VmForm) -> Result<EditorEvent> {
        if !self.graph.contains(name) {
            return Err(TelarError::UnknownNode {
                name: name.to_string(),
            });
        }
        let spec = validate_form(form, &self.graph, &self.catalog, Some(name))?;
        let new_name = spec.name.clone();
        let renamed = new_name != name;
        self.graph.update_node(name, spec)?;
        self.tracker.recompute(&self.graph)?;
        Ok(EditorEvent::VmUpdated {
            name: new_name,
            renamed_from: renamed.then(|| name.to_string()),
        })
    }

    /// Remove the named VMs and every link touching them.
    #[instrument(skip(self))]
    pub fn remove_vms(&mut self, names: &[String]) -> Result<EditorEvent> {
        if names.is_empty() {
            return Err(TelarError::selection("select at least one VM to remove"));
        }
        let removed = self.graph.remove_nodes(names)?;
        let links_removed = removed.iter().map(|r| r.links.len()).sum();
        self.tracker.recompute(&self.graph)?;
        debug!(vms = self.graph.node_count(), links_removed, "vms removed");
        Ok(EditorEvent::VmsRemoved {
            count: removed.len(),
            links_removed,
        })
    }

    /// Connect a selection of exactly two VMs.
    ///
    /// Any other selection size is refused. An existing link in either
    /// direction reports [`EditorEvent::AlreadyLinked`] without
    /// duplicating it.
    #[instrument(skip(self))]
    pub fn connect(&mut self, selection: &[String]) -> Result<EditorEvent> {
        let [a, b] = selection else {
            return Err(TelarError::selection("select exactly two VMs to connect"));
        };
        match self.graph.add_link(a, b)? {
            LinkOutcome::AlreadyConnected => Ok(EditorEvent::AlreadyLinked {
                from: a.clone(),
                to: b.clone(),
            }),
            LinkOutcome::Added => {
                self.tracker.recompute(&self.graph)?;
                Ok(EditorEvent::Linked {
                    from: a.clone(),
                    to: b.clone(),
                })
            }
        }
    }

    /// Remove the link between two VMs, whichever way it was stored.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, a: &str, b: &str) -> Result<EditorEvent> {
        let link = self.graph.remove_link(a, b)?;
        self.tracker.recompute(&self.graph)?;
        Ok(EditorEvent::Unlinked {
            from: link.from,
            to: link.to,
        })
    }

    /// Replace the whole topology with a generated pattern.
    ///
    /// Destructive: the current graph is discarded, not merged. Every
    /// generated node gets the first catalog image, as the add form
    /// would.
    #[instrument(skip(self))]
    pub fn apply_pattern(&mut self, pattern: Pattern, size: u32) -> Result<EditorEvent> {
        let default_image = self.catalog.first().ok_or(TelarError::EmptyCatalog)?.id;
        let mut generated = pattern.generate(size);
        generated.assign_image(default_image);
        self.graph = generated;
        self.tracker.recompute(&self.graph)?;
        info!(pattern = %pattern, nodes = self.graph.node_count(), "pattern applied");
        Ok(EditorEvent::PatternApplied {
            pattern,
            nodes: self.graph.node_count(),
            links: self.graph.link_count(),
        })
    }

    /// Import a topology export file, replacing the session topology,
    /// name and platform.
    ///
    /// The file is decoded and checked completely before anything is
    /// touched, so a malformed file leaves the session as it was. The
    /// imported topology counts as unsaved until the next save.
    #[instrument(skip(self))]
    pub fn import(&mut self, path: &Path) -> Result<EditorEvent> {
        let export = codec::read_export(path)?;
        let graph = codec::decode(&export.template)?;

        self.slice_name = export.name;
        self.platform = export.platform;
        self.graph = graph;
        self.tracker.mark_dirty();
        info!(name = %self.slice_name, nodes = self.graph.node_count(), "topology imported");
        Ok(EditorEvent::Imported {
            name: self.slice_name.clone(),
            nodes: self.graph.node_count(),
            links: self.graph.link_count(),
        })
    }

    /// Export the topology to a file, wrapped with the slice name, the
    /// platform and a timestamp.
    ///
    /// `path` defaults to the slice name with whitespace collapsed to
    /// underscores plus a `_topology.json` suffix.
    #[instrument(skip(self))]
    pub fn export(&self, path: Option<PathBuf>) -> Result<EditorEvent> {
        if self.graph.is_empty() {
            return Err(TelarError::EmptyTopology);
        }
        let path = path.unwrap_or_else(|| codec::default_export_path(&self.slice_name));
        let export = TopologyExport {
            name: self.slice_name.clone(),
            platform: self.platform,
            template: codec::encode(&self.graph),
            exported_at: Some(Utc::now()),
        };
        codec::write_export(&path, &export)?;
        Ok(EditorEvent::Exported { path })
    }

    /// Rename the slice. Part of the persisted payload, so the session
    /// counts as changed even though the template itself is untouched.
    pub fn set_name(&mut self, name: impl Into<String>) -> EditorEvent {
        self.slice_name = name.into();
        self.tracker.mark_dirty();
        EditorEvent::NameSet {
            name: self.slice_name.clone(),
        }
    }

    /// Switch the deployment platform. Marks the session changed, like
    /// a rename.
    pub fn set_platform(&mut self, platform: Platform) -> EditorEvent {
        self.platform = platform;
        self.tracker.mark_dirty();
        EditorEvent::PlatformSet { platform }
    }

    /// Load a saved slice into the session, entering edit mode with a
    /// fresh baseline.
    ///
    /// A slice with no template, or one that does not decode, is
    /// rejected wholesale and the session keeps its prior contents.
    #[instrument(skip(self, slice), fields(slice_id = slice.slice_id))]
    pub fn load_slice(&mut self, slice: &Slice) -> Result<EditorEvent> {
        let template = slice
            .template
            .as_ref()
            .ok_or_else(|| TelarError::malformed("slice has no template"))?;
        let graph = codec::decode(template)?;

        self.graph = graph;
        self.slice_id = Some(slice.slice_id);
        self.slice_name = slice.display_name().to_string();
        self.tracker.reset_to(template)?;
        info!(name = %self.slice_name, "slice loaded for editing");
        Ok(EditorEvent::SliceLoaded {
            slice_id: slice.slice_id,
            name: self.slice_name.clone(),
        })
    }

    /// Reset the session: topology, slice identity, name and baseline.
    ///
    /// Unconditional and always available. The platform choice is kept.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> EditorEvent {
        self.graph.clear();
        self.tracker.clear();
        self.slice_id = None;
        self.slice_name = UNTITLED_NAME.to_string();
        EditorEvent::Cleared
    }

    fn payload(&self) -> SlicePayload {
        SlicePayload {
            name: self.slice_name.clone(),
            platform: self.platform,
            template: codec::encode(&self.graph),
        }
    }

    /// Persist the topology: create on first save, update afterwards.
    ///
    /// On success the session adopts the slice id, the baseline resets
    /// to the just-saved template and the session reads clean. On
    /// failure nothing changes and the caller may retry.
    #[instrument(skip(self, provisioner), fields(slice_id = ?self.slice_id, name = %self.slice_name))]
    pub async fn save<P>(&mut self, provisioner: &P) -> Result<EditorEvent>
    where
        P: Provisioner + ?Sized,
    {
        if self.graph.is_empty() {
            return Err(TelarError::EmptyTopology);
        }
        let payload = self.payload();
        let (slice_id, created) = match self.slice_id {
            Some(id) => {
                provisioner.update_slice(id, &payload).await?;
                (id, false)
            }
            None => {
                let id = provisioner.create_slice(&payload).await?;
                self.slice_id = Some(id);
                (id, true)
            }
        };
        self.tracker.reset_to(&payload.template)?;
        info!(slice_id, created, "slice saved");
        Ok(EditorEvent::Saved { slice_id, created })
    }

    /// Deploy the saved slice onto the current platform.
    ///
    /// Refused before any request goes out unless the slice has been
    /// saved and carries no unsaved changes, so the deployment acts on
    /// exactly the persisted template.
    #[instrument(skip(self, provisioner), fields(slice_id = ?self.slice_id))]
    pub async fn deploy<P>(&mut self, provisioner: &P) -> Result<EditorEvent>
    where
        P: Provisioner + ?Sized,
    {
        let slice_id = self.slice_id.ok_or(TelarError::NotSaved)?;
        if self.tracker.is_dirty() {
            return Err(TelarError::PendingChanges);
        }
        provisioner.deploy_slice(slice_id, self.platform).await?;
        info!(slice_id, platform = %self.platform, "deployment requested");
        Ok(EditorEvent::Deployed {
            slice_id,
            platform: self.platform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SliceStatus;

    fn catalog() -> Vec<Image> {
        vec![
            Image {
                id: 1,
                name: "ubuntu-22.04".into(),
            },
            Image {
                id: 7,
                name: "cirros-0.6".into(),
            },
        ]
    }

    fn editor() -> Editor {
        let mut editor = Editor::new();
        editor.set_catalog(catalog());
        editor
    }

    fn form(name: &str) -> VmForm {
        VmForm {
            name: name.into(),
            cpu: 1,
            ram: 512,
            disk: 5,
            image_id: 1,
        }
    }

    fn populated() -> Editor {
        let mut editor = editor();
        editor.add_vm(&form("VM1")).unwrap();
        editor.add_vm(&form("VM2")).unwrap();
        editor.connect(&["VM1".into(), "VM2".into()]).unwrap();
        editor
    }

    fn saved_slice(id: i64) -> Slice {
        Slice {
            slice_id: id,
            name: Some("lab".into()),
            slice_name: None,
            status: SliceStatus::Pendiente,
            template: Some(codec::encode(populated().graph())),
            created_at: None,
        }
    }

    #[test]
    fn test_fresh_editor_is_creating_and_clean() {
        let editor = editor();
        assert_eq!(editor.mode(), EditorMode::Creating);
        assert!(!editor.is_dirty());
        assert_eq!(editor.slice_name(), UNTITLED_NAME);
        assert!(editor.graph().is_empty());
    }

    #[test]
    fn test_add_vm_marks_dirty() {
        let mut editor = editor();
        let event = editor.add_vm(&form("VM1")).unwrap();
        assert_eq!(event, EditorEvent::VmAdded { name: "VM1".into() });
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_add_vm_duplicate_changes_nothing() {
        let mut editor = populated();
        let err = editor.add_vm(&form("VM1")).unwrap_err();
        assert!(matches!(err, TelarError::DuplicateName { .. }));
        assert_eq!(editor.graph().node_count(), 2);
    }

    #[test]
    fn test_update_vm_rename_repoints_links() {
        let mut editor = populated();
        let mut edited = form("core");
        edited.cpu = 4;
        let event = editor.update_vm("VM1", &edited).unwrap();
        assert_eq!(
            event,
            EditorEvent::VmUpdated {
                name: "core".into(),
                renamed_from: Some("VM1".into()),
            }
        );
        assert!(editor
            .graph()
            .links()
            .iter()
            .any(|l| l.connects("core", "VM2")));
        assert_eq!(editor.graph().get("core").unwrap().cpu, 4);
    }

    #[test]
    fn test_update_vm_same_name_is_not_a_rename() {
        let mut editor = populated();
        let mut edited = form("VM1");
        edited.ram = 1024;
        let event = editor.update_vm("VM1", &edited).unwrap();
        assert_eq!(
            event,
            EditorEvent::VmUpdated {
                name: "VM1".into(),
                renamed_from: None,
            }
        );
    }

    #[test]
    fn test_update_vm_unknown_node() {
        let mut editor = editor();
        let err = editor.update_vm("ghost", &form("ghost")).unwrap_err();
        assert!(matches!(err, TelarError::UnknownNode { .. }));
    }

    #[test]
    fn test_connect_requires_exactly_two() {
        let mut editor = populated();
        editor.add_vm(&form("VM3")).unwrap();

        let err = editor.connect(&["VM1".into()]).unwrap_err();
        assert!(matches!(err, TelarError::Selection { .. }));

        let err = editor
            .connect(&["VM1".into(), "VM2".into(), "VM3".into()])
            .unwrap_err();
        assert!(matches!(err, TelarError::Selection { .. }));
    }

    #[test]
    fn test_connect_reports_existing_link() {
        let mut editor = populated();
        // reversed endpoints still count as the same link
        let event = editor.connect(&["VM2".into(), "VM1".into()]).unwrap();
        assert_eq!(
            event,
            EditorEvent::AlreadyLinked {
                from: "VM2".into(),
                to: "VM1".into(),
            }
        );
        assert_eq!(editor.graph().link_count(), 1);
    }

    #[test]
    fn test_disconnect_either_direction() {
        let mut editor = populated();
        let event = editor.disconnect("VM2", "VM1").unwrap();
        assert_eq!(
            event,
            EditorEvent::Unlinked {
                from: "VM1".into(),
                to: "VM2".into(),
            }
        );
        assert_eq!(editor.graph().link_count(), 0);
    }

    #[test]
    fn test_remove_vms_requires_selection() {
        let mut editor = populated();
        let err = editor.remove_vms(&[]).unwrap_err();
        assert!(matches!(err, TelarError::Selection { .. }));
    }

    #[test]
    fn test_remove_vms_reports_cascade() {
        let mut editor = populated();
        let event = editor.remove_vms(&["VM1".into()]).unwrap();
        assert_eq!(
            event,
            EditorEvent::VmsRemoved {
                count: 1,
                links_removed: 1,
            }
        );
        assert_eq!(editor.graph().node_count(), 1);
        assert_eq!(editor.graph().link_count(), 0);
    }

    #[test]
    fn test_apply_pattern_assigns_first_catalog_image() {
        let mut editor = editor();
        let event = editor.apply_pattern(Pattern::Bus, 3).unwrap();
        assert_eq!(
            event,
            EditorEvent::PatternApplied {
                pattern: Pattern::Bus,
                nodes: 4,
                links: 3,
            }
        );
        assert!(editor.graph().nodes().iter().all(|n| n.image_id == Some(1)));
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_apply_pattern_replaces_previous_topology() {
        let mut editor = populated();
        editor.apply_pattern(Pattern::Linear, 3).unwrap();
        assert_eq!(editor.graph().node_names(), vec!["VM1", "VM2", "VM3"]);
        assert_eq!(editor.graph().link_count(), 2);
    }

    #[test]
    fn test_apply_pattern_needs_a_catalog() {
        let mut editor = Editor::new();
        let err = editor.apply_pattern(Pattern::Mesh, 3).unwrap_err();
        assert!(matches!(err, TelarError::EmptyCatalog));
        assert!(editor.graph().is_empty());
    }

    #[test]
    fn test_suggest_name_counts_up() {
        let mut editor = editor();
        assert_eq!(editor.suggest_name(), "VM1");
        editor.add_vm(&form("VM1")).unwrap();
        assert_eq!(editor.suggest_name(), "VM2");
    }

    #[test]
    fn test_load_slice_enters_editing_clean() {
        let mut editor = editor();
        let event = editor.load_slice(&saved_slice(9)).unwrap();
        assert_eq!(
            event,
            EditorEvent::SliceLoaded {
                slice_id: 9,
                name: "lab".into(),
            }
        );
        assert_eq!(editor.mode(), EditorMode::Editing);
        assert!(!editor.is_dirty());
        assert_eq!(editor.graph().node_count(), 2);

        // a mutation against the fresh baseline reads dirty again
        editor.add_vm(&form("VM3")).unwrap();
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_load_slice_without_template_keeps_state() {
        let mut editor = populated();
        let slice = Slice {
            slice_id: 5,
            name: None,
            slice_name: None,
            status: SliceStatus::Pendiente,
            template: None,
            created_at: None,
        };
        let err = editor.load_slice(&slice).unwrap_err();
        assert!(matches!(err, TelarError::MalformedTemplate { .. }));
        assert_eq!(editor.graph().node_count(), 2);
        assert_eq!(editor.mode(), EditorMode::Creating);
    }

    #[test]
    fn test_set_name_marks_a_clean_session_dirty() {
        let mut editor = editor();
        editor.load_slice(&saved_slice(3)).unwrap();
        assert!(!editor.is_dirty());

        editor.set_name("renamed");
        assert_eq!(editor.slice_name(), "renamed");
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_set_platform_marks_a_clean_session_dirty() {
        let mut editor = editor();
        editor.load_slice(&saved_slice(3)).unwrap();

        editor.set_platform(Platform::Openstack);
        assert_eq!(editor.platform(), Platform::Openstack);
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_clear_keeps_platform_and_resets_the_rest() {
        let mut editor = populated();
        editor.set_platform(Platform::Aws);
        editor.set_name("lab");

        let event = editor.clear();
        assert_eq!(event, EditorEvent::Cleared);
        assert!(editor.graph().is_empty());
        assert_eq!(editor.slice_name(), UNTITLED_NAME);
        assert_eq!(editor.platform(), Platform::Aws);
        assert_eq!(editor.mode(), EditorMode::Creating);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_export_refuses_empty_topology() {
        let editor = editor();
        let err = editor.export(None).unwrap_err();
        assert!(matches!(err, TelarError::EmptyTopology));
    }

    #[test]
    fn test_editor_serde_round_trip() {
        let mut editor = populated();
        editor.set_name("web tier");
        editor.set_platform(Platform::Openstack);

        let json = serde_json::to_string(&editor).unwrap();
        let back: Editor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.graph(), editor.graph());
        assert_eq!(back.slice_name(), editor.slice_name());
        assert_eq!(back.platform(), editor.platform());
        assert_eq!(back.is_dirty(), editor.is_dirty());
        assert_eq!(back.catalog(), editor.catalog());
    }
}
