//! Template codec.
//!
//! Converts between the in-memory [`TopologyGraph`] and the template shape
//! used on the wire and in export files. The same shapes serve the
//! provisioning API, slice loading, and local import/export.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TelarError};
use crate::graph::TopologyGraph;
use crate::types::{Link, Platform, VmSpec};

/// Wire shape of one VM node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateNode {
    pub label: String,
    pub cpu: u32,
    pub ram: u32,
    pub disk: u32,
    #[serde(default)]
    pub image_id: Option<i64>,
}

/// Wire shape of one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLink {
    pub from_vm: String,
    pub to_vm: String,
}

/// The serializable topology, the unit of persistence and transfer.
///
/// `nodes` and `links` are both required on decode; a document missing
/// either is rejected wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub nodes: Vec<TemplateNode>,
    pub links: Vec<TemplateLink>,
}

impl Template {
    /// Canonical serialization for baseline comparison.
    ///
    /// Nodes are ordered by label and links by their normalized endpoint
    /// pair, so semantically identical templates always compare equal
    /// regardless of edit order or link direction.
    pub fn canonical_json(&self) -> Result<String> {
        let mut t = self.clone();
        for link in &mut t.links {
            if link.from_vm > link.to_vm {
                std::mem::swap(&mut link.from_vm, &mut link.to_vm);
            }
        }
        t.nodes.sort_by(|a, b| a.label.cmp(&b.label));
        t.links.sort_by(|a, b| (&a.from_vm, &a.to_vm).cmp(&(&b.from_vm, &b.to_vm)));
        Ok(serde_json::to_string(&t).map_err(anyhow::Error::new)?)
    }
}

/// Encode the live graph into its template shape, preserving order.
pub fn encode(graph: &TopologyGraph) -> Template {
    Template {
        nodes: graph
            .nodes()
            .iter()
            .map(|n| TemplateNode {
                label: n.name.clone(),
                cpu: n.cpu,
                ram: n.ram,
                disk: n.disk,
                image_id: n.image_id,
            })
            .collect(),
        links: graph
            .links()
            .iter()
            .map(|l| TemplateLink { from_vm: l.from.clone(), to_vm: l.to.clone() })
            .collect(),
    }
}

/// Decode a template into a graph, checking every graph invariant.
///
/// A repeated label or a link to an absent node rejects the whole
/// template; nothing is partially applied.
pub fn decode(template: &Template) -> Result<TopologyGraph> {
    let nodes = template
        .nodes
        .iter()
        .map(|n| VmSpec {
            name: n.label.clone(),
            cpu: n.cpu,
            ram: n.ram,
            disk: n.disk,
            image_id: n.image_id,
        })
        .collect();
    let links = template.links.iter().map(|l| Link::new(&l.from_vm, &l.to_vm)).collect();
    TopologyGraph::from_parts(nodes, links).map_err(|e| TelarError::malformed(e.to_string()))
}

/// Envelope written by `export` and read back by `import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyExport {
    #[serde(default = "default_import_name")]
    pub name: String,

    #[serde(default)]
    pub platform: Platform,

    pub template: Template,

    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

fn default_import_name() -> String {
    "imported-topology".to_string()
}

/// Default export filename: the slice name with whitespace collapsed to
/// underscores, plus a `_topology.json` suffix.
pub fn default_export_path(name: &str) -> PathBuf {
    let stem: String = name.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = if stem.is_empty() { "topology".to_string() } else { stem };
    PathBuf::from(format!("{stem}_topology.json"))
}

/// Write an export envelope as pretty JSON.
pub fn write_export(path: &Path, export: &TopologyExport) -> Result<()> {
    let json = serde_json::to_string_pretty(export).map_err(anyhow::Error::new)?;
    std::fs::write(path, json).map_err(|e| TelarError::io(path, e))
}

/// Read and decode an export envelope.
///
/// Any shape problem, from unreadable JSON to a missing `template.links`,
/// rejects the file wholesale.
pub fn read_export(path: &Path) -> Result<TopologyExport> {
    let raw = std::fs::read_to_string(path).map_err(|e| TelarError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| TelarError::malformed(e.to_string()))
}
