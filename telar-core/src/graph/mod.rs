//! In-memory topology graph.
//!
//! `TopologyGraph` is the single source of truth for the topology being
//! edited: a set of uniquely named VM nodes plus the undirected links
//! between them. Every mutation either upholds the graph invariants or
//! fails without touching anything:
//! - node names are unique
//! - link endpoints reference existing nodes
//! - at most one link per unordered node pair
//!
//! Mutators return typed deltas so callers (the editor, the change
//! tracker) can react to exactly what happened instead of diffing state.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TelarError};
use crate::types::{Link, VmSpec};

pub mod patterns;


/// Outcome of [`TopologyGraph::add_link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link was added.
    Added,
    /// An equivalent link (in either direction) already existed.
    AlreadyConnected,
}

/// A node removed by a cascade delete, along with every link it took down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedNode {
    pub spec: VmSpec,
    pub links: Vec<Link>,
}

/// The topology currently being edited.
///
/// Node order is insertion order and is preserved across encode/decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyGraph {
    nodes: Vec<VmSpec>,
    links: Vec<Link>,
}

impl TopologyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from parts, checking every invariant.
    pub fn from_parts(nodes: Vec<VmSpec>, links: Vec<Link>) -> Result<Self> {
        let mut graph = Self::new();
        for spec in nodes {
            graph.add_node(spec)?;
        }
        for link in links {
            graph.add_link(&link.from, &link.to)?;
        }
        Ok(graph)
    }

    pub fn nodes(&self) -> &[VmSpec] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&VmSpec> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Names of all nodes, in insertion order.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    /// Links touching the given node.
    pub fn links_of(&self, name: &str) -> Vec<&Link> {
        self.links.iter().filter(|l| l.touches(name)).collect()
    }

    /// Add a node. Fails if the name is already taken.
    pub fn add_node(&mut self, spec: VmSpec) -> Result<()> {
        if self.contains(&spec.name) {
            return Err(TelarError::DuplicateName { name: spec.name });
        }
        self.nodes.push(spec);
        Ok(())
    }

    /// Replace the node called `name` with `spec`, repointing links on rename.
    ///
    /// Returns the number of link endpoints that were repointed. The check
    /// for a name collision happens before anything is touched, so a failed
    /// update leaves the graph exactly as it was.
    pub fn update_node(&mut self, name: &str, spec: VmSpec) -> Result<usize> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.name == name)
            .ok_or_else(|| TelarError::UnknownNode { name: name.to_string() })?;

        let renamed = spec.name != name;
        if renamed && self.contains(&spec.name) {
            return Err(TelarError::DuplicateName { name: spec.name });
        }

        let mut repointed = 0;
        if renamed {
            for link in &mut self.links {
                if link.from == name {
                    link.from = spec.name.clone();
                    repointed += 1;
                }
                if link.to == name {
                    link.to = spec.name.clone();
                    repointed += 1;
                }
            }
        }
        self.nodes[idx] = spec;
        Ok(repointed)
    }

    /// Remove a node and every link touching it, as one operation.
    pub fn remove_node(&mut self, name: &str) -> Result<RemovedNode> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.name == name)
            .ok_or_else(|| TelarError::UnknownNode { name: name.to_string() })?;

        let spec = self.nodes.remove(idx);
        let (removed, kept): (Vec<Link>, Vec<Link>) =
            self.links.drain(..).partition(|l| l.touches(name));
        self.links = kept;
        Ok(RemovedNode { spec, links: removed })
    }

    /// Remove several nodes at once.
    ///
    /// All names are verified up front; if any is unknown, nothing is
    /// removed. A link between two removed nodes is reported once, with
    /// the first of its endpoints in `names`.
    pub fn remove_nodes(&mut self, names: &[String]) -> Result<Vec<RemovedNode>> {
        for name in names {
            if !self.contains(name) {
                return Err(TelarError::UnknownNode { name: name.clone() });
            }
        }
        let mut removed = Vec::with_capacity(names.len());
        for name in names {
            removed.push(self.remove_node(name)?);
        }
        Ok(removed)
    }

    /// Add an undirected link between two existing nodes.
    ///
    /// `(a, b)` and `(b, a)` are the same link; adding it twice reports
    /// [`LinkOutcome::AlreadyConnected`] without duplicating anything.
    pub fn add_link(&mut self, a: &str, b: &str) -> Result<LinkOutcome> {
        if a == b {
            return Err(TelarError::selection("cannot link a VM to itself"));
        }
        for name in [a, b] {
            if !self.contains(name) {
                return Err(TelarError::UnknownNode { name: name.to_string() });
            }
        }
        if self.links.iter().any(|l| l.connects(a, b)) {
            return Ok(LinkOutcome::AlreadyConnected);
        }
        self.links.push(Link::new(a, b));
        Ok(LinkOutcome::Added)
    }

    /// Remove the link between two nodes, in either direction.
    pub fn remove_link(&mut self, a: &str, b: &str) -> Result<Link> {
        let idx = self
            .links
            .iter()
            .position(|l| l.connects(a, b))
            .ok_or_else(|| TelarError::selection(format!("no link between '{a}' and '{b}'")))?;
        Ok(self.links.remove(idx))
    }

    /// Assign the given catalog image to every node.
    ///
    /// Used when a generated topology is applied; the generators
    /// themselves never pick images.
    pub fn assign_image(&mut self, image_id: i64) {
        for node in &mut self.nodes {
            node.image_id = Some(image_id);
        }
    }

    /// Drop every node and link.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }
}
