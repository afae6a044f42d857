//! Canonical topology generators.
//!
//! Each pattern deterministically produces a complete node/link set from a
//! single size parameter. Generated graphs always validate: names are
//! sequential (`VM1`, `VM2`, ...) and every link endpoint exists.
//!
//! Applying a pattern replaces the whole topology; merging into an
//! existing graph is intentionally not offered.

use crate::types::{Link, VmSpec};

use super::TopologyGraph;

/// Resource allocation for generated nodes.
const NODE_CPU: u32 = 1;
const NODE_RAM: u32 = 512;
const NODE_DISK: u32 = 5;

/// The bus hub gets a heavier allocation than the leaf nodes.
const HUB_NAME: &str = "VM_Central";
const HUB_CPU: u32 = 2;
const HUB_RAM: u32 = 1024;
const HUB_DISK: u32 = 10;

/// A named topology shape the generator knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A chain: VM1 - VM2 - ... - VMn.
    Linear,
    /// A chain closed back onto itself (for more than two nodes).
    Ring,
    /// Every node linked to every other node.
    Mesh,
    /// A binary tree, one root, grown level by level.
    Tree,
    /// A central hub with n leaf nodes hanging off it.
    Bus,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ring => "ring",
            Self::Mesh => "mesh",
            Self::Tree => "tree",
            Self::Bus => "bus",
        }
    }

    /// All patterns, for listings and help text.
    pub fn all() -> &'static [Pattern] {
        &[Self::Linear, Self::Ring, Self::Mesh, Self::Tree, Self::Bus]
    }

    /// One-line description for listings.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Linear => "VMs connected in a chain",
            Self::Ring => "a chain closed into a ring",
            Self::Mesh => "every VM connected to every other",
            Self::Tree => "a binary tree grown level by level",
            Self::Bus => "leaf VMs hanging off a central hub",
        }
    }

    /// What the size parameter means for this pattern.
    pub fn parameter_label(&self) -> &'static str {
        match self {
            Self::Tree => "levels",
            _ => "VM count",
        }
    }

    pub fn default_size(&self) -> u32 {
        match self {
            Self::Tree => 3,
            _ => 5,
        }
    }

    pub fn min_size(&self) -> u32 {
        match self {
            Self::Tree => 2,
            _ => 3,
        }
    }

    /// Generate the complete topology for this pattern at the given size.
    pub fn generate(&self, size: u32) -> TopologyGraph {
        let (nodes, links) = match self {
            Self::Linear => linear(size),
            Self::Ring => ring(size),
            Self::Mesh => mesh(size),
            Self::Tree => tree(size),
            Self::Bus => bus(size),
        };
        TopologyGraph { nodes, links }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "ring" => Ok(Self::Ring),
            "mesh" => Ok(Self::Mesh),
            "tree" => Ok(Self::Tree),
            "bus" => Ok(Self::Bus),
            other => Err(format!(
                "unknown pattern: {other} (expected linear, ring, mesh, tree or bus)"
            )),
        }
    }
}

fn node(name: impl Into<String>) -> VmSpec {
    VmSpec::new(name, NODE_CPU, NODE_RAM, NODE_DISK)
}

fn linear(n: u32) -> (Vec<VmSpec>, Vec<Link>) {
    let nodes: Vec<VmSpec> = (1..=n).map(|i| node(format!("VM{i}"))).collect();
    let links = (1..n).map(|i| Link::new(format!("VM{i}"), format!("VM{}", i + 1))).collect();
    (nodes, links)
}

fn ring(n: u32) -> (Vec<VmSpec>, Vec<Link>) {
    let (nodes, mut links) = linear(n);
    // A two-node ring would duplicate the single chain link.
    if n > 2 {
        links.push(Link::new(format!("VM{n}"), "VM1"));
    }
    (nodes, links)
}

fn mesh(n: u32) -> (Vec<VmSpec>, Vec<Link>) {
    let nodes: Vec<VmSpec> = (1..=n).map(|i| node(format!("VM{i}"))).collect();
    let mut links = Vec::new();
    for i in 1..=n {
        for j in (i + 1)..=n {
            links.push(Link::new(format!("VM{i}"), format!("VM{j}")));
        }
    }
    (nodes, links)
}

/// Pre-order growth: the first level creates the single root, every level
/// below it creates two children per parent. Numbering follows creation
/// order, so tree(3) is VM1 over VM2 (VM3, VM4) and VM5 (VM6, VM7).
fn tree(levels: u32) -> (Vec<VmSpec>, Vec<Link>) {
    fn grow(
        level: u32,
        levels: u32,
        parent: Option<&str>,
        counter: &mut u32,
        nodes: &mut Vec<VmSpec>,
        links: &mut Vec<Link>,
    ) {
        if level > levels {
            return;
        }
        let children = if level == 1 { 1 } else { 2 };
        for _ in 0..children {
            *counter += 1;
            let name = format!("VM{counter}");
            nodes.push(node(&name));
            if let Some(parent) = parent {
                links.push(Link::new(parent, &name));
            }
            grow(level + 1, levels, Some(&name), counter, nodes, links);
        }
    }

    let mut nodes = Vec::new();
    let mut links = Vec::new();
    let mut counter = 0;
    grow(1, levels, None, &mut counter, &mut nodes, &mut links);
    (nodes, links)
}

fn bus(n: u32) -> (Vec<VmSpec>, Vec<Link>) {
    let mut nodes = vec![VmSpec::new(HUB_NAME, HUB_CPU, HUB_RAM, HUB_DISK)];
    let mut links = Vec::new();
    for i in 1..=n {
        let name = format!("VM{i}");
        nodes.push(node(&name));
        links.push(Link::new(HUB_NAME, &name));
    }
    (nodes, links)
}
