//! Unsaved-change tracking.
//!
//! The tracker holds a frozen canonical serialization of the last loaded
//! or saved template and derives a dirty flag from it. For a topology
//! that has never been saved there is no baseline; any node at all counts
//! as an unsaved change.

use serde::{Deserialize, Serialize};

use crate::codec::{self, Template};
use crate::error::Result;
use crate::graph::TopologyGraph;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeTracker {
    baseline: Option<String>,
    dirty: bool,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Freeze the given template as the new baseline and clear the flag.
    ///
    /// Called when a slice is loaded for editing and after every
    /// successful save.
    pub fn reset_to(&mut self, template: &Template) -> Result<()> {
        self.baseline = Some(template.canonical_json()?);
        self.dirty = false;
        Ok(())
    }

    /// Recompute the flag from the current graph.
    ///
    /// With a baseline, dirty means the canonical form differs from it;
    /// without one, dirty means the graph is non-empty.
    pub fn recompute(&mut self, graph: &TopologyGraph) -> Result<bool> {
        self.dirty = match &self.baseline {
            Some(baseline) => codec::encode(graph).canonical_json()? != *baseline,
            None => !graph.is_empty(),
        };
        Ok(self.dirty)
    }

    /// Force the flag on without touching the baseline.
    ///
    /// Used for edits that are part of the persisted payload but not of
    /// the template itself (slice name, platform) and after an import.
    /// A later [`recompute`](Self::recompute) derives the flag from the
    /// baseline again.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Drop the baseline and the flag, as when the editor is cleared.
    pub fn clear(&mut self) {
        self.baseline = None;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VmSpec;

    fn one_node_graph() -> TopologyGraph {
        let mut g = TopologyGraph::new();
        g.add_node(VmSpec::new("VM1", 1, 512, 5)).unwrap();
        g
    }

    #[test]
    fn test_without_baseline_any_node_is_dirty() {
        let mut tracker = ChangeTracker::new();
        assert!(!tracker.recompute(&TopologyGraph::new()).unwrap());
        assert!(tracker.recompute(&one_node_graph()).unwrap());
    }

    #[test]
    fn test_clean_after_reset_dirty_after_mutation() {
        let mut graph = one_node_graph();
        let mut tracker = ChangeTracker::new();
        tracker.reset_to(&codec::encode(&graph)).unwrap();
        assert!(!tracker.is_dirty());

        graph.add_node(VmSpec::new("VM2", 1, 512, 5)).unwrap();
        assert!(tracker.recompute(&graph).unwrap());

        // Undoing the mutation compares clean again
        graph.remove_node("VM2").unwrap();
        assert!(!tracker.recompute(&graph).unwrap());
    }

    #[test]
    fn test_comparison_is_canonical_not_positional() {
        let mut graph = TopologyGraph::new();
        graph.add_node(VmSpec::new("VM1", 1, 512, 5)).unwrap();
        graph.add_node(VmSpec::new("VM2", 1, 512, 5)).unwrap();
        graph.add_link("VM1", "VM2").unwrap();

        let mut tracker = ChangeTracker::new();
        tracker.reset_to(&codec::encode(&graph)).unwrap();

        // Same topology rebuilt in a different order
        let mut rebuilt = TopologyGraph::new();
        rebuilt.add_node(VmSpec::new("VM2", 1, 512, 5)).unwrap();
        rebuilt.add_node(VmSpec::new("VM1", 1, 512, 5)).unwrap();
        rebuilt.add_link("VM2", "VM1").unwrap();
        assert!(!tracker.recompute(&rebuilt).unwrap());
    }

    #[test]
    fn test_mark_dirty_survives_until_recompute() {
        let graph = one_node_graph();
        let mut tracker = ChangeTracker::new();
        tracker.reset_to(&codec::encode(&graph)).unwrap();

        tracker.mark_dirty();
        assert!(tracker.is_dirty());

        // A recompute against an unchanged graph clears the forced flag
        assert!(!tracker.recompute(&graph).unwrap());
    }

    #[test]
    fn test_clear_drops_the_baseline() {
        let graph = one_node_graph();
        let mut tracker = ChangeTracker::new();
        tracker.reset_to(&codec::encode(&graph)).unwrap();
        tracker.clear();

        assert!(!tracker.has_baseline());
        assert!(!tracker.is_dirty());
        assert!(tracker.recompute(&graph).unwrap());
    }
}
