//! VM node type.

use serde::{Deserialize, Serialize};

/// A virtual machine node in a topology.
///
/// The name doubles as the node identifier and must be unique within a
/// topology. Renames go through the graph so that links are repointed
/// atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSpec {
    /// Unique name within the topology (node identifier)
    pub name: String,

    /// Virtual CPU count (at least 1)
    pub cpu: u32,

    /// Memory in MB (at least 256, in steps of 256)
    pub ram: u32,

    /// Disk size in GB (at least 1)
    pub disk: u32,

    /// Catalog image this VM boots from, if one has been assigned
    pub image_id: Option<i64>,
}

impl VmSpec {
    /// Create a spec with the given name and resource allocation.
    pub fn new(name: impl Into<String>, cpu: u32, ram: u32, disk: u32) -> Self {
        Self { name: name.into(), cpu, ram, disk, image_id: None }
    }

    /// Same spec with the given image assigned.
    #[must_use]
    pub fn with_image(mut self, image_id: i64) -> Self {
        self.image_id = Some(image_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_image() {
        let vm = VmSpec::new("VM1", 1, 512, 5).with_image(3);
        assert_eq!(vm.image_id, Some(3));
        assert_eq!(vm.name, "VM1");
    }
}
