//! VM form validation.
//!
//! A candidate VM goes through [`validate_form`] before it is admitted to
//! the graph. Validation is synchronous and never mutates anything; the
//! editor mutates only on success.

use crate::error::{Result, TelarError};
use crate::graph::TopologyGraph;
use crate::types::image::find_image;
use crate::types::{Image, VmSpec};

/// Minimum RAM in MB; allocations must also be a multiple of this.
pub const RAM_STEP: u32 = 256;

/// A candidate VM as entered by the operator.
#[derive(Debug, Clone)]
pub struct VmForm {
    pub name: String,
    pub cpu: u32,
    pub ram: u32,
    pub disk: u32,
    pub image_id: i64,
}

/// Check a form against the live graph and the image catalog.
///
/// `editing` names the node being edited in place, if any; its own name
/// does not count as a duplicate. Resource violations are aggregated into
/// one error naming every failing field.
pub fn validate_form(
    form: &VmForm,
    graph: &TopologyGraph,
    catalog: &[Image],
    editing: Option<&str>,
) -> Result<VmSpec> {
    if catalog.is_empty() {
        return Err(TelarError::EmptyCatalog);
    }

    let name = form.name.trim();
    if name.is_empty() {
        return Err(TelarError::EmptyName);
    }
    let taken = graph.contains(name) && editing != Some(name);
    if taken {
        return Err(TelarError::DuplicateName { name: name.to_string() });
    }

    let mut fields = Vec::new();
    if form.cpu < 1 {
        fields.push("cpu must be at least 1".to_string());
    }
    if form.ram < RAM_STEP {
        fields.push(format!("ram must be at least {RAM_STEP} MB"));
    } else if form.ram % RAM_STEP != 0 {
        fields.push(format!("ram must be a multiple of {RAM_STEP} MB"));
    }
    if form.disk < 1 {
        fields.push("disk must be at least 1 GB".to_string());
    }
    if !fields.is_empty() {
        return Err(TelarError::InvalidResources { fields });
    }

    if find_image(catalog, form.image_id).is_none() {
        return Err(TelarError::UnknownImage { image_id: form.image_id });
    }

    Ok(VmSpec::new(name, form.cpu, form.ram, form.disk).with_image(form.image_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Image> {
        vec![Image { id: 1, name: "ubuntu-22.04".into() }, Image { id: 2, name: "cirros".into() }]
    }

    fn form(name: &str) -> VmForm {
        VmForm { name: name.into(), cpu: 1, ram: 256, disk: 2, image_id: 1 }
    }

    #[test]
    fn test_valid_form_becomes_a_spec() {
        let graph = TopologyGraph::new();
        let spec = validate_form(&form("  VM1  "), &graph, &catalog(), None).unwrap();
        assert_eq!(spec.name, "VM1");
        assert_eq!(spec.image_id, Some(1));
    }

    #[test]
    fn test_empty_name_rejected() {
        let graph = TopologyGraph::new();
        let err = validate_form(&form("   "), &graph, &catalog(), None).unwrap_err();
        assert!(matches!(err, TelarError::EmptyName));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut graph = TopologyGraph::new();
        graph.add_node(VmSpec::new("VM1", 1, 512, 5)).unwrap();

        let err = validate_form(&form("VM1"), &graph, &catalog(), None).unwrap_err();
        assert!(matches!(err, TelarError::DuplicateName { name } if name == "VM1"));
    }

    #[test]
    fn test_editing_keeps_own_name() {
        let mut graph = TopologyGraph::new();
        graph.add_node(VmSpec::new("VM1", 1, 512, 5)).unwrap();
        graph.add_node(VmSpec::new("VM2", 1, 512, 5)).unwrap();

        // Re-submitting VM1's own name while editing VM1 is fine
        assert!(validate_form(&form("VM1"), &graph, &catalog(), Some("VM1")).is_ok());
        // Renaming VM1 onto VM2 is not
        let err = validate_form(&form("VM2"), &graph, &catalog(), Some("VM1")).unwrap_err();
        assert!(matches!(err, TelarError::DuplicateName { .. }));
    }

    #[test]
    fn test_resource_violations_are_aggregated() {
        let graph = TopologyGraph::new();
        let bad = VmForm { name: "VM1".into(), cpu: 0, ram: 100, disk: 0, image_id: 1 };
        let err = validate_form(&bad, &graph, &catalog(), None).unwrap_err();
        match err {
            TelarError::InvalidResources { fields } => assert_eq!(fields.len(), 3),
            other => panic!("expected InvalidResources, got {other:?}"),
        }
    }

    #[test]
    fn test_ram_must_follow_the_step() {
        let graph = TopologyGraph::new();
        let odd = VmForm { name: "VM1".into(), cpu: 1, ram: 300, disk: 2, image_id: 1 };
        let err = validate_form(&odd, &graph, &catalog(), None).unwrap_err();
        match err {
            TelarError::InvalidResources { fields } => {
                assert_eq!(fields.len(), 1);
                assert!(fields[0].contains("multiple"));
            }
            other => panic!("expected InvalidResources, got {other:?}"),
        }
    }

    #[test]
    fn test_image_must_resolve() {
        let graph = TopologyGraph::new();
        let mut f = form("VM1");
        f.image_id = 99;
        let err = validate_form(&f, &graph, &catalog(), None).unwrap_err();
        assert!(matches!(err, TelarError::UnknownImage { image_id: 99 }));
    }

    #[test]
    fn test_empty_catalog_wins_over_field_checks() {
        let graph = TopologyGraph::new();
        let err = validate_form(&form(""), &graph, &[], None).unwrap_err();
        assert!(matches!(err, TelarError::EmptyCatalog));
    }
}
