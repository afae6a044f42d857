//! Image catalog type.

use serde::{Deserialize, Serialize};

/// An entry in the backend's image catalog.
///
/// The editor never invents image ids; everything comes from the catalog
/// fetch and is referenced by id from VM nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Backend-assigned identifier
    pub id: i64,

    /// Human-readable name (e.g. "ubuntu-22.04")
    pub name: String,
}

/// Find a catalog entry by id.
pub fn find_image(catalog: &[Image], id: i64) -> Option<&Image> {
    catalog.iter().find(|img| img.id == id)
}
