//! Slice types as returned by the provisioning service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::Template;

/// A slice persisted on the provisioning service.
///
/// The service is loose about some fields: the display name may arrive as
/// `name` or `slice_name`, and `template` may be a JSON object or a string
/// containing JSON. Deserialization accepts all of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slice {
    /// Backend-assigned identifier
    pub slice_id: i64,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Alternate display name field some endpoints use
    #[serde(default)]
    pub slice_name: Option<String>,

    /// Lifecycle status
    pub status: SliceStatus,

    /// The persisted topology, absent on some listing endpoints
    #[serde(default, deserialize_with = "template_or_string")]
    pub template: Option<Template>,

    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Slice {
    /// Display name, falling back across the service's two name fields.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.slice_name.as_deref())
            .unwrap_or("unnamed")
    }
}

/// Slice lifecycle status on the provisioning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SliceStatus {
    /// Saved but not yet deployed
    Pendiente,

    /// Deployed
    Desplegado,

    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl SliceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "PENDIENTE",
            Self::Desplegado => "DESPLEGADO",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Only pending slices can be re-opened in the editor.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Pendiente)
    }
}

impl std::fmt::Display for SliceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line from the provisioning service's log feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp as the service formats it
    #[serde(default)]
    pub timestamp: String,

    /// Log message
    #[serde(default)]
    pub message: String,
}

/// Accepts a template as an object or as a string containing JSON.
fn template_or_string<'de, D>(deserializer: D) -> Result<Option<Template>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Object(Template),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Object(t)) => Ok(Some(t)),
        Some(Raw::Text(s)) => serde_json::from_str(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_as_object() {
        let slice: Slice = serde_json::from_str(
            r#"{
                "slice_id": 7,
                "name": "lab",
                "status": "PENDIENTE",
                "template": {
                    "nodes": [{"label": "VM1", "cpu": 1, "ram": 512, "disk": 5, "image_id": 1}],
                    "links": []
                }
            }"#,
        )
        .unwrap();
        let template = slice.template.unwrap();
        assert_eq!(template.nodes.len(), 1);
        assert_eq!(template.nodes[0].label, "VM1");
    }

    #[test]
    fn test_template_as_string_decodes_identically() {
        let inner = r#"{"nodes":[{"label":"VM1","cpu":1,"ram":512,"disk":5,"image_id":1}],"links":[]}"#;
        let body = serde_json::json!({
            "slice_id": 7,
            "name": "lab",
            "status": "PENDIENTE",
            "template": inner,
        });
        let slice: Slice = serde_json::from_value(body).unwrap();
        let template = slice.template.unwrap();
        assert_eq!(template.nodes[0].label, "VM1");
        assert_eq!(template.nodes[0].ram, 512);
    }

    #[test]
    fn test_display_name_fallback() {
        let slice: Slice = serde_json::from_str(
            r#"{"slice_id": 1, "slice_name": "alt", "status": "DESPLEGADO"}"#,
        )
        .unwrap();
        assert_eq!(slice.display_name(), "alt");

        let slice: Slice =
            serde_json::from_str(r#"{"slice_id": 2, "status": "PENDIENTE"}"#).unwrap();
        assert_eq!(slice.display_name(), "unnamed");
    }

    #[test]
    fn test_unknown_status_tolerated() {
        let slice: Slice =
            serde_json::from_str(r#"{"slice_id": 3, "status": "ARCHIVED"}"#).unwrap();
        assert_eq!(slice.status, SliceStatus::Unknown);
        assert!(!slice.status.is_editable());
    }

    #[test]
    fn test_editable_only_when_pending() {
        assert!(SliceStatus::Pendiente.is_editable());
        assert!(!SliceStatus::Desplegado.is_editable());
    }
}
