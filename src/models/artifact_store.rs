use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A configured artifact store: a named, plugin-backed profile describing
/// where build artifacts get published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactStore {
    pub id: String,
    pub plugin_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<StoreProperty>,
    /// Per-field validation errors, attached when a write is rejected.
    /// Never persisted; present on the wire only when non-empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// One key/value configuration property handed to the store plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProperty {
    pub key: String,
    pub value: String,
}

impl ArtifactStore {
    pub fn new(id: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            plugin_id: plugin_id.into(),
            properties: Vec::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// POST body for creating a store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub id: String,
    pub plugin_id: String,
    #[serde(default)]
    pub properties: Vec<StoreProperty>,
}

impl From<CreateStoreRequest> for ArtifactStore {
    fn from(req: CreateStoreRequest) -> Self {
        Self {
            id: req.id,
            plugin_id: req.plugin_id,
            properties: req.properties,
            errors: BTreeMap::new(),
        }
    }
}

/// Top-level object wrapping the full collection for the list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoresResponse {
    pub artifact_stores: Vec<ArtifactStore>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_uses_camel_case() {
        let store = ArtifactStore::new("s3", "cd.go.artifact.s3");
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["id"], "s3");
        assert_eq!(json["pluginId"], "cd.go.artifact.s3");
        assert!(json.get("errors").is_none());
        assert!(json.get("properties").is_none());
    }

    #[test]
    fn test_errors_serialized_when_present() {
        let mut store = ArtifactStore::new("s3", "cd.go.artifact.s3");
        store.add_error("id", "taken");
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["errors"]["id"][0], "taken");
    }

    #[test]
    fn test_request_body_parses_scenario_shape() {
        let req: CreateStoreRequest =
            serde_json::from_str(r#"{"id":"s3","pluginId":"cd.go.artifact.s3"}"#).unwrap();
        assert_eq!(req.id, "s3");
        assert_eq!(req.plugin_id, "cd.go.artifact.s3");
        assert!(req.properties.is_empty());
    }
}
