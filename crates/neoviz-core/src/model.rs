//! Export document models.
//!
//! The field names follow what force-graph style visualization libraries
//! expect: a `nodes` array, a `links` array with `source`/`target` ids, and
//! a `metadata` block.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node type used when the source node carries no labels.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Property keys consulted for the display label, in priority order.
const LABEL_KEYS: &[&str] = &["name", "title", "label", "id"];

/// A normalized graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub properties: Map<String, Value>,
    pub neo4j_id: String,
}

impl NodeRecord {
    /// Build a node from its internal identity, labels and properties.
    pub fn from_parts(identity: i64, labels: &[String], properties: Map<String, Value>) -> Self {
        let id = format_identity(identity);
        let node_type = labels
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
        let label = display_label(&properties, &node_type);

        Self {
            neo4j_id: id.clone(),
            id,
            label,
            node_type,
            properties,
        }
    }
}

/// A normalized relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub properties: Map<String, Value>,
}

impl EdgeRecord {
    /// Build an edge from the identities of its endpoints.
    pub fn from_parts(
        source: i64,
        target: i64,
        rel_type: impl Into<String>,
        properties: Map<String, Value>,
    ) -> Self {
        Self {
            source: format_identity(source),
            target: format_identity(target),
            rel_type: rel_type.into(),
            properties,
        }
    }
}

/// Summary metadata attached to an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_date: String,
    pub total_nodes: usize,
    pub total_links: usize,
    pub node_types: BTreeSet<String>,
    pub relationship_types: BTreeSet<String>,
}

/// The document written to `graph-data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<EdgeRecord>,
    pub metadata: ExportMetadata,
}

/// Render an internal identity the way both nodes and links reference it.
pub fn format_identity(identity: i64) -> String {
    identity.to_string()
}

/// Pick the display label: name > title > label > id > node type.
///
/// Null and empty-string values are treated as missing.
pub fn display_label(properties: &Map<String, Value>, node_type: &str) -> String {
    LABEL_KEYS
        .iter()
        .filter_map(|key| properties.get(*key))
        .find_map(stringify)
        .unwrap_or_else(|| node_type.to_string())
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_label_prefers_name() {
        let p = props(json!({"id": 7, "label": "L", "title": "T", "name": "N"}));
        assert_eq!(display_label(&p, "Person"), "N");
    }

    #[test]
    fn test_label_priority_chain() {
        let p = props(json!({"id": 7, "label": "L", "title": "T"}));
        assert_eq!(display_label(&p, "Person"), "T");

        let p = props(json!({"id": 7, "label": "L"}));
        assert_eq!(display_label(&p, "Person"), "L");

        let p = props(json!({"id": 7}));
        assert_eq!(display_label(&p, "Person"), "7");

        let p = props(json!({"other": "x"}));
        assert_eq!(display_label(&p, "Person"), "Person");
    }

    #[test]
    fn test_label_skips_null_and_empty() {
        let p = props(json!({"name": null, "title": "", "label": "Fallback"}));
        assert_eq!(display_label(&p, "Thing"), "Fallback");
    }

    #[test]
    fn test_label_stringifies_id() {
        let p = props(json!({"id": "abc-1"}));
        assert_eq!(display_label(&p, "Thing"), "abc-1");

        let p = props(json!({"id": 12.5}));
        assert_eq!(display_label(&p, "Thing"), "12.5");
    }

    #[test]
    fn test_node_without_labels_is_unknown() {
        let node = NodeRecord::from_parts(3, &[], Map::new());
        assert_eq!(node.node_type, UNKNOWN_TYPE);
        assert_eq!(node.label, UNKNOWN_TYPE);
        assert_eq!(node.id, "3");
        assert_eq!(node.neo4j_id, "3");
    }

    #[test]
    fn test_node_type_is_first_label() {
        let labels = vec!["Movie".to_string(), "Classic".to_string()];
        let node = NodeRecord::from_parts(1, &labels, props(json!({"title": "Heat"})));
        assert_eq!(node.node_type, "Movie");
        assert_eq!(node.label, "Heat");
    }

    #[test]
    fn test_edge_ids_match_node_ids() {
        let a = NodeRecord::from_parts(10, &[], Map::new());
        let b = NodeRecord::from_parts(20, &[], Map::new());
        let edge = EdgeRecord::from_parts(10, 20, "KNOWS", Map::new());
        assert_eq!(edge.source, a.id);
        assert_eq!(edge.target, b.id);
    }

    #[test]
    fn test_node_serializes_with_visualization_keys() {
        let node = NodeRecord::from_parts(5, &["Person".to_string()], props(json!({"name": "Ada"})));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "5",
                "label": "Ada",
                "type": "Person",
                "properties": {"name": "Ada"},
                "neo4jId": "5"
            })
        );
    }
}
