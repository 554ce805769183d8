//! Flat node model and wire payloads
//!
//! `Node` is the atomic entity held in the flat cache; `NodeDraft` and
//! `NodeChanges` mirror the remote store's POST and PATCH bodies. Field
//! names are camelCased on the wire to match the JSON API.

use crate::types::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Node kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    /// Human label used in notifications ("File moved successfully").
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::File => "File",
            NodeKind::Folder => "Folder",
        }
    }
}

/// A single file or folder record as held in the flat cache.
///
/// `parent_id == None` is the root sentinel; exactly one such node exists
/// among the nodes forming the tree. `path` is a denormalized cache of
/// ancestry names ending with the node's own name, recomputed on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub parent_id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

impl Node {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

/// Creation payload; the remote store assigns the id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub parent_id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub last_modified: DateTime<Utc>,
    pub path: Vec<String>,
}

/// Partial update payload for PATCH; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl NodeChanges {
    pub fn rename(name: impl Into<String>) -> Self {
        NodeChanges {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn reparent(parent_id: impl Into<NodeId>) -> Self {
        NodeChanges {
            parent_id: Some(parent_id.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_round_trips_the_wire_shape() {
        let raw = json!({
            "id": "7",
            "name": "report.pdf",
            "type": "file",
            "parentId": "2",
            "size": 1024,
            "lastModified": "2024-03-01T10:00:00Z",
            "path": ["root", "Docs", "report.pdf"]
        });
        let node: Node = serde_json::from_value(raw).unwrap();
        assert_eq!(node.kind, NodeKind::File);
        assert_eq!(node.parent_id.as_deref(), Some("2"));
        assert_eq!(node.size, Some(1024));

        let out = serde_json::to_value(&node).unwrap();
        assert_eq!(out["type"], "file");
        assert_eq!(out["parentId"], "2");
        assert!(out.get("content").is_none());
    }

    #[test]
    fn changes_serialize_only_set_fields() {
        let changes = NodeChanges::reparent("9");
        let out = serde_json::to_value(&changes).unwrap();
        assert_eq!(out["parentId"], "9");
        assert!(out.get("name").is_none());
        assert!(out.get("lastModified").is_none());
    }

    #[test]
    fn root_sentinel_is_null_parent() {
        let raw = json!({
            "id": "1",
            "name": "root",
            "type": "folder",
            "parentId": null
        });
        let node: Node = serde_json::from_value(raw).unwrap();
        assert!(node.parent_id.is_none());
        assert!(node.is_folder());
    }
}
