//! Shared fixtures for the integration and property test crates: node
//! builders and an in-memory remote honoring the cascade-on-delete
//! contract.

use async_trait::async_trait;
use canopy::error::Error;
use canopy::node::{Node, NodeChanges, NodeDraft, NodeKind};
use canopy::store::remote::RemoteNodes;
use canopy::tree;
use canopy::types::NodeId;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn node(id: &str, name: &str, kind: NodeKind, parent: Option<&str>) -> Node {
    Node {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        parent_id: parent.map(str::to_string),
        size: None,
        last_modified: None,
        content: None,
        path: Some(vec![name.to_string()]),
    }
}

pub fn file_with_content(id: &str, name: &str, parent: &str, content: &str) -> Node {
    Node {
        content: Some(content.to_string()),
        size: Some(content.len() as u64),
        ..node(id, name, NodeKind::File, Some(parent))
    }
}

/// Minimal reference fixture: root(1) → Docs(2) → a.pdf(3).
pub fn sample_tree() -> Vec<Node> {
    vec![
        node("1", "root", NodeKind::Folder, None),
        node("2", "Docs", NodeKind::Folder, Some("1")),
        node("3", "a.pdf", NodeKind::File, Some("2")),
    ]
}

/// In-memory stand-in for the remote node store.
pub struct InMemoryRemote {
    nodes: Mutex<Vec<Node>>,
    next_id: AtomicUsize,
    fail_ids: Mutex<HashSet<NodeId>>,
}

impl InMemoryRemote {
    pub fn new(seed: Vec<Node>) -> Self {
        InMemoryRemote {
            nodes: Mutex::new(seed),
            next_id: AtomicUsize::new(100),
            fail_ids: Mutex::new(HashSet::new()),
        }
    }

    /// Fail every call addressing this id with a 500.
    pub fn fail_for(&self, id: &str) {
        self.fail_ids.lock().insert(id.to_string());
    }

    pub fn contents(&self) -> Vec<Node> {
        self.nodes.lock().clone()
    }

    fn check_fail(&self, id: &NodeId) -> Result<(), Error> {
        if self.fail_ids.lock().contains(id) {
            return Err(Error::Remote {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteNodes for InMemoryRemote {
    async fn fetch_all(&self) -> Result<Vec<Node>, Error> {
        Ok(self.nodes.lock().clone())
    }

    async fn fetch(&self, id: &NodeId) -> Result<Node, Error> {
        self.check_fail(id)?;
        self.nodes
            .lock()
            .iter()
            .find(|n| &n.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    async fn create(&self, draft: &NodeDraft) -> Result<Node, Error> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let node = Node {
            id,
            name: draft.name.clone(),
            kind: draft.kind,
            parent_id: draft.parent_id.clone(),
            size: draft.size,
            last_modified: Some(draft.last_modified),
            content: None,
            path: Some(draft.path.clone()),
        };
        self.nodes.lock().push(node.clone());
        Ok(node)
    }

    async fn update(&self, id: &NodeId, changes: &NodeChanges) -> Result<Node, Error> {
        self.check_fail(id)?;
        let mut nodes = self.nodes.lock();
        let entry = nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        if let Some(name) = &changes.name {
            entry.name = name.clone();
        }
        if let Some(parent) = &changes.parent_id {
            entry.parent_id = Some(parent.clone());
        }
        if let Some(stamp) = changes.last_modified {
            entry.last_modified = Some(stamp);
        }
        Ok(entry.clone())
    }

    async fn delete(&self, id: &NodeId) -> Result<(), Error> {
        self.check_fail(id)?;
        let mut nodes = self.nodes.lock();
        if !nodes.iter().any(|n| &n.id == id) {
            return Err(Error::NotFound(id.clone()));
        }
        let mut doomed = tree::descendant_ids(&nodes, id);
        doomed.push(id.clone());
        nodes.retain(|n| !doomed.contains(&n.id));
        Ok(())
    }
}
