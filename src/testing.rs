//! Shared unit-test fixtures: an in-memory `RemoteNodes` double and node
//! builders.

use crate::error::Error;
use crate::node::{Node, NodeChanges, NodeDraft, NodeKind};
use crate::notify::{Notifier, Severity};
use crate::store::remote::RemoteNodes;
use crate::tree;
use crate::types::NodeId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Notifier capturing every toast for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.toasts.lock().iter().map(|(m, _)| m.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, message: &str, severity: Severity, _duration: Duration) {
        self.toasts.lock().push((message.to_string(), severity));
    }
}

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

/// root(1) ── Docs(2) ── a.pdf(3)
///         │           └ Nested(4) ── deep.txt(5)
///         └ notes.txt(6)
pub fn sample_nodes() -> Vec<Node> {
    vec![
        node("1", "root", NodeKind::Folder, None),
        node("2", "Docs", NodeKind::Folder, Some("1")),
        node("3", "a.pdf", NodeKind::File, Some("2")),
        node("4", "Nested", NodeKind::Folder, Some("2")),
        node("5", "deep.txt", NodeKind::File, Some("4")),
        node("6", "notes.txt", NodeKind::File, Some("1")),
    ]
}

/// In-memory remote honoring the cascade-on-delete contract. Failures can
/// be injected per node id or for the next call regardless of target.
pub struct FakeRemote {
    nodes: Mutex<Vec<Node>>,
    next_id: AtomicUsize,
    fail_next: Mutex<bool>,
    fail_ids: Mutex<HashSet<NodeId>>,
}

impl FakeRemote {
    pub fn new(seed: Vec<Node>) -> Self {
        FakeRemote {
            nodes: Mutex::new(seed),
            next_id: AtomicUsize::new(100),
            fail_next: Mutex::new(false),
            fail_ids: Mutex::new(HashSet::new()),
        }
    }

    /// Fail the next remote call, whatever it is.
    pub fn fail_next(&self) {
        *self.fail_next.lock() = true;
    }

    /// Fail every call addressing this id.
    pub fn fail_for(&self, id: &str) {
        self.fail_ids.lock().insert(id.to_string());
    }

    pub fn contents(&self) -> Vec<Node> {
        self.nodes.lock().clone()
    }

    fn check_fail(&self, id: Option<&NodeId>) -> Result<(), Error> {
        let mut fail_next = self.fail_next.lock();
        let addressed = id.map(|id| self.fail_ids.lock().contains(id)).unwrap_or(false);
        if *fail_next || addressed {
            *fail_next = false;
            return Err(Error::Remote {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteNodes for FakeRemote {
    async fn fetch_all(&self) -> Result<Vec<Node>, Error> {
        self.check_fail(None)?;
        Ok(self.nodes.lock().clone())
    }

    async fn fetch(&self, id: &NodeId) -> Result<Node, Error> {
        self.check_fail(Some(id))?;
        self.nodes
            .lock()
            .iter()
            .find(|n| &n.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    async fn create(&self, draft: &NodeDraft) -> Result<Node, Error> {
        self.check_fail(None)?;
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
        self.check_fail(Some(id))?;
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
        self.check_fail(Some(id))?;
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
