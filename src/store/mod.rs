//! Node Store
//!
//! Holds the authoritative flat node list as last fetched or mutated, and
//! republishes the full list on every committed mutation. Mutations are not
//! applied locally until the remote store confirms them, so a failed call
//! leaves the cache in its last-known-good state.

pub mod remote;

use crate::error::Error;
use crate::node::{Node, NodeChanges, NodeDraft, NodeKind};
use crate::tree;
use crate::types::NodeId;
use chrono::Utc;
use remote::RemoteNodes;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Cached flat-list view of the remote node collection.
///
/// The cache lives inside a `watch` channel: `send_replace` is the single
/// commit point, so every committed mutation broadcasts exactly one
/// post-mutation snapshot to subscribers.
pub struct NodeStore {
    remote: Arc<dyn RemoteNodes>,
    cache: watch::Sender<Vec<Node>>,
}

impl NodeStore {
    pub fn new(remote: Arc<dyn RemoteNodes>) -> Self {
        let (cache, _) = watch::channel(Vec::new());
        NodeStore { remote, cache }
    }

    /// Current snapshot of the flat list.
    pub fn snapshot(&self) -> Vec<Node> {
        self.cache.borrow().clone()
    }

    /// Subscribe to post-mutation snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Node>> {
        self.cache.subscribe()
    }

    /// Look up a node in the cache by id.
    pub fn node(&self, id: &NodeId) -> Option<Node> {
        self.cache.borrow().iter().find(|n| &n.id == id).cloned()
    }

    /// Refetch the full list from the remote store and broadcast it.
    pub async fn refresh(&self) -> Result<Vec<Node>, Error> {
        let nodes = self.remote.fetch_all().await?;
        debug!(count = nodes.len(), "node list refreshed");
        self.cache.send_replace(nodes.clone());
        Ok(nodes)
    }

    async fn create(
        &self,
        name: String,
        kind: NodeKind,
        size: Option<u64>,
        parent_id: &NodeId,
    ) -> Result<Node, Error> {
        // Denormalized ancestry: parent's path plus the new name, or just
        // the name when the parent is unknown to the cache.
        let path = match self.node(parent_id) {
            Some(parent) => {
                let mut path = parent.path.unwrap_or_default();
                path.push(name.clone());
                path
            }
            None => vec![name.clone()],
        };
        let draft = NodeDraft {
            name,
            kind,
            parent_id: Some(parent_id.clone()),
            size,
            last_modified: Utc::now(),
            path,
        };
        let created = self.remote.create(&draft).await?;
        info!(id = %created.id, name = %created.name, "node created");
        self.cache.send_modify(|nodes| nodes.push(created.clone()));
        Ok(created)
    }

    /// Create a folder under `parent_id`.
    pub async fn create_folder(&self, name: &str, parent_id: &NodeId) -> Result<Node, Error> {
        self.create(name.to_string(), NodeKind::Folder, None, parent_id)
            .await
    }

    /// Register an uploaded file (name and size metadata) under `parent_id`.
    pub async fn upload_file(
        &self,
        name: &str,
        size: u64,
        parent_id: &NodeId,
    ) -> Result<Node, Error> {
        self.create(name.to_string(), NodeKind::File, Some(size), parent_id)
            .await
    }

    /// Apply a partial update; the remote store returns the authoritative
    /// record, which replaces the cached entry in place.
    ///
    /// Resolves the id against the cache first so a stale reference (e.g. a
    /// rename target picked before a concurrent delete) fails fast with
    /// `NotFound` instead of hitting the wire.
    pub async fn update(&self, id: &NodeId, mut changes: NodeChanges) -> Result<Node, Error> {
        if self.node(id).is_none() {
            return Err(Error::NotFound(id.clone()));
        }
        if changes.last_modified.is_none() {
            changes.last_modified = Some(Utc::now());
        }
        let updated = self.remote.update(id, &changes).await?;
        info!(id = %updated.id, "node updated");
        self.cache.send_modify(|nodes| {
            if let Some(entry) = nodes.iter_mut().find(|n| &n.id == id) {
                *entry = updated.clone();
            }
        });
        Ok(updated)
    }

    /// Rename a node.
    pub async fn rename(&self, id: &NodeId, new_name: &str) -> Result<Node, Error> {
        self.update(id, NodeChanges::rename(new_name)).await
    }

    /// Delete a node.
    ///
    /// A single delete is issued for the target; the remote store cascades
    /// to descendants per its contract. The cache mirrors the cascade from
    /// the pre-delete snapshot so no stale descendant survives locally.
    pub async fn delete(&self, id: &NodeId) -> Result<(), Error> {
        let snapshot = self.snapshot();
        if !snapshot.iter().any(|n| &n.id == id) {
            return Err(Error::NotFound(id.clone()));
        }
        self.remote.delete(id).await.map_err(|err| {
            warn!(id = %id, error = %err, "delete failed");
            err
        })?;
        let mut doomed = tree::descendant_ids(&snapshot, id);
        doomed.push(id.clone());
        info!(id = %id, removed = doomed.len(), "node deleted with cascade");
        self.cache
            .send_modify(|nodes| nodes.retain(|n| !doomed.contains(&n.id)));
        Ok(())
    }
}
