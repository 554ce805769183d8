//! File manager glue
//!
//! `FileManager` is the single mutator tying the node store, selection
//! state, expansion flags and the notification collaborator together. It
//! turns user intents (create, rename, delete, drop, checkbox, batch) into
//! store mutations, reconciles the selection against the fresh list after
//! every committed change, and reports each outcome through the notifier.

use crate::batch::{self, BatchKind, BatchOutcome, BatchRequest};
use crate::error::Error;
use crate::node::Node;
use crate::notify::{Notifier, Severity};
use crate::selection::{Selection, SelectionEffect};
use crate::store::remote::RemoteNodes;
use crate::store::NodeStore;
use crate::tree::{self, moves, TreeNode};
use crate::types::NodeId;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const TOAST_DURATION: Duration = Duration::from_secs(3);

pub struct FileManager {
    store: NodeStore,
    selection: Selection,
    expanded: HashSet<NodeId>,
    notifier: Arc<dyn Notifier>,
}

impl FileManager {
    pub fn new(remote: Arc<dyn RemoteNodes>, notifier: Arc<dyn Notifier>) -> Self {
        FileManager {
            store: NodeStore::new(remote),
            selection: Selection::new(),
            expanded: HashSet::new(),
            notifier,
        }
    }

    /// Fetch the flat list and return the freshly built tree.
    pub async fn load(&mut self) -> Result<Vec<TreeNode>, Error> {
        self.store.refresh().await?;
        self.reconcile();
        Ok(self.tree())
    }

    /// Build the current nested view from the cached flat list, with
    /// expansion flags stamped. Empty when no root exists yet.
    pub fn tree(&self) -> Vec<TreeNode> {
        let snapshot = self.store.snapshot();
        let Some(root) = tree::find_root(&snapshot) else {
            return Vec::new();
        };
        let mut built = tree::build(&snapshot, &root.id);
        tree::apply_expansion(&mut built, &self.expanded);
        built
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    pub fn set_expanded(&mut self, id: &NodeId, expanded: bool) {
        if expanded {
            self.expanded.insert(id.clone());
        } else {
            self.expanded.remove(id);
        }
    }

    /// Drop stale selection entries and expansion flags after a cache
    /// change.
    fn reconcile(&mut self) {
        let snapshot = self.store.snapshot();
        self.selection.prune(&snapshot);
        self.expanded
            .retain(|id| snapshot.iter().any(|n| &n.id == id));
    }

    fn toast(&self, message: String, severity: Severity) {
        self.notifier.toast(&message, severity, TOAST_DURATION);
    }

    /// Handle a node click: batch-toggle in batch mode, preview otherwise.
    /// The returned effect tells the caller whether to open a preview.
    pub fn select(&mut self, id: &NodeId) -> Result<SelectionEffect, Error> {
        let node = self
            .store
            .node(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        Ok(self.selection.select(&node))
    }

    /// Flip batch-selection mode; any selection in either mode is dropped.
    pub fn toggle_selection_mode(&mut self) {
        self.selection.toggle_mode();
    }

    /// Folder checkbox: the folder and all descendants take `checked`
    /// together.
    pub fn set_folder_checked(&mut self, folder_id: &NodeId, checked: bool) {
        let snapshot = self.store.snapshot();
        self.selection
            .set_folder_checked(folder_id, &snapshot, checked);
    }

    /// Folders offered as batch-move destinations: everything except the
    /// items being moved.
    pub fn move_destinations(&self) -> Vec<Node> {
        tree::folders(&self.tree(), &self.selection.batch_ids())
    }

    pub async fn create_folder(&mut self, name: &str, parent_id: &NodeId) -> Result<Node, Error> {
        match self.store.create_folder(name, parent_id).await {
            Ok(folder) => {
                self.toast(format!("Folder created successfully {name}"), Severity::Success);
                Ok(folder)
            }
            Err(err) => {
                self.toast(format!("Error creating folder {name}"), Severity::Error);
                Err(err)
            }
        }
    }

    pub async fn upload_file(
        &mut self,
        name: &str,
        size: u64,
        parent_id: &NodeId,
    ) -> Result<Node, Error> {
        match self.store.upload_file(name, size, parent_id).await {
            Ok(file) => {
                self.toast(format!("File uploaded successfully {name}"), Severity::Success);
                Ok(file)
            }
            Err(err) => {
                self.toast(format!("Error uploading file {name}"), Severity::Error);
                Err(err)
            }
        }
    }

    pub async fn rename(&mut self, id: &NodeId, new_name: &str) -> Result<Node, Error> {
        let label = self.store.node(id).map(|n| n.kind.label()).unwrap_or("File");
        match self.store.rename(id, new_name).await {
            Ok(node) => {
                self.toast(format!("{label} renamed successfully"), Severity::Success);
                Ok(node)
            }
            Err(err) => {
                self.toast(format!("Error renaming {}", label.to_lowercase()), Severity::Error);
                Err(err)
            }
        }
    }

    /// Delete a node and, via the cascade, its whole subtree.
    pub async fn delete(&mut self, id: &NodeId) -> Result<(), Error> {
        let label = self.store.node(id).map(|n| n.kind.label()).unwrap_or("File");
        match self.store.delete(id).await {
            Ok(()) => {
                self.reconcile();
                self.toast(format!("{label} deleted successfully"), Severity::Success);
                Ok(())
            }
            Err(err) => {
                self.toast(format!("Error deleting {}", label.to_lowercase()), Severity::Error);
                Err(err)
            }
        }
    }

    /// Drag-drop reparent. Validation runs before the remote call; an
    /// illegal drop surfaces as `InvalidMove` without touching the wire.
    /// The target folder is left expanded so the dropped node stays
    /// visible.
    pub async fn drop_move(&mut self, dragged_id: &NodeId, target_id: &NodeId) -> Result<Node, Error> {
        let label = self
            .store
            .node(dragged_id)
            .map(|n| n.kind.label())
            .unwrap_or("File");
        match moves::apply_move(&self.store, dragged_id, target_id).await {
            Ok(node) => {
                self.expanded.insert(target_id.clone());
                self.toast(format!("{label} moved successfully"), Severity::Success);
                Ok(node)
            }
            Err(err) => {
                debug!(dragged = %dragged_id, target = %target_id, error = %err, "drop rejected");
                self.toast(format!("Error moving {}", label.to_lowercase()), Severity::Error);
                Err(err)
            }
        }
    }

    /// Delete everything in the batch set, sequentially. The selection is
    /// cleared only once the whole batch has completed.
    pub async fn batch_delete(&mut self) -> Result<BatchOutcome, Error> {
        self.run_batch(BatchKind::Delete, "Batch delete").await
    }

    /// Move everything in the batch set under `destination`.
    pub async fn batch_move(&mut self, destination: &NodeId) -> Result<BatchOutcome, Error> {
        let outcome = self
            .run_batch(
                BatchKind::Move {
                    destination: destination.clone(),
                },
                "Batch move",
            )
            .await?;
        self.expanded.insert(destination.clone());
        Ok(outcome)
    }

    async fn run_batch(&mut self, kind: BatchKind, label: &str) -> Result<BatchOutcome, Error> {
        // Capture the item list up front; selection changes during the run
        // must not affect the in-flight set.
        let targets: Vec<NodeId> = self.selection.batch_ids().into_iter().collect();
        let request = BatchRequest { kind, targets };
        let outcome = match batch::execute(&self.store, request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                // Rejected up front; the batch never ran, keep the
                // selection.
                self.toast(format!("{label} failed"), Severity::Error);
                return Err(err);
            }
        };
        self.selection.clear();
        self.reconcile();
        if outcome.is_full_success() {
            self.toast(format!("{label} successful"), Severity::Success);
        } else {
            self.toast(
                format!(
                    "{label} completed with {} of {} items failed",
                    outcome.failed.len(),
                    outcome.failed.len() + outcome.succeeded.len()
                ),
                Severity::Error,
            );
        }
        Ok(outcome)
    }
}
