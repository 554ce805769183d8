//! Batch Operation Executor
//!
//! Applies one logical operation (move or delete) to a selected set of
//! nodes, strictly sequentially, with best-effort partial-failure
//! reporting. Sequential execution keeps per-item completion order
//! deterministic and stops one target's cascading delete racing another's
//! descendant computation.

use crate::error::Error;
use crate::node::NodeChanges;
use crate::store::NodeStore;
use crate::tree::moves::{validate_move, MoveRejection};
use crate::types::NodeId;
use tracing::{info, warn};

/// What to do with the selected set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchKind {
    Delete,
    Move { destination: NodeId },
}

/// One logical batch operation over a captured item list.
///
/// The item list is captured at submission; a selection made while the
/// batch runs does not affect the in-flight set.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub kind: BatchKind,
    pub targets: Vec<NodeId>,
}

/// Aggregate outcome of a batch: per-item successes and failures.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<NodeId>,
    pub failed: Vec<(NodeId, Error)>,
}

impl BatchOutcome {
    pub fn is_full_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// The first per-item error, for callers that surface a single message.
    pub fn first_error(&self) -> Option<&Error> {
        self.failed.first().map(|(_, err)| err)
    }
}

/// Execute a batch against the store.
///
/// Move batches reject the whole request up front when the destination is
/// missing or not a folder; per-item self-drop and cycle checks still run
/// against a fresh snapshot before each update. Delete batches issue one
/// delete per target; a target already removed by an earlier target's
/// cascade counts as succeeded without a remote call.
pub async fn execute(store: &NodeStore, request: BatchRequest) -> Result<BatchOutcome, Error> {
    if let BatchKind::Move { destination } = &request.kind {
        let dest = store
            .node(destination)
            .ok_or_else(|| Error::NotFound(destination.clone()))?;
        if !dest.is_folder() {
            return Err(Error::InvalidMove(MoveRejection::NotAFolder));
        }
    }

    let mut outcome = BatchOutcome::default();
    for target in &request.targets {
        let result = match &request.kind {
            BatchKind::Delete => delete_one(store, target).await,
            BatchKind::Move { destination } => move_one(store, target, destination).await,
        };
        match result {
            Ok(()) => outcome.succeeded.push(target.clone()),
            Err(err) => {
                warn!(target = %target, error = %err, "batch item failed");
                outcome.failed.push((target.clone(), err));
            }
        }
    }
    info!(
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        "batch completed"
    );
    Ok(outcome)
}

async fn delete_one(store: &NodeStore, target: &NodeId) -> Result<(), Error> {
    if store.node(target).is_none() {
        // Already removed by an earlier target's cascade.
        return Ok(());
    }
    store.delete(target).await
}

async fn move_one(store: &NodeStore, target: &NodeId, destination: &NodeId) -> Result<(), Error> {
    let snapshot = store.snapshot();
    let dragged = snapshot
        .iter()
        .find(|n| &n.id == target)
        .ok_or_else(|| Error::NotFound(target.clone()))?;
    let dest = snapshot
        .iter()
        .find(|n| &n.id == destination)
        .ok_or_else(|| Error::NotFound(destination.clone()))?;
    validate_move(&snapshot, dragged, dest).map_err(Error::InvalidMove)?;
    store
        .update(target, NodeChanges::reparent(destination.clone()))
        .await?;
    Ok(())
}
