//! Move Validator
//!
//! Decides whether a proposed reparent (drag-drop or batch move) is legal
//! for the current tree shape, before any remote call is issued.

use crate::error::Error;
use crate::node::Node;
use crate::store::NodeStore;
use crate::tree::descendant_ids;
use crate::types::NodeId;

/// Why a reparent was rejected. Checks run in this order; the first failure
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("a node cannot be dropped onto itself")]
    SelfDrop,
    #[error("only folders accept children")]
    NotAFolder,
    #[error("a node cannot be moved into its own subtree")]
    IntoOwnSubtree,
}

/// Validate a reparent of `dragged` under `target`.
///
/// The subtree check is exhaustive: every transitive descendant of the
/// dragged node is considered, not just immediate children.
pub fn validate_move(nodes: &[Node], dragged: &Node, target: &Node) -> Result<(), MoveRejection> {
    if dragged.id == target.id {
        return Err(MoveRejection::SelfDrop);
    }
    if !target.is_folder() {
        return Err(MoveRejection::NotAFolder);
    }
    if descendant_ids(nodes, &dragged.id).contains(&target.id) {
        return Err(MoveRejection::IntoOwnSubtree);
    }
    Ok(())
}

/// Boolean form of `validate_move`; never errors.
pub fn can_move(nodes: &[Node], dragged: &Node, target: &Node) -> bool {
    validate_move(nodes, dragged, target).is_ok()
}

/// Validate against a fresh cache snapshot, then commit the reparent as a
/// single update. The store patches and rebroadcasts the flat cache
/// unconditionally on success; consumers rebuild their nested view from it.
pub async fn apply_move(
    store: &NodeStore,
    dragged_id: &NodeId,
    target_id: &NodeId,
) -> Result<Node, Error> {
    let snapshot = store.snapshot();
    let dragged = snapshot
        .iter()
        .find(|n| &n.id == dragged_id)
        .ok_or_else(|| Error::NotFound(dragged_id.clone()))?;
    let target = snapshot
        .iter()
        .find(|n| &n.id == target_id)
        .ok_or_else(|| Error::NotFound(target_id.clone()))?;
    validate_move(&snapshot, dragged, target).map_err(Error::InvalidMove)?;
    store
        .update(dragged_id, crate::node::NodeChanges::reparent(target_id.clone()))
        .await
}
