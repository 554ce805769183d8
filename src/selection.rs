//! Selection State Machine
//!
//! Tracks either "one node selected for preview" or "N nodes selected for a
//! batch operation". The two are a single tagged enum rather than parallel
//! flags, so a preview id and a non-empty batch set can never coexist.

use crate::node::Node;
use crate::types::NodeId;
use std::collections::BTreeSet;
use tracing::debug;

/// The selection mode and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    SinglePreview(NodeId),
    BatchMode(BTreeSet<NodeId>),
}

/// Side effect a selection transition asks its caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEffect {
    None,
    /// A file was selected for preview; open it via the preview collaborator.
    OpenPreview(NodeId),
}

/// Mutable wrapper enforcing the transition rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    state: SelectionState,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        Selection {
            state: SelectionState::Empty,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_batch_mode(&self) -> bool {
        matches!(self.state, SelectionState::BatchMode(_))
    }

    /// The node currently selected for preview, if any.
    pub fn preview(&self) -> Option<&NodeId> {
        match &self.state {
            SelectionState::SinglePreview(id) => Some(id),
            _ => None,
        }
    }

    /// The batch set; empty outside batch mode.
    pub fn batch_ids(&self) -> BTreeSet<NodeId> {
        match &self.state {
            SelectionState::BatchMode(ids) => ids.clone(),
            _ => BTreeSet::new(),
        }
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        match &self.state {
            SelectionState::BatchMode(ids) => ids.contains(id),
            SelectionState::SinglePreview(selected) => selected == id,
            SelectionState::Empty => false,
        }
    }

    /// Enter batch mode, discarding any preview or previous batch set.
    pub fn enter_batch_mode(&mut self) {
        debug!("selection: entering batch mode");
        self.state = SelectionState::BatchMode(BTreeSet::new());
    }

    /// Leave batch mode, discarding the batch set.
    pub fn leave_batch_mode(&mut self) {
        debug!("selection: leaving batch mode");
        self.state = SelectionState::Empty;
    }

    /// Flip between batch mode and no selection.
    pub fn toggle_mode(&mut self) {
        if self.is_batch_mode() {
            self.leave_batch_mode();
        } else {
            self.enter_batch_mode();
        }
    }

    /// Handle a node being selected.
    ///
    /// In batch mode this toggles membership; otherwise it replaces the
    /// preview selection and, for files, asks the caller to open a preview.
    pub fn select(&mut self, node: &Node) -> SelectionEffect {
        match &mut self.state {
            SelectionState::BatchMode(ids) => {
                if !ids.remove(&node.id) {
                    ids.insert(node.id.clone());
                }
                SelectionEffect::None
            }
            _ => {
                self.state = SelectionState::SinglePreview(node.id.clone());
                if node.is_folder() {
                    SelectionEffect::None
                } else {
                    SelectionEffect::OpenPreview(node.id.clone())
                }
            }
        }
    }

    /// Toggle a single id's batch membership. Ignored outside batch mode.
    /// Returns the resulting membership.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        if let SelectionState::BatchMode(ids) = &mut self.state {
            if ids.remove(id) {
                false
            } else {
                ids.insert(id.clone());
                true
            }
        } else {
            false
        }
    }

    /// Set a folder's checkbox: the folder and every transitive descendant
    /// take the same membership value in one update, so no partial toggle is
    /// ever observable. Ignored outside batch mode.
    pub fn set_folder_checked(&mut self, folder_id: &NodeId, nodes: &[Node], checked: bool) {
        if let SelectionState::BatchMode(ids) = &mut self.state {
            let mut affected = crate::tree::descendant_ids(nodes, folder_id);
            affected.push(folder_id.clone());
            if checked {
                ids.extend(affected);
            } else {
                for id in &affected {
                    ids.remove(id);
                }
            }
        }
    }

    /// Empty whichever selection is active, keeping the current mode.
    pub fn clear(&mut self) {
        match &mut self.state {
            SelectionState::BatchMode(ids) => ids.clear(),
            state => *state = SelectionState::Empty,
        }
    }

    /// Drop ids no longer present in the flat list. Called after every tree
    /// rebuild so the batch set never references a deleted node.
    pub fn prune(&mut self, nodes: &[Node]) {
        match &mut self.state {
            SelectionState::BatchMode(ids) => {
                ids.retain(|id| nodes.iter().any(|n| &n.id == id));
            }
            SelectionState::SinglePreview(id) => {
                if !nodes.iter().any(|n| n.id == *id) {
                    self.state = SelectionState::Empty;
                }
            }
            SelectionState::Empty => {}
        }
    }
}
