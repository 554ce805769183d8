//! Error types for the tree synchronization engine.

use crate::tree::moves::MoveRejection;
use crate::types::NodeId;

/// Errors surfaced by store operations and batch execution.
///
/// Move validation failures are decided before any remote call is issued;
/// `can_move` returns a boolean and never constructs an error. `InvalidMove`
/// only appears when a mutation entry point is handed an already-illegal
/// reparent (e.g. a batch move into a moved item's own subtree).
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The remote store returned a non-success response or the transport failed.
    #[error("remote store error (status {status}): {message}")]
    Remote { status: u16, message: String },

    /// The operation referenced an id no longer present in the cache.
    #[error("node not found: {0}")]
    NotFound(NodeId),

    /// A reparent was rejected by move validation.
    #[error("invalid move: {0}")]
    InvalidMove(MoveRejection),

    /// Configuration could not be loaded or was inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a `Remote` error from a reqwest transport failure.
    ///
    /// Transport-level failures (connection refused, timeout) carry no HTTP
    /// status; 0 marks them apart from real server responses.
    pub fn from_transport(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
        Error::Remote {
            status,
            message: err.to_string(),
        }
    }
}
