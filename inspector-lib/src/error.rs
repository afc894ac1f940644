//! Error types
//!
//! Navigation, flattening and search never fail: a missing node or a stale
//! selection is a no-op. Only the edges that talk to the outside world have
//! error types.

use thiserror::Error;

use crate::node::NodeId;

/// Errors raised while building a tree store from a snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to parse tree snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("node '{0}' appears more than once in the snapshot")]
    DuplicateNode(NodeId),

    #[error("root node '{0}' is not part of the snapshot")]
    UnknownRoot(NodeId),
}

/// Errors reported by a clipboard collaborator.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Io(#[from] std::io::Error),
}
