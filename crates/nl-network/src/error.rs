//! Network-specific error types.

use nl_core::{LinkSegmentId, NlError, NodeId};
use thiserror::Error;

/// Network construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A segment refers to a node that doesn't exist.
    #[error("Segment {segment} refers to non-existent node {node}")]
    InvalidNodeRef { segment: LinkSegmentId, node: NodeId },

    /// A macroscopic segment carries a negative or non-finite capacity.
    #[error("Segment {segment} has invalid capacity {value}")]
    InvalidCapacity { segment: LinkSegmentId, value: f64 },

    /// Segment IDs are not dense, or adjacency lists disagree with segment endpoints.
    #[error("Segment {segment} in node {node}'s adjacency list but doesn't touch that node")]
    InconsistentAdjacency { segment: LinkSegmentId, node: NodeId },

    /// Node not present in the network.
    #[error("Node {node} not found in network")]
    NodeNotFound { node: NodeId },
}

impl From<NetworkError> for NlError {
    fn from(err: NetworkError) -> Self {
        NlError::Invariant {
            what: err.to_string(),
        }
    }
}
