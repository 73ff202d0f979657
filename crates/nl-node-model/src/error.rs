//! Error types for node model construction and solving.

use nl_core::{LinkSegmentId, NlError, NodeId};
use nl_network::NetworkError;
use thiserror::Error;

/// Errors raised while building node model inputs or running the solver.
///
/// Everything except [`NodeModelError::NoProgress`] is detected at construction,
/// before any solver state exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeModelError {
    #[error("Dimension error: {what}")]
    DimensionError { what: String },

    #[error(
        "Dimension mismatch for {what}: expected {expected_rows}x{expected_cols}, found {rows}x{cols}"
    )]
    DimensionMismatch {
        what: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("No receiving flows available: no override given and none fixed for the node")]
    MissingReceivingFlows,

    #[error("Segment {segment} at node {node} is {found}, expected macroscopic")]
    InvalidTopology {
        node: NodeId,
        segment: LinkSegmentId,
        found: &'static str,
    },

    #[error("Invalid value at index {index}: {source}")]
    InvalidValue {
        index: usize,
        #[source]
        source: NlError,
    },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error(
        "No progress after {iterations} iterations: {resolved} of {incoming} incoming links resolved"
    )]
    NoProgress {
        iterations: usize,
        resolved: usize,
        incoming: usize,
    },
}

pub type NodeModelResultOf<T> = Result<T, NodeModelError>;

/// Check that every value is finite and non-negative.
pub(crate) fn check_non_negative<'a>(
    values: impl IntoIterator<Item = &'a f64>,
    what: &'static str,
) -> NodeModelResultOf<()> {
    for (index, &v) in values.into_iter().enumerate() {
        nl_core::ensure_non_negative(v, what)
            .map_err(|source| NodeModelError::InvalidValue { index, source })?;
    }
    Ok(())
}
