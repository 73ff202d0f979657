//! Network validation logic.

use nl_core::{LinkSegmentId, NlError, NlResult, NodeId};
use std::collections::HashSet;

use crate::error::NetworkError;
use crate::graph::{LinkSegment, Node};

/// Validate the network structure: dense IDs, endpoints exist, capacities are sane.
pub(crate) fn validate_structure(nodes: &[Node], segments: &[LinkSegment]) -> NlResult<()> {
    for (i, segment) in segments.iter().enumerate() {
        if segment.id.slot() != i {
            return Err(NetworkError::InconsistentAdjacency {
                segment: segment.id,
                node: segment.upstream,
            }
            .into());
        }
    }

    for segment in segments {
        for node in [segment.upstream, segment.downstream] {
            if node.slot() >= nodes.len() {
                return Err(NetworkError::InvalidNodeRef {
                    segment: segment.id,
                    node,
                }
                .into());
            }
        }

        if let Some(m) = segment.kind.as_macroscopic() {
            let cap = m.capacity_per_lane_pcu_h;
            if !cap.is_finite() || cap < 0.0 {
                return Err(NetworkError::InvalidCapacity {
                    segment: segment.id,
                    value: cap,
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Validate that every segment appears exactly once in the incoming list of its
/// downstream node and once in the outgoing list of its upstream node.
pub(crate) fn validate_adjacency(
    nodes: &[Node],
    segments: &[LinkSegment],
    offsets: &[usize],
    flat: &[LinkSegmentId],
    endpoint: impl Fn(&LinkSegment) -> NodeId,
) -> NlResult<()> {
    if offsets.len() != nodes.len() + 1 {
        return Err(NlError::Invariant {
            what: format!(
                "adjacency offsets length {} != node count + 1 ({})",
                offsets.len(),
                nodes.len() + 1
            ),
        });
    }

    for node in nodes {
        let idx = node.id.slot();
        for &segment_id in &flat[offsets[idx]..offsets[idx + 1]] {
            let touches = segments
                .get(segment_id.slot())
                .is_some_and(|s| endpoint(s) == node.id);
            if !touches {
                return Err(NetworkError::InconsistentAdjacency {
                    segment: segment_id,
                    node: node.id,
                }
                .into());
            }
        }
    }

    let mut seen: HashSet<LinkSegmentId> = HashSet::new();
    for &segment_id in flat {
        if !seen.insert(segment_id) {
            return Err(NetworkError::InconsistentAdjacency {
                segment: segment_id,
                node: endpoint(&segments[segment_id.slot()]),
            }
            .into());
        }
    }
    for segment in segments {
        if !seen.contains(&segment.id) {
            return Err(NetworkError::InconsistentAdjacency {
                segment: segment.id,
                node: endpoint(segment),
            }
            .into());
        }
    }

    Ok(())
}
