//! Core network data structures.

use nl_core::{LinkSegmentId, NodeId, Real};

use crate::error::NetworkError;

/// A junction in the road network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

/// Physical properties of a macroscopic (flow-based) link segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroscopicSegment {
    pub lanes: u32,
    pub capacity_per_lane_pcu_h: Real,
}

impl MacroscopicSegment {
    /// Total capacity over all lanes, in pcu/h.
    pub fn capacity_pcu_h(&self) -> Real {
        Real::from(self.lanes) * self.capacity_per_lane_pcu_h
    }
}

/// What a link segment models. Only macroscopic segments carry the
/// capacities a node model needs.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKind {
    Macroscopic(MacroscopicSegment),
    /// Vehicle-level segment with no aggregate capacity.
    Microscopic,
}

impl SegmentKind {
    pub fn as_macroscopic(&self) -> Option<&MacroscopicSegment> {
        match self {
            SegmentKind::Macroscopic(m) => Some(m),
            SegmentKind::Microscopic => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SegmentKind::Macroscopic(_) => "macroscopic",
            SegmentKind::Microscopic => "microscopic",
        }
    }
}

/// A directed link segment from `upstream` to `downstream`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSegment {
    pub id: LinkSegmentId,
    pub name: String,
    pub upstream: NodeId,
    pub downstream: NodeId,
    pub kind: SegmentKind,
}

/// A validated, immutable network.
///
/// Nodes and segments are stored densely by ID. For every node the incident
/// segments are kept in two flat adjacency lists (incoming, outgoing), each
/// ordered by segment ID, which is the order in which segments were added.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) segments: Vec<LinkSegment>,

    /// Node i's incoming segments are `incoming[incoming_offsets[i]..incoming_offsets[i+1]]`.
    pub(crate) incoming_offsets: Vec<usize>,
    pub(crate) incoming: Vec<LinkSegmentId>,

    pub(crate) outgoing_offsets: Vec<usize>,
    pub(crate) outgoing: Vec<LinkSegmentId>,
}

impl Network {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn segments(&self) -> &[LinkSegment] {
        &self.segments
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    /// Like [`Network::node`], but a missing node is an error.
    pub fn require_node(&self, id: NodeId) -> Result<&Node, NetworkError> {
        self.node(id).ok_or(NetworkError::NodeNotFound { node: id })
    }

    /// Get a segment by ID (returns None if ID out of bounds).
    pub fn segment(&self, id: LinkSegmentId) -> Option<&LinkSegment> {
        self.segments.get(id.slot())
    }

    /// Segments ending at `node`, in order of discovery.
    pub fn incoming_segments(&self, node: NodeId) -> &[LinkSegmentId] {
        Self::slice_for(node, &self.incoming_offsets, &self.incoming)
    }

    /// Segments starting at `node`, in order of discovery.
    pub fn outgoing_segments(&self, node: NodeId) -> &[LinkSegmentId] {
        Self::slice_for(node, &self.outgoing_offsets, &self.outgoing)
    }

    fn slice_for<'a>(
        node: NodeId,
        offsets: &[usize],
        flat: &'a [LinkSegmentId],
    ) -> &'a [LinkSegmentId] {
        let idx = node.slot();
        if idx + 1 >= offsets.len() {
            return &[];
        }
        &flat[offsets[idx]..offsets[idx + 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macroscopic_capacity_scales_with_lanes() {
        let m = MacroscopicSegment {
            lanes: 3,
            capacity_per_lane_pcu_h: 1800.0,
        };
        assert_eq!(m.capacity_pcu_h(), 5400.0);
    }

    #[test]
    fn segment_kind_accessors() {
        let macro_kind = SegmentKind::Macroscopic(MacroscopicSegment {
            lanes: 1,
            capacity_per_lane_pcu_h: 900.0,
        });
        assert!(macro_kind.as_macroscopic().is_some());
        assert_eq!(macro_kind.type_name(), "macroscopic");
        assert!(SegmentKind::Microscopic.as_macroscopic().is_none());
        assert_eq!(SegmentKind::Microscopic.type_name(), "microscopic");
    }
}
